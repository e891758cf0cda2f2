//! Deterministic synthetic OHLCV series for development runs.
//!
//! A random walk seeded from the symbol name: the same symbol always gets
//! the same bars, different symbols get different ones.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seqlab_core::Bar;

pub fn generate_synthetic_bars(symbol: &str, start: DateTime<Utc>, n: usize) -> Vec<Bar> {
    let seed_bytes = blake3::hash(symbol.as_bytes());
    let seed: [u8; 32] = *seed_bytes.as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0_f64;

    for i in 0..n {
        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000.0..5_000_000.0);

        bars.push(Bar {
            timestamp: start + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
    }

    bars
}
