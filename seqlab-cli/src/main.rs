//! SeqLab CLI: build labeled window datasets from OHLCV series.
//!
//! Commands:
//! - `build`: run the dataset pipeline over CSV files and/or synthetic symbols
//! - `inspect`: print shape, label counts and fingerprint of a saved dataset

mod export;
mod ingest;
mod synthetic;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use seqlab_core::{build_dataset, BuildOutput, DatasetConfig, LabelDistribution, Table, WindowDataset};
use tracing::{error, info, warn};
use tracing_subscriber::prelude::*;

use crate::export::{Manifest, ManifestEntry, SCHEMA_VERSION};

#[derive(Parser)]
#[command(
    name = "seqlab",
    about = "SeqLab CLI: windowed feature/label datasets for sequence models"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build datasets from OHLCV CSV files and/or synthetic series.
    Build {
        /// Path to a TOML dataset config.
        #[arg(long)]
        config: PathBuf,

        /// OHLCV CSV files; the file stem is used as the symbol.
        #[arg(long = "input", num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Symbols to generate synthetic random-walk data for.
        #[arg(long, num_args = 1..)]
        synthetic: Vec<String>,

        /// Bars per synthetic symbol.
        #[arg(long, default_value_t = 1000)]
        bars: usize,

        /// Output directory for dataset files and the manifest.
        #[arg(long, default_value = "datasets")]
        output_dir: PathBuf,
    },
    /// Summarize a saved dataset file.
    Inspect {
        /// Path to a `*_dataset.json` file.
        path: PathBuf,
    },
}

/// One unit of work for the parallel build.
enum Job {
    Csv(PathBuf),
    Synthetic { symbol: String, bars: usize },
}

impl Job {
    fn symbol(&self) -> String {
        match self {
            Job::Csv(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            Job::Synthetic { symbol, .. } => symbol.clone(),
        }
    }

    fn load(&self) -> Result<Table> {
        match self {
            Job::Csv(path) => ingest::read_ohlcv_csv(path),
            Job::Synthetic { symbol, bars } => {
                let start = Utc
                    .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
                    .single()
                    .context("invalid synthetic start date")?;
                let series = synthetic::generate_synthetic_bars(symbol, start, *bars);
                Ok(Table::from_bars(&series))
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seqlab=info,seqlab_core=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            inputs,
            synthetic,
            bars,
            output_dir,
        } => {
            let summary = run_build(&config, inputs, synthetic, bars, &output_dir)?;
            println!("Manifest saved to: {}", summary.manifest_path.display());
            if summary.failures > 0 {
                for entry in &summary.manifest.entries {
                    if let Some(err) = &entry.error {
                        eprintln!("Error for {}: {err}", entry.symbol);
                    }
                }
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Inspect { path } => run_inspect(&path),
    }
}

/// Outcome of a `build` run. Per-symbol failures are counted, not raised.
struct BuildSummary {
    manifest: Manifest,
    manifest_path: PathBuf,
    failures: usize,
}

/// Every job must write to its own file, and none may take the combined name.
fn check_output_names(jobs: &[Job]) -> Result<()> {
    let mut seen: HashMap<String, String> = HashMap::new();
    for job in jobs {
        let symbol = job.symbol();
        // Lowercased so case-insensitive filesystems cannot collide either.
        let stem = export::file_stem_for(&symbol).to_lowercase();
        if stem == export::COMBINED_STEM {
            bail!("symbol '{symbol}' is reserved for the combined dataset; rename the input");
        }
        if let Some(previous) = seen.insert(stem.clone(), symbol.clone()) {
            bail!("symbols '{previous}' and '{symbol}' would both write {stem}_dataset.json");
        }
    }
    Ok(())
}

fn run_build(
    config_path: &Path,
    inputs: Vec<PathBuf>,
    synthetic: Vec<String>,
    bars: usize,
    output_dir: &Path,
) -> Result<BuildSummary> {
    if inputs.is_empty() && synthetic.is_empty() {
        bail!("nothing to build: pass --input and/or --synthetic");
    }

    let config = DatasetConfig::from_file(config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    info!(
        window_size = config.window_size,
        horizon = config.prediction_horizon,
        threshold = config.label_threshold,
        "config loaded"
    );

    let jobs: Vec<Job> = inputs
        .into_iter()
        .map(Job::Csv)
        .chain(
            synthetic
                .into_iter()
                .map(|symbol| Job::Synthetic { symbol, bars }),
        )
        .collect();
    check_output_names(&jobs)?;

    let results: Vec<(String, Result<BuildOutput>)> = jobs
        .par_iter()
        .map(|job| {
            let symbol = job.symbol();
            let outcome = job
                .load()
                .and_then(|table| build_dataset(&table, &config).map_err(Into::into))
                .with_context(|| format!("build failed for {symbol}"));
            (symbol, outcome)
        })
        .collect();

    let mut entries = Vec::with_capacity(results.len());
    let mut built: Vec<WindowDataset> = Vec::new();
    let mut failures = 0usize;

    for (symbol, outcome) in results {
        let saved = outcome.and_then(|output| {
            let path = export::save_dataset(output_dir, &symbol, &output.dataset)?;
            Ok((output, path))
        });
        match saved {
            Ok((output, path)) => {
                info!(
                    symbol = %symbol,
                    samples = output.report.samples,
                    distribution = %output.report.distribution,
                    path = %path.display(),
                    "dataset written"
                );
                entries.push(ManifestEntry {
                    symbol,
                    file: path.file_name().map(|f| f.to_string_lossy().to_string()),
                    fingerprint: Some(output.dataset.fingerprint()),
                    report: Some(output.report),
                    error: None,
                });
                if !output.dataset.is_empty() {
                    built.push(output.dataset);
                }
            }
            Err(e) => {
                error!(symbol = %symbol, "{e:#}");
                failures += 1;
                entries.push(ManifestEntry {
                    symbol,
                    file: None,
                    fingerprint: None,
                    report: None,
                    error: Some(format!("{e:#}")),
                });
            }
        }
    }

    let full = if built.is_empty() {
        None
    } else {
        Some(WindowDataset::concat(&built)?)
    };
    if let Some(full) = &full {
        let path = export::save_combined(output_dir, full)?;
        info!(samples = full.len(), path = %path.display(), "combined dataset written");
    }

    let manifest = Manifest {
        schema_version: SCHEMA_VERSION,
        config,
        entries,
        total_samples: full.as_ref().map_or(0, WindowDataset::len),
        distribution: full
            .as_ref()
            .map(WindowDataset::label_distribution)
            .unwrap_or_default(),
    };
    let manifest_path = export::save_manifest(output_dir, &manifest)?;
    if failures > 0 {
        warn!(failures, "some symbols failed; see manifest");
    }

    Ok(BuildSummary {
        manifest,
        manifest_path,
        failures,
    })
}

fn run_inspect(path: &Path) -> Result<()> {
    let file = export::load_dataset(path)?;
    let ds = &file.dataset;
    let (n, w, f) = ds.shape();
    let distribution: LabelDistribution = ds.label_distribution();

    println!("Symbol:       {}", file.symbol);
    println!("Schema:       v{}", file.schema_version);
    println!("Shape:        ({n}, {w}, {f})");
    println!("Labels:       {distribution}");
    if let (Some(first), Some(last)) = (ds.timestamps.first(), ds.timestamps.last()) {
        println!("Range:        {} to {}", first.to_rfc3339(), last.to_rfc3339());
    }
    println!("Features:     {}", ds.feature_names.join(", "));
    println!("Fingerprint:  {}", ds.fingerprint());
    Ok(())
}
