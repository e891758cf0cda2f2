//! Dataset persistence: JSON dataset files, a CSV sample index and a manifest.
//!
//! All persisted artifacts include a `schema_version` field. Unknown
//! versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use seqlab_core::{BuildReport, DatasetConfig, LabelDistribution, WindowDataset};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// File stem of the concatenated dataset. No per-symbol output may use it.
pub const COMBINED_STEM: &str = "full";

/// Symbol recorded inside the concatenated dataset file.
pub const COMBINED_SYMBOL: &str = "*";

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// One dataset on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub dataset: WindowDataset,
}

/// Per-symbol outcome recorded in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub symbol: String,
    pub file: Option<String>,
    pub fingerprint: Option<String>,
    pub report: Option<BuildReport>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub config: DatasetConfig,
    pub entries: Vec<ManifestEntry>,
    pub total_samples: usize,
    pub distribution: LabelDistribution,
}

/// `BTC/USDT` → `BTC_USDT`, safe as a file name component.
pub fn file_stem_for(symbol: &str) -> String {
    symbol
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}

// ─── JSON ───────────────────────────────────────────────────────────

pub fn export_json(file: &DatasetFile) -> Result<String> {
    serde_json::to_string(file).context("failed to serialize dataset to JSON")
}

/// Deserialize a dataset file, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<DatasetFile> {
    let file: DatasetFile =
        serde_json::from_str(json).context("failed to deserialize dataset JSON")?;
    if file.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            file.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(file)
}

// ─── CSV ────────────────────────────────────────────────────────────

/// One line per sample: index, label-row timestamp, label.
pub fn export_samples_csv(dataset: &WindowDataset) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["sample", "timestamp", "label"])?;
    for (i, (ts, label)) in dataset.timestamps.iter().zip(&dataset.labels).enumerate() {
        wtr.write_record([
            i.to_string(),
            ts.to_rfc3339(),
            label.as_i8().to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Files ──────────────────────────────────────────────────────────

/// Write `<stem>_dataset.json` and `<stem>_samples.csv`; return the JSON path.
pub fn save_dataset(output_dir: &Path, symbol: &str, dataset: &WindowDataset) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;
    let stem = file_stem_for(symbol);

    let json_path = output_dir.join(format!("{stem}_dataset.json"));
    let file = DatasetFile {
        schema_version: SCHEMA_VERSION,
        symbol: symbol.to_string(),
        dataset: dataset.clone(),
    };
    std::fs::write(&json_path, export_json(&file)?)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    let csv_path = output_dir.join(format!("{stem}_samples.csv"));
    std::fs::write(&csv_path, export_samples_csv(dataset)?)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    Ok(json_path)
}

/// Write the concatenated dataset as `full_dataset.json`, without a samples CSV.
pub fn save_combined(output_dir: &Path, dataset: &WindowDataset) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;
    let path = output_dir.join(format!("{COMBINED_STEM}_dataset.json"));
    let file = DatasetFile {
        schema_version: SCHEMA_VERSION,
        symbol: COMBINED_SYMBOL.to_string(),
        dataset: dataset.clone(),
    };
    std::fs::write(&path, export_json(&file)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

pub fn load_dataset(path: &Path) -> Result<DatasetFile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

pub fn save_manifest(output_dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;
    let path = output_dir.join("manifest.json");
    let json =
        serde_json::to_string_pretty(manifest).context("failed to serialize manifest")?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
