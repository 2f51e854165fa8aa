// ============================================================
// Layer 6 - Run Manifest
// ============================================================
// Saves the effective configuration of a benchmark run as JSON
// next to the reports, so every results directory records which
// grid, pass count and toggles produced it.
//
// Output file: <out_dir>/bench_config.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::application::benchmark_use_case::{BenchConfig, SweepMode};

pub const MANIFEST_FILE: &str = "bench_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub config:       BenchConfig,
    pub mode:         SweepMode,
    pub combinations: usize,
    /// Seconds since the Unix epoch when the sweep started
    pub started_at:   u64,
}

impl RunManifest {
    pub fn new(config: &BenchConfig, mode: SweepMode) -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            config: config.clone(),
            mode,
            combinations: config.grid.combinations(),
            started_at,
        }
    }

    /// Write the manifest as pretty JSON into `out_dir`.
    pub fn save(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = out_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write run manifest to '{}'", path.display()))?;

        tracing::debug!("Saved run manifest to '{}'", path.display());
        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read run manifest '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}
