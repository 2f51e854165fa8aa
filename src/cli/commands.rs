// ============================================================
// Layer 1 - CLI Arguments
// ============================================================
// Every flag the benchmark accepts. The toggle and count flags
// keep their snake_case spelling (`--disable_timing`,
// `--num_passes`, ...) so existing sweep scripts keep working.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;

use crate::application::benchmark_use_case::BenchConfig;
use crate::domain::params::ParameterGrid;

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Don't measure timing
    #[arg(long = "disable_timing")]
    pub disable_timing: bool,

    /// Don't measure memory usage
    #[arg(long = "disable_memory")]
    pub disable_memory: bool,

    /// Don't write out top n words
    #[arg(long = "disable_topic_words")]
    pub disable_topic_words: bool,

    /// Number of top words to be displayed per topic
    #[arg(short = 'w', long = "num_words", default_value_t = 20)]
    pub num_words: usize,

    /// Number of passes to measure timing
    #[arg(
        short = 'p',
        long = "num_passes",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub num_passes: u32,

    /// Directory holding the dictionary and corpus
    #[arg(long = "models_dir", default_value = "../../Data/models/mini_newsgroup")]
    pub models_dir: String,

    /// Dictionary file (text export) inside the models directory
    #[arg(long, default_value = "twentyNewsGroup.dict.txt")]
    pub dictionary: String,

    /// Matrix Market corpus file inside the models directory
    #[arg(long, default_value = "corpora.mm")]
    pub corpus: String,

    /// Directory the reports are written to
    #[arg(long = "out_dir", default_value = "../../Data/out")]
    pub out_dir: String,

    /// JSON file with a custom parameter grid
    /// e.g. {"num_topics": [5, 10], "iterations": [50], "workers": [null, 2]}
    #[arg(long)]
    pub grid: Option<String>,
}

impl BenchArgs {
    /// Convert CLI args into the application-layer BenchConfig.
    /// Reading the optional grid file is the only fallible step.
    pub fn into_config(self) -> Result<BenchConfig> {
        let grid = match &self.grid {
            Some(path) => load_grid(path)?,
            None => ParameterGrid::benchmark_default(),
        };

        Ok(BenchConfig {
            models_dir:          self.models_dir,
            dictionary_file:     self.dictionary,
            corpus_file:         self.corpus,
            out_dir:             self.out_dir,
            grid,
            num_words:           self.num_words,
            num_passes:          self.num_passes as usize,
            disable_timing:      self.disable_timing,
            disable_memory:      self.disable_memory,
            disable_topic_words: self.disable_topic_words,
        })
    }
}

fn load_grid(path: &str) -> Result<ParameterGrid> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read grid file '{}'", path))?;
    let grid: ParameterGrid = serde_json::from_str(&json)
        .with_context(|| format!("Grid file '{}' is not a valid parameter grid", path))?;
    tracing::info!("Loaded grid from '{}' ({} combinations)", path, grid.combinations());
    Ok(grid)
}
