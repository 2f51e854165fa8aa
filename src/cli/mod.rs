// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses the command line with clap and hands a BenchConfig
// to the application layer. No benchmarking happens here.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::BenchArgs;

use crate::application::benchmark_use_case::BenchmarkUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "lda-bench",
    version,
    about = "Benchmark LDA training time, memory and topics across a parameter grid."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: BenchArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.args.into_config()?;
        tracing::info!(
            "Benchmarking corpus '{}' with {} timing passes per combination",
            config.corpus_path().display(),
            config.num_passes
        );

        let summary = BenchmarkUseCase::new(config).execute()?;

        println!(
            "Benchmark complete: {} parameter combinations ({:?}).",
            summary.assignments, summary.mode
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::benchmark_use_case::SweepMode;
    use std::fs;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["lda-bench"]).unwrap();
        let config = cli.args.into_config().unwrap();
        assert_eq!(config.num_words, 20);
        assert_eq!(config.num_passes, 3);
        assert_eq!(config.mode(), SweepMode::TimingAndMemory);
        assert_eq!(config.grid.combinations(), 125);
        assert!(config.corpus_path().ends_with("mini_newsgroup/corpora.mm"));
    }

    #[test]
    fn test_flags_and_short_options() {
        let cli = Cli::try_parse_from([
            "lda-bench", "--disable_memory", "--disable_topic_words", "-w", "7", "-p", "5",
        ])
        .unwrap();
        let config = cli.args.into_config().unwrap();
        assert!(config.disable_memory);
        assert!(config.disable_topic_words);
        assert!(!config.disable_timing);
        assert_eq!(config.num_words, 7);
        assert_eq!(config.num_passes, 5);
        assert_eq!(config.mode(), SweepMode::TimingOnly);
    }

    #[test]
    fn test_zero_passes_rejected() {
        assert!(Cli::try_parse_from(["lda-bench", "--num_passes", "0"]).is_err());
    }

    #[test]
    fn test_grid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, r#"{"num_topics": [5, 10], "iterations": [50], "workers": [null]}"#)
            .unwrap();

        let cli = Cli::try_parse_from(["lda-bench", "--grid", path.to_str().unwrap()]).unwrap();
        let config = cli.args.into_config().unwrap();
        assert_eq!(config.grid.combinations(), 2);
    }
}
