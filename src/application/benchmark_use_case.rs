// ============================================================
// Layer 2 - BenchmarkUseCase
// ============================================================
// Drives the whole sweep:
//
//   Step 1: Validate the parameter grid
//   Step 2: Load dictionary and corpus        (Layer 4 - data)
//   Step 3: Open report sinks, save manifest  (Layer 6 - infra)
//   Step 4: For every grid assignment, in order:
//             a. TimingRunner   -> timing line, last fitted model
//             b. MemoryRunner   -> memory table (timing+memory mode only)
//             c. TopicReporter  -> top words of the model from (a)
//             d. flush all sinks
//
// Modes, chosen from the CLI toggles:
//   TimingAndMemory - timing and memory both enabled
//   TimingOnly      - --disable_memory
//   Idle            - --disable_timing with memory still enabled;
//                     topics need a timed fit, so nothing runs
//
// The first error aborts the rest of the sweep. Lines already
// flushed stay in the report files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};

use crate::application::{
    memory_runner::MemoryRunner,
    timing_runner::TimingRunner,
    topic_reporter::TopicReporter,
};
use crate::data::{dictionary::DictionaryLoader, mm_corpus::MmCorpusLoader};
use crate::domain::{
    lda_config::LdaConfig,
    params::ParameterGrid,
    traits::ModelTrainer,
};
use crate::infra::{
    report_sinks::{ReportSinks, SinkToggles},
    run_manifest::RunManifest,
};
use crate::ml::gibbs::GibbsLdaTrainer;

// ─── Benchmark Configuration ─────────────────────────────────────────────────
// Everything one run needs. Serialisable so the run manifest
// can record it next to the reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    pub models_dir:          String,
    pub dictionary_file:     String,
    pub corpus_file:         String,
    pub out_dir:             String,
    pub grid:                ParameterGrid,
    pub num_words:           usize,
    pub num_passes:          usize,
    pub disable_timing:      bool,
    pub disable_memory:      bool,
    pub disable_topic_words: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            models_dir:          "../../Data/models/mini_newsgroup".to_string(),
            dictionary_file:     "twentyNewsGroup.dict.txt".to_string(),
            corpus_file:         "corpora.mm".to_string(),
            out_dir:             "../../Data/out".to_string(),
            grid:                ParameterGrid::benchmark_default(),
            num_words:           20,
            num_passes:          3,
            disable_timing:      false,
            disable_memory:      false,
            disable_topic_words: false,
        }
    }
}

impl BenchConfig {
    pub fn dictionary_path(&self) -> PathBuf {
        PathBuf::from(&self.models_dir).join(&self.dictionary_file)
    }

    pub fn corpus_path(&self) -> PathBuf {
        PathBuf::from(&self.models_dir).join(&self.corpus_file)
    }

    pub fn mode(&self) -> SweepMode {
        SweepMode::from_flags(self.disable_timing, self.disable_memory)
    }

    fn sink_toggles(&self) -> SinkToggles {
        SinkToggles {
            timing: !self.disable_timing,
            memory: !self.disable_memory,
            topics: !self.disable_topic_words,
        }
    }
}

/// Which runners each assignment goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepMode {
    TimingAndMemory,
    TimingOnly,
    Idle,
}

impl SweepMode {
    pub fn from_flags(disable_timing: bool, disable_memory: bool) -> Self {
        match (disable_timing, disable_memory) {
            (false, false) => SweepMode::TimingAndMemory,
            (_, true)      => SweepMode::TimingOnly,
            (true, false)  => SweepMode::Idle,
        }
    }
}

/// What a finished sweep did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepSummary {
    pub mode:        SweepMode,
    pub assignments: usize,
}

// ─── BenchmarkUseCase ────────────────────────────────────────────────────────
pub struct BenchmarkUseCase {
    config: BenchConfig,
}

impl BenchmarkUseCase {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Run the sweep with the Gibbs sampler backend.
    pub fn execute(&self) -> Result<SweepSummary> {
        self.execute_with(&GibbsLdaTrainer::new())
    }

    /// Run the sweep with any trainer.
    pub fn execute_with<T: ModelTrainer>(&self, trainer: &T) -> Result<SweepSummary> {
        let cfg = &self.config;
        let mode = cfg.mode();

        // ── Step 1: Validate grid ─────────────────────────────────────────────
        cfg.grid
            .validate_benchmark_keys()
            .context("Invalid parameter grid")?;

        // ── Step 2: Load inputs ───────────────────────────────────────────────
        let dictionary = Arc::new(DictionaryLoader::new(cfg.dictionary_path()).load()?);
        let corpus     = Arc::new(MmCorpusLoader::new(cfg.corpus_path()).load()?);

        // ── Step 3: Sinks and manifest ────────────────────────────────────────
        let out_dir = PathBuf::from(&cfg.out_dir);
        let mut sinks = ReportSinks::open(&out_dir, cfg.sink_toggles())?;
        RunManifest::new(cfg, mode).save(&out_dir)?;
        tracing::info!(
            "Sweeping {} parameter combinations in {:?} mode, reports: {:?}",
            cfg.grid.combinations(),
            mode,
            sinks.files()
        );

        if mode == SweepMode::Idle {
            tracing::warn!(
                "Timing is disabled but memory is not; topics need a timed fit, nothing to run"
            );
            return Ok(SweepSummary { mode, assignments: 0 });
        }

        // ── Step 4: Sweep ─────────────────────────────────────────────────────
        let timing   = TimingRunner::new(trainer, cfg.num_passes);
        let memory   = MemoryRunner::new(trainer);
        let reporter = TopicReporter::new(cfg.num_words);
        let mut done = 0;

        for params in cfg.grid.iter() {
            tracing::info!("Starting with params {}", params);
            let lda = LdaConfig::from_assignment(&params, corpus.clone(), dictionary.clone())?;

            let fit = timing
                .run(&lda, sinks.timing())
                .with_context(|| format!("Timing run failed for {params}"))?;

            if mode == SweepMode::TimingAndMemory {
                memory
                    .run(&lda, sinks.memory())
                    .with_context(|| format!("Memory run failed for {params}"))?;
            }
            tracing::info!("Completed");

            reporter.report(&fit.model, &lda, sinks.topics())?;
            sinks.flush()?;
            done += 1;
        }

        tracing::info!("Sweep finished: {} assignments", done);
        Ok(SweepSummary { mode, assignments: done })
    }
}
