// ============================================================
// Layer 2 - Memory Runner
// ============================================================
// Constructs the model once with an RssProfiler attached and
// lets the profiler write its table into the memory report.
// The fitted model is dropped straight away; the report text
// is the only output.

use anyhow::Result;
use std::io::Write;

use crate::domain::lda_config::LdaConfig;
use crate::domain::traits::{MemoryProbe, ModelTrainer};
use crate::infra::rss_profiler::{MemorySummary, RssProfiler};

pub struct MemoryRunner<'t, T> {
    trainer: &'t T,
}

impl<'t, T: ModelTrainer> MemoryRunner<'t, T> {
    pub fn new(trainer: &'t T) -> Self {
        Self { trainer }
    }

    pub fn run(&self, config: &LdaConfig, out: &mut dyn Write) -> Result<MemorySummary> {
        writeln!(out, "Mem testing LDA with params; {}\n", config.describe())?;

        let mut profiler = RssProfiler::start(out)?;
        let model = self.trainer.train(config, &mut profiler)?;
        drop(model);
        profiler.checkpoint("drop fitted model")?;

        let summary = profiler.finish()?;
        tracing::debug!(
            "Memory run for {}: peak {:.3} MiB over {} checkpoints",
            config,
            summary.peak_mib,
            summary.rows
        );
        Ok(summary)
    }
}
