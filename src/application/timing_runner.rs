// ============================================================
// Layer 2 - Timing Runner
// ============================================================
// Constructs the model `num_passes` times for one configuration
// and appends a single CSV-like line to the timing report:
//
//   num_topics, iterations, workers, t0, t1, ..., t(p-1)
//
// Each t is wall-clock seconds with three decimals. The sink is
// flushed after every pass so a slow sweep shows progress.
//
// Only the model from the LAST pass is kept and handed on to
// topic reporting. Earlier fits are dropped as soon as the next
// one replaces them.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::time::{Duration, Instant};

use crate::domain::lda_config::LdaConfig;
use crate::domain::traits::{ModelTrainer, NoopProbe};

/// The retained model plus the time every pass took.
#[derive(Debug)]
pub struct TimedFit<M> {
    pub model:     M,
    pub durations: Vec<Duration>,
}

pub struct TimingRunner<'t, T> {
    trainer:    &'t T,
    num_passes: usize,
}

impl<'t, T: ModelTrainer> TimingRunner<'t, T> {
    pub fn new(trainer: &'t T, num_passes: usize) -> Self {
        Self { trainer, num_passes }
    }

    pub fn run(&self, config: &LdaConfig, out: &mut dyn Write) -> Result<TimedFit<T::Model>> {
        if self.num_passes == 0 {
            bail!("Timing needs at least one pass");
        }

        write!(
            out,
            "{}, {}, {}",
            config.num_topics,
            config.iterations,
            config.workers_label()
        )?;

        let mut last = None;
        let mut durations = Vec::with_capacity(self.num_passes);

        for pass in 1..=self.num_passes {
            let start = Instant::now();
            let model = self.trainer.train(config, &mut NoopProbe)?;
            let elapsed = start.elapsed();

            write!(out, ", {:.3}", elapsed.as_secs_f64())?;
            out.flush()?;
            tracing::debug!("Pass {}/{} took {:?} ({})", pass, self.num_passes, elapsed, config);

            durations.push(elapsed);
            last = Some(model);
        }
        writeln!(out)?;

        tracing::info!("Completed LDA with params; {}", config.describe());

        let model = last.context("No model was constructed")?;
        Ok(TimedFit { model, durations })
    }
}
