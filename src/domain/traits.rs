// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The seams between the benchmark harness and its collaborators:
//
//   ModelTrainer - builds a fitted topic model from an LdaConfig
//   TopicModel   - a fitted model that can list its top words
//   MemoryProbe  - memory-sampling hook called during training
//
// The application layer only ever talks to these traits, so a
// different LDA backend or profiler can be plugged in without
// touching the runners.

use anyhow::Result;

use crate::domain::lda_config::LdaConfig;

// ─── Topic ────────────────────────────────────────────────────────────────────
/// One topic's top words, most probable first.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    /// 0-based internal topic id
    pub id: usize,
    pub words: Vec<(String, f64)>,
}

// ─── TopicModel ───────────────────────────────────────────────────────────────
/// A fitted topic model.
pub trait TopicModel {
    /// Number of topics the model was trained with.
    fn num_topics(&self) -> usize;

    /// Top `num_words` words for the first `num_topics` topics,
    /// in topic-id order.
    fn show_topics(&self, num_topics: usize, num_words: usize) -> Vec<Topic>;
}

// ─── MemoryProbe ──────────────────────────────────────────────────────────────
/// Hook a trainer calls at each notable step of a construction.
///
/// Implementations:
///   - RssProfiler -> samples resident memory and writes a table row
///   - NoopProbe   -> ignores every checkpoint (timing runs)
pub trait MemoryProbe {
    fn checkpoint(&mut self, label: &str) -> Result<()>;
}

/// Probe used when memory is not being measured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProbe;

impl MemoryProbe for NoopProbe {
    fn checkpoint(&mut self, _label: &str) -> Result<()> {
        Ok(())
    }
}

// ─── ModelTrainer ─────────────────────────────────────────────────────────────
/// Anything that can construct a fitted topic model.
///
/// Implementations:
///   - GibbsLdaTrainer -> collapsed Gibbs sampling over rayon workers
pub trait ModelTrainer {
    type Model: TopicModel;

    fn train(&self, config: &LdaConfig, probe: &mut dyn MemoryProbe) -> Result<Self::Model>;
}
