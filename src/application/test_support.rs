// Shared fakes for the application-layer unit tests.

use anyhow::{bail, Result};
use std::cell::Cell;
use std::sync::Arc;

use crate::domain::corpus::{Corpus, Dictionary};
use crate::domain::lda_config::LdaConfig;
use crate::domain::traits::{MemoryProbe, ModelTrainer, Topic, TopicModel};

pub fn lda_config(num_topics: usize, iterations: usize, workers: Option<usize>) -> LdaConfig {
    LdaConfig {
        num_topics,
        iterations,
        workers,
        corpus: Arc::new(Corpus::default()),
        id2word: Arc::new(Dictionary::default()),
    }
}

/// Model that remembers which construction produced it.
#[derive(Debug)]
pub struct FakeModel {
    pub construction: usize,
    pub num_topics:   usize,
}

impl TopicModel for FakeModel {
    fn num_topics(&self) -> usize {
        self.num_topics
    }

    /// Words are tagged `c<construction>` so tests can tell fits apart.
    fn show_topics(&self, num_topics: usize, num_words: usize) -> Vec<Topic> {
        (0..num_topics.min(self.num_topics))
            .map(|id| Topic {
                id,
                words: (0..num_words)
                    .map(|w| (format!("c{}t{}w{}", self.construction, id, w), 0.0))
                    .collect(),
            })
            .collect()
    }
}

/// Trainer that counts constructions and can be told to fail.
#[derive(Debug, Default)]
pub struct CountingTrainer {
    count:       Cell<usize>,
    fail_on:     Option<usize>,
    fail_topics: Option<usize>,
}

impl CountingTrainer {
    /// Fail on the n-th construction (1-based).
    pub fn failing_on(n: usize) -> Self {
        Self { fail_on: Some(n), ..Self::default() }
    }

    /// Fail every construction with this topic count.
    pub fn failing_for_topics(num_topics: usize) -> Self {
        Self { fail_topics: Some(num_topics), ..Self::default() }
    }

    pub fn constructions(&self) -> usize {
        self.count.get()
    }
}

impl ModelTrainer for CountingTrainer {
    type Model = FakeModel;

    fn train(&self, config: &LdaConfig, probe: &mut dyn MemoryProbe) -> Result<FakeModel> {
        let n = self.count.get() + 1;
        self.count.set(n);

        if self.fail_on == Some(n) || self.fail_topics == Some(config.num_topics) {
            bail!("simulated failure on construction {n}");
        }
        probe.checkpoint("fake train")?;

        Ok(FakeModel {
            construction: n,
            num_topics:   config.num_topics,
        })
    }
}
