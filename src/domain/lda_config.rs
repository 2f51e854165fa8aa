// ============================================================
// Layer 3 - LDA Configuration
// ============================================================
// The explicit set of options handed to a topic-model trainer:
//
//   num_topics - number of topics K
//   iterations - inner sampling / optimisation sweeps
//   workers    - parallelism hint (None = use every core)
//   corpus     - input documents
//   id2word    - vocabulary
//
// Built from one ParameterAssignment plus the shared corpus and
// dictionary. Invalid assignments are rejected here, before any
// model construction starts.

use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};

use crate::domain::corpus::{Corpus, Dictionary};
use crate::domain::params::{ParameterAssignment, ITERATIONS, NUM_TOPICS, WORKERS};

#[derive(Debug, Clone)]
pub struct LdaConfig {
    pub num_topics: usize,
    pub iterations: usize,
    pub workers:    Option<usize>,
    pub corpus:     Arc<Corpus>,
    pub id2word:    Arc<Dictionary>,
}

impl LdaConfig {
    /// Resolve an assignment into a trainer configuration.
    pub fn from_assignment(
        params:  &ParameterAssignment,
        corpus:  Arc<Corpus>,
        id2word: Arc<Dictionary>,
    ) -> Result<Self> {
        let num_topics = required(params, NUM_TOPICS)?;
        let iterations = required(params, ITERATIONS)?;
        let workers = params
            .get(WORKERS)
            .and_then(|v| v.as_int())
            .map(|w| w as usize);

        if num_topics == 0 {
            bail!("num_topics must be at least 1 (got {params})");
        }
        if workers == Some(0) {
            bail!("workers must be at least 1 or None (got {params})");
        }

        Ok(Self {
            num_topics,
            iterations,
            workers,
            corpus,
            id2word,
        })
    }

    /// `workers` rendered the way reports print it (`None` or a number).
    pub fn workers_label(&self) -> String {
        self.workers
            .map_or_else(|| "None".to_string(), |w| w.to_string())
    }

    /// The `num_topics:.., num_iterations:.., num_workers:..` fragment
    /// shared by log lines and report headers.
    pub fn describe(&self) -> String {
        format!(
            "num_topics:{}, num_iterations:{}, num_workers:{}",
            self.num_topics,
            self.iterations,
            self.workers_label()
        )
    }
}

impl fmt::Display for LdaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

fn required(params: &ParameterAssignment, name: &str) -> Result<usize> {
    params
        .get(name)
        .ok_or_else(|| anyhow!("Parameter '{name}' missing from assignment {params}"))?
        .as_int()
        .map(|v| v as usize)
        .ok_or_else(|| anyhow!("Parameter '{name}' cannot be None (assignment {params})"))
}
