// ============================================================
// Layer 5 - Collapsed Gibbs LDA Trainer
// ============================================================
// Fits LDA by collapsed Gibbs sampling. Each token's topic is
// resampled from
//
//   p(z = k) ∝ (n_dk + α) * (n_kw + η) / (n_k + V·η)
//
// with symmetric priors α = η = 1/K.
//
// Parallelism (the `workers` knob):
//   Documents are split into one contiguous shard per worker.
//   Every sweep, each worker samples its shard against a private
//   copy of the global topic-word counts; afterwards the
//   per-worker changes are added back into the global counts.
//   With one worker this is exact Gibbs sampling.
//
// Memory checkpoints are reported to the MemoryProbe at each
// allocation step and roughly every tenth sweep.

use anyhow::{bail, Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::domain::lda_config::LdaConfig;
use crate::domain::traits::{MemoryProbe, ModelTrainer};
use crate::ml::model::LdaModel;

/// Sampler state for one document.
#[derive(Debug, Clone)]
struct DocState {
    /// Term id of every token, expanded from the bag of words
    tokens: Vec<usize>,
    /// Current topic of every token
    topics: Vec<usize>,
    /// Tokens per topic in this document (n_dk)
    topic_counts: Vec<u32>,
}

/// Corpus-wide counts shared between workers.
#[derive(Debug, Clone)]
struct GlobalCounts {
    /// n_kw, row-major K x V
    topic_word: Vec<u32>,
    /// n_k
    topic_totals: Vec<u32>,
}

#[derive(Debug, Clone, Copy)]
struct Priors {
    num_topics: usize,
    num_terms:  usize,
    alpha:      f64,
    eta:        f64,
}

/// The benchmark's LDA backend.
#[derive(Debug, Clone, Default)]
pub struct GibbsLdaTrainer {
    seed: Option<u64>,
}

impl GibbsLdaTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the random seed so repeated constructions are identical.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl ModelTrainer for GibbsLdaTrainer {
    type Model = LdaModel;

    fn train(&self, config: &LdaConfig, probe: &mut dyn MemoryProbe) -> Result<LdaModel> {
        probe.checkpoint("train: start")?;

        let num_terms = config.id2word.num_terms();
        if let Some(max_id) = config.corpus.max_term_id() {
            if max_id >= num_terms {
                bail!(
                    "Corpus references term id {} but the dictionary only has {} terms",
                    max_id,
                    num_terms
                );
            }
        }

        let k = config.num_topics;
        if k == 0 {
            bail!("Cannot train LDA with zero topics");
        }
        let priors = Priors {
            num_topics: k,
            num_terms,
            alpha: 1.0 / k as f64,
            eta:   1.0 / k as f64,
        };

        let threads = config.workers.unwrap_or_else(rayon::current_num_threads);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .with_context(|| format!("Cannot build a pool of {threads} workers"))?;
        probe.checkpoint("train: build worker pool")?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // ── Random initial assignment ─────────────────────────────────────────
        let mut counts = GlobalCounts {
            topic_word:   vec![0; k * num_terms],
            topic_totals: vec![0; k],
        };
        let mut docs: Vec<DocState> = Vec::with_capacity(config.corpus.len());
        for bow in &config.corpus.documents {
            let tokens: Vec<usize> = bow
                .terms
                .iter()
                .flat_map(|&(id, count)| std::iter::repeat(id).take(count as usize))
                .collect();
            let mut state = DocState {
                topics:       Vec::with_capacity(tokens.len()),
                topic_counts: vec![0; k],
                tokens,
            };
            for &w in &state.tokens {
                let z = rng.gen_range(0..k);
                state.topics.push(z);
                state.topic_counts[z] += 1;
                counts.topic_word[z * num_terms + w] += 1;
                counts.topic_totals[z] += 1;
            }
            docs.push(state);
        }
        probe.checkpoint("train: random topic assignment")?;

        // ── Sweeps ────────────────────────────────────────────────────────────
        let shard_len = docs.len().div_ceil(threads).max(1);
        let num_shards = docs.len().div_ceil(shard_len);
        let report_every = (config.iterations / 10).max(1);

        for sweep in 0..config.iterations {
            let seeds: Vec<u64> = (0..num_shards).map(|_| rng.gen()).collect();
            let snapshot = &counts;

            let locals: Vec<GlobalCounts> = pool.install(|| {
                docs.par_chunks_mut(shard_len)
                    .zip(seeds.par_iter())
                    .map(|(shard, &seed)| {
                        let mut local = snapshot.clone();
                        let mut shard_rng = StdRng::seed_from_u64(seed);
                        let mut weights = vec![0.0f64; priors.num_topics];
                        for doc in shard.iter_mut() {
                            sample_document(doc, &mut local, &priors, &mut weights, &mut shard_rng);
                        }
                        local
                    })
                    .collect()
            });

            counts = merge_counts(&counts, &locals);

            if sweep == 0 || (sweep + 1) % report_every == 0 {
                tracing::debug!("Sweep {}/{} done ({})", sweep + 1, config.iterations, config);
                probe.checkpoint(&format!("sweep {}/{}", sweep + 1, config.iterations))?;
            }
        }

        // ── Topic-word distributions ──────────────────────────────────────────
        let v_eta = num_terms as f64 * priors.eta;
        let topic_word: Vec<Vec<f64>> = (0..k)
            .map(|t| {
                let denom = counts.topic_totals[t] as f64 + v_eta;
                counts.topic_word[t * num_terms..(t + 1) * num_terms]
                    .iter()
                    .map(|&n| (n as f64 + priors.eta) / denom)
                    .collect()
            })
            .collect();
        probe.checkpoint("train: normalise topic-word matrix")?;

        Ok(LdaModel::new(topic_word, config.id2word.clone()))
    }
}

/// Resample every token of one document against `counts`.
fn sample_document(
    doc:     &mut DocState,
    counts:  &mut GlobalCounts,
    priors:  &Priors,
    weights: &mut [f64],
    rng:     &mut StdRng,
) {
    let v = priors.num_terms;
    let v_eta = v as f64 * priors.eta;

    for i in 0..doc.tokens.len() {
        let w = doc.tokens[i];
        let old = doc.topics[i];

        doc.topic_counts[old] -= 1;
        counts.topic_word[old * v + w] -= 1;
        counts.topic_totals[old] -= 1;

        // Cumulative weights, so a single uniform draw picks the topic
        let mut total = 0.0;
        for t in 0..priors.num_topics {
            total += (doc.topic_counts[t] as f64 + priors.alpha)
                * (counts.topic_word[t * v + w] as f64 + priors.eta)
                / (counts.topic_totals[t] as f64 + v_eta);
            weights[t] = total;
        }
        let u = rng.gen::<f64>() * total;
        let new = weights
            .partition_point(|&c| c <= u)
            .min(priors.num_topics - 1);

        doc.topics[i] = new;
        doc.topic_counts[new] += 1;
        counts.topic_word[new * v + w] += 1;
        counts.topic_totals[new] += 1;
    }
}

/// Fold each worker's changes (local - base) into a copy of `base`.
///
/// Intermediate values may wrap, but the true result is always a
/// valid count because workers own disjoint tokens.
fn merge_counts(base: &GlobalCounts, locals: &[GlobalCounts]) -> GlobalCounts {
    let mut merged = base.clone();
    for local in locals {
        for ((m, &l), &b) in merged.topic_word.iter_mut().zip(&local.topic_word).zip(&base.topic_word) {
            *m = m.wrapping_add(l).wrapping_sub(b);
        }
        for ((m, &l), &b) in merged.topic_totals.iter_mut().zip(&local.topic_totals).zip(&base.topic_totals) {
            *m = m.wrapping_add(l).wrapping_sub(b);
        }
    }
    merged
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::corpus::{BowDocument, Corpus, Dictionary};
    use crate::domain::traits::{NoopProbe, TopicModel};
    use std::sync::Arc;

    /// Two clearly separated vocabularies: space words and hockey words.
    fn config(num_topics: usize, iterations: usize, workers: Option<usize>) -> LdaConfig {
        let mut d = Dictionary::new(8);
        for (id, w) in ["space", "orbit", "nasa", "hockey", "goal", "puck"].iter().enumerate() {
            d.insert(id, *w);
        }
        let mut docs = Vec::new();
        for _ in 0..4 {
            docs.push(BowDocument::new(vec![(0, 5), (1, 4), (2, 3)]));
            docs.push(BowDocument::new(vec![(3, 5), (4, 4), (5, 3)]));
        }
        LdaConfig {
            num_topics,
            iterations,
            workers,
            corpus: Arc::new(Corpus::new(docs, 6)),
            id2word: Arc::new(d),
        }
    }

    struct CountingProbe(Vec<String>);

    impl MemoryProbe for CountingProbe {
        fn checkpoint(&mut self, label: &str) -> Result<()> {
            self.0.push(label.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_distributions_are_normalised() {
        let model = GibbsLdaTrainer::with_seed(7)
            .train(&config(3, 20, Some(1)), &mut NoopProbe)
            .unwrap();
        assert_eq!(model.num_topics(), 3);
        for t in 0..3 {
            let sum: f64 = model.topic_distribution(t).unwrap().iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_multiple_workers_preserve_token_count() {
        let cfg = config(2, 15, Some(3));
        let model = GibbsLdaTrainer::with_seed(11).train(&cfg, &mut NoopProbe).unwrap();
        let topics = model.show_topics(2, 6);
        assert_eq!(topics.len(), 2);
        assert!(topics.iter().all(|t| t.words.len() == 6));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let cfg = config(2, 10, Some(1));
        let a = GibbsLdaTrainer::with_seed(3).train(&cfg, &mut NoopProbe).unwrap();
        let b = GibbsLdaTrainer::with_seed(3).train(&cfg, &mut NoopProbe).unwrap();
        assert_eq!(a.topic_distribution(0), b.topic_distribution(0));
    }

    #[test]
    fn test_reports_checkpoints() {
        let mut probe = CountingProbe(Vec::new());
        GibbsLdaTrainer::with_seed(1)
            .train(&config(2, 20, Some(2)), &mut probe)
            .unwrap();
        assert_eq!(probe.0.first().map(String::as_str), Some("train: start"));
        assert!(probe.0.iter().any(|l| l == "sweep 20/20"));
        assert_eq!(
            probe.0.last().map(String::as_str),
            Some("train: normalise topic-word matrix")
        );
    }

    #[test]
    fn test_term_outside_dictionary_fails() {
        let mut cfg = config(2, 5, Some(1));
        cfg.corpus = Arc::new(Corpus::new(vec![BowDocument::new(vec![(99, 1)])], 100));
        assert!(GibbsLdaTrainer::new().train(&cfg, &mut NoopProbe).is_err());
    }

    #[test]
    fn test_empty_corpus_trains() {
        let mut cfg = config(4, 5, None);
        cfg.corpus = Arc::new(Corpus::default());
        let model = GibbsLdaTrainer::new().train(&cfg, &mut NoopProbe).unwrap();
        assert_eq!(model.num_topics(), 4);
    }

    #[test]
    fn test_merge_adds_worker_deltas() {
        let base = GlobalCounts { topic_word: vec![2, 2], topic_totals: vec![2, 2] };
        // worker 1 moved a token from topic 0 to topic 1
        let a = GlobalCounts { topic_word: vec![1, 3], topic_totals: vec![1, 3] };
        // worker 2 moved a token from topic 1 to topic 0
        let b = GlobalCounts { topic_word: vec![3, 1], topic_totals: vec![3, 1] };
        let merged = merge_counts(&base, &[a, b]);
        assert_eq!(merged.topic_word, vec![2, 2]);
        assert_eq!(merged.topic_totals, vec![2, 2]);
    }
}
