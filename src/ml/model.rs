// ============================================================
// Layer 5 - Fitted LDA Model
// ============================================================
// What a training run hands back: one word distribution per
// topic plus the vocabulary needed to label it.
//
//   topic_word[k][w] = P(word w | topic k)
//
// Each row sums to 1. The model is never persisted; the
// benchmark only asks it for top-N word lists.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::corpus::Dictionary;
use crate::domain::traits::{Topic, TopicModel};

#[derive(Debug, Clone)]
pub struct LdaModel {
    topic_word: Vec<Vec<f64>>,
    id2word:    Arc<Dictionary>,
}

impl LdaModel {
    pub fn new(topic_word: Vec<Vec<f64>>, id2word: Arc<Dictionary>) -> Self {
        Self { topic_word, id2word }
    }

    /// Word distribution of one topic.
    pub fn topic_distribution(&self, topic: usize) -> Option<&[f64]> {
        self.topic_word.get(topic).map(Vec::as_slice)
    }

    fn label(&self, id: usize) -> String {
        self.id2word
            .word(id)
            .map_or_else(|| id.to_string(), str::to_string)
    }
}

impl TopicModel for LdaModel {
    fn num_topics(&self) -> usize {
        self.topic_word.len()
    }

    fn show_topics(&self, num_topics: usize, num_words: usize) -> Vec<Topic> {
        self.topic_word
            .iter()
            .take(num_topics)
            .enumerate()
            .map(|(id, dist)| {
                let mut order: Vec<usize> = (0..dist.len()).collect();
                // Highest probability first; ties keep the lower term id first
                order.sort_by(|&a, &b| {
                    dist[b].partial_cmp(&dist[a]).unwrap_or(Ordering::Equal)
                });

                let words = order
                    .into_iter()
                    .take(num_words)
                    .map(|w| (self.label(w), dist[w]))
                    .collect();

                Topic { id, words }
            })
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LdaModel {
        let mut d = Dictionary::new(1);
        d.insert(0, "space");
        d.insert(1, "orbit");
        d.insert(2, "hockey");
        LdaModel::new(
            vec![vec![0.5, 0.4, 0.1], vec![0.1, 0.2, 0.7]],
            Arc::new(d),
        )
    }

    #[test]
    fn test_top_words_sorted_by_probability() {
        let topics = model().show_topics(2, 2);
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].id, 0);
        assert_eq!(topics[0].words[0].0, "space");
        assert_eq!(topics[0].words[1].0, "orbit");
        assert_eq!(topics[1].words[0].0, "hockey");
    }

    #[test]
    fn test_requests_are_clamped() {
        let m = model();
        let topics = m.show_topics(10, 10);
        assert_eq!(topics.len(), m.num_topics());
        assert!(topics.iter().all(|t| t.words.len() == 3));
    }
}
