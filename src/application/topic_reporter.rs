// ============================================================
// Layer 2 - Topic Reporter
// ============================================================
// Appends one block per parameter assignment to the topic report:
//
//   Top 20 words of LDA model with params; num_topics:5, ...
//
//   1. Topic id # 0 ['space', 'orbit', ...]
//   2. Topic id # 1 ['hockey', 'goal', ...]
//
// Probabilities are dropped; only the ranked words are written.

use anyhow::Result;
use std::io::Write;

use crate::domain::lda_config::LdaConfig;
use crate::domain::traits::{Topic, TopicModel};

pub struct TopicReporter {
    num_words: usize,
}

impl TopicReporter {
    pub fn new(num_words: usize) -> Self {
        Self { num_words }
    }

    /// Pull the top words from `model` and write them out.
    pub fn report(&self, model: &impl TopicModel, config: &LdaConfig, out: &mut dyn Write) -> Result<()> {
        let topics = model.show_topics(config.num_topics, self.num_words);
        self.write_topics(&topics, config, out)
    }

    pub fn write_topics(&self, topics: &[Topic], config: &LdaConfig, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "\nTop {} words of LDA model with params; {}\n",
            self.num_words,
            config.describe()
        )?;

        for topic in topics {
            writeln!(
                out,
                "{}. Topic id # {} {}",
                topic.id + 1,
                topic.id,
                render_words(&topic.words)
            )?;
        }
        Ok(())
    }
}

/// `['a', 'b', ...]`, quoting each word.
fn render_words(words: &[(String, f64)]) -> String {
    let quoted: Vec<String> = words
        .iter()
        .map(|(w, _)| format!("'{}'", w.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::lda_config;

    fn topics(k: usize, w: usize) -> Vec<Topic> {
        (0..k)
            .map(|id| Topic {
                id,
                words: (0..w).map(|i| (format!("t{id}w{i}"), 1.0 / (i + 1) as f64)).collect(),
            })
            .collect()
    }

    #[test]
    fn test_k_lines_of_w_words() {
        let mut out: Vec<u8> = Vec::new();
        TopicReporter::new(4)
            .write_topics(&topics(3, 4), &lda_config(3, 50, None), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let topic_lines: Vec<&str> = text.lines().filter(|l| l.contains("Topic id #")).collect();
        assert_eq!(topic_lines.len(), 3);
        for line in &topic_lines {
            let list = &line[line.find('[').unwrap()..];
            assert_eq!(list.matches('\'').count(), 4 * 2);
        }
        assert_eq!(topic_lines[0], "1. Topic id # 0 ['t0w0', 't0w1', 't0w2', 't0w3']");
        assert!(topic_lines[2].starts_with("3. Topic id # 2 "));
    }

    #[test]
    fn test_header_names_params() {
        let mut out: Vec<u8> = Vec::new();
        TopicReporter::new(20)
            .write_topics(&topics(1, 1), &lda_config(5, 100, Some(4)), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(
            "\nTop 20 words of LDA model with params; num_topics:5, num_iterations:100, num_workers:4\n\n"
        ));
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(
            render_words(&[("don't".to_string(), 0.5), ("x".to_string(), 0.1)]),
            "['don\\'t', 'x']"
        );
    }
}
