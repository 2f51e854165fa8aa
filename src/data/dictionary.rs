// ============================================================
// Layer 4 - Dictionary Loader
// ============================================================
// Reads a vocabulary exported as plain text:
//
//   <num_docs>
//   <id>\t<word>\t<doc_freq>
//   ...
//
// Only the id and word columns are needed to label topics;
// the document frequency column is accepted but not kept.

use anyhow::{bail, Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::corpus::Dictionary;

/// Loads a Dictionary from its text export.
pub struct DictionaryLoader {
    path: PathBuf,
}

impl DictionaryLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn load(&self) -> Result<Dictionary> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read dictionary '{}'", self.path.display()))?;

        let dictionary = parse_dictionary(&text)
            .with_context(|| format!("Malformed dictionary '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded dictionary '{}': {} words",
            self.path.display(),
            dictionary.len()
        );
        Ok(dictionary)
    }
}

pub fn parse_dictionary(text: &str) -> Result<Dictionary> {
    let mut lines = text.lines().enumerate();

    let num_docs = match lines.next() {
        Some((_, first)) => first
            .trim()
            .parse::<usize>()
            .with_context(|| format!("First line must be the document count, got '{}'", first))?,
        None => bail!("Dictionary file is empty"),
    };

    let mut dictionary = Dictionary::new(num_docs);

    for (lineno, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let (Some(id), Some(word)) = (fields.next(), fields.next()) else {
            bail!("Line {}: expected 'id<TAB>word<TAB>docfreq', got '{}'", lineno + 1, line);
        };

        let id: usize = id
            .trim()
            .parse()
            .with_context(|| format!("Line {}: bad term id '{}'", lineno + 1, id))?;

        if dictionary.word(id).is_some() {
            bail!("Line {}: duplicate term id {}", lineno + 1, id);
        }
        dictionary.insert(id, word);
    }

    Ok(dictionary)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_text_export() {
        let d = parse_dictionary("12\n0\tspace\t5\n1\tnasa\t3\n2\torbit\t2\n").unwrap();
        assert_eq!(d.num_docs, 12);
        assert_eq!(d.len(), 3);
        assert_eq!(d.word(1), Some("nasa"));
        assert_eq!(d.num_terms(), 3);
    }

    #[test]
    fn test_doc_freq_column_optional() {
        let d = parse_dictionary("1\n0\tonly\n").unwrap();
        assert_eq!(d.word(0), Some("only"));
    }

    #[test]
    fn test_bad_header() {
        assert!(parse_dictionary("0\tspace\t5\n").is_err());
    }

    #[test]
    fn test_duplicate_id() {
        let err = parse_dictionary("2\n0\ta\t1\n0\tb\t1\n").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.dict.txt");
        fs::write(&path, "2\n0\tspace\t1\n1\torbit\t1\n").unwrap();
        let d = DictionaryLoader::new(&path).load().unwrap();
        assert_eq!(d.len(), 2);
    }
}
