// ============================================================
// Layer 4 - Matrix Market Corpus Loader
// ============================================================
// Reads a bag-of-words corpus stored in Matrix Market
// coordinate format, one row per document, one column per term.
//
// File layout:
//   %%MatrixMarket matrix coordinate real general
//   % optional comment lines
//   <num_docs> <num_terms> <num_nonzero>
//   <doc> <term> <weight>      <- 1-based ids, one entry per line
//   ...
//
// Weights are rounded to integer token counts; entries that
// round to zero are dropped. Documents with no entries stay in
// the corpus as empty documents so document ids line up.

use anyhow::{bail, Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::corpus::{BowDocument, Corpus};

const BANNER: &str = "%%MatrixMarket";

/// Loads a Corpus from a `.mm` file.
pub struct MmCorpusLoader {
    path: PathBuf,
}

impl MmCorpusLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn load(&self) -> Result<Corpus> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;

        let corpus = parse_mm(&text)
            .with_context(|| format!("Malformed corpus '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded corpus '{}': {} documents, {} terms, {} tokens",
            self.path.display(),
            corpus.len(),
            corpus.num_terms,
            corpus.total_tokens()
        );
        Ok(corpus)
    }
}

/// Parse Matrix Market coordinate text into a Corpus.
pub fn parse_mm(text: &str) -> Result<Corpus> {
    let mut lines = text.lines().enumerate();

    // ── Banner ────────────────────────────────────────────────────────────────
    match lines.next() {
        Some((_, first)) if first.starts_with(BANNER) => {
            if !first.contains("coordinate") {
                bail!("Only coordinate Matrix Market files are supported");
            }
        }
        _ => bail!("Missing '{BANNER}' header line"),
    }

    // ── Size line (first non-comment line) ────────────────────────────────────
    let mut size_line = None;
    for (lineno, line) in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        size_line = Some((lineno, line));
        break;
    }
    let (lineno, size_line) = size_line.context("Missing size line")?;
    let sizes = parse_fields::<usize>(size_line, lineno)?;
    let [num_docs, num_terms, num_nnz] = sizes[..] else {
        bail!("Line {}: expected 'docs terms nnz', got '{}'", lineno + 1, size_line);
    };

    let mut documents = vec![BowDocument::default(); num_docs];
    let mut seen = 0usize;

    // ── Entries ───────────────────────────────────────────────────────────────
    for (lineno, line) in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [doc, term, weight] = fields[..] else {
            bail!("Line {}: expected 'doc term weight', got '{}'", lineno + 1, line);
        };

        let doc: usize = doc
            .parse()
            .with_context(|| format!("Line {}: bad document id '{}'", lineno + 1, doc))?;
        let term: usize = term
            .parse()
            .with_context(|| format!("Line {}: bad term id '{}'", lineno + 1, term))?;
        let weight: f64 = weight
            .parse()
            .with_context(|| format!("Line {}: bad weight '{}'", lineno + 1, weight))?;

        if doc == 0 || doc > num_docs || term == 0 || term > num_terms {
            bail!(
                "Line {}: entry ({}, {}) outside declared {}x{} matrix",
                lineno + 1, doc, term, num_docs, num_terms
            );
        }
        if weight < 0.0 || !weight.is_finite() {
            bail!("Line {}: weight {} is not a valid count", lineno + 1, weight);
        }

        seen += 1;
        let count = weight.round() as u32;
        if count > 0 {
            documents[doc - 1].terms.push((term - 1, count));
        }
    }

    if seen != num_nnz {
        tracing::warn!("Corpus declares {} entries but contains {}", num_nnz, seen);
    }

    Ok(Corpus::new(documents, num_terms))
}

fn parse_fields<T: std::str::FromStr>(line: &str, lineno: usize) -> Result<Vec<T>> {
    line.split_whitespace()
        .map(|f| {
            f.parse::<T>()
                .map_err(|_| anyhow::anyhow!("Line {}: '{}' is not a number", lineno + 1, f))
        })
        .collect()
}
