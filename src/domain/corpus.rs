// ============================================================
// Layer 3 - Corpus and Dictionary Domain Types
// ============================================================
// Plain, read-only data. Loading lives in the data layer.
//
//   Corpus     - documents as bag-of-words (term id, count)
//   Dictionary - term id <-> word
//
// Both are shared via Arc across every model construction
// in a sweep, so nothing here is ever mutated after loading.

use std::collections::HashMap;

/// One document as a list of `(term_id, count)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BowDocument {
    pub terms: Vec<(usize, u32)>,
}

impl BowDocument {
    pub fn new(terms: Vec<(usize, u32)>) -> Self {
        Self { terms }
    }

    /// Total number of tokens in the document.
    pub fn token_count(&self) -> usize {
        self.terms.iter().map(|&(_, c)| c as usize).sum()
    }
}

/// A collection of bag-of-words documents.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub documents: Vec<BowDocument>,
    /// Vocabulary size declared by the corpus file
    pub num_terms: usize,
}

impl Corpus {
    pub fn new(documents: Vec<BowDocument>, num_terms: usize) -> Self {
        Self { documents, num_terms }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Highest term id referenced by any document, if any.
    pub fn max_term_id(&self) -> Option<usize> {
        self.documents
            .iter()
            .flat_map(|d| d.terms.iter().map(|&(id, _)| id))
            .max()
    }

    pub fn total_tokens(&self) -> usize {
        self.documents.iter().map(BowDocument::token_count).sum()
    }
}

/// Mapping between term ids and words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    id2token: HashMap<usize, String>,
    /// Number of documents the dictionary was built from
    pub num_docs: usize,
}

impl Dictionary {
    pub fn new(num_docs: usize) -> Self {
        Self {
            id2token: HashMap::new(),
            num_docs,
        }
    }

    pub fn insert(&mut self, id: usize, word: impl Into<String>) {
        self.id2token.insert(id, word.into());
    }

    pub fn word(&self, id: usize) -> Option<&str> {
        self.id2token.get(&id).map(String::as_str)
    }

    /// `1 + max id`, the width of a topic-word matrix over this vocabulary.
    pub fn num_terms(&self) -> usize {
        self.id2token.keys().max().map_or(0, |&m| m + 1)
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }
}
