// ============================================================
// Layer 4 - Data Loading
// ============================================================
// Turns the files in the model directory into domain types:
//
//   corpora.mm      -> MmCorpusLoader   -> Corpus
//   *.dict.txt      -> DictionaryLoader -> Dictionary
//
// Both are loaded once per run and then shared read-only.

/// Matrix Market bag-of-words corpus reader
pub mod mm_corpus;

/// Text-export vocabulary reader
pub mod dictionary;
