//! Word frequency index.
//!
//! Maps every unique pre-tokenized word to its occurrence count across the
//! corpus. Built once before training and immutable afterwards; it is half of
//! the trained artifact (alongside the merge rules).

use ahash::AHashMap;
use compact_str::CompactString;
use subtok_core::{Normalizer, Splitter};

/// Word -> occurrence count across the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyIndex {
    counts: AHashMap<CompactString, u64>,
}

impl WordFrequencyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from corpus documents.
    ///
    /// Each document is normalized, split into words, and every word's count
    /// incremented. An empty corpus yields an empty index.
    pub fn from_corpus<I, S>(corpus: I, splitter: &Splitter, normalizer: &Normalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for document in corpus {
            index.add_document(document.as_ref(), splitter, normalizer);
        }
        index
    }

    /// Add one document's words to the index.
    pub fn add_document(&mut self, document: &str, splitter: &Splitter, normalizer: &Normalizer) {
        let normalized = normalizer.normalize(document);
        for word in splitter.words(&normalized) {
            *self.counts.entry(CompactString::new(word)).or_insert(0) += 1;
        }
    }

    /// Record a word occurrence directly, bypassing pre-tokenization.
    pub fn add_word(&mut self, word: &str, count: u64) {
        *self.counts.entry(CompactString::new(word)).or_insert(0) += count;
    }

    /// Occurrence count for a word.
    #[inline]
    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of unique words.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the corpus yielded no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total word occurrences across the corpus.
    pub fn total_occurrences(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(word, count)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&CompactString, u64)> {
        self.counts.iter().map(|(word, &count)| (word, count))
    }
}
