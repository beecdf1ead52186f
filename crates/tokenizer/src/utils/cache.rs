//! Token cache for repeated words.
//!
//! Corpus words repeat heavily and the merge-rule replay is the hot path of
//! tokenization, so recently tokenized words are memoized in a small LRU
//! cache keyed by the word's surface form.

use std::collections::HashMap;
use subtok_core::Symbol;

/// LRU cache mapping a word to its token sequence.
///
/// HashMap-based with a fixed capacity; the least recently used entry is
/// evicted once the cache is full.
pub struct TokenCache {
    /// Word -> token sequence
    cache: HashMap<String, Vec<Symbol>>,
    /// Maximum number of entries
    capacity: usize,
    /// Access order, oldest first
    insertion_order: Vec<String>,
}

impl TokenCache {
    /// Create a cache with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(capacity),
            capacity,
            insertion_order: Vec::with_capacity(capacity),
        }
    }

    /// Create a cache with the default capacity (1000).
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    /// Get the cached tokens for a word, refreshing its recency on a hit.
    pub fn get(&mut self, word: &str) -> Option<Vec<Symbol>> {
        let cached = self.cache.get(word).cloned()?;
        if let Some(pos) = self.insertion_order.iter().position(|w| w == word) {
            self.insertion_order.remove(pos);
        }
        self.insertion_order.push(word.to_string());
        Some(cached)
    }

    /// Get the cached tokens for a word, computing and caching them on miss.
    pub fn get_or_tokenize<F>(&mut self, word: &str, tokenize: F) -> Vec<Symbol>
    where
        F: FnOnce(&str) -> Vec<Symbol>,
    {
        if let Some(cached) = self.get(word) {
            return cached;
        }

        let tokens = tokenize(word);
        self.insert(word.to_string(), tokens.clone());
        tokens
    }

    /// Insert a token sequence, evicting the oldest entry if needed.
    pub fn insert(&mut self, word: String, tokens: Vec<Symbol>) {
        if self.capacity == 0 {
            return;
        }

        if self.insertion_order.len() >= self.capacity && !self.cache.contains_key(&word) {
            if let Some(oldest) = self.insertion_order.first() {
                self.cache.remove(oldest);
                self.insertion_order.remove(0);
            }
        }

        if self.cache.contains_key(&word) {
            if let Some(pos) = self.insertion_order.iter().position(|w| w == &word) {
                self.insertion_order.remove(pos);
            }
        }

        self.cache.insert(word.clone(), tokens);
        self.insertion_order.push(word);
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.insertion_order.clear();
    }

    /// Number of cached words.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// The cache capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
