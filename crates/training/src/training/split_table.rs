//! Split table: each unique word's current decomposition into symbols.
//!
//! Words live in an arena sorted by surface form, so word IDs (and therefore
//! training) are reproducible run-to-run. Splits start at character
//! granularity (Unicode scalars, never bytes) and coarsen as merges apply.
//! Concatenating a word's split always reproduces the word exactly.

use super::word_index::WordFrequencyIndex;
use compact_str::CompactString;
use rayon::prelude::*;
use std::collections::BTreeSet;
use subtok_core::{char_symbol, MergeRule, Pair, Symbol};

/// Per-word splits with their corpus frequencies.
#[derive(Debug, Clone)]
pub struct SplitTable {
    /// Unique words, sorted
    words: Vec<CompactString>,
    /// Word frequencies, parallel to `words`
    counts: Vec<u64>,
    /// Current split per word, parallel to `words`
    splits: Vec<Vec<Symbol>>,
}

impl SplitTable {
    /// Initialize from a word-frequency index: every split is the word's
    /// individual characters.
    pub fn from_index(index: &WordFrequencyIndex) -> Self {
        let mut entries: Vec<(&CompactString, u64)> = index.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut words = Vec::with_capacity(entries.len());
        let mut counts = Vec::with_capacity(entries.len());
        let mut splits = Vec::with_capacity(entries.len());

        for (word, count) in entries {
            words.push(word.clone());
            counts.push(count);
            splits.push(word.chars().map(char_symbol).collect());
        }

        Self {
            words,
            counts,
            splits,
        }
    }

    /// The sorted set of distinct single-character symbols across all words.
    pub fn alphabet(&self) -> Vec<Symbol> {
        let chars: BTreeSet<char> = self
            .words
            .iter()
            .flat_map(|word| word.chars())
            .collect();
        chars.into_iter().map(char_symbol).collect()
    }

    /// Number of unique words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the table holds no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over `(word, count, split)` in word order.
    pub fn iter(&self) -> impl Iterator<Item = (&CompactString, u64, &[Symbol])> {
        self.words
            .iter()
            .zip(self.counts.iter())
            .zip(self.splits.iter())
            .map(|((word, &count), split)| (word, count, split.as_slice()))
    }

    /// Parallel iterator over `(word, count, split)`.
    pub fn par_iter(
        &self,
    ) -> impl ParallelIterator<Item = (&CompactString, u64, &[Symbol])> + '_ {
        self.words
            .par_iter()
            .zip(self.counts.par_iter())
            .zip(self.splits.par_iter())
            .map(|((word, &count), split)| (word, count, split.as_slice()))
    }

    /// The current split of a word, if present.
    pub fn get(&self, word: &str) -> Option<&[Symbol]> {
        let idx = self.words.binary_search_by(|w| w.as_str().cmp(word)).ok()?;
        Some(&self.splits[idx])
    }

    /// Apply a merge to every word's split.
    ///
    /// Returns the weighted pair-count deltas the merge caused: destroyed
    /// neighbor adjacencies, created adjacencies with the merged symbol, and
    /// `-freq` per merged occurrence of the pair itself. Summing the deltas
    /// onto the previous pair counts gives exactly the counts a full recount
    /// of the rewritten table would produce.
    pub fn apply_merge(&mut self, rule: &MergeRule) -> Vec<(Pair, i64)> {
        let mut changes = Vec::new();
        for (split, &freq) in self.splits.iter_mut().zip(self.counts.iter()) {
            merge_word(split, rule, freq, &mut changes);
        }
        changes
    }

    /// Parallel variant of [`apply_merge`](Self::apply_merge).
    ///
    /// Every word is rewritten independently; no split is touched by more
    /// than one worker.
    pub fn apply_merge_parallel(&mut self, rule: &MergeRule) -> Vec<(Pair, i64)> {
        self.splits
            .par_iter_mut()
            .zip(self.counts.par_iter())
            .flat_map_iter(|(split, &freq)| {
                let mut changes = Vec::new();
                merge_word(split, rule, freq, &mut changes);
                changes
            })
            .collect()
    }
}

/// Merge all non-overlapping consecutive occurrences of the rule's pair in
/// one split, left to right, recording weighted pair-count deltas.
fn merge_word(split: &mut Vec<Symbol>, rule: &MergeRule, freq: u64, changes: &mut Vec<(Pair, i64)>) {
    if split.len() < 2 {
        return;
    }

    let f = freq as i64;
    let mut i = 0;

    while i + 1 < split.len() {
        if split[i] == rule.left && split[i + 1] == rule.right {
            if i > 0 {
                changes.push(((split[i - 1].clone(), rule.left.clone()), -f));
                changes.push(((split[i - 1].clone(), rule.merged.clone()), f));
            }
            if i + 2 < split.len() {
                changes.push(((rule.right.clone(), split[i + 2].clone()), -f));
                changes.push(((rule.merged.clone(), split[i + 2].clone()), f));
            }
            changes.push((rule.pair(), -f));

            split[i] = rule.merged.clone();
            split.remove(i + 1);
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::counter;
    use ahash::AHashMap;
    use subtok_core::{Normalizer, Splitter};

    fn table_for(docs: &[&str]) -> SplitTable {
        let splitter = Splitter::whitespace();
        let normalizer = Normalizer::default();
        let index = WordFrequencyIndex::from_corpus(docs, &splitter, &normalizer);
        SplitTable::from_index(&index)
    }

    fn apply_deltas(counts: &mut AHashMap<Pair, u64>, changes: Vec<(Pair, i64)>) {
        for (pair, delta) in changes {
            let current = counts.get(&pair).copied().unwrap_or(0) as i64;
            let updated = current + delta;
            assert!(updated >= 0, "delta drove pair {:?} negative", pair);
            if updated == 0 {
                counts.remove(&pair);
            } else {
                counts.insert(pair, updated as u64);
            }
        }
    }

    #[test]
    fn test_initial_char_splits() {
        let table = table_for(&["abc", "ab"]);

        assert_eq!(table.get("abc").unwrap(), &["a", "b", "c"]);
        assert_eq!(table.get("ab").unwrap(), &["a", "b"]);
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_unicode_scalar_granularity() {
        let table = table_for(&["héllo"]);
        assert_eq!(table.get("héllo").unwrap(), &["h", "é", "l", "l", "o"]);
    }

    #[test]
    fn test_alphabet_sorted_unique() {
        let table = table_for(&["cab", "abc"]);
        assert_eq!(table.alphabet(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_apply_merge_rewrites_splits() {
        let mut table = table_for(&["aaab", "ab"]);

        table.apply_merge(&MergeRule::new("a", "a"));
        assert_eq!(table.get("aaab").unwrap(), &["aa", "a", "b"]);
        assert_eq!(table.get("ab").unwrap(), &["a", "b"]);
    }

    #[test]
    fn test_reconstruction_invariant() {
        let mut table = table_for(&["banana", "bandana", "ban"]);

        for rule in [
            MergeRule::new("a", "n"),
            MergeRule::new("b", "an"),
            MergeRule::new("ban", "an"),
        ] {
            table.apply_merge(&rule);
            for (word, _, split) in table.iter() {
                let rebuilt: String = split.iter().map(|s| s.as_str()).collect();
                assert_eq!(&rebuilt, word.as_str());
            }
        }
    }

    #[test]
    fn test_deltas_match_full_recount() {
        let mut table = table_for(&["abab", "abc abc abc", "aabb"]);
        let mut counts = counter::count_pairs_sequential(&table);

        for rule in [
            MergeRule::new("a", "b"),
            MergeRule::new("ab", "ab"),
            MergeRule::new("ab", "c"),
        ] {
            let changes = table.apply_merge(&rule);
            apply_deltas(&mut counts, changes);
            assert_eq!(counts, counter::count_pairs_sequential(&table));
        }
    }

    #[test]
    fn test_parallel_merge_matches_sequential() {
        let mut seq = table_for(&["mississippi", "missive", "sip"]);
        let mut par = seq.clone();

        let rule = MergeRule::new("s", "s");
        let mut seq_changes = seq.apply_merge(&rule);
        let mut par_changes = par.apply_merge_parallel(&rule);

        assert_eq!(seq.get("mississippi"), par.get("mississippi"));

        seq_changes.sort();
        par_changes.sort();
        assert_eq!(seq_changes, par_changes);
    }

    #[test]
    fn test_merged_pair_count_reaches_zero() {
        let mut table = table_for(&["abab abab"]);
        let mut counts = counter::count_pairs_sequential(&table);

        let changes = table.apply_merge(&MergeRule::new("a", "b"));
        apply_deltas(&mut counts, changes);

        assert_eq!(counts.get(&("a".into(), "b".into())), None);
        assert_eq!(counts.get(&("ab".into(), "ab".into())), Some(&2));
    }
}
