//! Pair frequency counting over a split table.
//!
//! Every word contributes its corpus frequency once per adjacent symbol pair
//! in its current split; length-1 splits contribute nothing. An empty result
//! is the training loop's termination signal.

use super::split_table::SplitTable;
use ahash::AHashMap;
use rayon::prelude::*;
use subtok_core::Pair;

/// Count all adjacent pairs sequentially.
pub fn count_pairs_sequential(table: &SplitTable) -> AHashMap<Pair, u64> {
    let mut pair_counts: AHashMap<Pair, u64> = AHashMap::new();

    for (_, count, split) in table.iter() {
        for window in split.windows(2) {
            let pair = (window[0].clone(), window[1].clone());
            *pair_counts.entry(pair).or_insert(0) += count;
        }
    }

    pair_counts
}

/// Count all adjacent pairs with a parallel map-reduce over words.
///
/// Produces exactly the same mapping as the sequential count.
pub fn count_pairs_parallel(table: &SplitTable) -> AHashMap<Pair, u64> {
    table
        .par_iter()
        .map(|(_, count, split)| {
            let mut local: AHashMap<Pair, u64> = AHashMap::new();
            for window in split.windows(2) {
                let pair = (window[0].clone(), window[1].clone());
                *local.entry(pair).or_insert(0) += count;
            }
            local
        })
        .reduce(AHashMap::new, |mut acc, local| {
            for (pair, count) in local {
                *acc.entry(pair).or_insert(0) += count;
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::word_index::WordFrequencyIndex;
    use subtok_core::{Normalizer, Splitter};

    fn table_for(docs: &[&str]) -> SplitTable {
        let splitter = Splitter::whitespace();
        let normalizer = Normalizer::default();
        let index = WordFrequencyIndex::from_corpus(docs, &splitter, &normalizer);
        SplitTable::from_index(&index)
    }

    fn pair(left: &str, right: &str) -> Pair {
        (left.into(), right.into())
    }

    #[test]
    fn test_weighted_counts() {
        // "ab" occurs three times, "bc" once
        let counts = count_pairs_sequential(&table_for(&["ab ab", "ab bc"]));

        assert_eq!(counts.get(&pair("a", "b")), Some(&3));
        assert_eq!(counts.get(&pair("b", "c")), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_tied_pairs_counted_independently() {
        // corpus ["aaab", "ab"]: ('a','a') weight 2, ('a','b') weight 2
        let counts = count_pairs_sequential(&table_for(&["aaab", "ab"]));

        assert_eq!(counts.get(&pair("a", "a")), Some(&2));
        assert_eq!(counts.get(&pair("a", "b")), Some(&2));
    }

    #[test]
    fn test_single_char_words_contribute_nothing() {
        let counts = count_pairs_sequential(&table_for(&["a b c"]));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let counts = count_pairs_sequential(&table_for(&[]));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let table = table_for(&["the quick brown fox", "the lazy dog", "the the the"]);

        assert_eq!(count_pairs_parallel(&table), count_pairs_sequential(&table));
    }
}
