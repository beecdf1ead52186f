//! Core BPE data structures.
//!
//! Symbols, merge rules, vocabulary accounting, and the priority queue
//! used to select the next merge during training.

pub mod merges;
pub mod priority;
pub mod vocab;

pub use merges::{char_symbol, MergeRule, MergeRuleSet, Pair, Symbol};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use vocab::{Vocabulary, DEFAULT_BOUNDARY};
