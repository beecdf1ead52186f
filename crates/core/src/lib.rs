//! Subtok-core - Core BPE data structures
//!
//! This crate provides the fundamental pieces shared by BPE training and
//! tokenization: string symbols, ordered merge rules, vocabulary accounting,
//! the merge-selection priority queue, and the pre-tokenization pipeline.
//!
//! # Features
//!
//! - Compact symbol storage (`CompactString`) with `AHashMap` lookups
//! - Append-only merge rules that replay in learned order
//! - Deterministic merge selection with a documented tie-break
//! - Word splitting with offsets and optional Unicode normalization
//!
//! # Example
//!
//! ```rust
//! use subtok_core::{MergeRule, MergeRuleSet, Symbol};
//!
//! let mut rules = MergeRuleSet::new();
//! rules.push(MergeRule::new("a", "b"));
//!
//! let mut split: Vec<Symbol> = vec!["a".into(), "b".into(), "c".into()];
//! rules.rules()[0].apply(&mut split);
//! assert_eq!(split, vec!["ab", "c"]);
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data structures
pub mod core;
pub use core::{
    char_symbol, MergeCandidate, MergeRule, MergeRuleSet, Pair, PairPriorityQueue, Symbol,
    Vocabulary, DEFAULT_BOUNDARY,
};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{NormalizationForm, Normalizer, Span, SplitStrategy, Splitter};
