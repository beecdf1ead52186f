//! Format definitions for model serialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use subtok_core::{NormalizationForm, SplitStrategy};

/// A single merge rule on the wire.
///
/// Only the pair is stored; the merged symbol is their concatenation and is
/// rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedMerge {
    /// Left symbol of the pair
    pub left: String,
    /// Right symbol of the pair
    pub right: String,
}

/// Model configuration on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedConfig {
    /// Vocabulary target the model was trained towards
    pub vocab_size: usize,
    /// Boundary sentinel counted in the base vocabulary
    pub boundary_symbol: String,
    /// Word splitting strategy
    pub pre_tokenizer: SplitStrategy,
    /// Unicode normalization applied before splitting
    pub normalization: NormalizationForm,
}

/// Complete model serialization format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Format version
    pub version: String,
    /// Configuration
    pub config: SerializedConfig,
    /// Word -> occurrence count over the training corpus
    pub word_freqs: HashMap<String, u64>,
    /// Merge rules in learned order
    pub merges: Vec<SerializedMerge>,
}
