//! Pre-tokenization pipeline.
//!
//! Splits raw documents into word-level units (with offsets) before BPE
//! character splitting, with optional Unicode normalization in front.

pub mod normalize;
pub mod split;

pub use normalize::{NormalizationForm, Normalizer};
pub use split::{Span, SplitStrategy, Splitter};
