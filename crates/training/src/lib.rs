//! Subtok-training - BPE merge learning
//!
//! This crate learns an ordered set of merge rules from a corpus: it builds a
//! word-frequency index through the shared pre-tokenizer, tracks each unique
//! word's current split, counts adjacent symbol pairs weighted by word
//! frequency, and repeatedly merges the best pair until the vocabulary target
//! is reached or no pair remains.
//!
//! # Example
//!
//! ```rust
//! use subtok_training::{BpeTrainer, TrainerState, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig {
//!     vocab_size: 40,
//!     ..Default::default()
//! });
//! let model = trainer.train(["hello world", "hello again"]);
//!
//! assert!(model.vocabulary.size() <= 40);
//! assert_ne!(model.state, TrainerState::Growing);
//! ```

pub use subtok_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    BpeTrainer, SplitTable, TrainedModel, TrainerState, TrainingConfig, WordFrequencyIndex,
};
