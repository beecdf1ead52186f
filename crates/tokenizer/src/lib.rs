//! Subtok-tokenizer - High-level BPE tokenizer API
//!
//! This crate ties training, merge-rule replay, and model persistence into a
//! single `Tokenizer` type. Tokenization splits text into words, breaks each
//! word into characters, and replays every learned merge rule in order; the
//! output is the flat sequence of subword strings.
//!
//! # Example
//!
//! ```rust
//! use subtok_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().vocab_size(30).build();
//! tokenizer.train(["hug hug hugs", "pug pun hug"]);
//!
//! let tokens = tokenizer.tokenize("hug");
//! let rebuilt: String = tokens.iter().map(|t| t.as_str()).collect();
//! assert_eq!(rebuilt, "hug");
//! ```

pub use subtok_core::{Result, TokenizerError};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig, TrainingReport};

// IO/Serialization
pub mod io;
pub use io::{ModelLoader, ModelSaver, SerializedModel};

// Utilities
pub mod utils;
pub use utils::TokenCache;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
