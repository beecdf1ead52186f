//! Word splitting for pre-tokenization.
//!
//! Splits a document into words with byte-offset spans. BPE itself only
//! consumes the word text; the spans are part of the pre-tokenizer contract
//! for callers that need to map tokens back to the source.

use crate::error::{Result, TokenizerError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Byte-offset span of a word within its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

/// Built-in word splitting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitStrategy {
    /// Runs of non-whitespace characters
    Whitespace,
    /// BERT-style: runs of non-space, non-punctuation characters, with
    /// every punctuation or symbol character as its own word
    #[default]
    WordPunct,
}

enum Pattern {
    Builtin(SplitStrategy),
    Custom(Regex),
}

/// Word splitter producing `(word, span)` pairs.
///
/// Deterministic: never drops or reorders words within a document.
pub struct Splitter {
    pattern: Pattern,
}

impl Splitter {
    /// Create a splitter for a built-in strategy.
    pub fn new(strategy: SplitStrategy) -> Self {
        Self {
            pattern: Pattern::Builtin(strategy),
        }
    }

    /// Create a whitespace splitter.
    pub fn whitespace() -> Self {
        Self::new(SplitStrategy::Whitespace)
    }

    /// Create a word-punct splitter.
    pub fn word_punct() -> Self {
        Self::new(SplitStrategy::WordPunct)
    }

    /// Create a splitter from a custom regex pattern.
    ///
    /// Custom splitters cannot be persisted in a model file.
    pub fn custom(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            TokenizerError::InvalidConfig(format!("invalid split pattern '{}': {}", pattern, e))
        })?;
        Ok(Self {
            pattern: Pattern::Custom(regex),
        })
    }

    /// The built-in strategy, if this splitter uses one.
    pub fn strategy(&self) -> Option<SplitStrategy> {
        match &self.pattern {
            Pattern::Builtin(strategy) => Some(*strategy),
            Pattern::Custom(_) => None,
        }
    }

    /// Split a document into words with byte-offset spans.
    pub fn split<'a>(&self, text: &'a str) -> Vec<(&'a str, Span)> {
        self.regex()
            .find_iter(text)
            .map(|m| {
                (
                    m.as_str(),
                    Span {
                        start: m.start(),
                        end: m.end(),
                    },
                )
            })
            .collect()
    }

    /// Split a document into words, discarding spans.
    pub fn words<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.regex().find_iter(text).map(|m| m.as_str()).collect()
    }

    fn regex(&self) -> &Regex {
        match &self.pattern {
            Pattern::Builtin(SplitStrategy::Whitespace) => {
                static RE: OnceLock<Regex> = OnceLock::new();
                RE.get_or_init(|| Regex::new(r"\S+").expect("invalid whitespace pattern"))
            }
            Pattern::Builtin(SplitStrategy::WordPunct) => {
                static RE: OnceLock<Regex> = OnceLock::new();
                RE.get_or_init(|| {
                    Regex::new(r"[^\s\p{P}\p{S}]+|[\p{P}\p{S}]")
                        .expect("invalid word-punct pattern")
                })
            }
            Pattern::Custom(regex) => regex,
        }
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::word_punct()
    }
}
