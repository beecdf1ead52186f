//! Save functionality for trained models.

use super::format::{SerializedConfig, SerializedMerge, SerializedModel};
use super::MODEL_FILE;
use crate::tokenizer::TokenizerConfig;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use subtok_core::{MergeRuleSet, Result, TokenizerError};
use subtok_training::WordFrequencyIndex;

/// Model saver - writes the trained artifact as a single `model.json`.
pub struct ModelSaver<'a> {
    /// Word frequency index reference
    word_freqs: &'a WordFrequencyIndex,
    /// Merge rules reference
    merges: &'a MergeRuleSet,
    /// Configuration to persist
    config: &'a TokenizerConfig,
}

impl<'a> ModelSaver<'a> {
    /// Create a new model saver.
    pub fn new(
        word_freqs: &'a WordFrequencyIndex,
        merges: &'a MergeRuleSet,
        config: &'a TokenizerConfig,
    ) -> Self {
        Self {
            word_freqs,
            merges,
            config,
        }
    }

    /// Save the model into a directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let file_path = path.join(MODEL_FILE);
        let file = File::create(&file_path).map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.serialize())
            .map_err(|e| TokenizerError::Save(format!("failed to serialize model: {}", e)))?;

        Ok(())
    }

    /// Build the wire representation.
    pub(crate) fn serialize(&self) -> SerializedModel {
        let word_freqs = self
            .word_freqs
            .iter()
            .map(|(word, count)| (word.to_string(), count))
            .collect();

        let merges = self
            .merges
            .iter()
            .map(|rule| SerializedMerge {
                left: rule.left.to_string(),
                right: rule.right.to_string(),
            })
            .collect();

        SerializedModel {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: SerializedConfig {
                vocab_size: self.config.vocab_size,
                boundary_symbol: self.config.boundary_symbol.to_string(),
                pre_tokenizer: self.config.pre_tokenizer,
                normalization: self.config.normalization,
            },
            word_freqs,
            merges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtok_core::MergeRule;

    #[test]
    fn test_serialize_preserves_merge_order() {
        let mut word_freqs = WordFrequencyIndex::new();
        word_freqs.add_word("abc", 2);

        let mut merges = MergeRuleSet::new();
        merges.push(MergeRule::new("a", "b"));
        merges.push(MergeRule::new("ab", "c"));

        let config = TokenizerConfig::default();
        let serialized = ModelSaver::new(&word_freqs, &merges, &config).serialize();

        assert_eq!(serialized.word_freqs.get("abc"), Some(&2));
        assert_eq!(serialized.merges.len(), 2);
        assert_eq!(serialized.merges[0].left, "a");
        assert_eq!(serialized.merges[1].left, "ab");
        assert_eq!(serialized.version, env!("CARGO_PKG_VERSION"));
    }
}
