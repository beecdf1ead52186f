//! Load functionality for trained models.

use super::format::SerializedModel;
use super::MODEL_FILE;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use subtok_core::{MergeRuleSet, Result, Symbol, TokenizerError};
use subtok_training::WordFrequencyIndex;

/// Model loader - reads a `model.json` written by [`ModelSaver`].
///
/// [`ModelSaver`]: super::save::ModelSaver
pub struct ModelLoader;

impl ModelLoader {
    /// Load a model from a directory.
    pub fn load(path: &Path) -> Result<SerializedModel> {
        let file_path = path.join(MODEL_FILE);
        let file = File::open(&file_path).map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        let reader = BufReader::new(file);
        let model: SerializedModel = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("malformed {}: {}", MODEL_FILE, e)))?;

        Self::validate(&model)?;
        Ok(model)
    }

    /// Rebuild the in-memory artifact from the wire representation.
    pub fn deserialize(model: &SerializedModel) -> (WordFrequencyIndex, MergeRuleSet) {
        let mut word_freqs = WordFrequencyIndex::new();
        for (word, &count) in &model.word_freqs {
            word_freqs.add_word(word, count);
        }

        let merges = MergeRuleSet::from_pairs(
            model
                .merges
                .iter()
                .map(|m| (Symbol::new(&m.left), Symbol::new(&m.right))),
        );

        (word_freqs, merges)
    }

    fn validate(model: &SerializedModel) -> Result<()> {
        if model.config.boundary_symbol.is_empty() {
            return Err(TokenizerError::Load(
                "empty boundary symbol in model config".to_string(),
            ));
        }

        for (rank, merge) in model.merges.iter().enumerate() {
            if merge.left.is_empty() || merge.right.is_empty() {
                return Err(TokenizerError::Load(format!(
                    "empty symbol in merge rule at rank {}",
                    rank
                )));
            }
        }

        if let Some(word) = model.word_freqs.iter().find_map(|(w, &c)| (c == 0).then_some(w)) {
            return Err(TokenizerError::Load(format!(
                "zero frequency for word '{}'",
                word
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::ModelSaver;
    use crate::tokenizer::TokenizerConfig;
    use subtok_core::MergeRule;

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = std::env::temp_dir().join("subtok_test_load");
        std::fs::create_dir_all(&temp_dir).unwrap();

        let mut word_freqs = WordFrequencyIndex::new();
        word_freqs.add_word("hello", 2);
        word_freqs.add_word("world", 1);

        let mut merges = MergeRuleSet::new();
        merges.push(MergeRule::new("l", "l"));
        merges.push(MergeRule::new("ll", "o"));

        let config = TokenizerConfig::default();
        ModelSaver::new(&word_freqs, &merges, &config)
            .save(&temp_dir)
            .unwrap();

        let loaded = ModelLoader::load(&temp_dir).unwrap();
        let (loaded_freqs, loaded_merges) = ModelLoader::deserialize(&loaded);

        assert_eq!(loaded_freqs, word_freqs);
        assert_eq!(loaded_merges.len(), 2);
        assert_eq!(loaded_merges.rules()[0].merged, "ll");
        assert_eq!(loaded_merges.rules()[1].merged, "llo");

        std::fs::remove_dir_all(temp_dir).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let missing = std::env::temp_dir().join("subtok_test_missing_model");
        assert!(ModelLoader::load(&missing).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_merge_symbol() {
        let temp_dir = std::env::temp_dir().join("subtok_test_bad_merge");
        std::fs::create_dir_all(&temp_dir).unwrap();
        std::fs::write(
            temp_dir.join(MODEL_FILE),
            r#"{
                "version": "0.1.0",
                "config": {
                    "vocab_size": 10,
                    "boundary_symbol": "</w>",
                    "pre_tokenizer": "word-punct",
                    "normalization": "none"
                },
                "word_freqs": {"ab": 1},
                "merges": [{"left": "", "right": "b"}]
            }"#,
        )
        .unwrap();

        let result = ModelLoader::load(&temp_dir);
        assert!(matches!(result, Err(TokenizerError::Load(_))));

        std::fs::remove_dir_all(temp_dir).ok();
    }
}
