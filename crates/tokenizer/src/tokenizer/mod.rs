//! Main tokenizer implementation.
//!
//! `Tokenizer` owns the trained artifact (word frequencies and merge rules)
//! and applies the rules to new text: normalize, split into words, break
//! each word into characters, then replay every merge rule in learned order
//! with the same left-to-right non-overlapping scan used during training.

use crate::io::{load::ModelLoader, save::ModelSaver};
use crate::utils::TokenCache;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Mutex;
use subtok_core::{
    char_symbol, MergeRuleSet, NormalizationForm, Normalizer, Result, SplitStrategy, Splitter,
    Symbol, Vocabulary,
};
use subtok_training::{BpeTrainer, TrainerState, TrainingConfig, WordFrequencyIndex};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Target vocabulary size for training
    pub vocab_size: usize,
    /// Boundary sentinel counted in the base vocabulary
    pub boundary_symbol: Symbol,
    /// Word splitting strategy
    pub pre_tokenizer: SplitStrategy,
    /// Unicode normalization applied before splitting
    pub normalization: NormalizationForm,
    /// Whether training uses the rayon paths
    pub parallel: bool,
    /// Capacity of the word token cache
    pub cache_capacity: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_size: 1_000,
            boundary_symbol: Symbol::new(subtok_core::DEFAULT_BOUNDARY),
            pre_tokenizer: SplitStrategy::default(),
            normalization: NormalizationForm::default(),
            parallel: true,
            cache_capacity: 1_000,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set the boundary sentinel.
    pub fn boundary_symbol(mut self, symbol: impl Into<Symbol>) -> Self {
        self.config.boundary_symbol = symbol.into();
        self
    }

    /// Set the word splitting strategy.
    pub fn pre_tokenizer(mut self, strategy: SplitStrategy) -> Self {
        self.config.pre_tokenizer = strategy;
        self
    }

    /// Set the normalization form.
    pub fn normalization(mut self, form: NormalizationForm) -> Self {
        self.config.normalization = form;
        self
    }

    /// Enable or disable the rayon training paths.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the word token cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Tokenizer {
        Tokenizer::new(self.config)
    }
}

/// Summary of a training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Terminal state the trainer stopped in
    pub state: TrainerState,
    /// Achieved vocabulary size
    pub vocab_size: usize,
    /// Target vocabulary size
    pub target_vocab_size: usize,
    /// Number of merge rules learned
    pub merges_learned: usize,
}

impl TrainingReport {
    /// Whether training stopped short of the target.
    pub fn fell_short(&self) -> bool {
        self.state == TrainerState::Converged && self.vocab_size < self.target_vocab_size
    }
}

/// Main tokenizer struct.
///
/// Before training (or loading) it holds no merge rules and tokenization
/// falls back to raw character splitting.
pub struct Tokenizer {
    /// Configuration
    config: TokenizerConfig,
    /// Word -> occurrence count over the training corpus
    word_freqs: WordFrequencyIndex,
    /// Learned merge rules in order
    merges: MergeRuleSet,
    /// Vocabulary accounting (boundary + alphabet + merged symbols)
    vocabulary: Vocabulary,
    /// Word splitter
    splitter: Splitter,
    /// Unicode normalizer
    normalizer: Normalizer,
    /// Word token cache
    cache: Mutex<TokenCache>,
}

impl Tokenizer {
    /// Create an untrained tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Self {
        let splitter = Splitter::new(config.pre_tokenizer);
        let normalizer = Normalizer::new(config.normalization);
        let vocabulary = Vocabulary::new(Vec::new(), config.boundary_symbol.clone());
        let cache = Mutex::new(TokenCache::with_capacity(config.cache_capacity));

        Self {
            config,
            word_freqs: WordFrequencyIndex::new(),
            merges: MergeRuleSet::new(),
            vocabulary,
            splitter,
            normalizer,
            cache,
        }
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Train on corpus documents, replacing any previous model state.
    pub fn train<I, S>(&mut self, corpus: I) -> TrainingReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trainer = BpeTrainer::new(TrainingConfig {
            vocab_size: self.config.vocab_size,
            boundary_symbol: self.config.boundary_symbol.clone(),
            pre_tokenizer: self.config.pre_tokenizer,
            normalization: self.config.normalization,
            parallel: self.config.parallel,
        });
        let model = trainer.train(corpus);

        let report = TrainingReport {
            state: model.state,
            vocab_size: model.vocabulary.size(),
            target_vocab_size: self.config.vocab_size,
            merges_learned: model.merges.len(),
        };

        self.word_freqs = model.word_freqs;
        self.merges = model.merges;
        self.vocabulary = model.vocabulary;
        self.cache.lock().unwrap().clear();

        report
    }

    /// Tokenize text into subword strings.
    ///
    /// Pure function of the text and the trained rule set. Characters never
    /// seen during training pass through as single-character tokens.
    pub fn tokenize(&self, text: &str) -> Vec<Symbol> {
        let normalized = self.normalizer.normalize(text);
        let mut tokens = Vec::new();

        for word in self.splitter.words(&normalized) {
            // Lock held only for lookup and insert; rule replay runs outside it
            let cached = self.cache.lock().unwrap().get(word);
            let word_tokens = match cached {
                Some(cached) => cached,
                None => {
                    let computed = self.tokenize_word(word);
                    self.cache
                        .lock()
                        .unwrap()
                        .insert(word.to_string(), computed.clone());
                    computed
                }
            };
            tokens.extend(word_tokens);
        }

        tokens
    }

    /// Tokenize a batch of texts on the rayon pool.
    pub fn tokenize_batch<S>(&self, texts: &[S]) -> Vec<Vec<Symbol>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.tokenize(text.as_ref()))
            .collect()
    }

    /// Split one word into characters and replay every merge rule in
    /// learned order.
    fn tokenize_word(&self, word: &str) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = word.chars().map(char_symbol).collect();

        for rule in &self.merges {
            if symbols.len() < 2 {
                break;
            }
            rule.apply(&mut symbols);
        }

        symbols
    }

    /// The achieved vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.size()
    }

    /// The vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The learned merge rules.
    pub fn merges(&self) -> &MergeRuleSet {
        &self.merges
    }

    /// The word-frequency index from training.
    pub fn word_freqs(&self) -> &WordFrequencyIndex {
        &self.word_freqs
    }

    /// The configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Save the trained model into a directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        ModelSaver::new(&self.word_freqs, &self.merges, &self.config).save(path)
    }

    /// Load a trained model from a directory.
    pub fn load(path: &Path) -> Result<Self> {
        let serialized = ModelLoader::load(path)?;
        let (word_freqs, merges) = ModelLoader::deserialize(&serialized);

        let config = TokenizerConfig {
            vocab_size: serialized.config.vocab_size,
            boundary_symbol: Symbol::new(&serialized.config.boundary_symbol),
            pre_tokenizer: serialized.config.pre_tokenizer,
            normalization: serialized.config.normalization,
            ..Default::default()
        };

        let mut vocabulary = Vocabulary::new(
            alphabet_of(&word_freqs),
            config.boundary_symbol.clone(),
        );
        for rule in &merges {
            vocabulary.push_merged(rule.merged.clone());
        }

        let splitter = Splitter::new(config.pre_tokenizer);
        let normalizer = Normalizer::new(config.normalization);
        let cache = Mutex::new(TokenCache::with_capacity(config.cache_capacity));

        Ok(Self {
            config,
            word_freqs,
            merges,
            vocabulary,
            splitter,
            normalizer,
            cache,
        })
    }
}

/// Sorted distinct single-character symbols across the indexed words.
fn alphabet_of(word_freqs: &WordFrequencyIndex) -> Vec<Symbol> {
    let chars: std::collections::BTreeSet<char> = word_freqs
        .iter()
        .flat_map(|(word, _)| word.chars())
        .collect();
    chars.into_iter().map(char_symbol).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(tokenizer: &Tokenizer, text: &str) -> Vec<String> {
        tokenizer
            .tokenize(text)
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_single_merge_tokenization() {
        // One merge allowed; (a,a) wins the tie against (a,b).
        let mut tokenizer = Tokenizer::builder().vocab_size(4).build();
        let report = tokenizer.train(["aaab", "ab"]);

        assert_eq!(report.state, TrainerState::Saturated);
        assert_eq!(report.merges_learned, 1);
        assert_eq!(tokens(&tokenizer, "aaab"), vec!["aa", "a", "b"]);
        assert_eq!(tokens(&tokenizer, "ab"), vec!["a", "b"]);
    }

    #[test]
    fn test_untrained_falls_back_to_chars() {
        let tokenizer = Tokenizer::builder().build();
        assert_eq!(tokens(&tokenizer, "abc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_characters_pass_through() {
        let mut tokenizer = Tokenizer::builder().vocab_size(10).build();
        tokenizer.train(["abab abab"]);

        assert_eq!(tokens(&tokenizer, "abxy"), vec!["ab", "x", "y"]);
    }

    #[test]
    fn test_tokens_reconstruct_words() {
        let mut tokenizer = Tokenizer::builder().vocab_size(30).build();
        tokenizer.train(["hug hugs pug", "pun bun hug"]);

        let text = "hugs pun";
        let rebuilt: String = tokenizer.tokenize(text).iter().map(|t| t.as_str()).collect();
        assert_eq!(rebuilt, "hugspun");
    }

    #[test]
    fn test_idempotent_over_own_output() {
        // Target stops training mid-collapse, so the output mixes whole
        // words and genuine subwords.
        let mut tokenizer = Tokenizer::builder().vocab_size(9).build();
        tokenizer.train(["banana band bandana", "ban banana"]);

        let first = tokens(&tokenizer, "banana bandana");
        assert_eq!(first, vec!["banana", "ban", "d", "ana"]);
        let retokenized: Vec<String> = first
            .iter()
            .flat_map(|token| tokens(&tokenizer, token))
            .collect();

        assert_eq!(retokenized, first);
    }

    #[test]
    fn test_rules_replay_in_learned_order() {
        let mut tokenizer = Tokenizer::builder().vocab_size(5).build();
        let report = tokenizer.train(["aaab", "ab"]);

        // Rank 0 is (a,a); rank 1 merges over the result of rank 0.
        assert_eq!(report.merges_learned, 2);
        let rules = tokenizer.merges().rules();
        assert_eq!(rules[0].merged, "aa");
        assert!(rules[1].left == "aa" || rules[1].left == "a");
    }

    #[test]
    fn test_word_punct_split_in_tokenize() {
        let mut tokenizer = Tokenizer::builder().vocab_size(20).build();
        tokenizer.train(["end. end. end."]);

        // '.' is its own word, so 'd' and '.' never merge
        let toks = tokens(&tokenizer, "end.");
        let dot_pos = toks.iter().position(|t| t == ".").unwrap();
        assert_eq!(dot_pos, toks.len() - 1);
        assert!(toks[..dot_pos].iter().all(|t| !t.contains('.')));
    }

    #[test]
    fn test_tokenize_batch_matches_sequential() {
        let mut tokenizer = Tokenizer::builder().vocab_size(30).build();
        tokenizer.train(["hug hugs pug bun", "pun hug hug"]);

        let texts = vec!["hug pun".to_string(), "bun hugs".to_string()];
        let batch = tokenizer.tokenize_batch(&texts);

        assert_eq!(batch[0], tokenizer.tokenize("hug pun"));
        assert_eq!(batch[1], tokenizer.tokenize("bun hugs"));
    }

    #[test]
    fn test_save_load_preserves_tokenization() {
        let temp_dir = std::env::temp_dir().join("subtok_test_tokenizer_roundtrip");

        let mut tokenizer = Tokenizer::builder().vocab_size(25).build();
        tokenizer.train(["low lower lowest", "low low"]);
        tokenizer.save(&temp_dir).unwrap();

        let loaded = Tokenizer::load(&temp_dir).unwrap();

        assert_eq!(loaded.vocab_size(), tokenizer.vocab_size());
        assert_eq!(loaded.merges().len(), tokenizer.merges().len());
        for text in ["lowest lower", "slow glow"] {
            assert_eq!(loaded.tokenize(text), tokenizer.tokenize(text));
        }

        std::fs::remove_dir_all(temp_dir).ok();
    }

    #[test]
    fn test_normalization_applies_to_input() {
        let mut tokenizer = Tokenizer::builder()
            .vocab_size(10)
            .normalization(NormalizationForm::Nfc)
            .build();
        tokenizer.train(["\u{00e9}\u{00e9}"]);

        // Decomposed input composes to the trained form before splitting
        assert_eq!(tokens(&tokenizer, "e\u{0301}e\u{0301}"), vec!["\u{00e9}\u{00e9}"]);
    }

    #[test]
    fn test_retrain_clears_cache() {
        let mut tokenizer = Tokenizer::builder().vocab_size(10).build();
        tokenizer.train(["abab"]);
        assert_eq!(tokens(&tokenizer, "abab"), vec!["abab"]);

        // Retrain on a corpus where (a,b) never wins
        tokenizer.train(["aaaa"]);
        assert_eq!(tokens(&tokenizer, "abab"), vec!["a", "b", "a", "b"]);
    }
}
