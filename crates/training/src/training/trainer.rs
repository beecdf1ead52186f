//! BPE trainer: the merge-learning state machine.
//!
//! One round merges exactly one pair: pop the best candidate, rewrite every
//! affected split, fold the resulting count deltas back into the queue, and
//! record the rule. Selection stays sequential between rounds; counting and
//! split rewriting may run on the rayon pool.

use super::counter;
use super::split_table::SplitTable;
use super::word_index::WordFrequencyIndex;
use ahash::AHashMap;
use subtok_core::{
    MergeCandidate, MergeRule, MergeRuleSet, NormalizationForm, Normalizer, Pair,
    PairPriorityQueue, SplitStrategy, Splitter, Symbol, Vocabulary,
};

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Target vocabulary size (boundary + alphabet + merges)
    pub vocab_size: usize,
    /// Boundary sentinel counted in the base vocabulary
    pub boundary_symbol: Symbol,
    /// Word splitting strategy
    pub pre_tokenizer: SplitStrategy,
    /// Unicode normalization applied before splitting
    pub normalization: NormalizationForm,
    /// Whether to use the rayon paths for counting and merge application
    pub parallel: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 1_000,
            boundary_symbol: Symbol::new(subtok_core::DEFAULT_BOUNDARY),
            pre_tokenizer: SplitStrategy::default(),
            normalization: NormalizationForm::default(),
            parallel: true,
        }
    }
}

/// Terminal and non-terminal states of the training loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    /// Below target with mergeable pairs remaining
    Growing,
    /// No mergeable pair remains; the vocabulary may be short of target
    Converged,
    /// The vocabulary reached the configured target
    Saturated,
}

/// The result of a training run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// Word -> occurrence count over the training corpus
    pub word_freqs: WordFrequencyIndex,
    /// Learned merge rules in order
    pub merges: MergeRuleSet,
    /// Final vocabulary (boundary + alphabet + merged symbols)
    pub vocabulary: Vocabulary,
    /// Terminal state the loop stopped in
    pub state: TrainerState,
}

/// BPE trainer.
///
/// Learns merge rules from a corpus by repeatedly merging the adjacent
/// symbol pair with the highest weighted frequency, ties broken by
/// lexicographically smallest pair.
pub struct BpeTrainer {
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a trainer with default configuration and the given target.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// The trainer's configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Learn merge rules from corpus documents.
    ///
    /// Never fails: an empty corpus, an unreachable target, or a target at
    /// or below the base vocabulary all terminate cleanly and are reported
    /// through [`TrainedModel::state`].
    pub fn train<I, S>(&self, corpus: I) -> TrainedModel
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let splitter = Splitter::new(self.config.pre_tokenizer);
        let normalizer = Normalizer::new(self.config.normalization);
        let word_freqs = WordFrequencyIndex::from_corpus(corpus, &splitter, &normalizer);

        self.train_from_index(word_freqs)
    }

    /// Learn merge rules from a pre-built word-frequency index.
    pub fn train_from_index(&self, word_freqs: WordFrequencyIndex) -> TrainedModel {
        let mut table = SplitTable::from_index(&word_freqs);
        let mut vocabulary =
            Vocabulary::new(table.alphabet(), self.config.boundary_symbol.clone());
        let mut merges = MergeRuleSet::new();

        // A target at or below the base vocabulary allows no merge at all.
        if vocabulary.size() >= self.config.vocab_size {
            return TrainedModel {
                word_freqs,
                merges,
                vocabulary,
                state: TrainerState::Saturated,
            };
        }

        let initial = if self.config.parallel {
            counter::count_pairs_parallel(&table)
        } else {
            counter::count_pairs_sequential(&table)
        };

        let mut queue = PairPriorityQueue::with_capacity(initial.len());
        for (pair, count) in initial {
            queue.push(MergeCandidate::new(pair, count));
        }

        let state = loop {
            let Some(best) = queue.pop() else {
                break TrainerState::Converged;
            };

            let rule = MergeRule::new(best.pair.0, best.pair.1);
            let changes = if self.config.parallel {
                table.apply_merge_parallel(&rule)
            } else {
                table.apply_merge(&rule)
            };
            self.update_queue(&mut queue, changes);

            vocabulary.push_merged(rule.merged.clone());
            merges.push(rule);

            if vocabulary.size() >= self.config.vocab_size {
                break TrainerState::Saturated;
            }
        };

        TrainedModel {
            word_freqs,
            merges,
            vocabulary,
            state,
        }
    }

    /// Fold merge deltas back into the selection queue.
    fn update_queue(&self, queue: &mut PairPriorityQueue, changes: Vec<(Pair, i64)>) {
        let mut aggregated: AHashMap<Pair, i64> = AHashMap::new();
        for (pair, delta) in changes {
            *aggregated.entry(pair).or_insert(0) += delta;
        }

        for (pair, delta) in aggregated {
            if delta == 0 {
                continue;
            }
            let current = queue.get_count(&pair).unwrap_or(0) as i64;
            let updated = (current + delta).max(0) as u64;
            queue.update(pair, updated);
        }
    }
}
