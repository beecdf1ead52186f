//! Training infrastructure for BPE merge learning.

pub mod counter;
pub mod split_table;
pub mod trainer;
pub mod word_index;

pub use split_table::SplitTable;
pub use trainer::{BpeTrainer, TrainedModel, TrainerState, TrainingConfig};
pub use word_index::WordFrequencyIndex;
