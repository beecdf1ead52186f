//! CLI commands for the subtok tokenizer.

pub mod inspect;
pub mod tokenize;
pub mod train;

pub use inspect::InspectCommand;
pub use tokenize::TokenizeCommand;
pub use train::TrainCommand;
