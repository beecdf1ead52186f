//! Inspect command implementation.

use clap::Parser;

/// Inspect command arguments.
#[derive(Parser)]
pub struct InspectCommand {
    /// Path to the trained model directory
    #[arg(short, long)]
    pub model: String,

    /// Number of merges to print
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

use anyhow::Result as AnyhowResult;
use std::path::Path;
use subtok_tokenizer::Tokenizer;

pub fn run(cmd: InspectCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(Path::new(&cmd.model))?;
    let vocab = tokenizer.vocabulary();

    println!("Model: {}", cmd.model);
    println!("  Unique words: {}", tokenizer.word_freqs().len());
    println!("  Boundary: {}", vocab.boundary());
    println!("  Alphabet size: {}", vocab.alphabet().len());
    println!("  Merges: {}", tokenizer.merges().len());
    println!("  Vocab size: {}", tokenizer.vocab_size());
    println!();

    let shown = cmd.limit.min(tokenizer.merges().len());
    if shown > 0 {
        println!("First {} merges:", shown);
        for (rank, rule) in tokenizer.merges().iter().take(shown).enumerate() {
            println!("  {:>4}: {} + {} -> {}", rank, rule.left, rule.right, rule.merged);
        }
    }

    Ok(())
}
