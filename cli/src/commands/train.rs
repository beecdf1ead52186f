//! Train command implementation.

use clap::{Parser, ValueEnum};

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the corpus file (one document per line)
    #[arg(short, long)]
    pub input: String,

    /// Output directory for the trained model
    #[arg(short, long)]
    pub output: String,

    /// Target vocabulary size
    #[arg(short, long, default_value_t = 1_000)]
    pub vocab_size: usize,

    /// Boundary sentinel counted in the base vocabulary
    #[arg(short, long, default_value = "</w>")]
    pub boundary: String,

    /// Word splitting strategy
    #[arg(long, value_enum, default_value = "word-punct")]
    pub pre_tokenizer: SplitterArg,

    /// Disable parallel training
    #[arg(long, default_value_t = false)]
    pub sequential: bool,
}

/// Word splitting strategies exposed on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum SplitterArg {
    /// Runs of non-whitespace characters
    Whitespace,
    /// BERT-style words plus single punctuation characters
    WordPunct,
}

impl From<SplitterArg> for SplitStrategy {
    fn from(arg: SplitterArg) -> Self {
        match arg {
            SplitterArg::Whitespace => SplitStrategy::Whitespace,
            SplitterArg::WordPunct => SplitStrategy::WordPunct,
        }
    }
}

use anyhow::Result as AnyhowResult;
use std::fs;
use std::path::Path;
use std::time::Instant;
use subtok_core::SplitStrategy;
use subtok_tokenizer::Tokenizer;
use subtok_training::TrainerState;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    println!("Training model...");
    println!("  Input: {}", cmd.input);
    println!("  Output: {}", cmd.output);
    println!("  Vocab size: {}", cmd.vocab_size);
    println!();

    let start = Instant::now();
    let data = fs::read_to_string(&cmd.input)?;
    let corpus: Vec<&str> = data.lines().collect();
    println!(
        "Read {} documents in {:.2}s",
        corpus.len(),
        start.elapsed().as_secs_f64()
    );
    println!();

    let mut tokenizer = Tokenizer::builder()
        .vocab_size(cmd.vocab_size)
        .boundary_symbol(cmd.boundary.as_str())
        .pre_tokenizer(cmd.pre_tokenizer.into())
        .parallel(!cmd.sequential)
        .build();

    let start = Instant::now();
    let report = tokenizer.train(corpus);
    println!("Training completed in {:.2}s", start.elapsed().as_secs_f64());
    println!("  Merges learned: {}", report.merges_learned);
    match report.state {
        TrainerState::Saturated => {
            println!("  Vocab size: {} (target reached)", report.vocab_size);
        }
        TrainerState::Converged => {
            println!(
                "  Vocab size: {} of {} (no mergeable pair left)",
                report.vocab_size, report.target_vocab_size
            );
        }
        TrainerState::Growing => unreachable!("training returned a non-terminal state"),
    }
    println!();

    let output_path = Path::new(&cmd.output);
    tokenizer.save(output_path)?;
    println!("Model saved to {}", cmd.output);

    Ok(())
}
