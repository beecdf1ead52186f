//! Subtok CLI - Command-line interface for the BPE tokenizer.
//!
//! This is the main entry point for the `subtok` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{InspectCommand, TokenizeCommand, TrainCommand};

#[derive(Parser)]
#[command(name = "subtok")]
#[command(about = "A word-frequency BPE subword tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a new model from a corpus file
    Train(TrainCommand),
    /// Tokenize text with a trained model
    Tokenize(TokenizeCommand),
    /// Show the vocabulary and merges of a trained model
    Inspect(InspectCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Tokenize(cmd) => commands::tokenize::run(cmd)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd)?,
    }

    Ok(())
}
