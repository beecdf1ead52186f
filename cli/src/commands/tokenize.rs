//! Tokenize command implementation.

use clap::Parser;

/// Tokenize command arguments.
#[derive(Parser)]
pub struct TokenizeCommand {
    /// Path to the trained model directory
    #[arg(short, long)]
    pub model: String,

    /// Text to tokenize ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use anyhow::Result as AnyhowResult;
use std::path::Path;
use subtok_tokenizer::Tokenizer;

pub fn run(cmd: TokenizeCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(Path::new(&cmd.model))?;

    let input_text = if cmd.input == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.input
    };

    let tokens = tokenizer.tokenize(&input_text);
    let token_strs: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
    let output = token_strs.join(" ");

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)?;
            println!("Wrote {} tokens to {}", tokens.len(), path);
        }
        None => {
            println!("{}", output);
            println!();
            println!("Total tokens: {}", tokens.len());
        }
    }

    Ok(())
}
