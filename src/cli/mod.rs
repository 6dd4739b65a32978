pub mod batch;
pub mod completions;
pub mod convert;

use clap::{Parser, Subcommand};

/// fdconv - Farlands to BPHMod item converter
#[derive(Parser, Debug)]
#[command(name = "fdconv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a single item file
    Convert(convert::ConvertArgs),

    /// Convert every item file in a folder
    Batch(batch::BatchArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
