use clap::Parser;
use fdconv::cli::{Cli, Commands};
use fdconv::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => fdconv::cli::convert::run(args, &printer)?,
        Commands::Batch(args) => fdconv::cli::batch::run(args, &printer)?,
        Commands::Completions(args) => fdconv::cli::completions::run(args)?,
    }

    Ok(())
}
