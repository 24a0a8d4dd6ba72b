//! Strata CLI - Command-line interface for the Strata analysis pipeline.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Strata - lex, parse and check Verilog-flavoured sources
#[derive(Parser)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a file and show tokens
    Lex {
        /// Input file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a file and show the syntax tree
    Parse {
        /// Input file
        file: PathBuf,
    },

    /// Check files for lexical and syntax errors
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
        /// Print plain token messages instead of file:line:column lines
        #[arg(long)]
        plain: bool,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Lex { file, json } => commands::lex::run(&file, json),
        Commands::Parse { file } => commands::parse::run(&file),
        Commands::Check { files, plain } => commands::check::run(&files, plain),
    }
}
