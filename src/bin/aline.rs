//! Command-line interface for the `aliners` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/aline/`:
//! - `align_cmd.rs`
//! - `batch_cmd.rs`
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=debug` to see the
//! matrix and search summaries.
use clap::{Parser, Subcommand};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name="aline", version=env!("CARGO_PKG_VERSION"), about="ALINE phonetic word alignment (Rust)", disable_help_subcommand=true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Align two words and print the rendered alignment.
    Align(align_cmd::AlignCmd),
    /// Align every word pair of a tab-separated file.
    Batch(batch_cmd::BatchCmd),
}

#[path = "aline/align_cmd.rs"] mod align_cmd;
#[path = "aline/batch_cmd.rs"] mod batch_cmd;
#[path = "aline/mode.rs"] mod mode;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match cli.command {
        Command::Align(cmd) => align_cmd::run(cmd),
        Command::Batch(cmd) => batch_cmd::run(cmd),
    }
}
