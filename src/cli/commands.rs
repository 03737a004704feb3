use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "intake", about = concat!("intake v", env!("CARGO_PKG_VERSION"), " - plain-text task import"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a text document and print the tasks
    Parse(ParseArgs),
    /// Validate a text document without importing
    Check(CheckArgs),
    /// Import a document, reconciling against existing task names
    Import(ImportArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Input file, or '-' for stdin
    pub file: String,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Input file, or '-' for stdin
    pub file: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Input file, or '-' for stdin
    pub file: String,

    /// File with existing task names, one per line
    #[arg(long)]
    pub existing: Option<String>,

    /// Commit every duplicate without confirmation
    #[arg(long)]
    pub accept_duplicates: bool,

    /// Discard every duplicate without confirmation
    #[arg(long, conflicts_with = "accept_duplicates")]
    pub reject_duplicates: bool,

    /// Append committed batches to this file as JSON lines
    #[arg(long)]
    pub out: Option<String>,
}
