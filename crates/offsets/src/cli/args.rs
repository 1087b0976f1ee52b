//! Clap argument definitions for the `offsets` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Column index of the file body in the table built from input files.
pub const BODY_COLUMN: i64 = 1;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "offsets")]
#[command(about = "Report coalesced byte offsets of full-text matches in text files")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v for debug logging, -vv for trace logging)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Supported `offsets` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search files and print the offsets of every match
    Search(SearchCommand),

    /// Print a file with matched phrases highlighted
    Highlight(HighlightCommand),

    /// Show how text is tokenized
    Tokens(TokensCommand),

    /// Initialize offsets configuration in the current directory
    Init(InitCommand),
}

/// Arguments for `offsets search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Match expression
    pub query: String,

    /// Files to search
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Column to report offsets for: 0 is the path, 1 is the body
    #[arg(short = 'c', long, default_value_t = BODY_COLUMN, allow_negative_numbers = true)]
    pub column: i64,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show the parsed match expression before searching
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for `offsets highlight`.
#[derive(Args, Debug, Clone)]
pub struct HighlightCommand {
    /// Match expression
    pub query: String,

    /// File to highlight
    pub file: PathBuf,

    /// Column to highlight: 0 is the path, 1 is the body
    #[arg(short = 'c', long, default_value_t = BODY_COLUMN, allow_negative_numbers = true)]
    pub column: i64,
}

/// Arguments for `offsets tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Text to tokenize
    pub text: String,
}

/// Arguments for `offsets init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.offsets.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}
