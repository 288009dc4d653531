//! Clap argument definitions for the `pomona` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use pomona_query::{Mode, QueryError};

/// Parses a combination mode (`and`, `or`, `&&`, `||`).
fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse()
        .map_err(|e: QueryError| format!("{e}\nhint: {}", e.suggestion()))
}

/// Parses an `N:TEXT` tag insertion.
fn parse_insertion(s: &str) -> Result<Insertion, String> {
    let (position, text) = s
        .split_once(':')
        .ok_or_else(|| format!("expected N:TEXT, got '{s}'"))?;
    let position = position
        .trim()
        .parse()
        .map_err(|_| format!("invalid position '{position}' in '{s}'"))?;
    Ok(Insertion {
        position,
        text: text.to_string(),
    })
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "pomona")]
#[command(about = "Search fruit records with a small query language")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON record file to search instead of the configured data (repeatable)
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Vec<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output flags for commands that print records.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordOutputArgs {
    /// Print matches as a table
    #[arg(long, conflicts_with = "json")]
    pub table: bool,

    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum number of matches to print (0 = all)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `pomona search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query text; multiple arguments are joined with spaces
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Combination mode when the text has no && or || separator
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// Show how the text was split and parsed without searching
    #[arg(long)]
    pub explain: bool,

    /// Evaluate even when the text is still waiting for a value
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: RecordOutputArgs,
}

/// A positioned tag for `--insert-at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Slot to insert at.
    pub position: usize,
    /// Tag text.
    pub text: String,
}

/// Arguments for `pomona tags`.
#[derive(Args, Debug, Clone)]
pub struct TagsCommand {
    /// Tags to append, in order
    pub tags: Vec<String>,

    /// Remove the tag at index N (repeatable, applied first)
    #[arg(long, value_name = "N")]
    pub remove: Vec<usize>,

    /// Take the tag at index N out for editing (repeatable, applied after removals)
    #[arg(long, value_name = "N")]
    pub edit: Vec<usize>,

    /// Insert TEXT at slot N (repeatable, applied after edits)
    #[arg(long = "insert-at", value_name = "N:TEXT", value_parser = parse_insertion)]
    pub insert_at: Vec<Insertion>,

    /// Move the cursor by DELTA slots (repeatable, applied last)
    #[arg(long = "move", value_name = "DELTA", allow_negative_numbers = true)]
    pub moves: Vec<isize>,

    /// Combination mode when no && or || tag is present
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: RecordOutputArgs,
}

/// Arguments for `pomona suggest`.
#[derive(Args, Debug, Clone)]
pub struct SuggestCommand {
    /// Partially typed term
    #[arg(default_value = "")]
    pub text: String,

    /// Print the input after selecting suggestion N instead of the list
    #[arg(long, value_name = "N")]
    pub select: Option<usize>,

    /// Print suggestions as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum number of suggestions to print (0 = all)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `pomona check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Query text; multiple arguments are joined with spaces
    pub text: Vec<String>,
}

/// Arguments for `pomona init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.pomona.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `pomona` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search records and print the matches
    #[command(after_help = "\
QUERY SYNTAX:
  apple             Any text field contains \"apple\"
  apple kiwi        Either token (OR); --mode and for both
  a && b            Every term must match
  a || b            At least one term must match

FIELDS:
  name: app         Contains, in one field
  family: starts with: rosa
  genus: ends with: us
  calories: >= 50   Numeric nutrition fields: calories, sugar,
  fat: <= 0.3       carbohydrates, protein, fat

EXAMPLES:
  pomona search apple
  pomona search 'name: starts with: pine'
  pomona search 'family: rosaceae && calories: >= 50'
  pomona search --table 'sugar: <= 6'")]
    Search(SearchCommand),

    /// Build a query from tags and print the matches
    Tags(TagsCommand),

    /// Show autocomplete suggestions for partially typed text
    Suggest(SuggestCommand),

    /// Report whether text is complete enough to evaluate
    Check(CheckCommand),

    /// Initialize pomona configuration in current directory
    Init(InitCommand),

    /// Show configuration files and effective settings
    Config,
}
