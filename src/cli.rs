use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Print a single day's reading from a daily-reader EPUB
#[derive(Parser, Debug)]
#[command(name = "daily-reading", version, about)]
pub struct Cli {
    /// Directory holding the book EPUB files
    #[arg(long, global = true, env = "DAILY_READING_ASSETS", default_value = "assets")]
    pub assets: PathBuf,

    /// JSON file describing the available books (defaults to the built-in list)
    #[arg(long, global = true, env = "DAILY_READING_REGISTRY")]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the reading for one day
    Read(ReadArgs),
    /// Show the date strings searched for a day
    Patterns(PatternsArgs),
    /// List the books in the registry
    Books,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Book identifier, e.g. `daily-stoic`
    #[arg(long)]
    pub book: String,

    /// 1-based day of the year (defaults to today)
    #[arg(long)]
    pub day: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct PatternsArgs {
    /// 1-based day of the year
    #[arg(long)]
    pub day: u32,

    /// Calendar year used to map the day onto a month (defaults to this year)
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Html,
    Markdown,
}
