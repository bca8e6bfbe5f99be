use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use daily_reading::cli::{Cli, Command, OutputFormat, PatternsArgs, ReadArgs};
use daily_reading::{dates, markdown, BookRegistry, DailyReader};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> Result<()> {
    daily_reading::logging::init().context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let registry = match &cli.registry {
        Some(path) => BookRegistry::from_json_file(path)?,
        None => BookRegistry::builtin(),
    };

    match cli.command {
        Command::Read(args) => read(DailyReader::new(registry), &cli.assets, args).await,
        Command::Patterns(args) => patterns(args),
        Command::Books => {
            books(&registry);
            Ok(())
        }
    }
}

async fn read(reader: DailyReader, assets: &std::path::Path, args: ReadArgs) -> Result<()> {
    let day = args.day.unwrap_or_else(dates::today_ordinal);
    let reading = reader
        .read(&args.book, day, assets)
        .await
        .with_context(|| format!("Failed to read day {} of {}", day, args.book))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reading).context("serialize reading")?;
            println!("{json}");
        }
        OutputFormat::Html => {
            if let Some(intro) = &reading.month_intro {
                println!("{intro}");
            }
            println!("{}", reading.content);
        }
        OutputFormat::Markdown => print!("{}", markdown::reading_to_markdown(&reading)),
    }

    Ok(())
}

fn patterns(args: PatternsArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(dates::current_year);
    let today = dates::date_patterns_in_year(args.day, year)
        .with_context(|| format!("day {} is outside the calendar for {}", args.day, year))?;
    let tomorrow = dates::next_day_patterns(args.day, year)
        .with_context(|| format!("day {} has no following day", args.day))?;

    println!("day {}: {}", args.day, today.variants().join(" | "));
    println!("next:   {}", tomorrow.variants().join(" | "));
    Ok(())
}

fn books(registry: &BookRegistry) {
    for book in registry.books() {
        println!(
            "{}\t{}\t{}\t{}",
            book.id,
            book.title,
            book.author,
            book.source_file.display()
        );
    }
}
