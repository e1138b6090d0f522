//! Command implementations for the Skiff CLI.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::engine::{LoadReport, SearchEngine};
use crate::error::Result;

const HELP: &str = "\
Type one or more words to find documents containing ALL of them.
  batman        documents containing 'batman'
  batman joker  documents containing both 'batman' and 'joker'
Words are lowercased and stripped of anything but letters and digits.
Type 'quit' to exit.";

/// Execute a CLI command.
pub fn execute_command(args: SkiffArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args, &args),
        Command::Range(range_args) => range(range_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
        Command::Interactive(interactive_args) => interactive(interactive_args, &args),
    }
}

/// Build an engine from a document file.
fn load_engine(source: &Path, args: &SkiffArgs) -> Result<(SearchEngine, LoadReport)> {
    let mut engine = SearchEngine::new(args.index_config()?)?;
    let report = engine.load_file(source)?;
    info!(
        "indexed {} documents from {}",
        report.documents,
        source.display()
    );
    Ok((engine, report))
}

fn search(search_args: &SearchArgs, args: &SkiffArgs) -> Result<()> {
    let (engine, _) = load_engine(&search_args.source, args)?;
    let query = search_args.query_text();

    let start = Instant::now();
    let hits = engine.search(&query)?;
    let duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

    let terms = if search_args.explain {
        Some(engine.explain(&query)?)
    } else {
        None
    };

    output_result(
        &format!("Results for '{query}'"),
        &SearchResults {
            query,
            total_hits: hits.len(),
            hits,
            duration_us,
            terms,
        },
        args,
    )
}

fn range(range_args: &RangeArgs, args: &SkiffArgs) -> Result<()> {
    let (engine, _) = load_engine(&range_args.source, args)?;
    let hits = engine.range(&range_args.low, &range_args.high)?;

    output_result(
        "Range results",
        &RangeResults {
            low: range_args.low.clone(),
            high: range_args.high.clone(),
            total_hits: hits.len(),
            hits,
        },
        args,
    )
}

fn show_stats(stats_args: &StatsArgs, args: &SkiffArgs) -> Result<()> {
    let (engine, load) = load_engine(&stats_args.source, args)?;
    let valid = if stats_args.validate {
        Some(engine.indexer().index().validate().is_ok())
    } else {
        None
    };

    output_result(
        "Index statistics",
        &StatsResult {
            load,
            stats: engine.stats(),
            valid,
        },
        args,
    )
}

fn interactive(interactive_args: &InteractiveArgs, args: &SkiffArgs) -> Result<()> {
    let (engine, report) = load_engine(&interactive_args.source, args)?;
    if args.verbosity() > 0 {
        eprintln!(
            "Loaded {} documents. Type 'help' for usage, 'quit' to exit.",
            report.documents
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_interactive(&engine, &mut stdin.lock(), &mut stdout.lock(), args)
}

/// Read queries line by line from `input` and answer them on `output`
/// until `quit` or end of input.
pub fn run_interactive(
    engine: &SearchEngine,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    args: &SkiffArgs,
) -> Result<()> {
    let mut line = String::new();
    loop {
        if args.output_format == OutputFormat::Human {
            write!(output, "query> ")?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let query = line.trim();
        match query.to_lowercase().as_str() {
            "quit" => break,
            "help" => writeln!(output, "{HELP}")?,
            "" => writeln!(output, "Please enter a valid query.")?,
            _ => {
                let start = Instant::now();
                let hits = engine.search(query)?;
                let results = SearchResults {
                    query: query.to_string(),
                    total_hits: hits.len(),
                    hits,
                    duration_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
                    terms: None,
                };
                write_result(output, &format!("Results for '{query}'"), &results, args)?;
            }
        }
    }
    Ok(())
}
