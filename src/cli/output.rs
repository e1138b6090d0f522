//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SkiffArgs};
use crate::engine::{EngineStats, LoadReport, SearchHit};
use crate::error::Result;
use crate::query::TermMatch;

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub total_hits: usize,
    pub duration_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<TermMatch>>,
}

/// Result structure for range lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct RangeResults {
    pub low: String,
    pub high: String,
    pub hits: Vec<SearchHit>,
    pub total_hits: usize,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub load: LoadReport,
    pub stats: EngineStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

/// Types that know how to print themselves for people.
pub trait HumanReadable {
    /// Write the human-readable form.
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanReadable for SearchResults {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if let Some(terms) = &self.terms {
            for term in terms {
                writeln!(out, "  '{}' found in {} document(s)", term.term, term.documents)?;
            }
        }
        write_hits(out, &self.hits)
    }
}

impl HumanReadable for RangeResults {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Terms from '{}' to '{}':", self.low, self.high)?;
        write_hits(out, &self.hits)
    }
}

impl HumanReadable for StatsResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let index = &self.stats.index;
        writeln!(out, "Documents:      {}", self.stats.documents)?;
        writeln!(out, "Distinct terms: {}", index.terms)?;
        writeln!(out, "Postings:       {}", index.postings)?;
        writeln!(out, "Levels:         {} of {}", index.current_level, index.max_level)?;
        writeln!(out, "Load time:      {} ms", self.load.duration_ms)?;
        writeln!(out, "Nodes per level:")?;
        for (level, count) in index.level_histogram.iter().enumerate() {
            writeln!(out, "  {level:>2}: {count}")?;
        }
        if let Some(valid) = self.valid {
            writeln!(out, "Invariants:     {}", if valid { "ok" } else { "VIOLATED" })?;
        }
        Ok(())
    }
}

fn write_hits(out: &mut dyn Write, hits: &[SearchHit]) -> io::Result<()> {
    if hits.is_empty() {
        return writeln!(out, "No documents found containing the query term(s).");
    }

    writeln!(out, "Found in {} document(s):", hits.len())?;
    for (rank, hit) in hits.iter().enumerate() {
        writeln!(out, "  {}. {}", rank + 1, hit.name)?;
    }
    Ok(())
}

/// Output a result to stdout in the format selected on the command line.
pub fn output_result<T>(message: &str, result: &T, args: &SkiffArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result to `out` in the format selected on the command line.
pub fn write_result<T>(out: &mut dyn Write, message: &str, result: &T, args: &SkiffArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
