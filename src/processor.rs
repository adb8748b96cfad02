//! Drives a command log through a [`LibraryCatalog`].
//!
//! Every line is independent: a malformed line or a refused borrow produces
//! its own result line and processing moves on.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use thiserror::Error;

use crate::{
    catalog::LibraryCatalog,
    command::Command,
    error::CatalogError,
    report::Outcome,
};

/// How results are written to the output stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report, one result per command
    #[default]
    Text,
    /// One JSON object per command
    Json,
}

/// Counters for a processed log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Commands that ran successfully
    pub succeeded: usize,
    /// Commands the catalog refused
    pub refused: usize,
    /// Lines that could not be parsed
    pub malformed: usize,
}

impl RunSummary {
    /// Number of result lines written
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.saturating_add(self.refused).saturating_add(self.malformed)
    }
}

/// Failure that stops processing of a log
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Reading the log or writing a result failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A result could not be encoded as JSON
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of one log line, as written in JSON mode
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Entry {
    /// The command ran
    Ok(Outcome),
    /// The catalog refused the command
    Error(CatalogError),
    /// The line is not a command
    Malformed {
        /// Parse failure
        reason: String,
    },
}

/// One JSON output line
#[derive(Debug, Serialize)]
struct Record {
    /// 1-based line number in the input log
    line: usize,
    /// What happened
    #[serde(flatten)]
    entry: Entry,
}

/// Whether a log line carries no command
fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Run every command of `input` against `catalog`, writing one result per command to `output`.
///
/// Blank lines and lines starting with `#` are skipped without output.
///
/// # Errors
///
/// Returns `ProcessError` if reading `input` or writing `output` fails. Refused
/// and malformed commands are not errors; they are reported in `output`.
pub fn process_log<R, W>(
    catalog: &mut LibraryCatalog,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> Result<RunSummary, ProcessError>
where
    R: BufRead,
    W: Write,
{
    let mut summary = RunSummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if is_skippable(&line) {
            continue;
        }
        let line_no = idx.saturating_add(1);

        let entry = match line.parse::<Command>() {
            Ok(command) => match catalog.execute(&command) {
                Ok(outcome) => {
                    summary.succeeded = summary.succeeded.saturating_add(1);
                    Entry::Ok(outcome)
                }
                Err(err) => {
                    tracing::debug!(
                        line = line_no,
                        command = command.keyword(),
                        kind = ?err.kind(),
                        "command refused"
                    );
                    summary.refused = summary.refused.saturating_add(1);
                    Entry::Error(err)
                }
            },
            Err(err) => {
                tracing::warn!(line = line_no, %err, "skipping malformed command");
                summary.malformed = summary.malformed.saturating_add(1);
                Entry::Malformed { reason: err.to_string() }
            }
        };

        match format {
            OutputFormat::Text => match &entry {
                Entry::Ok(outcome) => writeln!(output, "{outcome}")?,
                Entry::Error(err) => writeln!(output, "{err}")?,
                Entry::Malformed { reason } => writeln!(output, "Error: {reason}")?,
            },
            OutputFormat::Json => {
                let record = Record { line: line_no, entry };
                writeln!(output, "{}", serde_json::to_string(&record)?)?;
            }
        }
    }

    output.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run `log` through a fresh catalog
    fn run(log: &str, format: OutputFormat) -> (String, RunSummary) {
        let mut catalog = LibraryCatalog::new();
        let mut output = Vec::new();
        let summary = process_log(&mut catalog, log.as_bytes(), &mut output, format);
        assert!(summary.is_ok());
        (String::from_utf8_lossy(&output).into_owned(), summary.unwrap_or_default())
    }

    #[test]
    fn test_bad_line_does_not_stop_processing() {
        let log = "addBook: 1, \"Dune\", \"Herrick\", \"ISBN1\"\nfrobnicate: 3\n\n# note\ncheckBook: 1\n";
        let (text, summary) = run(log, OutputFormat::Text);

        assert_eq!(
            text,
            "Added Book: 1 - \"Dune\" by Herrick, ISBN: ISBN1\n\
             Error: unknown command `frobnicate`\n\
             Book Details for ID 1:\n- \"Dune\" by Herrick, ISBN: ISBN1, Available: Yes\n"
        );
        assert_eq!(summary, RunSummary { succeeded: 2, refused: 0, malformed: 1 });
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_json_lines_carry_line_numbers() {
        let log = "borrowBook: 9, 1\n\nlistAvailableBooks\nbad\n";
        let (text, summary) = run(log, OutputFormat::Json);

        let records: Vec<serde_json::Value> =
            text.lines().filter_map(|line| serde_json::from_str(line).ok()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.first(),
            Some(&serde_json::json!({
                "line": 1,
                "error": { "error": "not_available", "book_id": 9, "kind": "not_found" }
            }))
        );
        assert_eq!(
            records.get(1),
            Some(&serde_json::json!({
                "line": 3,
                "ok": { "outcome": "available_books", "books": [] }
            }))
        );
        assert_eq!(records.get(2).and_then(|r| r.get("line")), Some(&serde_json::json!(4)));
        assert_eq!(summary, RunSummary { succeeded: 1, refused: 1, malformed: 1 });
    }
}
