//! Call log parsing and loading
//!
//! Turns call log text into call records. One call per line:
//!
//! ```text
//! 420774,13-01-2020 18:10:15,13-01-2020 18:12:57
//! ```
//!
//! Blank lines are ignored; every other line must hold exactly a number,
//! a start timestamp and an end timestamp.

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use telbill_core::{
    models::CallRecord, traits::CallLogSource, BillError, BillResult, CallLogConfig,
};
use tracing::{debug, error, instrument, warn};

/// Call log parser
#[derive(Debug, Clone, Default)]
pub struct CallLogParser {
    config: CallLogConfig,
}

impl CallLogParser {
    /// Create a new parser for the given log format
    pub fn new(config: CallLogConfig) -> Self {
        Self { config }
    }

    /// Parse a whole call log
    ///
    /// # Errors
    ///
    /// Returns `BillError::MalformedLine` with the 1-based line number of
    /// the first line that cannot be turned into a call record.
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn parse(&self, text: &str) -> BillResult<Vec<CallRecord>> {
        let records = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| self.parse_line(index + 1, line))
            .collect::<BillResult<Vec<_>>>()?;

        debug!("Parsed {} call records", records.len());

        Ok(records)
    }

    /// Parse a single non-blank line
    pub fn parse_line(&self, line_no: usize, line: &str) -> BillResult<CallRecord> {
        let malformed = |reason: String| {
            warn!("Rejecting call log line {}: {}", line_no, reason);
            BillError::MalformedLine {
                line: line_no,
                reason,
            }
        };

        let fields: Vec<&str> = line.split(self.config.delimiter).map(str::trim).collect();
        let [number, start, end] = fields.as_slice() else {
            return Err(malformed(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        };

        let start = self
            .parse_timestamp(start)
            .map_err(|e| malformed(format!("invalid start '{}': {}", start, e)))?;
        let end = self
            .parse_timestamp(end)
            .map_err(|e| malformed(format!("invalid end '{}': {}", end, e)))?;

        CallRecord::new(*number, start, end).map_err(|e| malformed(e.to_string()))
    }

    fn parse_timestamp(&self, raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, &self.config.timestamp_format)
    }
}

/// Read a call log file into memory
///
/// # Errors
///
/// Returns `BillError::LogRead` if the file is missing or unreadable.
#[instrument]
pub fn load_log_file(path: &Path) -> BillResult<String> {
    fs::read_to_string(path).map_err(|e| {
        error!("Call log {} couldn't be read: {}", path.display(), e);
        BillError::LogRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })
}

/// Call log stored in a file
#[derive(Debug, Clone)]
pub struct CallLogFile {
    path: PathBuf,
    parser: CallLogParser,
}

impl CallLogFile {
    /// Create a new file source
    pub fn new(path: impl Into<PathBuf>, parser: CallLogParser) -> Self {
        Self {
            path: path.into(),
            parser,
        }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CallLogSource for CallLogFile {
    fn load_records(&self) -> BillResult<Vec<CallRecord>> {
        let text = load_log_file(&self.path)?;
        self.parser.parse(&text)
    }
}

/// Call log already held in memory
#[derive(Debug, Clone)]
pub struct CallLogText<'a> {
    text: &'a str,
    parser: CallLogParser,
}

impl<'a> CallLogText<'a> {
    /// Create a new in-memory source
    pub fn new(text: &'a str, parser: CallLogParser) -> Self {
        Self { text, parser }
    }
}

impl CallLogSource for CallLogText<'_> {
    fn load_records(&self) -> BillResult<Vec<CallRecord>> {
        self.parser.parse(self.text)
    }
}
