//! Session error ledger and its durable CSV report artifacts.

use crate::error::ShellError;
use crate::files::{self, FileFilter};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Report artifacts are named `jadn_cli_error_report_<YYYYMMDD>.csv`; the
/// date suffix sorts lexically, so the greatest filename is the newest.
pub const REPORT_PREFIX: &str = "jadn_cli_error_report_";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One recorded failure. Appended, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub timestamp: String,
    pub error_type: String,
    pub message: String,
}

impl ErrorRecord {
    /// Record stamped with the current local time.
    pub fn now(error_type: &str, message: impl Into<String>) -> ErrorRecord {
        ErrorRecord {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            error_type: error_type.to_string(),
            message: message.into(),
        }
    }
}

/// Append-only, session-scoped failure ledger.
///
/// `flush` re-emits the entire in-memory ledger to the dated report file
/// and does not clear it, so repeated flushes within one session append
/// already-flushed records again. `clear` is the only operation that
/// empties the ledger; report artifacts already on disk stay untouched.
#[derive(Debug)]
pub struct ErrorLedger {
    records: Vec<ErrorRecord>,
    report_dir: PathBuf,
}

impl ErrorLedger {
    /// Empty ledger writing its reports under `report_dir`.
    pub fn new(report_dir: PathBuf) -> ErrorLedger {
        ErrorLedger {
            records: Vec::new(),
            report_dir,
        }
    }

    pub fn append(&mut self, record: ErrorRecord) {
        debug!(error_type = %record.error_type, "Recorded session error");
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Today's report artifact name.
    pub fn report_filename_today() -> String {
        format!("{}{}.csv", REPORT_PREFIX, Local::now().format("%Y%m%d"))
    }

    /// Append every in-memory record to today's report artifact.
    ///
    /// Headerless CSV, append mode; the in-memory ledger is left as-is.
    /// Returns the artifact path, or `None` when there was nothing to
    /// flush.
    pub fn flush(&self) -> Result<Option<PathBuf>, ShellError> {
        if self.records.is_empty() {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.report_dir)?;
        let path = self.report_dir.join(Self::report_filename_today());
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for record in &self.records {
            writer.write_record([
                record.timestamp.as_str(),
                record.error_type.as_str(),
                record.message.as_str(),
            ])?;
        }
        writer.flush().map_err(ShellError::Io)?;

        info!(
            records = self.records.len(),
            path = %path.display(),
            "Flushed error ledger to report"
        );
        Ok(Some(path))
    }

    /// Empty the in-memory ledger.
    pub fn clear(&mut self) {
        info!(discarded = self.records.len(), "Cleared error ledger");
        self.records.clear();
    }

    /// Load the most recent report artifact: lexically greatest matching
    /// filename in the report directory.
    pub fn latest_report(&self) -> Result<Option<(PathBuf, Vec<ErrorRecord>)>, ShellError> {
        if !self.report_dir.is_dir() {
            return Ok(None);
        }

        let mut names: Vec<String> = files::list_files(&self.report_dir, FileFilter::Extension("csv"))?
            .into_iter()
            .filter(|name| name.starts_with(REPORT_PREFIX))
            .collect();
        names.sort();
        let name = match names.pop() {
            Some(name) => name,
            None => return Ok(None),
        };

        let path = self.report_dir.join(name);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(ShellError::from)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(ShellError::from)?;
            records.push(ErrorRecord {
                timestamp: row.get(0).unwrap_or("").to_string(),
                error_type: row.get(1).unwrap_or("").to_string(),
                message: row.get(2).unwrap_or("").to_string(),
            });
        }
        Ok(Some((path, records)))
    }
}
