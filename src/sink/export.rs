//! Append-only export log with CSV serialization.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Error;
use crate::sink::record::{CSV_HEADER, DispatchRecord};

/// In-memory log of every dispatched record for the session.
///
/// Unlike the history buffer this log is intentionally unbounded;
/// capping it is left to the surrounding application if sessions run
/// long enough to care.
#[derive(Debug, Default)]
pub struct ExportLog {
    records: Vec<DispatchRecord>,
}

impl ExportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: DispatchRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    /// Serialize the whole log: one header row plus one row per record,
    /// in dispatch order. Requesting an export before anything has been
    /// dispatched is a notification-level error, not a fault.
    pub fn to_csv(&self) -> Result<String, Error> {
        if self.records.is_empty() {
            return Err(Error::EmptyExport);
        }
        let mut csv = String::with_capacity((self.records.len() + 1) * 48);
        csv.push_str(CSV_HEADER);
        csv.push('\n');
        for record in &self.records {
            csv.push_str(&record.csv_row());
            csv.push('\n');
        }
        Ok(csv)
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), Error> {
        let csv = self.to_csv()?;
        fs::write(path, csv)?;
        info!(path = %path.display(), records = self.records.len(), "export written");
        Ok(())
    }
}
