//! Routing of aggregation records to the configured sinks.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::counting::AggregationState;
use crate::error::Error;
use crate::sink::export::ExportLog;
use crate::sink::record::DispatchRecord;
use crate::sink::remote::RemoteSink;

/// Fans one dispatch cycle's records out to the session export log and,
/// when configured, the remote endpoint.
pub struct SinkDispatcher {
    export: ExportLog,
    remote: Option<RemoteSink>,
}

impl SinkDispatcher {
    pub fn new(remote: Option<RemoteSink>) -> Self {
        Self {
            export: ExportLog::new(),
            remote,
        }
    }

    /// Build and deliver the records for the current aggregation.
    ///
    /// Every record lands in the export log; remote delivery is detached
    /// and best-effort.
    pub fn dispatch(&mut self, state: &AggregationState, timestamp: DateTime<Utc>) {
        let records = DispatchRecord::from_state(state, timestamp);
        debug!(records = records.len(), "dispatching aggregation");
        for record in records {
            if let Some(remote) = &self.remote {
                remote.send_detached(record.clone());
            }
            self.export.append(record);
        }
    }

    pub fn export(&self) -> &ExportLog {
        &self.export
    }

    pub fn export_csv(&self) -> Result<String, Error> {
        self.export.to_csv()
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), Error> {
        self.export.write_csv(path)
    }
}
