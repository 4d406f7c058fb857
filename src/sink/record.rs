//! The record shape shared by every sink.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::counting::{AggregationState, ClassCounts};

/// Fixed CSV column order; rows must match this header exactly.
pub const CSV_HEADER: &str = "timestamp,zone,car,bus,truck,motorbike,person";

/// One dispatched aggregation record.
///
/// As JSON this serializes to `{ "zone"?, "car", "bus", "truck",
/// "motorbike", "person" }`; the timestamp only appears in the CSV row.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRecord {
    #[serde(skip_serializing)]
    pub timestamp: DateTime<Utc>,
    /// Zone name, absent for global (zoneless) records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(flatten)]
    pub counts: ClassCounts,
}

impl DispatchRecord {
    /// Build the records for one dispatch cycle: one per configured zone,
    /// or a single global record when no zones are configured.
    pub fn from_state(state: &AggregationState, timestamp: DateTime<Utc>) -> Vec<DispatchRecord> {
        let zone_counts = state.zone_counts();
        if zone_counts.is_empty() {
            vec![DispatchRecord {
                timestamp,
                zone: None,
                counts: state.global_counts(),
            }]
        } else {
            zone_counts
                .iter()
                .map(|(name, counts)| DispatchRecord {
                    timestamp,
                    zone: Some(name.clone()),
                    counts: *counts,
                })
                .collect()
        }
    }

    /// One comma-separated row in [`CSV_HEADER`] order. No field can
    /// contain a comma, so no quoting is needed.
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.zone.as_deref().unwrap_or(""),
            self.counts.car,
            self.counts.bus,
            self.counts.truck,
            self.counts.motorbike,
            self.counts.person,
        )
    }
}
