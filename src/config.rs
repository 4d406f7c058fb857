use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::counting::{CountingMode, ZoneSpec};
use crate::error::Error;

/// Deployment configuration, usually loaded from a JSON file.
///
/// The defaults mirror the reference deployment: 0.5 IoU match
/// threshold, unique (count-once) accumulation, no zones, a 30-entry
/// history sampled every second, dispatch every 3 seconds, no sinks
/// beyond the in-session export log.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IoU above which a detection may claim a previous track
    pub iou_threshold: f64,
    /// Accumulation policy for reported counters
    pub counting_mode: CountingMode,
    /// Ordered, disjoint zone intervals; empty disables zone attribution
    pub zones: Vec<ZoneSpec>,
    /// Hard ceiling on retained history snapshots
    pub history_capacity: usize,
    /// Wall-clock cadence of history snapshots, in seconds
    pub snapshot_period_secs: f64,
    /// Wall-clock cadence of sink dispatch, in seconds
    pub dispatch_period_secs: f64,
    /// Remote endpoint for dispatched records; absent disables the sink
    pub endpoint_url: Option<String>,
    /// Where the demo binary writes the CSV export
    pub export_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iou_threshold: crate::tracker::DEFAULT_IOU_THRESHOLD,
            counting_mode: CountingMode::Unique,
            zones: Vec::new(),
            history_capacity: crate::counting::DEFAULT_HISTORY_CAPACITY,
            snapshot_period_secs: 1.0,
            dispatch_period_secs: 3.0,
            endpoint_url: None,
            export_path: None,
        }
    }
}

impl Config {
    /// Load from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let data = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&data)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.iou_threshold, 0.5);
        assert_eq!(config.counting_mode, CountingMode::Unique);
        assert_eq!(config.history_capacity, 30);
        assert!(config.zones.is_empty());
        assert!(config.endpoint_url.is_none());
    }

    #[test]
    fn test_parse_partial_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "counting_mode": "per_frame",
                "zones": [
                    { "name": "inbound", "x_start": 0.0, "x_end": 320.0 },
                    { "name": "outbound", "x_start": 320.5, "x_end": 640.0 }
                ],
                "dispatch_period_secs": 5.0
            }"#,
        )
        .unwrap();

        assert_eq!(config.counting_mode, CountingMode::PerFrame);
        assert_eq!(config.zones.len(), 2);
        assert_eq!(config.zones[0].name, "inbound");
        assert_eq!(config.dispatch_period_secs, 5.0);
        // Unspecified fields keep their defaults.
        assert_eq!(config.iou_threshold, 0.5);
        assert_eq!(config.history_capacity, 30);
    }
}
