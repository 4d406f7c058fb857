//! trafficount: a frame-by-frame object counting engine.
//!
//! Consumes per-frame detection results from an external detector, gives
//! each physical object a stable identity via greedy first-match IoU
//! association, counts every identity exactly once, attributes counts to
//! configured horizontal zones, keeps a bounded rolling history of count
//! snapshots, and periodically delivers aggregated records to external
//! sinks (remote JSON endpoint, CSV export log).

pub mod config;
pub mod counting;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod tracker;

pub use crate::config::Config;
pub use crate::counting::{
    AggregationState, ClassCounts, CountingMode, HistoryBuffer, HistorySnapshot, ObjectClass,
    ZoneClassifier, ZoneSpec,
};
pub use crate::error::Error;
pub use crate::pipeline::{CounterPipeline, DetectionSource, FrameSummary, RawDetection};
pub use crate::sink::{DispatchRecord, ExportLog, RemoteSink, SinkDispatcher};
pub use crate::tracker::{Detection, IouTracker, Rect, TrackedObject};
