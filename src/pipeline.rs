//! Integration layer connecting an external detector to the counting
//! engine: the [`DetectionSource`] boundary trait, boundary validation,
//! and the [`CounterPipeline`] that runs the per-frame cycle.

mod counter_pipeline;
mod detector;

pub use counter_pipeline::{CounterPipeline, FrameSummary};
pub use detector::{DetectionSource, RawDetection, sanitize};
