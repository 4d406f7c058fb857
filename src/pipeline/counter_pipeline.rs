//! End-to-end counting pipeline: detector boundary → identity tracker →
//! aggregation → timer-gated history and sink dispatch.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Config;
use crate::counting::{AggregationState, ClassCounts, HistoryBuffer, HistorySnapshot, ZoneClassifier};
use crate::error::Error;
use crate::pipeline::detector::{DetectionSource, sanitize};
use crate::sink::{RemoteSink, SinkDispatcher};
use crate::tracker::IouTracker;

/// Per-cycle result handed back to the caller for display.
#[derive(Debug, Clone, Copy)]
pub struct FrameSummary {
    /// 1-based index of the processed frame
    pub frame: u64,
    /// Objects tracked after this frame
    pub tracked: usize,
    /// Live per-class counts after this frame
    pub live: ClassCounts,
}

/// Single-threaded cooperative counting pipeline over a detection source.
///
/// One cycle runs synchronously end to end: fetch detections, sanitize,
/// update the tracker, fold into the aggregation, then fire whichever
/// cadence gates (snapshot, dispatch) are due. Both timers are checked
/// inside the cycle, so every piece of shared state is mutated from one
/// thread of control; the only detached work is remote delivery.
///
/// A slow downstream consumer simply delays the next cycle, which is the
/// intended backpressure. Stopping the pipeline is just not calling
/// [`process_frame`](Self::process_frame) again.
pub struct CounterPipeline<D: DetectionSource> {
    source: D,
    tracker: IouTracker,
    state: AggregationState,
    history: HistoryBuffer,
    dispatcher: SinkDispatcher,
    snapshot_period: Duration,
    dispatch_period: Duration,
    last_snapshot: Instant,
    last_dispatch: Instant,
    frames: u64,
}

impl<D: DetectionSource> CounterPipeline<D> {
    pub fn new(source: D, config: &Config) -> Result<Self, Error> {
        let remote = match &config.endpoint_url {
            Some(url) => Some(RemoteSink::new(url.clone())?),
            None => None,
        };
        let zones = ZoneClassifier::new(config.zones.clone());
        let now = Instant::now();
        Ok(Self {
            source,
            tracker: IouTracker::new(config.iou_threshold),
            state: AggregationState::new(config.counting_mode, zones),
            history: HistoryBuffer::new(config.history_capacity),
            dispatcher: SinkDispatcher::new(remote),
            snapshot_period: Duration::from_secs_f64(config.snapshot_period_secs),
            dispatch_period: Duration::from_secs_f64(config.dispatch_period_secs),
            last_snapshot: now,
            last_dispatch: now,
            frames: 0,
        })
    }

    /// Run one detection cycle. Returns `None` when the source reports
    /// end of stream.
    pub fn process_frame(&mut self) -> Result<Option<FrameSummary>, D::Error> {
        let Some(raw) = self.source.next_frame()? else {
            return Ok(None);
        };
        self.frames += 1;

        let detections = sanitize(raw);
        let tracked = self.tracker.update(&detections);
        self.state.observe_frame(tracked);

        debug!(
            frame = self.frames,
            detections = detections.len(),
            tracked = self.tracker.objects().len(),
            "cycle complete"
        );

        if self.last_snapshot.elapsed() >= self.snapshot_period {
            self.capture_snapshot(Utc::now());
        }
        if self.last_dispatch.elapsed() >= self.dispatch_period {
            self.dispatch_now(Utc::now());
        }

        Ok(Some(FrameSummary {
            frame: self.frames,
            tracked: self.tracker.objects().len(),
            live: self.state.live_counts(),
        }))
    }

    /// Append the current live counts to the history, resetting the
    /// snapshot cadence. Public so on-demand captures and tests don't
    /// have to wait on the wall clock.
    pub fn capture_snapshot(&mut self, timestamp: DateTime<Utc>) {
        self.history.append(HistorySnapshot {
            timestamp,
            counts: self.state.live_counts(),
        });
        self.last_snapshot = Instant::now();
    }

    /// Dispatch the current aggregation to the configured sinks,
    /// resetting the dispatch cadence.
    pub fn dispatch_now(&mut self, timestamp: DateTime<Utc>) {
        self.dispatcher.dispatch(&self.state, timestamp);
        self.last_dispatch = Instant::now();
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    pub fn tracker(&self) -> &IouTracker {
        &self.tracker
    }

    pub fn state(&self) -> &AggregationState {
        &self.state
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn dispatcher(&self) -> &SinkDispatcher {
        &self.dispatcher
    }

    /// Serialize the session's export log as CSV.
    pub fn export_csv(&self) -> Result<String, Error> {
        self.dispatcher.export_csv()
    }
}
