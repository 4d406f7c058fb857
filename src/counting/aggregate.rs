//! Counting state: live per-frame counts, cumulative unique counts and
//! per-zone attribution.

use serde::Deserialize;
use tracing::trace;

use crate::counting::class::{ClassCounts, ObjectClass};
use crate::counting::zones::ZoneClassifier;
use crate::tracker::TrackedObject;

/// Accumulation policy for the reported (zone) counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    /// Counters reflect what is visible right now; reset and recomputed
    /// from all tracked objects at the start of every frame.
    PerFrame,
    /// Counters answer "how many distinct objects have ever been seen":
    /// incremented exactly once per identity, when its `counted` flag
    /// flips. An identity lost and reacquired counts again (reference
    /// behavior, kept deliberately).
    Unique,
}

/// Aggregation state for one session.
///
/// Created at session start and owned by the pipeline; it is never
/// reset implicitly. Live counts are maintained in every mode because
/// history snapshots capture them; unique counts likewise accumulate in
/// every mode so the `counted` invariant holds regardless of what the
/// deployment reports. Only the zone counters follow the configured
/// [`CountingMode`].
pub struct AggregationState {
    mode: CountingMode,
    zones: ZoneClassifier,
    live: ClassCounts,
    unique: ClassCounts,
    zone_counts: Vec<(String, ClassCounts)>,
}

impl AggregationState {
    pub fn new(mode: CountingMode, zones: ZoneClassifier) -> Self {
        let zone_counts = zones
            .zones()
            .iter()
            .map(|z| (z.name.clone(), ClassCounts::default()))
            .collect();
        Self {
            mode,
            zones,
            live: ClassCounts::default(),
            unique: ClassCounts::default(),
            zone_counts,
        }
    }

    pub fn mode(&self) -> CountingMode {
        self.mode
    }

    /// What is visible right now, recomputed by the latest frame.
    pub fn live_counts(&self) -> ClassCounts {
        self.live
    }

    /// Distinct identities ever seen, one increment per `counted` flip.
    pub fn unique_counts(&self) -> ClassCounts {
        self.unique
    }

    /// Per-zone counters in configuration order.
    pub fn zone_counts(&self) -> &[(String, ClassCounts)] {
        &self.zone_counts
    }

    /// The aggregation this deployment reports for global records.
    pub fn global_counts(&self) -> ClassCounts {
        match self.mode {
            CountingMode::PerFrame => self.live,
            CountingMode::Unique => self.unique,
        }
    }

    /// Fold one frame's tracked set into the counters.
    ///
    /// Must be called exactly once per tracker update, with the tracker's
    /// freshly produced set, from the single detection-cycle thread of
    /// control.
    pub fn observe_frame(&mut self, tracked: &mut [TrackedObject]) {
        self.live.reset();
        if self.mode == CountingMode::PerFrame {
            for (_, counts) in &mut self.zone_counts {
                counts.reset();
            }
        }

        for obj in tracked {
            self.live.increment(obj.class);

            let newly_counted = obj.mark_counted();
            if newly_counted {
                trace!(id = obj.id, class = %obj.class, "counted");
                self.unique.increment(obj.class);
            }

            let attribute_zone = match self.mode {
                CountingMode::PerFrame => true,
                CountingMode::Unique => newly_counted,
            };
            if attribute_zone {
                if let Some(zone) = self.zones.classify(obj.bbox.center_x()) {
                    increment_zone(&mut self.zone_counts, zone, obj.class);
                }
            }
        }
    }
}

fn increment_zone(zone_counts: &mut [(String, ClassCounts)], zone: &str, class: ObjectClass) {
    if let Some((_, counts)) = zone_counts.iter_mut().find(|(name, _)| name == zone) {
        counts.increment(class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::zones::ZoneSpec;
    use crate::tracker::Rect;

    fn zones() -> ZoneClassifier {
        ZoneClassifier::new(vec![
            ZoneSpec {
                name: "north".into(),
                x_start: 0.0,
                x_end: 100.0,
            },
            ZoneSpec {
                name: "south".into(),
                x_start: 100.5,
                x_end: 200.0,
            },
        ])
    }

    fn obj(id: u64, class: ObjectClass, x: f64) -> TrackedObject {
        TrackedObject::new(id, class, Rect::new(x, 0.0, 10.0, 10.0))
    }

    #[test]
    fn test_live_counts_reset_each_frame() {
        let mut state = AggregationState::new(CountingMode::Unique, ZoneClassifier::default());

        let mut frame1 = vec![obj(0, ObjectClass::Car, 0.0), obj(1, ObjectClass::Bus, 50.0)];
        state.observe_frame(&mut frame1);
        assert_eq!(state.live_counts().car, 1);
        assert_eq!(state.live_counts().bus, 1);

        let mut frame2 = vec![obj(2, ObjectClass::Person, 0.0)];
        state.observe_frame(&mut frame2);
        assert_eq!(state.live_counts().car, 0);
        assert_eq!(state.live_counts().person, 1);
    }

    #[test]
    fn test_unique_counts_once_per_identity() {
        let mut state = AggregationState::new(CountingMode::Unique, ZoneClassifier::default());

        let mut frame = vec![obj(0, ObjectClass::Car, 0.0)];
        state.observe_frame(&mut frame);
        assert_eq!(state.unique_counts().car, 1);

        // Same identity lingering: counted flag already set, no increment.
        state.observe_frame(&mut frame);
        assert_eq!(state.unique_counts().car, 1);

        // A new identity of the same class counts again.
        let mut frame = vec![obj(5, ObjectClass::Car, 0.0)];
        state.observe_frame(&mut frame);
        assert_eq!(state.unique_counts().car, 2);
    }

    #[test]
    fn test_unique_zone_attribution_at_flip() {
        let mut state = AggregationState::new(CountingMode::Unique, zones());

        let mut frame = vec![obj(0, ObjectClass::Car, 45.0)]; // center_x = 50, in "north"
        state.observe_frame(&mut frame);

        // Object later drifts into "south"; its count stays where it flipped.
        let mut moved = vec![TrackedObject {
            counted: true,
            ..obj(0, ObjectClass::Car, 145.0)
        }];
        state.observe_frame(&mut moved);

        assert_eq!(state.zone_counts()[0].1.car, 1);
        assert_eq!(state.zone_counts()[1].1.car, 0);
    }

    #[test]
    fn test_per_frame_zone_counts_recomputed() {
        let mut state = AggregationState::new(CountingMode::PerFrame, zones());

        let mut frame = vec![obj(0, ObjectClass::Car, 45.0)];
        state.observe_frame(&mut frame);
        assert_eq!(state.zone_counts()[0].1.car, 1);

        let mut frame = vec![obj(0, ObjectClass::Car, 145.0)];
        state.observe_frame(&mut frame);
        assert_eq!(state.zone_counts()[0].1.car, 0);
        assert_eq!(state.zone_counts()[1].1.car, 1);
    }

    #[test]
    fn test_unassigned_center_counts_globally_only() {
        let mut state = AggregationState::new(CountingMode::PerFrame, zones());

        // center_x = 305, outside both intervals
        let mut frame = vec![obj(0, ObjectClass::Truck, 300.0)];
        state.observe_frame(&mut frame);

        assert_eq!(state.live_counts().truck, 1);
        assert_eq!(state.zone_counts()[0].1.total(), 0);
        assert_eq!(state.zone_counts()[1].1.total(), 0);
    }

    #[test]
    fn test_global_counts_follow_mode() {
        let mut per_frame = AggregationState::new(CountingMode::PerFrame, ZoneClassifier::default());
        let mut unique = AggregationState::new(CountingMode::Unique, ZoneClassifier::default());

        let mut frame = vec![obj(0, ObjectClass::Car, 0.0)];
        per_frame.observe_frame(&mut frame);
        let mut frame = vec![obj(0, ObjectClass::Car, 0.0)];
        unique.observe_frame(&mut frame);

        // Both report 1 now...
        assert_eq!(per_frame.global_counts().car, 1);
        assert_eq!(unique.global_counts().car, 1);

        // ...but after the object leaves, only the unique total persists.
        per_frame.observe_frame(&mut []);
        unique.observe_frame(&mut []);
        assert_eq!(per_frame.global_counts().car, 0);
        assert_eq!(unique.global_counts().car, 1);
    }
}
