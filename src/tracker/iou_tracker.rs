//! Frame-local greedy IoU tracker.

use tracing::debug;

use crate::tracker::matching::{self, AssignmentResult, Detection};
use crate::tracker::tracked_object::TrackedObject;

/// IoU threshold above which a detection may claim a previous object.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Multi-object tracker assigning stable ids by greedy first-match IoU
/// association against the immediately preceding frame.
///
/// Ids are allocated from a counter owned by the tracker, monotonically
/// increasing and never reused. An object that fails to match for a
/// single frame is dropped; if the same physical object is re-detected
/// later it receives a new id (and is counted again downstream). That
/// double count is the documented reference behavior, not a bug to fix.
///
/// Frames must be processed strictly in capture order: each update
/// matches against the set produced by the previous one.
pub struct IouTracker {
    objects: Vec<TrackedObject>,
    next_id: u64,
    iou_threshold: f64,
}

impl Default for IouTracker {
    fn default() -> Self {
        Self::new(DEFAULT_IOU_THRESHOLD)
    }
}

impl IouTracker {
    pub fn new(iou_threshold: f64) -> Self {
        Self {
            objects: Vec::new(),
            next_id: 0,
            iou_threshold,
        }
    }

    /// Currently tracked objects, in this frame's detection order.
    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    /// Consume one frame's detections and produce the new tracked set.
    ///
    /// Matched detections inherit the previous object's id and `counted`
    /// flag and take the fresh bounding box. Unmatched detections become
    /// new objects. Previous objects that matched nothing are dropped.
    pub fn update(&mut self, detections: &[Detection]) -> &mut [TrackedObject] {
        let AssignmentResult {
            matches,
            unmatched_tracks,
            ..
        } = matching::first_match(detections, &self.objects, self.iou_threshold);

        let mut matched_prev: Vec<Option<usize>> = vec![None; detections.len()];
        for (di, pi) in matches {
            matched_prev[di] = Some(pi);
        }

        let mut next = Vec::with_capacity(detections.len());
        for (di, det) in detections.iter().enumerate() {
            match matched_prev[di] {
                Some(pi) => {
                    next.push(TrackedObject::inherit(&self.objects[pi], det.class, det.bbox));
                }
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    debug!(id, class = %det.class, "new track");
                    next.push(TrackedObject::new(id, det.class, det.bbox));
                }
            }
        }

        if !unmatched_tracks.is_empty() {
            debug!(dropped = unmatched_tracks.len(), "tracks dropped");
        }

        self.objects = next;
        &mut self.objects
    }
}
