//! Greedy first-match association between detections and tracked objects.

use ndarray::Array2;
use tracing::trace;

use crate::counting::ObjectClass;
use crate::tracker::rect::{Rect, iou_batch};
use crate::tracker::tracked_object::TrackedObject;

/// Detection input for the tracker: a validated per-frame observation.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Normalized class label
    pub class: ObjectClass,
    /// Detector confidence in `[0, 1]`
    pub score: f64,
    /// Bounding box in TLWH format
    pub bbox: Rect,
}

impl Detection {
    pub fn new(class: ObjectClass, score: f64, bbox: Rect) -> Self {
        Self { class, score, bbox }
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// Pairs of (detection index, previous-object index)
    pub matches: Vec<(usize, usize)>,
    /// Previous objects no detection claimed this frame
    pub unmatched_tracks: Vec<usize>,
    /// Detections that matched no previous object
    pub unmatched_detections: Vec<usize>,
}

/// Associate detections with the previous frame's tracked objects.
///
/// Each detection, in arrival order, claims the FIRST previous object of
/// the same class whose IoU exceeds `iou_thresh`. Ties among several
/// eligible previous objects are broken by their existing order, not by
/// maximal IoU; this tie-break is part of the observable counting
/// behavior and must not be replaced by best-match assignment. A previous
/// object can be claimed at most once per frame, so an id is never
/// inherited by two detections.
pub fn first_match(
    detections: &[Detection],
    previous: &[TrackedObject],
    iou_thresh: f64,
) -> AssignmentResult {
    if detections.is_empty() || previous.is_empty() {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..previous.len()).collect(),
            unmatched_detections: (0..detections.len()).collect(),
        };
    }

    let det_boxes: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();
    let prev_boxes: Vec<Rect> = previous.iter().map(|t| t.bbox).collect();
    let ious: Array2<f64> = iou_batch(&det_boxes, &prev_boxes);

    let mut claimed = vec![false; previous.len()];
    let mut matches = Vec::new();
    let mut unmatched_detections = Vec::new();

    for (di, det) in detections.iter().enumerate() {
        let hit = previous.iter().enumerate().find(|(pi, prev)| {
            !claimed[*pi] && prev.class == det.class && ious[[di, *pi]] > iou_thresh
        });
        match hit {
            Some((pi, prev)) => {
                trace!(detection = di, track_id = prev.id, iou = ious[[di, pi]], "matched");
                claimed[pi] = true;
                matches.push((di, pi));
            }
            None => unmatched_detections.push(di),
        }
    }

    let unmatched_tracks = claimed
        .iter()
        .enumerate()
        .filter_map(|(pi, &c)| if c { None } else { Some(pi) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}
