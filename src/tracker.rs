mod iou_tracker;
mod matching;
mod rect;
mod tracked_object;

pub use iou_tracker::{DEFAULT_IOU_THRESHOLD, IouTracker};
pub use matching::{AssignmentResult, Detection, first_match};
pub use rect::{Rect, iou_batch};
pub use tracked_object::TrackedObject;
