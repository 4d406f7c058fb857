//! A detection that has been given a persistent identity.

use crate::counting::ObjectClass;
use crate::tracker::rect::Rect;

/// A tracked object: one physical object with a stable id.
///
/// Owned exclusively by the [`IouTracker`](crate::tracker::IouTracker).
/// Lives as long as it keeps matching a detection; the first frame it
/// fails to match, it is dropped with no occlusion memory, and a later
/// re-detection allocates a fresh id.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    /// Unique identifier, never reused
    pub id: u64,
    /// Normalized class label
    pub class: ObjectClass,
    /// Most recent bounding box
    pub bbox: Rect,
    /// Whether this identity has already been counted
    pub counted: bool,
}

impl TrackedObject {
    /// Create a fresh, not-yet-counted object.
    pub fn new(id: u64, class: ObjectClass, bbox: Rect) -> Self {
        Self {
            id,
            class,
            bbox,
            counted: false,
        }
    }

    /// Carry an identity forward onto this frame's detection box.
    pub fn inherit(previous: &TrackedObject, class: ObjectClass, bbox: Rect) -> Self {
        Self {
            id: previous.id,
            class,
            bbox,
            counted: previous.counted,
        }
    }

    /// Flip `counted` from false to true. Returns whether the flip
    /// happened; once set, the flag never goes back.
    pub fn mark_counted(&mut self) -> bool {
        if self.counted {
            false
        } else {
            self.counted = true;
            true
        }
    }
}
