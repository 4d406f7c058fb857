//! Trait for the external detector boundary.

use tracing::debug;

use crate::counting::ObjectClass;
use crate::tracker::{Detection, Rect};

/// One raw detection as the external detector emits it, before any
/// validation or vocabulary normalization.
#[derive(Debug, Clone)]
pub struct RawDetection {
    /// Detector-vocabulary class label
    pub label: String,
    /// Confidence in `[0, 1]`
    pub score: f64,
    /// Bounding box as (x, y, width, height) in frame pixels
    pub bbox: (f64, f64, f64, f64),
}

impl RawDetection {
    pub fn new(label: impl Into<String>, score: f64, bbox: (f64, f64, f64, f64)) -> Self {
        Self {
            label: label.into(),
            score,
            bbox,
        }
    }
}

/// Trait for per-frame detection producers.
///
/// Implement this to connect any detector (model inference, a replayed
/// recording, a test script) to the counting pipeline.
///
/// # Example
///
/// ```
/// use trafficount::{DetectionSource, RawDetection};
///
/// struct Replay {
///     frames: Vec<Vec<RawDetection>>,
/// }
///
/// impl DetectionSource for Replay {
///     type Error = std::convert::Infallible;
///
///     fn next_frame(&mut self) -> Result<Option<Vec<RawDetection>>, Self::Error> {
///         if self.frames.is_empty() {
///             Ok(None)
///         } else {
///             Ok(Some(self.frames.remove(0)))
///         }
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Produce the next frame's detections, or `None` when the stream
    /// has ended. Called strictly sequentially, one cycle at a time.
    fn next_frame(&mut self) -> Result<Option<Vec<RawDetection>>, Self::Error>;
}

/// Validate raw detections at the boundary.
///
/// A detection with a negative box dimension, an out-of-range score or a
/// label the vocabulary cannot map is excluded from this frame with a
/// debug log; it never fails the cycle. Zero-area boxes pass through
/// (the IoU treats them as no overlap).
pub fn sanitize(raw: Vec<RawDetection>) -> Vec<Detection> {
    raw.into_iter()
        .filter_map(|r| {
            let (x, y, w, h) = r.bbox;
            if w < 0.0 || h < 0.0 {
                debug!(label = %r.label, w, h, "rejected detection: negative dimension");
                return None;
            }
            if !(0.0..=1.0).contains(&r.score) {
                debug!(label = %r.label, score = r.score, "rejected detection: score out of range");
                return None;
            }
            let Some(class) = ObjectClass::from_label(&r.label) else {
                debug!(label = %r.label, "rejected detection: unmapped label");
                return None;
            };
            Some(Detection::new(class, r.score, Rect::new(x, y, w, h)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_rejects_malformed() {
        let raw = vec![
            RawDetection::new("car", 0.9, (0.0, 0.0, -5.0, 10.0)),
            RawDetection::new("car", 1.5, (0.0, 0.0, 10.0, 10.0)),
            RawDetection::new("", 0.9, (0.0, 0.0, 10.0, 10.0)),
            RawDetection::new("zebra", 0.9, (0.0, 0.0, 10.0, 10.0)),
        ];
        assert!(sanitize(raw).is_empty());
    }

    #[test]
    fn test_sanitize_normalizes_labels() {
        let raw = vec![RawDetection::new("motorcycle", 0.8, (0.0, 0.0, 10.0, 10.0))];
        let detections = sanitize(raw);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].class, ObjectClass::Motorbike);
    }

    #[test]
    fn test_sanitize_keeps_zero_area_boxes() {
        let raw = vec![RawDetection::new("car", 0.9, (5.0, 5.0, 0.0, 0.0))];
        assert_eq!(sanitize(raw).len(), 1);
    }
}
