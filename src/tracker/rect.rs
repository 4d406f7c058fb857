/// Axis-aligned bounding box in frame-pixel coordinates (TLWH format).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f64,
    /// Top-left y coordinate
    pub y: f64,
    /// Width of the bounding box
    pub width: f64,
    /// Height of the bounding box
    pub height: f64,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Horizontal midpoint, the anchor used for zone attribution.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// The intersection is clamped to zero for disjoint boxes. A degenerate
    /// pair with non-positive union area yields `0.0` (treated as no
    /// overlap) rather than a NaN.
    pub fn iou(&self, other: &Rect) -> f64 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            inter_area / union_area
        } else {
            0.0
        }
    }
}

use ndarray::Array2;

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_batch(boxes_a: &[Rect], boxes_b: &[Rect]) -> Array2<f64> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = a.iou(b);
        }
    }
    ious
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.center(), (25.0, 40.0));
        assert_eq!(rect.center_x(), 25.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        assert_relative_eq!(a.iou(&b), 25.0 / 175.0, epsilon = 1e-9);
    }

    #[test]
    fn test_iou_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(1.0, 1.0, 10.0, 10.0);
        assert_relative_eq!(a.iou(&b), b.iou(&a), epsilon = 1e-12);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_same_box() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_relative_eq!(a.iou(&a), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_iou_zero_area_boxes() {
        let a = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert_eq!(a.iou(&a), 0.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_batch_shape() {
        let a = vec![Rect::new(0.0, 0.0, 10.0, 10.0)];
        let b = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(100.0, 100.0, 10.0, 10.0),
        ];
        let ious = iou_batch(&a, &b);
        assert_eq!(ious.dim(), (1, 2));
        assert_relative_eq!(ious[[0, 0]], 1.0, epsilon = 1e-12);
        assert_eq!(ious[[0, 1]], 0.0);
    }
}
