//! Horizontal zone classification for count attribution.

use serde::Deserialize;

/// One configured zone: a closed interval over the frame's x axis.
///
/// Zones must not overlap; that invariant belongs to configuration time
/// and is not checked at runtime. If it is violated anyway, a point in
/// the overlap resolves to the first listed zone containing it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ZoneSpec {
    pub name: String,
    pub x_start: f64,
    pub x_end: f64,
}

/// Maps a horizontal anchor to the name of the zone containing it.
#[derive(Debug, Clone, Default)]
pub struct ZoneClassifier {
    zones: Vec<ZoneSpec>,
}

impl ZoneClassifier {
    pub fn new(zones: Vec<ZoneSpec>) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &[ZoneSpec] {
        &self.zones
    }

    /// True when no zones are configured (single-zone deployment).
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// First listed zone whose `[x_start, x_end]` interval contains `x`,
    /// or `None` when the point is unassigned.
    pub fn classify(&self, x: f64) -> Option<&str> {
        self.zones
            .iter()
            .find(|z| x >= z.x_start && x <= z.x_end)
            .map(|z| z.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str, x_start: f64, x_end: f64) -> ZoneSpec {
        ZoneSpec {
            name: name.to_string(),
            x_start,
            x_end,
        }
    }

    #[test]
    fn test_classify_inside_and_outside() {
        let classifier = ZoneClassifier::new(vec![zone("left", 0.0, 100.0), zone("right", 100.5, 200.0)]);

        assert_eq!(classifier.classify(50.0), Some("left"));
        assert_eq!(classifier.classify(150.0), Some("right"));
        assert_eq!(classifier.classify(100.2), None);
        assert_eq!(classifier.classify(-1.0), None);
        assert_eq!(classifier.classify(500.0), None);
    }

    #[test]
    fn test_shared_boundary_resolves_to_first_listed() {
        let classifier = ZoneClassifier::new(vec![zone("a", 0.0, 100.0), zone("b", 100.0, 200.0)]);
        assert_eq!(classifier.classify(100.0), Some("a"));
    }

    #[test]
    fn test_overlapping_zones_first_wins() {
        let classifier = ZoneClassifier::new(vec![zone("a", 0.0, 150.0), zone("b", 100.0, 200.0)]);
        assert_eq!(classifier.classify(120.0), Some("a"));
    }

    #[test]
    fn test_empty_classifier() {
        let classifier = ZoneClassifier::default();
        assert!(classifier.is_empty());
        assert_eq!(classifier.classify(10.0), None);
    }
}
