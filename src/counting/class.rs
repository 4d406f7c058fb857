//! Reporting vocabulary and per-class counters.

use std::fmt;

use serde::Serialize;

/// The classes the engine reports on.
///
/// Detector labels are normalized into this vocabulary exactly once, at
/// the detection boundary, so live counts, zone totals and history all
/// agree by construction. The one observed vocabulary mismatch is the
/// detector emitting `"motorcycle"` where reports say `"motorbike"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    Car,
    Bus,
    Truck,
    Motorbike,
    Person,
}

impl ObjectClass {
    pub const ALL: [ObjectClass; 5] = [
        ObjectClass::Car,
        ObjectClass::Bus,
        ObjectClass::Truck,
        ObjectClass::Motorbike,
        ObjectClass::Person,
    ];

    /// Map a detector label into the reporting vocabulary.
    ///
    /// Returns `None` for labels the engine does not count; those
    /// detections are rejected at the boundary.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "car" => Some(ObjectClass::Car),
            "bus" => Some(ObjectClass::Bus),
            "truck" => Some(ObjectClass::Truck),
            "motorbike" | "motorcycle" => Some(ObjectClass::Motorbike),
            "person" => Some(ObjectClass::Person),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectClass::Car => "car",
            ObjectClass::Bus => "bus",
            ObjectClass::Truck => "truck",
            ObjectClass::Motorbike => "motorbike",
            ObjectClass::Person => "person",
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One integer counter per reporting class.
///
/// Serializes flat as `{ "car": .., "bus": .., "truck": .., "motorbike": ..,
/// "person": .. }`, the body of every dispatched record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub car: u64,
    pub bus: u64,
    pub truck: u64,
    pub motorbike: u64,
    pub person: u64,
}

impl ClassCounts {
    pub fn increment(&mut self, class: ObjectClass) {
        *self.slot_mut(class) += 1;
    }

    pub fn get(&self, class: ObjectClass) -> u64 {
        match class {
            ObjectClass::Car => self.car,
            ObjectClass::Bus => self.bus,
            ObjectClass::Truck => self.truck,
            ObjectClass::Motorbike => self.motorbike,
            ObjectClass::Person => self.person,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total(&self) -> u64 {
        self.car + self.bus + self.truck + self.motorbike + self.person
    }

    fn slot_mut(&mut self, class: ObjectClass) -> &mut u64 {
        match class {
            ObjectClass::Car => &mut self.car,
            ObjectClass::Bus => &mut self.bus,
            ObjectClass::Truck => &mut self.truck,
            ObjectClass::Motorbike => &mut self.motorbike,
            ObjectClass::Person => &mut self.person,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_normalization() {
        assert_eq!(ObjectClass::from_label("car"), Some(ObjectClass::Car));
        assert_eq!(
            ObjectClass::from_label("motorcycle"),
            Some(ObjectClass::Motorbike)
        );
        assert_eq!(
            ObjectClass::from_label("motorbike"),
            Some(ObjectClass::Motorbike)
        );
        assert_eq!(ObjectClass::from_label("giraffe"), None);
        assert_eq!(ObjectClass::from_label(""), None);
    }

    #[test]
    fn test_counts_roundtrip() {
        let mut counts = ClassCounts::default();
        counts.increment(ObjectClass::Car);
        counts.increment(ObjectClass::Car);
        counts.increment(ObjectClass::Person);

        assert_eq!(counts.get(ObjectClass::Car), 2);
        assert_eq!(counts.get(ObjectClass::Person), 1);
        assert_eq!(counts.get(ObjectClass::Bus), 0);
        assert_eq!(counts.total(), 3);

        counts.reset();
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_counts_serialize_flat() {
        let mut counts = ClassCounts::default();
        counts.increment(ObjectClass::Motorbike);

        let value = serde_json::to_value(counts).unwrap();
        assert_eq!(value["motorbike"], 1);
        assert_eq!(value["car"], 0);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
