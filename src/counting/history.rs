//! Bounded rolling history of count snapshots.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::counting::class::ClassCounts;

/// Default number of retained snapshots (the reference deployment keeps
/// a 30-second window at a 1 Hz snapshot cadence).
pub const DEFAULT_HISTORY_CAPACITY: usize = 30;

/// One timestamped aggregation record. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub timestamp: DateTime<Utc>,
    pub counts: ClassCounts,
}

/// Fixed-capacity FIFO of snapshots.
///
/// Capacity is a hard ceiling: when full, the oldest entry is evicted
/// before the new one is inserted. Snapshots are read back in insertion
/// (chronological) order; that sequence is the time series handed to
/// export and visualization.
#[derive(Debug)]
pub struct HistoryBuffer {
    entries: VecDeque<HistorySnapshot>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// Capacity must be at least 1; zero is clamped up.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, snapshot: HistorySnapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// All retained snapshots, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &HistorySnapshot> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistorySnapshot> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(second: u32, cars: u64) -> HistorySnapshot {
        HistorySnapshot {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap(),
            counts: ClassCounts {
                car: cars,
                ..ClassCounts::default()
            },
        }
    }

    #[test]
    fn test_capacity_is_hard_ceiling() {
        let mut buffer = HistoryBuffer::new(3);
        for i in 0..10 {
            buffer.append(snapshot(i, i as u64));
            assert!(buffer.len() <= 3);
        }
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut buffer = HistoryBuffer::new(3);
        for i in 0..4 {
            buffer.append(snapshot(i, i as u64));
        }

        // After capacity+1 appends the first retained entry is the 2nd appended.
        let cars: Vec<u64> = buffer.snapshots().map(|s| s.counts.car).collect();
        assert_eq!(cars, vec![1, 2, 3]);
        assert_eq!(buffer.latest().unwrap().counts.car, 3);
    }

    #[test]
    fn test_chronological_order() {
        let mut buffer = HistoryBuffer::new(5);
        for i in 0..5 {
            buffer.append(snapshot(i, 0));
        }
        let timestamps: Vec<_> = buffer.snapshots().map(|s| s.timestamp).collect();
        let mut sorted = timestamps.clone();
        sorted.sort();
        assert_eq!(timestamps, sorted);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut buffer = HistoryBuffer::new(0);
        buffer.append(snapshot(0, 1));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), 1);
    }
}
