mod aggregate;
mod class;
mod history;
mod zones;

pub use aggregate::{AggregationState, CountingMode};
pub use class::{ClassCounts, ObjectClass};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryBuffer, HistorySnapshot};
pub use zones::{ZoneClassifier, ZoneSpec};
