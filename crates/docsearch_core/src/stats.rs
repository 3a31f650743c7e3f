//! Index statistics.
//!
//! Statistics are computed once when an index is built. They are used for
//! build logging and by hosts that want to show how large a documentation
//! set is.
//!
//! # Usage
//!
//! ```rust,ignore
//! let output = SymbolIndex::build(entries, &IndexConfig::default());
//! let stats = output.index.stats();
//! println!("entries: {}", stats.entries);
//! println!("largest bucket: {}", stats.largest_bucket);
//! ```

use serde::Serialize;
use std::ops::AddAssign;

/// Counters describing a built index and the input it came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of distinct entries.
    pub entries: usize,
    /// Total targets across all entries.
    pub targets: usize,
    /// Number of first-character buckets.
    pub buckets: usize,
    /// Entry count of the largest bucket.
    pub largest_bucket: usize,
    /// Records offered to the builder, valid or not.
    pub records_seen: usize,
    /// Records folded into an earlier entry with the same name.
    pub records_merged: usize,
    /// Records rejected as malformed or conflicting.
    pub records_skipped: usize,
}

impl IndexStats {
    /// Returns the average number of targets per entry.
    pub fn targets_per_entry(&self) -> f64 {
        if self.entries == 0 {
            0.0
        } else {
            self.targets as f64 / self.entries as f64
        }
    }
}

impl AddAssign for IndexStats {
    fn add_assign(&mut self, other: Self) {
        self.entries += other.entries;
        self.targets += other.targets;
        self.buckets += other.buckets;
        self.largest_bucket = self.largest_bucket.max(other.largest_bucket);
        self.records_seen += other.records_seen;
        self.records_merged += other.records_merged;
        self.records_skipped += other.records_skipped;
    }
}
