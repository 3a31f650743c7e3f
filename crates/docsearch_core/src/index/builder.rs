//! Incremental index construction.

use crate::config::{DuplicatePolicy, IndexConfig};
use crate::entry::{Entry, Record};
use crate::error::IndexError;
use crate::index::bucket::Bucket;
use crate::index::symbol::SymbolIndex;
use crate::stats::IndexStats;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// The result of building an index.
///
/// The index is always usable, even when some input was rejected. Rejected
/// input is described by `errors`, in input order.
#[derive(Debug)]
pub struct BuildOutput {
    /// The built index.
    pub index: SymbolIndex,
    /// Problems found in the input.
    pub errors: Vec<IndexError>,
}

impl BuildOutput {
    /// Returns true if every input record made it into the index.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Splits the output into the index and its errors.
    pub fn into_parts(self) -> (SymbolIndex, Vec<IndexError>) {
        (self.index, self.errors)
    }
}

/// Collects entries and records, merging duplicates as they arrive.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = IndexBuilder::new(IndexConfig::default());
/// builder.push_entry(Entry::new("max").with_target(Target::new("math.html#max")));
/// builder.push_record(record);
/// let output = builder.finish();
/// ```
#[derive(Debug)]
pub struct IndexBuilder {
    config: IndexConfig,
    /// Accepted entries in first-seen order.
    entries: Vec<Entry>,
    /// Folded name to position in `entries`.
    keys: HashMap<String, usize>,
    errors: Vec<IndexError>,
    records_seen: usize,
    records_merged: usize,
}

impl IndexBuilder {
    /// Creates an empty builder.
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            keys: HashMap::new(),
            errors: Vec::new(),
            records_seen: 0,
            records_merged: 0,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Adds an entry. Its position is the number of inputs offered so far.
    pub fn push_entry(&mut self, entry: Entry) {
        let position = self.records_seen;
        self.records_seen += 1;

        match entry.validate(position) {
            Ok(()) => self.insert(position, entry),
            Err(err) => self.reject(err),
        }
    }

    /// Validates a record and adds it.
    pub fn push_record(&mut self, record: Record) {
        self.records_seen += 1;

        let position = record.position;
        match record.into_entry() {
            Ok(entry) => self.insert(position, entry),
            Err(err) => self.reject(err),
        }
    }

    /// Records a defect found by a decoder before a record could be formed.
    pub fn report(&mut self, error: IndexError) {
        self.records_seen += 1;
        self.reject(error);
    }

    /// Number of distinct entries accepted so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry has been accepted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inputs offered so far, valid or not.
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    fn reject(&mut self, error: IndexError) {
        warn!(position = error.position(), error = %error, "skipping record");
        self.errors.push(error);
    }

    fn insert(&mut self, position: usize, entry: Entry) {
        let key = entry.key();
        let Some(&slot) = self.keys.get(&key) else {
            self.keys.insert(key, self.entries.len());
            self.entries.push(entry);
            return;
        };

        let existing = &mut self.entries[slot];
        if self.config.duplicate_policy == DuplicatePolicy::Strict && existing.label != entry.label {
            let error = IndexError::DuplicateNameConflict {
                name: entry.name,
                existing_label: existing.label.clone(),
                conflicting_label: entry.label,
                position,
            };
            self.reject(error);
            return;
        }

        for target in entry.targets {
            if self.config.dedupe_targets && existing.targets.contains(&target) {
                continue;
            }
            existing.targets.push(target);
        }
        self.records_merged += 1;
    }

    /// Buckets the accepted entries and produces the index.
    pub fn finish(self) -> BuildOutput {
        let mut buckets: BTreeMap<char, Bucket> = BTreeMap::new();
        for (key, &ordinal) in &self.keys {
            // Keys are never empty: validation rejects empty names and
            // lowercasing a non-empty string never empties it.
            if let Some(first) = key.chars().next() {
                buckets.entry(first).or_default().push(key.clone(), ordinal);
            }
        }
        for bucket in buckets.values_mut() {
            bucket.seal();
        }

        let stats = IndexStats {
            entries: self.entries.len(),
            targets: self.entries.iter().map(|e| e.targets.len()).sum(),
            buckets: buckets.len(),
            largest_bucket: buckets.values().map(Bucket::len).max().unwrap_or(0),
            records_seen: self.records_seen,
            records_merged: self.records_merged,
            records_skipped: self.errors.len(),
        };

        debug!(
            entries = stats.entries,
            targets = stats.targets,
            buckets = stats.buckets,
            merged = stats.records_merged,
            skipped = stats.records_skipped,
            "built symbol index"
        );

        BuildOutput {
            index: SymbolIndex::from_parts(self.entries, self.keys, buckets, stats),
            errors: self.errors,
        }
    }
}
