//! The symbol index.

use crate::config::IndexConfig;
use crate::entry::{fold_case, Entry};
use crate::index::bucket::Bucket;
use crate::index::builder::{BuildOutput, IndexBuilder};
use crate::stats::IndexStats;
use std::collections::{BTreeMap, HashMap};

/// Immutable prefix search index over documentation symbols.
///
/// `SymbolIndex` supports:
/// - Case-insensitive prefix queries ([`search`](Self::search))
/// - Substring queries ([`search_substring`](Self::search_substring))
/// - Exact lookups ([`lookup`](Self::lookup))
///
/// Results are ordered by case-folded name, ties broken by insertion order,
/// so the same query always yields the same sequence.
///
/// Entries are grouped into buckets by the first character of their folded
/// name. A prefix query touches a single bucket: a binary search finds where
/// the prefix would sort and the scan stops at the first name that no longer
/// shares it.
///
/// # Example
///
/// ```rust,ignore
/// let output = SymbolIndex::build(entries, &IndexConfig::default());
/// for entry in output.index.search("re", Some(10)) {
///     println!("{} ({} targets)", entry.label, entry.targets.len());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    /// Entries in first-seen order; ordinals index into this.
    entries: Vec<Entry>,
    /// Folded name to ordinal.
    keys: HashMap<String, usize>,
    /// First folded character to bucket.
    buckets: BTreeMap<char, Bucket>,
    stats: IndexStats,
}

impl SymbolIndex {
    /// Builds an index from entries.
    ///
    /// Duplicates are merged or rejected according to `config`; invalid
    /// entries are skipped. Both are reported in [`BuildOutput::errors`].
    pub fn build<I>(entries: I, config: &IndexConfig) -> BuildOutput
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut builder = IndexBuilder::new(config.clone());
        for entry in entries {
            builder.push_entry(entry);
        }
        builder.finish()
    }

    pub(crate) fn from_parts(
        entries: Vec<Entry>,
        keys: HashMap<String, usize>,
        buckets: BTreeMap<char, Bucket>,
        stats: IndexStats,
    ) -> Self {
        Self {
            entries,
            keys,
            buckets,
            stats,
        }
    }

    /// Returns entries whose name starts with `prefix`, ignoring case.
    ///
    /// An empty prefix matches nothing. `limit` truncates the sorted result.
    pub fn search(&self, prefix: &str, limit: Option<usize>) -> Vec<&Entry> {
        let folded = fold_case(prefix);
        let Some(first) = folded.chars().next() else {
            return Vec::new();
        };
        let Some(bucket) = self.buckets.get(&first) else {
            return Vec::new();
        };

        bucket
            .prefix_matches(&folded)
            .take(limit.unwrap_or(usize::MAX))
            .map(|ordinal| &self.entries[ordinal])
            .collect()
    }

    /// Returns entries whose name contains `fragment`, ignoring case.
    ///
    /// Same ordering and limit rules as [`search`](Self::search). This scans
    /// every bucket.
    pub fn search_substring(&self, fragment: &str, limit: Option<usize>) -> Vec<&Entry> {
        let folded = fold_case(fragment);
        if folded.is_empty() {
            return Vec::new();
        }
        let fragment = folded.as_str();

        self.buckets
            .values()
            .flat_map(move |bucket| bucket.substring_matches(fragment))
            .take(limit.unwrap_or(usize::MAX))
            .map(|ordinal| &self.entries[ordinal])
            .collect()
    }

    /// Looks up an entry by exact name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.keys
            .get(&fold_case(name))
            .map(|&ordinal| &self.entries[ordinal])
    }

    /// Checks if the index contains a name.
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(&fold_case(name))
    }

    /// Iterates over all entries in search order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.buckets
            .values()
            .flat_map(Bucket::ordinals)
            .map(|ordinal| &self.entries[ordinal])
    }

    /// Returns entries in the order they were first seen.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the build statistics.
    pub fn stats(&self) -> IndexStats {
        self.stats
    }
}
