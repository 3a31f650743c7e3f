//! Swappable handle to the current index.
//!
//! A documentation browser keeps serving queries while a new index is built
//! for a changed documentation set. [`SharedIndex`] lets the rebuilt index be
//! installed in one step; queries already running keep their snapshot.

use crate::index::SymbolIndex;
use parking_lot::RwLock;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// A cloneable, thread-safe holder of the current [`SymbolIndex`].
///
/// # Example
///
/// ```rust,ignore
/// let shared = SharedIndex::new(output.index);
///
/// // Per keystroke
/// let snapshot = shared.snapshot();
/// let results = snapshot.search("re", Some(20));
///
/// // Documentation set changed
/// shared.replace(rebuilt.index);
/// ```
#[derive(Debug, Clone)]
pub struct SharedIndex {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    current: RwLock<IndexSnapshot>,
    generation: AtomicU64,
}

impl SharedIndex {
    /// Wraps an index as generation 0.
    pub fn new(index: SymbolIndex) -> Self {
        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(IndexSnapshot {
                    index: Arc::new(index),
                    generation: 0,
                }),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the index currently installed.
    pub fn snapshot(&self) -> IndexSnapshot {
        self.inner.current.read().clone()
    }

    /// Installs a rebuilt index and returns its generation.
    pub fn replace(&self, index: SymbolIndex) -> u64 {
        let entries = index.len();
        let mut current = self.inner.current.write();
        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
        *current = IndexSnapshot {
            index: Arc::new(index),
            generation,
        };
        drop(current);

        info!(generation, entries, "installed rebuilt symbol index");
        generation
    }

    /// Returns the generation of the installed index.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(SymbolIndex::default())
    }
}

/// A read-only view of one generation of the index.
///
/// Dereferences to [`SymbolIndex`].
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    index: Arc<SymbolIndex>,
    generation: u64,
}

impl IndexSnapshot {
    /// Returns the generation this snapshot was taken from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true if no newer index has been installed since.
    ///
    /// Consumers use this to drop results of a query that was overtaken by a
    /// rebuild.
    pub fn is_current(&self, shared: &SharedIndex) -> bool {
        self.generation == shared.generation()
    }
}

impl Deref for IndexSnapshot {
    type Target = SymbolIndex;

    fn deref(&self) -> &Self::Target {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::entry::{Entry, Target};
    use std::thread;

    fn index(names: &[&str]) -> SymbolIndex {
        let entries = names
            .iter()
            .map(|n| Entry::new(*n).with_target(Target::new(format!("p.html#{n}"))));
        SymbolIndex::build(entries, &IndexConfig::default()).index
    }

    #[test]
    fn snapshot_reads_current_index() {
        let shared = SharedIndex::new(index(&["read", "reset"]));
        let snapshot = shared.snapshot();
        assert_eq!(snapshot.generation(), 0);
        assert_eq!(snapshot.search("re", None).len(), 2);
    }

    #[test]
    fn replace_bumps_generation() {
        let shared = SharedIndex::new(index(&["read"]));
        let old = shared.snapshot();

        let generation = shared.replace(index(&["read", "rows"]));
        assert_eq!(generation, 1);
        assert_eq!(shared.generation(), 1);

        assert!(!old.is_current(&shared));
        assert_eq!(old.search("r", None).len(), 1);

        let new = shared.snapshot();
        assert!(new.is_current(&shared));
        assert_eq!(new.search("r", None).len(), 2);
    }

    #[test]
    fn concurrent_readers() {
        let shared = SharedIndex::new(index(&["rand", "read", "rows"]));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let snapshot = shared.snapshot();
                        assert!(!snapshot.search("r", None).is_empty());
                    }
                })
            })
            .collect();

        shared.replace(index(&["rand", "read", "rows", "run"]));

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.snapshot().len(), 4);
    }

    #[test]
    fn default_is_empty() {
        let shared = SharedIndex::default();
        assert!(shared.snapshot().is_empty());
    }
}
