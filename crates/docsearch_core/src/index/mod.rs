//! Symbol index implementation.
//!
//! The index is built once from the full set of entries and never mutated
//! afterwards. A changed documentation set means a new index.
//!
//! # Types
//!
//! - [`SymbolIndex`]: ordered prefix and substring queries
//! - [`IndexBuilder`]: incremental construction with duplicate merging
//! - [`BuildOutput`]: the index plus everything rejected while building it

mod bucket;
mod builder;
mod symbol;

pub use builder::{BuildOutput, IndexBuilder};
pub use symbol::SymbolIndex;
