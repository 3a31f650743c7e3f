//! # Docsearch Core
//!
//! Symbol search index for generated API documentation.
//!
//! This crate provides:
//! - The entry model: a symbol name, its display label and link targets
//! - [`SymbolIndex`] with case-insensitive, deterministically ordered prefix queries
//! - [`IndexBuilder`] that merges duplicate names and collects bad records
//! - [`SearchCatalog`] holding one index per symbol category
//! - [`SharedIndex`] for swapping in a rebuilt index while serving queries
//!
//! ## Usage
//!
//! ```
//! use docsearch_core::{Entry, IndexConfig, SymbolIndex, Target};
//!
//! let entries = vec![
//!     Entry::new("rows").with_target(Target::new("matrix.html#rows")),
//!     Entry::new("reset").with_target(Target::new("matrix.html#reset")),
//!     Entry::new("read").with_target(Target::new("io.html#read")),
//! ];
//!
//! let output = SymbolIndex::build(entries, &IndexConfig::default());
//! assert!(output.is_clean());
//!
//! let names: Vec<_> = output
//!     .index
//!     .search("re", None)
//!     .into_iter()
//!     .map(|e| e.name.as_str())
//!     .collect();
//! assert_eq!(names, ["read", "reset"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod entry;
mod error;
mod index;
mod shared;
mod stats;

pub use catalog::{CatalogBuilder, CatalogOutput, Category, SearchCatalog, UnknownCategory};
pub use config::{DuplicatePolicy, IndexConfig};
pub use entry::{fold_case, Entry, Record, RecordTarget, Target};
pub use error::{CoreResult, IndexError};
pub use index::{BuildOutput, IndexBuilder, SymbolIndex};
pub use shared::{IndexSnapshot, SharedIndex};
pub use stats::IndexStats;
