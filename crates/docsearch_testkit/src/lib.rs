//! # Docsearch Testkit
//!
//! Test utilities for docsearch.
//!
//! This crate provides:
//! - Fixtures taken from a real Doxygen search directory
//! - Temporary search directory helpers
//! - Property-based test generators using proptest
//! - Log capture for tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docsearch_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_blaze() {
//!     let output = SymbolIndex::build(blaze_function_groups(), &IndexConfig::default());
//!     assert_eq!(output.index.search("mo", None).len(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::logging::*;
}

pub use fixtures::*;
pub use generators::*;
pub use logging::*;
