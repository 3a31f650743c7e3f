//! # Docsearch Artifact
//!
//! Readers and writers for the static tables a documentation build emits.
//!
//! This crate provides:
//! - JSON record tables ([`decode_json`], [`encode_json`])
//! - Length-prefixed binary tables with a SHA-256 trailer
//!   ([`decode_table`], [`encode_table`])
//! - Doxygen `searchData` scripts ([`decode_script`])
//! - Loaders that build a [`SymbolIndex`](docsearch_core::SymbolIndex) from
//!   bytes or a file, or a [`SearchCatalog`](docsearch_core::SearchCatalog)
//!   from a Doxygen `search/` directory
//!
//! A damaged artifact fails as a whole with an [`ArtifactError`]. A damaged
//! record inside an otherwise readable artifact is skipped and reported next
//! to the index that was built from the rest.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docsearch_artifact::{load_search_dir, ArtifactConfig};
//! use docsearch_core::Category;
//!
//! let output = load_search_dir("html/search", &ArtifactConfig::default())?;
//! for entry in output.catalog.search(Category::Functions, "max", Some(10)) {
//!     println!("{}", entry.label);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod format;
mod json;
mod load;
mod script;
mod table;

pub use batch::RecordBatch;
pub use config::ArtifactConfig;
pub use error::{ArtifactError, ArtifactResult};
pub use format::{ArtifactFormat, BinaryTable, JsonTable, RecordSource, SearchScript};
pub use json::{decode_json, encode_json};
pub use load::{load_bytes, load_path, load_search_dir, SearchDirOutput};
pub use script::{decode_entities, decode_script, parse_script, unescape_id, Literal, ScriptOptions};
pub use table::{decode_table, encode_table, TABLE_MAGIC, TABLE_VERSION};
