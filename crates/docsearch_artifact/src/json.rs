//! JSON record tables.
//!
//! ```text
//! [
//!   { "name": "max", "label": "max",
//!     "targets": [ { "url": "../de/df1/group__math.html#gac5…", "qualifier": "blaze::max(…)" } ] },
//!   …
//! ]
//! ```

use crate::batch::RecordBatch;
use crate::error::ArtifactResult;
use docsearch_core::{Entry, IndexError, Record};
use serde_json::Value;

/// Decodes a JSON table.
///
/// # Errors
///
/// Returns an error if the document is not a JSON array. Elements that are
/// not well-formed records become defects in the batch.
pub fn decode_json(bytes: &[u8]) -> ArtifactResult<RecordBatch> {
    let elements: Vec<Value> = serde_json::from_slice(bytes)?;

    let mut batch = RecordBatch::new();
    for (position, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<Record>(element) {
            Ok(mut record) => {
                record.position = position;
                batch.push(record);
            }
            Err(err) => batch.push_defect(IndexError::malformed(position, err.to_string())),
        }
    }
    Ok(batch)
}

/// Encodes entries as a pretty-printed JSON table.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_json<'a, I>(entries: I) -> ArtifactResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let entries: Vec<&Entry> = entries.into_iter().collect();
    Ok(serde_json::to_vec_pretty(&entries)?)
}
