//! Artifact formats and detection.

use crate::batch::RecordBatch;
use crate::error::ArtifactResult;
use crate::json::decode_json;
use crate::script::{decode_script, ScriptOptions};
use crate::table::{decode_table, TABLE_MAGIC};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that turns artifact bytes into records.
pub trait RecordSource {
    /// Decodes the whole artifact.
    fn decode(&self, data: &[u8]) -> ArtifactResult<RecordBatch>;
}

/// JSON record tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTable;

impl RecordSource for JsonTable {
    fn decode(&self, data: &[u8]) -> ArtifactResult<RecordBatch> {
        decode_json(data)
    }
}

/// Length-prefixed binary tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryTable;

impl RecordSource for BinaryTable {
    fn decode(&self, data: &[u8]) -> ArtifactResult<RecordBatch> {
        decode_table(data)
    }
}

/// Doxygen search scripts.
#[derive(Debug, Clone, Default)]
pub struct SearchScript {
    /// Text handling options.
    pub options: ScriptOptions,
}

impl RecordSource for SearchScript {
    fn decode(&self, data: &[u8]) -> ArtifactResult<RecordBatch> {
        decode_script(data, &self.options)
    }
}

/// The artifact encodings this crate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// JSON array of record objects.
    Json,
    /// Binary table starting with `DSYM`.
    Table,
    /// Doxygen `var searchData = [...]` script.
    Script,
}

impl ArtifactFormat {
    /// Guesses the format from the leading bytes.
    ///
    /// Returns `None` if nothing matches.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(&TABLE_MAGIC) {
            return Some(Self::Table);
        }

        let text = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let start = text.iter().position(|b| !b.is_ascii_whitespace())?;
        let text = &text[start..];

        if text.starts_with(b"var") {
            return Some(Self::Script);
        }
        match text[0] {
            b'[' if looks_like_script(text) => Some(Self::Script),
            b'[' => Some(Self::Json),
            _ => None,
        }
    }

    /// Decodes data in this format.
    pub fn decode(self, data: &[u8], options: &ScriptOptions) -> ArtifactResult<RecordBatch> {
        match self {
            Self::Json => JsonTable.decode(data),
            Self::Table => BinaryTable.decode(data),
            Self::Script => SearchScript {
                options: options.clone(),
            }
            .decode(data),
        }
    }
}

/// A bare literal array whose first string uses single quotes.
fn looks_like_script(text: &[u8]) -> bool {
    text.iter()
        .find(|b| **b == b'\'' || **b == b'"')
        .is_some_and(|b| *b == b'\'')
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Table => "table",
            Self::Script => "script",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::encode_table;
    use docsearch_core::Entry;

    #[test]
    fn detect_formats() {
        let table = encode_table(&Vec::<Entry>::new()).unwrap();
        assert_eq!(ArtifactFormat::detect(&table), Some(ArtifactFormat::Table));
        assert_eq!(
            ArtifactFormat::detect(b"  [{\"name\": \"max\"}]"),
            Some(ArtifactFormat::Json)
        );
        assert_eq!(
            ArtifactFormat::detect(b"var searchData=\n[\n];"),
            Some(ArtifactFormat::Script)
        );
        assert_eq!(
            ArtifactFormat::detect(b"[['max',['max',['m.html',1,'']]]]"),
            Some(ArtifactFormat::Script)
        );
        assert_eq!(ArtifactFormat::detect(b"[]"), Some(ArtifactFormat::Json));
        assert_eq!(ArtifactFormat::detect(b"<html>"), None);
        assert_eq!(ArtifactFormat::detect(b"   "), None);
    }

    #[test]
    fn sources_dispatch() {
        let batch = ArtifactFormat::Json
            .decode(b"[]", &ScriptOptions::default())
            .unwrap();
        assert!(batch.is_empty());

        let batch = SearchScript::default().decode(b"var searchData=[];").unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(ArtifactFormat::Script.to_string(), "script");
    }
}
