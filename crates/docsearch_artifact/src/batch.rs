//! Decoded records awaiting validation.

use docsearch_core::{BuildOutput, IndexBuilder, IndexConfig, IndexError, Record};

/// Everything a decoder found in one artifact, in artifact order.
///
/// Items the decoder could shape into a [`Record`] are `Ok`; items too
/// broken to even form a record are `Err` with a
/// [`IndexError::MalformedRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBatch {
    items: Vec<Result<Record, IndexError>>,
}

impl RecordBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decoded record.
    pub fn push(&mut self, record: Record) {
        self.items.push(Ok(record));
    }

    /// Appends a defect found while decoding.
    pub fn push_defect(&mut self, error: IndexError) {
        self.items.push(Err(error));
    }

    /// Number of items, records and defects together.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the artifact held no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the well-shaped records.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.items.iter().filter_map(|item| item.as_ref().ok())
    }

    /// Iterates over the decode-stage defects.
    pub fn defects(&self) -> impl Iterator<Item = &IndexError> {
        self.items.iter().filter_map(|item| item.as_ref().err())
    }

    /// Shifts every position by `offset`.
    ///
    /// Used when several artifacts feed one index so positions keep counting
    /// across files.
    pub fn offset(&mut self, offset: usize) {
        for item in &mut self.items {
            match item {
                Ok(record) => record.position += offset,
                Err(
                    IndexError::MalformedRecord { position, .. }
                    | IndexError::DuplicateNameConflict { position, .. },
                ) => *position += offset,
            }
        }
    }

    /// Hands every item to a builder, in order.
    pub fn feed(self, builder: &mut IndexBuilder) {
        for item in self.items {
            match item {
                Ok(record) => builder.push_record(record),
                Err(error) => builder.report(error),
            }
        }
    }

    /// Builds an index from this batch alone.
    pub fn build(self, config: &IndexConfig) -> BuildOutput {
        let mut builder = IndexBuilder::new(config.clone());
        self.feed(&mut builder);
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsearch_core::RecordTarget;

    fn record(position: usize, name: &str) -> Record {
        Record {
            position,
            name: Some(name.into()),
            label: Some(name.into()),
            targets: Some(vec![RecordTarget {
                url: Some(format!("p.html#{name}")),
                qualifier: None,
            }]),
        }
    }

    #[test]
    fn keeps_artifact_order() {
        let mut batch = RecordBatch::new();
        batch.push(record(0, "rand"));
        batch.push_defect(IndexError::malformed(1, "not an array"));
        batch.push(record(2, "read"));

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.records().count(), 2);
        assert_eq!(batch.defects().count(), 1);

        let output = batch.build(&IndexConfig::default());
        assert_eq!(output.index.len(), 2);
        assert_eq!(output.errors, vec![IndexError::malformed(1, "not an array")]);
    }

    #[test]
    fn offset_shifts_positions() {
        let mut batch = RecordBatch::new();
        batch.push(record(0, "rand"));
        batch.push_defect(IndexError::malformed(1, "not an array"));
        batch.offset(10);

        assert_eq!(batch.records().next().unwrap().position, 10);
        assert_eq!(batch.defects().next().unwrap().position(), 11);
    }
}
