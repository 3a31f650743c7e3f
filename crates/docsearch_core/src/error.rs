//! Error types for index construction.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, IndexError>;

/// Problems found while building a [`SymbolIndex`](crate::SymbolIndex).
///
/// None of these abort construction. The offending record is skipped and the
/// error is collected into [`BuildOutput::errors`](crate::BuildOutput).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    /// A record is missing a required field or carries an empty one.
    #[error("malformed record at position {position}: {reason}")]
    MalformedRecord {
        /// Zero-based position of the record in its input.
        position: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// A duplicate name carried a different label while strict mode was on.
    #[error(
        "duplicate name {name:?} at position {position}: label {conflicting_label:?} \
         contradicts {existing_label:?}"
    )]
    DuplicateNameConflict {
        /// The name as spelled by the rejected record.
        name: String,
        /// Label of the entry that was kept.
        existing_label: String,
        /// Label of the rejected record.
        conflicting_label: String,
        /// Zero-based position of the rejected record.
        position: usize,
    },
}

impl IndexError {
    /// Creates a malformed record error.
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            position,
            reason: reason.into(),
        }
    }

    /// Returns the input position the error refers to.
    pub fn position(&self) -> usize {
        match self {
            Self::MalformedRecord { position, .. } | Self::DuplicateNameConflict { position, .. } => {
                *position
            }
        }
    }

    /// Returns true for [`IndexError::MalformedRecord`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    /// Returns true for [`IndexError::DuplicateNameConflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateNameConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display() {
        let err = IndexError::malformed(3, "missing name");
        assert_eq!(err.to_string(), "malformed record at position 3: missing name");
        assert_eq!(err.position(), 3);
        assert!(err.is_malformed());
    }

    #[test]
    fn conflict_display() {
        let err = IndexError::DuplicateNameConflict {
            name: "max".into(),
            existing_label: "max".into(),
            conflicting_label: "Max".into(),
            position: 7,
        };
        assert!(err.is_conflict());
        assert_eq!(err.position(), 7);
        assert!(err.to_string().contains("\"Max\""));
    }
}
