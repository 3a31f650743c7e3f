//! Searchable entries and the raw records they are decoded from.

use crate::error::{CoreResult, IndexError};
use serde::{Deserialize, Serialize};

/// One documentation location a name resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Page and anchor reference, e.g. `../d2/d8d/classblaze_1_1MemoryPool.html#a62…`.
    pub url: String,
    /// Short disambiguating text such as the owning type or a signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

impl Target {
    /// Creates a target without a qualifier.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            qualifier: None,
        }
    }

    /// Sets the qualifier.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }
}

/// A searchable symbol: its lookup name, display label and link targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Lookup key. Compared case-insensitively, stored as given.
    pub name: String,
    /// Human-readable text shown in results.
    pub label: String,
    /// Documentation locations, in first-seen order.
    pub targets: Vec<Target>,
}

impl Entry {
    /// Creates an entry whose label equals its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            targets: Vec::new(),
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Appends a target.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Returns the case-folded lookup key.
    pub fn key(&self) -> String {
        fold_case(&self.name)
    }

    /// Returns true if more than one target needs a qualifier to tell them apart.
    pub fn is_overloaded(&self) -> bool {
        self.targets.len() > 1
    }

    /// Checks the fields a usable entry needs.
    pub(crate) fn validate(&self, position: usize) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(IndexError::malformed(position, "empty name"));
        }
        if self.label.is_empty() {
            return Err(IndexError::malformed(position, "empty label"));
        }
        if self.targets.is_empty() {
            return Err(IndexError::malformed(position, "no targets"));
        }
        if let Some(i) = self.targets.iter().position(|t| t.url.is_empty()) {
            return Err(IndexError::malformed(
                position,
                format!("targets[{i}] has an empty url"),
            ));
        }
        Ok(())
    }
}

/// A target as read from an artifact, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTarget {
    /// Page and anchor reference.
    #[serde(default)]
    pub url: Option<String>,
    /// Disambiguating text.
    #[serde(default)]
    pub qualifier: Option<String>,
}

/// An entry as read from an artifact, before validation.
///
/// Every field is optional so that a decoder can hand over whatever it found
/// and leave the verdict to [`Record::into_entry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Zero-based position of the record in its artifact.
    #[serde(skip)]
    pub position: usize,
    /// Lookup name.
    #[serde(default)]
    pub name: Option<String>,
    /// Display label.
    #[serde(default)]
    pub label: Option<String>,
    /// Link targets.
    #[serde(default)]
    pub targets: Option<Vec<RecordTarget>>,
}

impl Record {
    /// Creates an empty record at the given position.
    pub fn at(position: usize) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Validates the record and converts it into an [`Entry`].
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MalformedRecord`] if a required field is missing
    /// or empty.
    pub fn into_entry(self) -> CoreResult<Entry> {
        let position = self.position;
        let name = required(position, "name", self.name)?;
        let label = required(position, "label", self.label)?;
        let raw_targets = self
            .targets
            .ok_or_else(|| IndexError::malformed(position, "missing field `targets`"))?;

        let mut targets = Vec::with_capacity(raw_targets.len());
        for (i, raw) in raw_targets.into_iter().enumerate() {
            let url = raw
                .url
                .ok_or_else(|| IndexError::malformed(position, format!("targets[{i}] has no url")))?;
            targets.push(Target {
                url,
                qualifier: raw.qualifier,
            });
        }

        let entry = Entry {
            name,
            label,
            targets,
        };
        entry.validate(position)?;
        Ok(entry)
    }
}

impl From<&Entry> for Record {
    fn from(entry: &Entry) -> Self {
        Self {
            position: 0,
            name: Some(entry.name.clone()),
            label: Some(entry.label.clone()),
            targets: Some(
                entry
                    .targets
                    .iter()
                    .map(|t| RecordTarget {
                        url: Some(t.url.clone()),
                        qualifier: t.qualifier.clone(),
                    })
                    .collect(),
            ),
        }
    }
}

fn required(position: usize, field: &str, value: Option<String>) -> CoreResult<String> {
    value.ok_or_else(|| IndexError::malformed(position, format!("missing field `{field}`")))
}

/// Folds a name or query for case-insensitive comparison.
///
/// Each character is lowercased on its own, so a prefix folds to a prefix of
/// the folded name. `str::to_lowercase` would turn a word-final `Σ` into `ς`.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> Record {
        Record {
            position: 4,
            name: Some("maxSize".into()),
            label: Some("maxSize".into()),
            targets: Some(vec![RecordTarget {
                url: Some("../d3/ddf/classblaze_1_1PtrVector.html#accdeffe5d0765784f7f3de63e011209e".into()),
                qualifier: Some("blaze::PtrVector::maxSize()".into()),
            }]),
        }
    }

    #[test]
    fn record_into_entry() {
        let entry = full_record().into_entry().unwrap();
        assert_eq!(entry.name, "maxSize");
        assert_eq!(entry.key(), "maxsize");
        assert_eq!(entry.targets.len(), 1);
        assert!(!entry.is_overloaded());
    }

    #[test]
    fn record_missing_name() {
        let mut record = full_record();
        record.name = None;
        let err = record.into_entry().unwrap_err();
        assert_eq!(err, IndexError::malformed(4, "missing field `name`"));
    }

    #[test]
    fn record_missing_label() {
        let mut record = full_record();
        record.label = None;
        assert!(record.into_entry().unwrap_err().is_malformed());
    }

    #[test]
    fn record_without_targets() {
        let mut record = full_record();
        record.targets = Some(Vec::new());
        let err = record.into_entry().unwrap_err();
        assert_eq!(err, IndexError::malformed(4, "no targets"));
    }

    #[test]
    fn record_target_without_url() {
        let mut record = full_record();
        record.targets = Some(vec![RecordTarget::default()]);
        let err = record.into_entry().unwrap_err();
        assert_eq!(err, IndexError::malformed(4, "targets[0] has no url"));
    }

    #[test]
    fn entry_record_conversion() {
        let entry = Entry::new("min")
            .with_target(Target::new("../de/df1/group__math.html#ga27").with_qualifier("blaze::min"));
        let record = Record::from(&entry);
        assert_eq!(record.into_entry().unwrap(), entry);
    }

    #[test]
    fn qualifier_omitted_from_json() {
        let target = Target::new("page.html#a1");
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, r#"{"url":"page.html#a1"}"#);
    }

    #[test]
    fn fold_case_is_lowercase() {
        assert_eq!(fold_case("MatrixSerializer"), "matrixserializer");
        assert_eq!(fold_case("max_size"), "max_size");
    }

    #[test]
    fn fold_case_ignores_word_position() {
        assert_eq!(fold_case("ΟΣ"), "οσ");
        assert_eq!(fold_case("ΟΣΑ"), "οσα");
        assert!(fold_case("ΟΣΑ").starts_with(&fold_case("ΟΣ")));
    }
}
