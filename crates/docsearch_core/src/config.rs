//! Index build configuration.

/// How duplicate names are handled while building an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Every duplicate is merged into the first-seen entry.
    #[default]
    Merge,
    /// Duplicates with an identical label are merged; a duplicate with a
    /// different label is rejected with
    /// [`IndexError::DuplicateNameConflict`](crate::IndexError).
    Strict,
}

/// Configuration for building a [`SymbolIndex`](crate::SymbolIndex).
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Duplicate name handling.
    pub duplicate_policy: DuplicatePolicy,

    /// Whether merging collapses targets with the same url and qualifier.
    pub dedupe_targets: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Merge,
            dedupe_targets: true,
        }
    }
}

impl IndexConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects duplicates whose labels contradict each other.
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.duplicate_policy = DuplicatePolicy::Strict;
        self
    }

    /// Sets the duplicate policy.
    #[must_use]
    pub const fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Sets whether identical targets are collapsed on merge.
    #[must_use]
    pub const fn dedupe_targets(mut self, value: bool) -> Self {
        self.dedupe_targets = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Merge);
        assert!(config.dedupe_targets);
    }

    #[test]
    fn builder_pattern() {
        let config = IndexConfig::new().strict().dedupe_targets(false);

        assert_eq!(config.duplicate_policy, DuplicatePolicy::Strict);
        assert!(!config.dedupe_targets);
    }
}
