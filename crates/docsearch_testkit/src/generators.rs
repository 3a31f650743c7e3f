//! Property-based test generators using proptest.
//!
//! Symbol names are drawn from a small alphabet in both cases so that
//! duplicates, case-folding collisions and shared prefixes are common. The
//! alphabet includes Greek sigma in all three forms and a Latin umlaut, whose
//! lowercase mappings are not plain ASCII.

use docsearch_core::{Entry, Target};
use proptest::prelude::*;

/// Characters symbol names and prefixes are drawn from.
pub const SYMBOL_CHARS: &str = "a-dA-DσςΣäÄ_";

/// Strategy for generating symbol names.
pub fn symbol_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[{SYMBOL_CHARS}][{SYMBOL_CHARS}0-9]{{0,7}}"))
        .expect("Invalid regex")
}

/// Strategy for generating search prefixes, including the empty prefix.
pub fn prefix_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[{SYMBOL_CHARS}]{{0,3}}")).expect("Invalid regex")
}

/// Strategy for generating one character to extend a prefix with.
pub fn symbol_char_strategy() -> impl Strategy<Value = char> {
    prop::string::string_regex(&format!("[{SYMBOL_CHARS}]"))
        .expect("Invalid regex")
        .prop_filter_map("one character", |s| s.chars().next())
}

/// Strategy for generating documentation targets.
pub fn target_strategy() -> impl Strategy<Value = Target> {
    (
        prop::string::string_regex("[0-9a-f]{2}/[0-9a-f]{3}/[a-z_]{1,12}\\.html#a[0-9a-f]{8}")
            .expect("Invalid regex"),
        prop::option::of(prop::string::string_regex("[a-z]{1,8}(::[a-z]{1,8}){0,2}").expect("Invalid regex")),
    )
        .prop_map(|(url, qualifier)| match qualifier {
            Some(qualifier) => Target::new(format!("../{url}")).with_qualifier(qualifier),
            None => Target::new(format!("../{url}")),
        })
}

/// Strategy for generating valid entries with one to three targets.
pub fn entry_strategy() -> impl Strategy<Value = Entry> {
    (symbol_name_strategy(), prop::collection::vec(target_strategy(), 1..4)).prop_map(
        |(name, targets)| {
            targets
                .into_iter()
                .fold(Entry::new(name), |entry, target| entry.with_target(target))
        },
    )
}

/// Strategy for generating an entry sequence, duplicates included.
pub fn entries_strategy(max_entries: usize) -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(entry_strategy(), 0..max_entries)
}

/// Sizing for search property tests.
///
/// `max_entries` bounds the entry sequences fed to an index; small bounds
/// keep duplicates and shared prefixes likely, large ones fill buckets.
#[derive(Debug, Clone)]
pub struct SearchPropConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Exclusive upper bound on entries per generated index.
    pub max_entries: usize,
}

impl Default for SearchPropConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_entries: 40,
        }
    }
}

impl SearchPropConfig {
    /// Few cases over small indexes, where names collide often.
    #[must_use]
    pub fn collisions() -> Self {
        Self {
            cases: 64,
            max_entries: 12,
        }
    }

    /// Many cases over larger indexes.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_entries: 200,
        }
    }

    /// Entry sequences sized by this configuration.
    pub fn entries(&self) -> impl Strategy<Value = Vec<Entry>> {
        entries_strategy(self.max_entries)
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(SearchPropConfig::collisions().to_proptest_config())]

        #[test]
        fn symbol_names_are_not_empty(name in symbol_name_strategy()) {
            prop_assert!(!name.is_empty());
        }

        #[test]
        fn entries_have_targets(entry in entry_strategy()) {
            prop_assert_eq!(&entry.label, &entry.name);
            prop_assert!(!entry.targets.is_empty());
            prop_assert!(entry.targets.iter().all(|t| t.url.starts_with("../")));
        }

        #[test]
        fn entry_sequences_respect_bound(entries in SearchPropConfig::collisions().entries()) {
            prop_assert!(entries.len() < 12);
        }

        #[test]
        fn prefixes_stay_in_alphabet(prefix in prefix_strategy(), extra in symbol_char_strategy()) {
            prop_assert!(prefix.chars().count() <= 3);
            prop_assert!(extra == '_' || extra.is_alphabetic());
        }
    }

    #[test]
    fn config_presets() {
        let collisions = SearchPropConfig::collisions();
        let thorough = SearchPropConfig::thorough();
        assert!(collisions.max_entries < SearchPropConfig::default().max_entries);
        assert!(collisions.cases < thorough.cases);
        assert_eq!(thorough.to_proptest_config().cases, 1024);
    }
}
