//! First-character buckets.

/// A folded key and the ordinal of the entry it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Slot {
    /// Case-folded entry name.
    pub key: String,
    /// Insertion ordinal of the entry.
    pub ordinal: usize,
}

/// All entries whose folded name starts with the same character.
///
/// Slots are kept sorted by `(key, ordinal)` so a prefix occupies one
/// contiguous run.
#[derive(Debug, Clone, Default)]
pub(crate) struct Bucket {
    slots: Vec<Slot>,
}

impl Bucket {
    /// Adds a slot. Call [`Bucket::seal`] once all slots are in.
    pub fn push(&mut self, key: String, ordinal: usize) {
        self.slots.push(Slot { key, ordinal });
    }

    /// Sorts the slots.
    pub fn seal(&mut self) {
        self.slots.sort_unstable();
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Ordinals whose key starts with `prefix`, in key order.
    ///
    /// `prefix` must already be case-folded.
    pub fn prefix_matches<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = usize> + 'a {
        let start = self.slots.partition_point(|slot| slot.key.as_str() < prefix);
        self.slots[start..]
            .iter()
            .take_while(move |slot| slot.key.starts_with(prefix))
            .map(|slot| slot.ordinal)
    }

    /// Ordinals whose key contains `fragment`, in key order.
    pub fn substring_matches<'a>(
        &'a self,
        fragment: &'a str,
    ) -> impl Iterator<Item = usize> + 'a {
        self.slots
            .iter()
            .filter(move |slot| slot.key.contains(fragment))
            .map(|slot| slot.ordinal)
    }

    /// All ordinals in key order.
    pub fn ordinals(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().map(|slot| slot.ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bucket(keys: &[&str]) -> Bucket {
        let mut bucket = Bucket::default();
        for (ordinal, key) in keys.iter().enumerate() {
            bucket.push((*key).to_string(), ordinal);
        }
        bucket.seal();
        bucket
    }

    #[test]
    fn seal_sorts_by_key() {
        let bucket = bucket(&["rows", "reset", "read"]);
        assert_eq!(bucket.ordinals().collect::<Vec<_>>(), vec![2, 1, 0]);
    }

    #[test]
    fn prefix_run() {
        let bucket = bucket(&["rand", "randomize", "rdstate", "read", "ready"]);
        assert_eq!(bucket.prefix_matches("rea").collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(bucket.prefix_matches("rand").collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(bucket.prefix_matches("rx").count(), 0);
    }

    #[test]
    fn prefix_longer_than_keys() {
        let bucket = bucket(&["row", "rows"]);
        assert_eq!(bucket.prefix_matches("rowsandcolumns").count(), 0);
    }

    #[test]
    fn substring_run() {
        let bucket = bucket(&["reserve", "reserveelements", "rest"]);
        assert_eq!(bucket.substring_matches("serve").collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn empty_bucket() {
        let bucket = Bucket::default();
        assert_eq!(bucket.len(), 0);
        assert_eq!(bucket.prefix_matches("a").count(), 0);
    }

    proptest! {
        #[test]
        fn prefix_matches_agree_with_scan(
            keys in prop::collection::vec("[ab_]{1,5}", 0..30),
            prefix in "[ab_]{1,3}",
        ) {
            let bucket = bucket(&keys.iter().map(String::as_str).collect::<Vec<_>>());
            let mut expected: Vec<_> = keys
                .iter()
                .enumerate()
                .filter(|(_, key)| key.starts_with(prefix.as_str()))
                .map(|(ordinal, key)| (key.clone(), ordinal))
                .collect();
            expected.sort();
            let expected: Vec<_> = expected.into_iter().map(|(_, ordinal)| ordinal).collect();

            prop_assert_eq!(bucket.prefix_matches(&prefix).collect::<Vec<_>>(), expected);
        }
    }
}
