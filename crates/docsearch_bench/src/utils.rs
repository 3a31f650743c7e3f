//! Benchmark utilities.

use docsearch_core::{Entry, Target};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SYLLABLES: [&str; 16] = [
    "add", "get", "set", "max", "min", "row", "col", "mat", "vec", "res", "size", "assign",
    "mult", "sub", "read", "pool",
];

/// Generate a symbol name from two or three syllables.
pub fn random_name(rng: &mut impl Rng) -> String {
    let parts = rng.gen_range(2..=3);
    let mut name = String::new();
    for i in 0..parts {
        let syllable = SYLLABLES[rng.gen_range(0..SYLLABLES.len())];
        if i > 0 && rng.gen_bool(0.5) {
            name.push('_');
        }
        name.push_str(syllable);
    }
    name
}

/// Generate `count` entries with one to four targets each.
///
/// Names repeat, so building exercises duplicate merging. The same seed
/// always yields the same entries.
pub fn generate_entries(count: usize, seed: u64) -> Vec<Entry> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let name = random_name(&mut rng);
            let targets = rng.gen_range(1..=4);
            (0..targets).fold(Entry::new(name), |entry, t| {
                entry.with_target(
                    Target::new(format!("../d{:x}/class_{i}.html#a{t:08x}", i % 16))
                        .with_qualifier(format!("blaze::Class{i}")),
                )
            })
        })
        .collect()
}

/// Every prefix of `word`, the way a user types it.
pub fn keystrokes(word: &str) -> Vec<&str> {
    word.char_indices()
        .skip(1)
        .map(|(i, _)| &word[..i])
        .chain(std::iter::once(word))
        .collect()
}
