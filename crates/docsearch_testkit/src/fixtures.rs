//! Test fixtures and search directory helpers.
//!
//! The Blaze fixtures are excerpts of a real Doxygen search table
//! (`search/functions_b.js` of the Blaze 2.4 reference manual), trimmed to a
//! few targets per symbol.

use docsearch_artifact::{decode_script, ScriptOptions};
use docsearch_core::{Entry, Target};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Names in [`BLAZE_FUNCTIONS_B`], in file order.
pub const BLAZE_FUNCTION_NAMES: [&str; 9] = [
    "malloc",
    "matrixserializer",
    "max",
    "max_size",
    "maxsize",
    "memorypool",
    "min",
    "move",
    "multassign",
];

/// The `m` function group of the Blaze reference manual.
pub const BLAZE_FUNCTIONS_B: &str = r"var searchData=
[
  ['malloc',['malloc',['../d2/d8d/classblaze_1_1MemoryPool.html#a6263245161abbda6193f484282d85f53',1,'blaze::MemoryPool']]],
  ['matrixserializer',['MatrixSerializer',['../d1/da6/classblaze_1_1MatrixSerializer.html#a8bdf44d431a02b4b06067b3fcfc8bd81',1,'blaze::MatrixSerializer']]],
  ['max',['max',['../dc/d6e/classblaze_1_1timing_1_1Timer.html#ade19a50d362cc0ce6957064f2988160e',1,'blaze::timing::Timer::max()'],['../db/df0/group__dense__matrix.html#ga27a49c9ec727759ec5e7319bc38b55da',1,'blaze::max(const DenseMatrix&lt; MT, SO &gt; &amp;dm)'],['../de/df1/group__math.html#gac5419cbf6def5f70752d58211d80586c',1,'blaze::max(const T1 &amp;a, const T2 &amp;b)']]],
  ['max_5fsize',['max_size',['../d0/d6f/classblaze_1_1AlignedAllocator.html#aef315bdc7e01e95a11257fed4c63ab05',1,'blaze::AlignedAllocator']]],
  ['maxsize',['maxSize',['../d3/ddf/classblaze_1_1PtrVector.html#accdeffe5d0765784f7f3de63e011209e',1,'blaze::PtrVector::maxSize()'],['../db/dee/classblaze_1_1threadpool_1_1TaskQueue.html#ab8e83d791373d6747500ae7c4428f5ef',1,'blaze::threadpool::TaskQueue::maxSize()']]],
  ['memorypool',['MemoryPool',['../d2/d8d/classblaze_1_1MemoryPool.html#a305c57dfea168d9c6e5a9d090a842dee',1,'blaze::MemoryPool']]],
  ['min',['min',['../dc/d6e/classblaze_1_1timing_1_1Timer.html#ae560840c0a71b795c6ca44cc88f0635f',1,'blaze::timing::Timer::min()'],['../de/df1/group__math.html#ga27423d924911a9bbadee66fbbcbc9b56',1,'blaze::min(const T1 &amp;a, const T2 &amp;b)']]],
  ['move',['move',['../dd/dfc/group__dynamic__matrix.html#gac1b3a0f30f4076b13f0ad5a2082d7e8a',1,'blaze::move(DynamicMatrix&lt; Type, SO &gt; &amp;dst, DynamicMatrix&lt; Type, SO &gt; &amp;src)'],['../dd/da3/group__dynamic__vector.html#gaf8976e064489a354f631e242bc99064d',1,'blaze::move(DynamicVector&lt; Type, TF &gt; &amp;dst, DynamicVector&lt; Type, TF &gt; &amp;src)']]],
  ['multassign',['multAssign',['../da/d9e/classblaze_1_1DynamicVector.html#a9ad9d12daba87b740972fc396416503a',1,'blaze::DynamicVector::multAssign()'],['../da/d6b/classblaze_1_1HybridVector.html#a2164c508b5f5a5bcfa7dbf1ecad88a24',1,'blaze::HybridVector::multAssign()'],['../d0/d30/classblaze_1_1DVecTransposer.html#a774abf6adb50f8d5730bb9d663075313',1,'blaze::DVecTransposer::multAssign(const DenseVector&lt; VT2, TF &gt; &amp;rhs)']]]
];
";

/// A slice of the `r` function group, deliberately out of order.
pub const BLAZE_FUNCTIONS_F: &str = r"var searchData=
[
  ['rows',['rows',['../de/d1e/classblaze_1_1DynamicMatrix.html#a28b7d5dd5032bb82f553b17c75b80430',1,'blaze::DynamicMatrix::rows()'],['../d6/d60/classblaze_1_1HybridMatrix.html#a13304d8cf74f5419dd055968c84a7841',1,'blaze::HybridMatrix::rows()']]],
  ['reset',['reset',['../d2/d85/classblaze_1_1NumericProxy.html#a8a3a6230c5bee7638fd6609686b3093f',1,'blaze::NumericProxy::reset()'],['../de/d1e/classblaze_1_1DynamicMatrix.html#a6cd3d6fc1f43f49ef6949106a030d1b1',1,'blaze::DynamicMatrix::reset(size_t i)']]],
  ['read',['read',['../dd/d14/classblaze_1_1Archive.html#a10df98fff1fc41e444ffa72fa65ec745',1,'blaze::Archive']]]
];
";

/// Decodes a fixture script into entries, in file order.
///
/// # Panics
///
/// Panics if the script does not decode cleanly.
pub fn script_entries(script: &str) -> Vec<Entry> {
    decode_script(script.as_bytes(), &ScriptOptions::default())
        .expect("fixture script should parse")
        .records()
        .cloned()
        .map(|record| record.into_entry().expect("fixture record should be valid"))
        .collect()
}

/// The Blaze `m` function group as entries.
pub fn blaze_function_groups() -> Vec<Entry> {
    script_entries(BLAZE_FUNCTIONS_B)
}

/// Creates an entry with one target per url.
pub fn entry_with_targets(name: &str, urls: &[&str]) -> Entry {
    urls.iter()
        .fold(Entry::new(name), |entry, url| entry.with_target(Target::new(*url)))
}

/// A temporary Doxygen `search/` directory.
pub struct TestSearchDir {
    dir: TempDir,
}

impl TestSearchDir {
    /// Creates an empty search directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a directory holding both Blaze function scripts.
    pub fn blaze() -> Self {
        let dir = Self::new();
        dir.write("functions_b.js", BLAZE_FUNCTIONS_B);
        dir.write("functions_f.js", BLAZE_FUNCTIONS_F);
        dir
    }

    /// Writes a file into the directory and returns its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write search script");
        path
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestSearchDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a test against a temporary search directory holding the Blaze scripts.
///
/// # Example
///
/// ```rust,ignore
/// use docsearch_testkit::with_blaze_search_dir;
///
/// #[test]
/// fn my_test() {
///     with_blaze_search_dir(|path| {
///         let output = load_search_dir(path, &ArtifactConfig::default()).unwrap();
///         // ...
///     });
/// }
/// ```
pub fn with_blaze_search_dir<F, R>(f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let dir = TestSearchDir::blaze();
    f(dir.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blaze_fixture_names() {
        let names: Vec<_> = blaze_function_groups().into_iter().map(|e| e.name).collect();
        assert_eq!(names, BLAZE_FUNCTION_NAMES);
    }

    #[test]
    fn blaze_fixture_decodes_entities() {
        let entries = blaze_function_groups();
        let max = entries.iter().find(|e| e.name == "max").unwrap();
        assert_eq!(
            max.targets[2].qualifier.as_deref(),
            Some("blaze::max(const T1 &a, const T2 &b)")
        );
    }

    #[test]
    fn entry_with_targets_keeps_order() {
        let entry = entry_with_targets("max", &["a.html", "b.html"]);
        assert_eq!(entry.targets[0].url, "a.html");
        assert_eq!(entry.targets[1].url, "b.html");
    }

    #[test]
    fn search_dir_holds_scripts() {
        with_blaze_search_dir(|path| {
            assert!(path.join("functions_b.js").exists());
            assert!(path.join("functions_f.js").exists());
        });
    }
}
