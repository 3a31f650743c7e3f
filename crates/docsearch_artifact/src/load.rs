//! Loading artifacts from bytes, files and search directories.

use crate::config::ArtifactConfig;
use crate::error::{ArtifactError, ArtifactResult};
use crate::format::ArtifactFormat;
use docsearch_core::{BuildOutput, CatalogBuilder, Category, IndexError, SearchCatalog};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Builds an index from artifact bytes.
///
/// # Errors
///
/// Returns an error if the format cannot be detected or the artifact as a
/// whole is unreadable. Bad records are reported in the output instead.
pub fn load_bytes(data: &[u8], config: &ArtifactConfig) -> ArtifactResult<BuildOutput> {
    let format = config
        .format
        .or_else(|| ArtifactFormat::detect(data))
        .ok_or(ArtifactError::UnknownFormat)?;

    let batch = format.decode(data, &config.script)?;
    debug!(%format, items = batch.len(), "decoded artifact");
    Ok(batch.build(&config.index))
}

/// Builds an index from an artifact file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_path(path: impl AsRef<Path>, config: &ArtifactConfig) -> ArtifactResult<BuildOutput> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    let output = load_bytes(&data, config)?;

    info!(
        path = %path.display(),
        entries = output.index.len(),
        errors = output.errors.len(),
        "loaded search artifact"
    );
    Ok(output)
}

/// The result of loading a search directory.
#[derive(Debug, Default)]
pub struct SearchDirOutput {
    /// One index per category found.
    pub catalog: SearchCatalog,
    /// Rejected records, tagged with their category.
    ///
    /// Positions count across all files of a category, in load order.
    pub errors: Vec<(Category, IndexError)>,
    /// Files that could not be read or decoded at all.
    pub failures: Vec<(PathBuf, ArtifactError)>,
}

/// A search script file recognized by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ScriptFile {
    category: Category,
    chunk: u32,
    path: PathBuf,
}

/// Parses `<category>_<hex>.js`.
fn script_file(path: &Path) -> Option<ScriptFile> {
    if path.extension()? != "js" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (category, chunk) = stem.rsplit_once('_')?;
    Some(ScriptFile {
        category: category.parse().ok()?,
        chunk: u32::from_str_radix(chunk, 16).ok()?,
        path: path.to_path_buf(),
    })
}

/// Loads every search script in a directory into a catalog.
///
/// Files are named `<category>_<hex>.js`; anything else is ignored. Files
/// are read in category order, then by hexadecimal suffix, so duplicate
/// merging is reproducible. A file that cannot be read or decoded is logged,
/// recorded in [`SearchDirOutput::failures`] and skipped.
///
/// # Errors
///
/// Returns an error only if the directory itself cannot be listed.
pub fn load_search_dir(
    dir: impl AsRef<Path>,
    config: &ArtifactConfig,
) -> ArtifactResult<SearchDirOutput> {
    let dir = dir.as_ref();
    let listing = fs::read_dir(dir).map_err(|e| ArtifactError::io(dir, e))?;

    let mut files = Vec::new();
    for item in listing {
        let item = item.map_err(|e| ArtifactError::io(dir, e))?;
        if let Some(file) = script_file(&item.path()) {
            files.push(file);
        }
    }
    files.sort();

    let mut builder = CatalogBuilder::new(config.index.clone());
    let mut failures = Vec::new();
    let format = config.format.unwrap_or(ArtifactFormat::Script);

    for file in files {
        let decoded = fs::read(&file.path)
            .map_err(|e| ArtifactError::io(&file.path, e))
            .and_then(|data| format.decode(&data, &config.script));

        match decoded {
            Ok(mut batch) => {
                let category = builder.category(file.category);
                batch.offset(category.records_seen());
                debug!(
                    path = %file.path.display(),
                    category = %file.category,
                    items = batch.len(),
                    "decoded search script"
                );
                batch.feed(category);
            }
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "skipping search script");
                failures.push((file.path, err));
            }
        }
    }

    let output = builder.finish();
    info!(
        dir = %dir.display(),
        categories = output.catalog.len(),
        entries = output.catalog.stats().entries,
        failures = failures.len(),
        "loaded search directory"
    );

    Ok(SearchDirOutput {
        catalog: output.catalog,
        errors: output.errors,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::encode_json;
    use crate::table::encode_table;
    use docsearch_core::{Entry, IndexConfig, Target};
    use tempfile::TempDir;

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("run").with_target(Target::new("../de/d7d/classblaze_1_1Thread.html#a466b")),
            Entry::new("round").with_target(Target::new("../de/df1/group__math.html#ga1")),
        ]
    }

    #[test]
    fn load_bytes_detects_format() {
        let config = ArtifactConfig::default();

        let from_table = load_bytes(&encode_table(&entries()).unwrap(), &config).unwrap();
        let from_json = load_bytes(&encode_json(&entries()).unwrap(), &config).unwrap();

        assert_eq!(from_table.index.entries(), from_json.index.entries());
        assert_eq!(from_table.index.search("r", None).len(), 2);
    }

    #[test]
    fn load_bytes_unknown_format() {
        let err = load_bytes(b"<html></html>", &ArtifactConfig::default()).unwrap_err();
        assert!(matches!(err, ArtifactError::UnknownFormat));
    }

    #[test]
    fn forced_format_overrides_detection() {
        let config = ArtifactConfig::new().format(ArtifactFormat::Table);
        assert!(load_bytes(b"[]", &config).is_err());
    }

    #[test]
    fn load_path_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symbols.json");
        fs::write(&path, encode_json(&entries()).unwrap()).unwrap();

        let output = load_path(&path, &ArtifactConfig::default()).unwrap();
        assert_eq!(output.index.len(), 2);
    }

    #[test]
    fn load_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_path(dir.path().join("missing.json"), &ArtifactConfig::default())
            .unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn script_file_names() {
        let file = script_file(Path::new("search/functions_1f.js")).unwrap();
        assert_eq!(file.category, Category::Functions);
        assert_eq!(file.chunk, 0x1f);

        assert!(script_file(Path::new("search/search.js")).is_none());
        assert!(script_file(Path::new("search/functions_b.html")).is_none());
        assert!(script_file(Path::new("search/widgets_0.js")).is_none());
        assert!(script_file(Path::new("search/enumvalues_zz.js")).is_none());
    }

    #[test]
    fn search_dir_orders_files_and_counts_positions() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("functions_a.js"),
            "var searchData=[['rows',['rows',['b.html#2',1,'blaze::rows']]],'broken'];",
        )
        .unwrap();
        fs::write(
            dir.path().join("functions_9.js"),
            "var searchData=[['rows',['rows',['a.html#1',1,'blaze::Matrix::rows']]]];",
        )
        .unwrap();
        fs::write(dir.path().join("classes_0.js"), "var searchData=[[").unwrap();
        fs::write(dir.path().join("search.js"), "function init() {}").unwrap();

        let output = load_search_dir(dir.path(), &ArtifactConfig::new().index(IndexConfig::new()))
            .unwrap();

        let rows = output
            .catalog
            .index(Category::Functions)
            .unwrap()
            .lookup("rows")
            .unwrap();
        let urls: Vec<_> = rows.targets.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["a.html#1", "b.html#2"]);

        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].0, Category::Functions);
        assert_eq!(output.errors[0].1.position(), 2);

        assert_eq!(output.failures.len(), 1);
        assert!(output.failures[0].0.ends_with("classes_0.js"));
        assert!(output.catalog.index(Category::Classes).is_none());
    }

    #[test]
    fn search_dir_missing() {
        let dir = TempDir::new().unwrap();
        let result = load_search_dir(dir.path().join("nope"), &ArtifactConfig::default());
        assert!(matches!(result, Err(ArtifactError::Io { .. })));
    }
}
