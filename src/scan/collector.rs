//! The import-collecting directory walk.

use crate::domain::{CollectStats, ImportPath, VendorError};
use crate::scan::classify::{classify, ImportKind};
use crate::scan::package::read_dir_package;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names whose subtrees are never entered. Vendored code must not
/// be re-vendored, and version-control metadata is not source.
pub const PRUNED_DIRS: &[&str] = &[".git", "vendor"];

/// Walks a root directory and produces the ordered set of external import
/// paths referenced by the Go packages it contains.
pub struct ImportCollector {
    root: PathBuf,
    recursive: bool,
    import_prefix: String,
    prune_dirs: Vec<String>,
    stats: CollectStats,
}

impl ImportCollector {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            recursive: true,
            import_prefix: String::new(),
            prune_dirs: PRUNED_DIRS.iter().map(|s| s.to_string()).collect(),
            stats: CollectStats::default(),
        }
    }

    /// Set whether subdirectories are visited at all.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the project's own import prefix; imports under it are internal.
    pub fn import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = prefix.into();
        self
    }

    /// Add extra directory names to prune alongside the defaults.
    pub fn extra_prune_dirs(mut self, names: Vec<String>) -> Self {
        self.prune_dirs.extend(names);
        self
    }

    /// Run the walk.
    ///
    /// Visits directories in name-sorted order and returns external imports
    /// deduplicated with first-occurrence order preserved. The first error
    /// anywhere aborts the whole run; imports already collected are
    /// discarded.
    pub fn collect(&mut self) -> Result<Vec<ImportPath>, VendorError> {
        self.stats = CollectStats::default();

        let mut walker = WalkDir::new(&self.root).follow_links(false).sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(0);
        }

        let prune_dirs = self.prune_dirs.clone();
        let entries = walker.into_iter().filter_entry(move |entry| {
            !(entry.file_type().is_dir()
                && entry.file_name().to_str().is_some_and(|name| {
                    prune_dirs.iter().any(|pruned| pruned == name)
                }))
        });

        let mut seen: HashSet<ImportPath> = HashSet::new();
        let mut collected = Vec::new();

        for entry in entries {
            let entry = entry.map_err(walk_error)?;
            if !entry.file_type().is_dir() {
                continue;
            }

            self.stats.dirs_visited += 1;

            // Pure fold: each directory yields its own delta, concatenated
            // here, so no accumulator leaks into the per-directory step.
            for import in self.scan_dir(entry.path())? {
                if seen.insert(import.clone()) {
                    collected.push(import);
                }
            }
        }

        Ok(collected)
    }

    /// Classify one directory and return the external imports it declares.
    fn scan_dir(&mut self, dir: &Path) -> Result<Vec<ImportPath>, VendorError> {
        let Some(package) = read_dir_package(dir)? else {
            self.stats.dirs_without_go += 1;
            return Ok(Vec::new());
        };

        let mut delta = Vec::new();
        for import in package.imports {
            self.stats.imports_seen += 1;
            if import.is_empty() {
                continue;
            }

            match classify(&import, &self.import_prefix)? {
                ImportKind::Internal => self.stats.imports_internal += 1,
                ImportKind::Std => self.stats.imports_std += 1,
                ImportKind::External => {
                    self.stats.imports_external += 1;
                    delta.push(import);
                }
            }
        }

        Ok(delta)
    }

    /// Counters from the last `collect` call.
    pub fn stats(&self) -> &CollectStats {
        &self.stats
    }
}

fn walk_error(err: walkdir::Error) -> VendorError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    match err.into_io_error() {
        Some(source) => VendorError::filesystem(path, source),
        None => VendorError::filesystem(
            path,
            io::Error::new(io::ErrorKind::Other, "filesystem loop detected"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_go(dir: &Path, name: &str, imports: &[&str]) {
        let mut content = String::from("package x\n\nimport (\n");
        for import in imports {
            content.push_str(&format!("    \"{}\"\n", import));
        }
        content.push_str(")\n");
        fs::write(dir.join(name), content).expect("write go file");
    }

    #[test]
    fn scenario_internal_std_and_external() {
        let temp = TempDir::new().expect("tmp");
        write_go(
            temp.path(),
            "main.go",
            &["example.com/proj/internal/foo", "fmt", "github.com/x/y"],
        );

        let mut collector =
            ImportCollector::new(temp.path().to_path_buf()).import_prefix("example.com/proj");
        let imports = collector.collect().expect("collect");

        assert_eq!(imports, vec!["github.com/x/y"]);
        assert_eq!(collector.stats().imports_internal, 1);
        assert_eq!(collector.stats().imports_std, 1);
        assert_eq!(collector.stats().imports_external, 1);
    }

    #[test]
    fn empty_tree_collects_nothing() {
        let temp = TempDir::new().expect("tmp");
        fs::create_dir(temp.path().join("docs")).expect("mkdir docs");
        fs::write(temp.path().join("docs/guide.md"), "# docs").expect("write md");

        let mut collector = ImportCollector::new(temp.path().to_path_buf());
        let imports = collector.collect().expect("collect");

        assert!(imports.is_empty());
        assert_eq!(collector.stats().dirs_without_go, 2);
    }

    #[test]
    fn pruned_subtrees_are_never_visited() {
        let temp = TempDir::new().expect("tmp");
        write_go(temp.path(), "main.go", &["github.com/x/y"]);

        // Intentionally malformed packages inside pruned directories; if the
        // walk entered them, the relative import would abort the run.
        for pruned in [".git", "vendor"] {
            let dir = temp.path().join(pruned).join("broken");
            fs::create_dir_all(&dir).expect("mkdir pruned");
            write_go(&dir, "broken.go", &["./relative"]);
        }

        let mut collector = ImportCollector::new(temp.path().to_path_buf());
        let imports = collector.collect().expect("collect");
        assert_eq!(imports, vec!["github.com/x/y"]);
    }

    #[test]
    fn configured_prune_names_are_honored() {
        let temp = TempDir::new().expect("tmp");
        let third_party = temp.path().join("third_party");
        fs::create_dir(&third_party).expect("mkdir third_party");
        write_go(&third_party, "dep.go", &["github.com/should/not/appear"]);

        let mut collector = ImportCollector::new(temp.path().to_path_buf())
            .extra_prune_dirs(vec!["third_party".to_string()]);
        let imports = collector.collect().expect("collect");
        assert!(imports.is_empty());
    }

    #[test]
    fn non_recursive_visits_only_the_root() {
        let temp = TempDir::new().expect("tmp");
        write_go(temp.path(), "main.go", &["github.com/root/only"]);

        let sub = temp.path().join("sub");
        fs::create_dir(&sub).expect("mkdir sub");
        write_go(&sub, "sub.go", &["github.com/sub/other"]);

        let mut collector = ImportCollector::new(temp.path().to_path_buf()).recursive(false);
        let imports = collector.collect().expect("collect");
        assert_eq!(imports, vec!["github.com/root/only"]);

        let mut recursive = ImportCollector::new(temp.path().to_path_buf());
        let imports = recursive.collect().expect("collect recursive");
        assert_eq!(imports, vec!["github.com/root/only", "github.com/sub/other"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence_order() {
        let temp = TempDir::new().expect("tmp");
        write_go(temp.path(), "main.go", &["github.com/x/y", "github.com/a/b"]);

        let sub = temp.path().join("sub");
        fs::create_dir(&sub).expect("mkdir sub");
        write_go(&sub, "sub.go", &["github.com/x/y"]);

        let mut collector = ImportCollector::new(temp.path().to_path_buf());
        let imports = collector.collect().expect("collect");
        assert_eq!(imports, vec!["github.com/x/y", "github.com/a/b"]);
    }

    #[test]
    fn empty_import_paths_are_skipped() {
        let temp = TempDir::new().expect("tmp");
        fs::write(temp.path().join("main.go"), "package x\n\nimport \"\"\n").expect("write go file");

        let mut collector = ImportCollector::new(temp.path().to_path_buf());
        let imports = collector.collect().expect("collect");
        assert!(imports.is_empty());
    }

    #[test]
    fn missing_root_is_fatal() {
        let temp = TempDir::new().expect("tmp");
        let gone = temp.path().join("missing");

        let mut collector = ImportCollector::new(gone);
        let err = collector.collect().expect_err("missing root");
        assert!(err.to_string().contains("filesystem error"));
    }

    #[test]
    fn unresolved_import_aborts_the_walk() {
        let temp = TempDir::new().expect("tmp");
        write_go(temp.path(), "main.go", &["someunknown/pkg"]);

        let mut collector = ImportCollector::new(temp.path().to_path_buf());
        let err = collector.collect().expect_err("unresolved");
        assert!(err.to_string().contains("someunknown/pkg"));
    }
}
