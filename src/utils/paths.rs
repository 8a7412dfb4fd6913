//! Path normalization and GOPATH handling

use std::path::{Path, PathBuf};

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Derive the project's own import prefix from its absolute path and the
/// `GOPATH` environment value.
///
/// The prefix is the path of `root` relative to `$GOPATH/src`, rendered with
/// forward slashes, e.g. `/home/x/go/src/example.com/proj` becomes
/// `example.com/proj`. Returns an empty string when GOPATH is unset, when
/// `$GOPATH/src` does not exist, or when `root` lies outside it; all of these
/// are silent, not errors.
pub fn import_prefix_from_gopath(root: &Path, gopath: Option<&str>) -> String {
    let Some(gopath) = gopath.filter(|v| !v.is_empty()) else {
        return String::new();
    };

    // Canonicalize the source root so a symlinked GOPATH still matches the
    // canonicalized project path.
    let src_root: PathBuf = Path::new(gopath).join("src");
    let Ok(src_root) = src_root.canonicalize() else {
        return String::new();
    };

    match root.strip_prefix(&src_root) {
        Ok(rel) if !rel.as_os_str().is_empty() => normalize_path(&rel.to_string_lossy()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn prefix_is_path_relative_to_gopath_src() {
        let temp = TempDir::new().expect("tmp");
        let project = temp.path().join("src/example.com/proj");
        fs::create_dir_all(&project).expect("mkdir project");

        let root = project.canonicalize().expect("canonicalize");
        let prefix = import_prefix_from_gopath(&root, temp.path().to_str());
        assert_eq!(prefix, "example.com/proj");
    }

    #[test]
    fn prefix_empty_without_gopath() {
        let temp = TempDir::new().expect("tmp");
        assert_eq!(import_prefix_from_gopath(temp.path(), None), "");
        assert_eq!(import_prefix_from_gopath(temp.path(), Some("")), "");
    }

    #[test]
    fn prefix_empty_outside_gopath() {
        let gopath = TempDir::new().expect("tmp gopath");
        fs::create_dir_all(gopath.path().join("src")).expect("mkdir src");

        let elsewhere = TempDir::new().expect("tmp project");
        let root = elsewhere.path().canonicalize().expect("canonicalize");
        assert_eq!(import_prefix_from_gopath(&root, gopath.path().to_str()), "");
    }

    #[test]
    fn prefix_empty_when_root_is_src_itself() {
        let gopath = TempDir::new().expect("tmp gopath");
        let src = gopath.path().join("src");
        fs::create_dir_all(&src).expect("mkdir src");

        let root = src.canonicalize().expect("canonicalize");
        assert_eq!(import_prefix_from_gopath(&root, gopath.path().to_str()), "");
    }
}
