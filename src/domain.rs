//! Core types shared across the scan and render pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Canonical identifier by which one Go package refers to another, e.g.
/// `github.com/tus/tusd`. Opaque apart from prefix comparison.
pub type ImportPath = String;

/// Per-run context derived once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Absolute path of the directory being analyzed.
    pub root: PathBuf,
    /// The project's own import prefix, derived by stripping `$GOPATH/src/`
    /// from `root`. Empty when it cannot be determined.
    pub import_prefix: String,
}

/// Everything the script renderer consumes, exactly once.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Working directory interpolated into repository-relative paths.
    pub cwd: String,
    /// External import paths, deduplicated, in discovery order.
    pub packages: Vec<ImportPath>,
    /// Whether the emitted script registers dependencies as git submodules.
    pub add_submodules: bool,
    /// Import prefix used for the temporary GOPATH symlink target.
    pub package_prefix: String,
}

/// Counters gathered during the walk, reported at debug log level.
#[derive(Debug, Clone, Default)]
pub struct CollectStats {
    pub dirs_visited: usize,
    pub dirs_without_go: usize,
    pub imports_seen: usize,
    pub imports_internal: usize,
    pub imports_std: usize,
    pub imports_external: usize,
}

/// Fatal conditions. There is no local recovery: the first error aborts the
/// whole run and discards any imports already collected.
///
/// A directory without Go source files is deliberately not represented here;
/// that condition is the normal skip signal, modeled as `Option::None` by
/// [`crate::scan::read_dir_package`].
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot resolve import {import:?}: {reason}")]
    UnresolvedImport { import: String, reason: String },
}

impl VendorError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem { path: path.into(), source }
    }

    pub fn unresolved(import: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvedImport { import: import.into(), reason: reason.into() }
    }
}
