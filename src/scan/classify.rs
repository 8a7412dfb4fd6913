//! Import path classification.
//!
//! Decides, for each import declaration found in a package, whether it is
//! internal to the project, part of the Go standard library, or an external
//! package worth vendoring. Anything that fits none of those buckets is an
//! unresolvable import and aborts the run: it almost always indicates a real
//! build problem the user should fix before re-vendoring.

use crate::domain::VendorError;

/// Top-level namespaces distributed with the Go toolchain itself. An import
/// whose first path segment appears here is never fetched externally.
const GO_STDLIB_NAMESPACES: &[&str] = &[
    "archive", "bufio", "builtin", "bytes", "cmp", "compress", "container", "context", "crypto",
    "database", "debug", "embed", "encoding", "errors", "expvar", "flag", "fmt", "go", "hash",
    "html", "image", "index", "internal", "io", "iter", "log", "maps", "math", "mime", "net",
    "os", "path", "plugin", "reflect", "regexp", "runtime", "slices", "sort", "strconv",
    "strings", "structs", "sync", "syscall", "testing", "text", "time", "unicode", "unique",
    "unsafe", "weak",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Shares the project's own import prefix.
    Internal,
    /// Ships with the Go toolchain, including the cgo pseudo-package `C`.
    Std,
    /// Lives in the broader ecosystem and must be vendored.
    External,
}

/// Classify a single non-empty import path against the project prefix.
///
/// A first path segment containing a dot is a host name, so the import is
/// external; one matching a known stdlib namespace is intrinsic. Everything
/// else (relative imports, bare unrecognized segments) cannot be located as a
/// package and is a fatal error rather than a skip.
pub fn classify(import: &str, project_prefix: &str) -> Result<ImportKind, VendorError> {
    if is_internal(import, project_prefix) {
        return Ok(ImportKind::Internal);
    }

    if import == "C" {
        return Ok(ImportKind::Std);
    }

    if import.starts_with("./") || import.starts_with("../") || import == "." || import == ".." {
        return Err(VendorError::unresolved(import, "relative import paths cannot be vendored"));
    }

    let first_segment = import.split('/').next().unwrap_or(import);
    if first_segment.contains('.') {
        return Ok(ImportKind::External);
    }

    if GO_STDLIB_NAMESPACES.contains(&first_segment) {
        return Ok(ImportKind::Std);
    }

    Err(VendorError::unresolved(import, "unrecognized import path"))
}

/// An empty project prefix disables internal filtering entirely; with
/// `starts_with` alone it would swallow every import.
fn is_internal(import: &str, project_prefix: &str) -> bool {
    if project_prefix.is_empty() {
        return false;
    }
    import == project_prefix
        || import.strip_prefix(project_prefix).is_some_and(|rest| rest.starts_with('/'))
}
