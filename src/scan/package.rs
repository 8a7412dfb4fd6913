//! Go package interpretation for a single directory.
//!
//! Mirrors the file pruning `go/build` applies when importing a directory:
//! only `*.go` files whose names do not start with `_` or `.` count, and
//! `*_test.go` files are included so test-only dependencies get vendored too.

use crate::domain::{ImportPath, VendorError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// A directory successfully classified as a local Go package.
#[derive(Debug, Clone)]
pub struct GoPackage {
    /// Declared imports in file-name order, then declaration order.
    pub imports: Vec<ImportPath>,
}

/// Interpret `dir` as a Go package.
///
/// Returns `Ok(None)` for the "no Go source files here" condition, which is
/// the normal signal to skip the directory, never an error. Filesystem
/// failures while listing or reading are fatal.
pub fn read_dir_package(dir: &Path) -> Result<Option<GoPackage>, VendorError> {
    let entries = fs::read_dir(dir).map_err(|e| VendorError::filesystem(dir, e))?;

    let mut sources: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| VendorError::filesystem(dir, e))?;
        let file_type = entry.file_type().map_err(|e| VendorError::filesystem(entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_go_source(&name) {
            sources.push(name);
        }
    }

    if sources.is_empty() {
        return Ok(None);
    }

    // Directory read order is platform-dependent; sort for reproducible
    // script output.
    sources.sort();

    let mut imports = Vec::new();
    for name in sources {
        let path = dir.join(name);
        let content = fs::read_to_string(&path).map_err(|e| VendorError::filesystem(&path, e))?;
        imports.extend(go_imports(&content));
    }

    Ok(Some(GoPackage { imports }))
}

fn is_go_source(name: &str) -> bool {
    name.ends_with(".go") && !name.starts_with('_') && !name.starts_with('.')
}

/// Extract the declared import paths from one Go source file.
pub fn go_imports(content: &str) -> Vec<ImportPath> {
    if let Some(imports) = imports_with_tree_sitter(content) {
        return imports;
    }
    imports_with_line_scan(content)
}

fn imports_with_tree_sitter(content: &str) -> Option<Vec<ImportPath>> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into()).ok()?;

    let tree = parser.parse(content, None)?;
    let root = tree.root_node();

    let mut imports = Vec::new();
    for i in 0..root.named_child_count() {
        let Some(child) = root.named_child(i) else { continue };
        if child.kind() == "import_declaration" {
            collect_import_specs(child, content.as_bytes(), &mut imports);
        }
    }

    Some(imports)
}

fn collect_import_specs(node: Node, source: &[u8], out: &mut Vec<ImportPath>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => {
                if let Some(path) = child.child_by_field_name("path") {
                    if let Ok(text) = path.utf8_text(source) {
                        out.push(unquote(text));
                    }
                }
            }
            "import_spec_list" => collect_import_specs(child, source, out),
            _ => {}
        }
    }
}

fn unquote(literal: &str) -> String {
    literal.trim_matches(|c| c == '"' || c == '`').to_string()
}

static IMPORT_SINGLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^import\s+(?:[\w.]+\s+)?["`]([^"`]*)["`]"#).unwrap());

static IMPORT_BLOCK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*(?:[\w.]+\s+)?["`]([^"`]*)["`]"#).unwrap());

/// Line-oriented fallback used when the tree-sitter parser is unavailable.
/// Handles single-form imports, grouped blocks, and named, dot, and blank
/// imports.
fn imports_with_line_scan(content: &str) -> Vec<ImportPath> {
    let mut imports = Vec::new();
    let mut in_import_block = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(caps) = IMPORT_SINGLE.captures(trimmed) {
            if let Some(pkg) = caps.get(1) {
                imports.push(pkg.as_str().to_string());
            }
            continue;
        }

        if trimmed.starts_with("import (") {
            in_import_block = true;
            continue;
        }

        if in_import_block {
            if trimmed == ")" {
                in_import_block = false;
                continue;
            }
            if let Some(caps) = IMPORT_BLOCK_LINE.captures(trimmed) {
                if let Some(pkg) = caps.get(1) {
                    imports.push(pkg.as_str().to_string());
                }
            }
        }
    }

    imports
}
