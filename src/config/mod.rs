//! Configuration loading and merging
//!
//! Handles loading from config files and CLI arguments with proper
//! precedence (CLI > File > Defaults).

use serde::Deserialize;

pub mod loader;
pub mod merge;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides, Settings};

/// File-level configuration. Every field is optional; unset fields fall
/// through to CLI values or built-in defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Whether the project is analysed recursively.
    pub recursive: Option<bool>,
    /// Whether the generated script registers dependencies as Git submodules.
    pub submodules: Option<bool>,
    /// Extra directory names to prune from the walk, alongside `.git` and
    /// `vendor`.
    pub exclude: Vec<String>,
}
