//! revendor: re-vendor Go dependencies through a generated shell script
//!
//! The tool scans a Go project tree, determines which imported packages are
//! external to the project, and prints a shell script that re-downloads them
//! into `vendor/`, optionally tracking each fetched repository as a Git
//! submodule. It never executes the script itself.

pub mod cli;
pub mod config;
pub mod domain;
pub mod render;
pub mod scan;
pub mod utils;
