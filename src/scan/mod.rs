//! Import discovery across a Go source tree

pub mod classify;
pub mod collector;
pub mod package;

pub use collector::{ImportCollector, PRUNED_DIRS};
pub use package::{go_imports, read_dir_package};
