//! Small shared helpers

pub mod paths;

pub use paths::{import_prefix_from_gopath, normalize_path};
