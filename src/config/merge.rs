//! CLI-over-file settings merging

use super::Config;

/// Flag values actually given on the command line; `None` means "not set",
/// which lets the config file or the built-in default apply.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub recursive: Option<bool>,
    pub submodules: Option<bool>,
}

/// Effective per-run settings after layering CLI > file > defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub recursive: bool,
    pub submodules: bool,
    pub exclude: Vec<String>,
}

pub fn merge_cli_with_config(cli: &CliOverrides, config: &Config) -> Settings {
    Settings {
        recursive: cli.recursive.or(config.recursive).unwrap_or(true),
        submodules: cli.submodules.or(config.submodules).unwrap_or(true),
        exclude: config.exclude.clone(),
    }
}
