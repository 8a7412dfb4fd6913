//! Config file loading

use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_CANDIDATES: &[&str] =
    &[".revendor.toml", "revendor.toml", ".revendor.yaml", ".revendor.yml"];

/// Load the run configuration for `root`.
///
/// An explicitly provided file must parse, otherwise the run fails. An
/// auto-discovered file that fails to parse only logs a warning and falls
/// back to defaults, so a stray half-written config never breaks the tool.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(root),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(config) => Ok(config),
        Err(e) => {
            if config_path_provided {
                return Err(e);
            }
            // Auto-discovered: warn and return defaults
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES.iter().map(|name| root.join(name)).find(|path| path.is_file())
}

/// Parse TOML config, supporting a nested `[revendor]` table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = if let Some(nested) = raw.get("revendor") { nested.clone() } else { raw };

    config_val
        .try_into()
        .with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `revendor` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("revendor") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}
