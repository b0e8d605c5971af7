//! Configuration file parsing (`pairsort.toml`).
//!
//! Looked up in the current directory first, then `~/.pairsort/config.toml`.
//! Every section and field is optional.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG: &str = "pairsort.toml";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct PairsortConfig {
    pub output: OutputConfig,
    pub batch: BatchConfig,
    pub check: CheckConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    pub threads: Option<usize>,
    pub fail_fast: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CheckConfig {
    pub warn_duplicates: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            warn_duplicates: true,
        }
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pairsort").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<PairsortConfig> {
    Ok(toml::from_str(content)?)
}

pub fn load_from(path: &Path) -> Result<PairsortConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Local file, then global file, then defaults.
pub fn load_config() -> Result<PairsortConfig> {
    load_config_from(Path::new(LOCAL_CONFIG), global_config_path().as_deref())
}

pub fn load_config_from(local: &Path, global: Option<&Path>) -> Result<PairsortConfig> {
    if local.exists() {
        return load_from(local);
    }

    if let Some(global) = global
        && global.exists()
    {
        return load_from(global);
    }

    Ok(PairsortConfig::default())
}
