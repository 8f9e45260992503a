//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recognizer settings
    pub ocr: OcrSettings,
    /// Output settings
    pub output: OutputSettings,
}

/// Recognizer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Recognizer language tag (e.g., "en-US"); user profile languages when unset
    pub language: Option<String>,
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// Recognized text only
    Text,
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format
    pub format: OutputFormat,
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", "file-ocr")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Default location of the configuration file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
