use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub dictionary: DictionaryConfig,
    pub telemetry: TelemetryConfig,
}

/// Stage toggles for the polishing pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    pub corrections: bool,
    pub numbers: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            corrections: true,
            numbers: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DictionaryConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub log_path: String,
}

impl Config {
    /// Load config from ~/.transcript-polish.toml
    ///
    /// # Errors
    /// Fails when the config file cannot be created, read, or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default(&config_path).context("failed to create default config")?;
        }

        let contents = fs::read_to_string(&config_path).context("failed to read config file")?;

        let config: Self = toml::from_str(&contents).context("failed to parse config TOML")?;

        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(".transcript-polish.toml"))
    }

    fn create_default(path: &PathBuf) -> Result<()> {
        let default_config = r#"[pipeline]
corrections = true
numbers = true

[dictionary]
path = "~/.transcript-polish/dictionary.json"

[telemetry]
enabled = false
log_path = "~/.transcript-polish/polish.log"
"#;
        fs::write(path, default_config).context("failed to write default config")?;
        Ok(())
    }

    /// Expand ~ in paths to home directory
    ///
    /// # Errors
    /// Fails when `HOME` is not set and the path needs it.
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        if let Some(rest) = path.strip_prefix("~/") {
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            Ok(PathBuf::from(home).join(rest))
        } else {
            Ok(PathBuf::from(path))
        }
    }
}
