// ABOUTME: Configuration file loading, validation, and hierarchical merging for the upscale CLI
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use upscale_sdk::ScaleFactor;

use crate::constants;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default, deserialize_with = "validate_scale")]
    pub default_scale: Option<u8>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_image_mb: Option<u64>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths.iter().map(|p| p.as_str()).collect::<Vec<_>>())
    }

    /// Load configuration from specific file paths in order of precedence (highest first).
    /// Missing files are skipped; files that exist but fail to parse are errors.
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        // Apply lowest precedence first so higher ones override
        for path in paths.iter().rev() {
            if !Path::new(path).is_file() {
                continue;
            }
            log::debug!("Loading config from {}", path);
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get standard config file paths in order of precedence (highest first)
    pub fn get_config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        // 1. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(
                current_dir
                    .join(constants::config::PROJECT_FILE)
                    .to_string_lossy()
                    .to_string(),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home)
                .join(constants::config::APP_DIR)
                .join(constants::config::USER_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        // 3. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir
                .join(".config")
                .join(constants::config::APP_DIR)
                .join(constants::config::USER_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            api_key: other.api_key.or(self.api_key),
            default_scale: other.default_scale.or(self.default_scale),
            model: other.model.or(self.model),
            api_url: other.api_url.or(self.api_url),
            proxy: other.proxy.or(self.proxy),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            max_image_mb: other.max_image_mb.or(self.max_image_mb),
            output_dir: other.output_dir.or(self.output_dir),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        if let Some(mb) = self.max_image_mb {
            if !(1..=1024).contains(&mb) {
                return Err(anyhow!(
                    "Invalid max_image_mb {}. Must be between 1 and 1024",
                    mb
                ));
            }
        }

        if matches!(self.api_key.as_deref(), Some(key) if key.trim().is_empty()) {
            return Err(anyhow!("api_key must not be empty"));
        }

        Ok(())
    }

    pub fn scale(&self) -> ScaleFactor {
        match self.default_scale {
            Some(4) => ScaleFactor::X4,
            _ => ScaleFactor::X2,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn max_image_bytes(&self) -> Option<u64> {
        self.max_image_mb.map(|mb| mb * 1024 * 1024)
    }

    /// Resolve the API key: explicit flag, then environment, then this config
    pub fn resolve_api_key<F>(&self, flag: Option<&str>, env_lookup: F) -> Option<SecretString>
    where
        F: Fn(&str) -> Option<String>,
    {
        flag.and_then(non_blank)
            .or_else(|| {
                constants::env::API_KEY_VARS
                    .iter()
                    .find_map(|var| env_lookup(var).as_deref().and_then(non_blank))
            })
            .or_else(|| self.api_key.as_deref().and_then(non_blank))
            .map(|key| SecretString::new(key.into_boxed_str()))
    }
}

/// Trimmed key, or None when only whitespace
fn non_blank(key: &str) -> Option<String> {
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

// Custom deserializer for scale validation
fn validate_scale<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<u8> = Option::deserialize(deserializer)?;

    match value {
        None | Some(2) | Some(4) => Ok(value),
        Some(other) => Err(D::Error::custom(format!(
            "Invalid default_scale '{}'. Must be one of: 2, 4",
            other
        ))),
    }
}
