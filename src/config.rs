use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VerdantConfig {
    pub cli: CliConfig,
    pub storage: StorageConfig,
    pub advisor: AdvisorConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CliConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AdvisorConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub backoff_multiplier: u32,
}

impl Default for VerdantConfig {
    fn default() -> Self {
        Self {
            cli: CliConfig::default(),
            storage: StorageConfig::default(),
            advisor: AdvisorConfig::default(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = default_verdant_dir()
            .join("garden")
            .to_string_lossy()
            .into_owned();
        Self { data_dir }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".into(),
            model: "gemini-2.0-flash-exp".into(),
            api_key: String::new(),
            max_attempts: 3,
            base_delay_ms: 1000,
            backoff_multiplier: 2,
        }
    }
}

/// Returns `~/.verdant/`
pub fn default_verdant_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".verdant")
}

/// Returns the default config file path: `~/.verdant/config.toml`
pub fn default_config_path() -> PathBuf {
    default_verdant_dir().join("config.toml")
}

impl VerdantConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            VerdantConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (VERDANT_DATA_DIR, VERDANT_API_KEY
    /// with GEMINI_API_KEY as a fallback, VERDANT_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("VERDANT_DATA_DIR") {
            self.storage.data_dir = val;
        }
        if let Ok(val) =
            std::env::var("VERDANT_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY"))
        {
            self.advisor.api_key = val;
        }
        if let Ok(val) = std::env::var("VERDANT_LOG_LEVEL") {
            self.cli.log_level = val;
        }
    }

    /// Resolve the data directory, expanding `~` if needed.
    pub fn resolved_data_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.data_dir)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
