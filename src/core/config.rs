use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_SERVICE: &str = "coinmarketcap";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    /// Overrides whether the provider is registered at all.
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub retries: usize,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_secs: 30,
            retries: 2,
            retry_delay_ms: 500,
            user_agent: format!("coinquery/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Service used when a query names none, or names an unknown one.
    #[serde(default = "default_service")]
    pub default_service: String,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_service() -> String {
    DEFAULT_SERVICE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_service: default_service(),
            http: HttpConfig::default(),
            providers: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, or built-in defaults when
    /// no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "coinquery", "coinquery")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
