use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::DEFAULT_API_URL;

const CONFIG_DIR: &str = "bsky-spy";
const CONFIG_FILE: &str = "config.toml";

/// Pause after each list membership request.
pub const DEFAULT_MEMBER_DELAY: Duration = Duration::from_millis(50);

/// Values read from `config.toml`. Credentials never live here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub delay_ms: Option<u64>,
}

impl Config {
    /// Loads the user's config file, or an empty config when there is none.
    pub fn load() -> Result<Self> {
        match Self::config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let config: HashMap<String, toml::Value> = toml::from_str(content)?;

        let api_url = config
            .get("api")
            .and_then(|v| v.get("url"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let delay_ms = match config.get("rate").and_then(|v| v.get("delay_ms")) {
            Some(value) => {
                let ms = value
                    .as_integer()
                    .context("rate.delay_ms must be an integer")?;
                Some(u64::try_from(ms).context("rate.delay_ms must not be negative")?)
            }
            None => None,
        };

        Ok(Self { api_url, delay_ms })
    }
}

/// Effective run settings after layering flags and environment over the
/// config file and built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub member_delay: Duration,
}

impl Settings {
    pub fn resolve(api_url: Option<String>, delay_ms: Option<u64>, config: &Config) -> Self {
        let api_url = api_url
            .or_else(|| config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let member_delay = delay_ms
            .or(config.delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_MEMBER_DELAY);

        Self {
            api_url,
            member_delay,
        }
    }
}
