//! `trialmap.toml`: registry endpoint, HTTP limits and extra aliases

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use trialmap_registry::RegistryConfig;

/// Global configuration for trialmap
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub http: HttpSection,
    /// Extra location aliases: raw name → governorate name
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Seconds
    pub connect_timeout: u64,
    /// Seconds per request; 0 disables the timeout
    pub request_timeout: u64,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub user_agent: Option<String>,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            connect_timeout: 30,
            request_timeout: 120,
            user_agent: None,
        }
    }
}

impl HttpSection {
    pub fn to_http_config(&self) -> trialmap_core::HttpConfig {
        let defaults = trialmap_core::HttpConfig::default();
        trialmap_core::HttpConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout),
            request_timeout: (self.request_timeout > 0)
                .then(|| Duration::from_secs(self.request_timeout)),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

/// Optional string where a whole-value `${VAR}` is read from the environment
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| expand_env_var(&s)))
}

/// `${VAR}` → value of `VAR` (`None` when unset); anything else is kept as is
fn expand_env_var(s: &str) -> Option<String> {
    match s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        Some(var_name) => std::env::var(var_name).ok(),
        None => Some(s.to_string()),
    }
}

impl Config {
    /// First of `./trialmap.toml` and the user config dir's `config.toml`,
    /// or the defaults when neither exists
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("trialmap.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "trialmap") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("no trialmap.toml found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("config: {}", path.display());
        Ok(config)
    }

    /// Alias overrides as borrowed pairs
    pub fn alias_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
