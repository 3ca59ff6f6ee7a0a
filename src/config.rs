use std::time::Duration;

use clap::Args;
use common::{ApiEnvironment, DEFAULT_SEARCH_LIMIT};
use config::{Config, Environment, File};
use reqwest::Url;
use serde::Deserialize;
use session::{DEFAULT_DEBOUNCE, SearchConfig};
use thiserror::Error;
use tracing::debug;

/// Optional `climate-advisor.toml` (or `.json`, `.yaml`) in the working directory.
const CONFIG_FILE: &str = "climate-advisor";
const ENV_PREFIX: &str = "CLIMATE_ADVISOR";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{0}")]
    InvalidEnvironment(String),

    #[error("Search limit must be at least 1")]
    InvalidSearchLimit,

    #[error("Request timeout must be at least 1 second")]
    InvalidTimeout,
}

/// Values given on the command line; each one wins over files and environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true, env = "CLIMATE_ADVISOR_BASE_URL")]
    pub base_url: Option<String>,

    /// Backend deployment: production or local
    #[arg(long, global = true, env = "CLIMATE_ADVISOR_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "CLIMATE_ADVISOR_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Suggestions requested per location search
    #[arg(long, global = true, env = "CLIMATE_ADVISOR_SEARCH_LIMIT")]
    pub search_limit: Option<u32>,
}

/// Layered settings as read from defaults, file and environment.
#[derive(Debug, Clone, Deserialize)]
struct RawSettings {
    environment: String,
    base_url: Option<String>,
    timeout_secs: u64,
    search_limit: u32,
}

/// Resolved terminal client settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub environment: ApiEnvironment,
    pub base_url: String,
    pub timeout: Duration,
    pub search_limit: u32,
}

impl Settings {
    /// Defaults, then `climate-advisor.toml`, then `CLIMATE_ADVISOR_*`, then flags.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let raw: RawSettings = Config::builder()
            .set_default("environment", ApiEnvironment::default().to_string())?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("search_limit", i64::from(DEFAULT_SEARCH_LIMIT))?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("base_url", overrides.base_url.clone())?
            .set_override_option("environment", overrides.environment.clone())?
            .set_override_option("timeout_secs", overrides.timeout_secs.map(|s| s as i64))?
            .set_override_option("search_limit", overrides.search_limit.map(i64::from))?
            .build()?
            .try_deserialize()?;

        let settings = Self::resolve(raw)?;
        debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    fn resolve(raw: RawSettings) -> Result<Self, ConfigError> {
        let environment = raw
            .environment
            .parse::<ApiEnvironment>()
            .map_err(ConfigError::InvalidEnvironment)?;

        let base_url = match raw.base_url.map(|url| url.trim().to_string()) {
            Some(url) if !url.is_empty() => url,
            _ => environment.base_url().to_string(),
        };
        validate_base_url(&base_url)?;

        if raw.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if raw.search_limit == 0 {
            return Err(ConfigError::InvalidSearchLimit);
        }

        Ok(Self {
            environment,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(raw.timeout_secs),
            search_limit: raw.search_limit,
        })
    }

    /// Terminal searches run without waiting for typing to settle.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            debounce: DEFAULT_DEBOUNCE,
            limit: self.search_limit,
        }
    }
}

fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(invalid("scheme must be http or https")),
    }
    if parsed.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawSettings {
        RawSettings {
            environment: "production".to_string(),
            base_url: None,
            timeout_secs: 30,
            search_limit: 10,
        }
    }

    #[test]
    fn test_environment_selects_base_url() {
        let settings = Settings::resolve(raw()).unwrap();
        assert_eq!(settings.base_url, "https://climate-migration-app.openeyemedia.net/api");
        assert_eq!(settings.timeout, Duration::from_secs(30));

        let settings = Settings::resolve(RawSettings {
            environment: "local".to_string(),
            ..raw()
        })
        .unwrap();
        assert_eq!(settings.environment, ApiEnvironment::Local);
        assert_eq!(settings.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let settings = Settings::resolve(RawSettings {
            environment: "local".to_string(),
            base_url: Some("http://127.0.0.1:9000/api/".to_string()),
            ..raw()
        })
        .unwrap();
        assert_eq!(settings.base_url, "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::resolve(RawSettings {
            base_url: Some("ftp://example.com".to_string()),
            ..raw()
        });
        assert!(matches!(err, Err(ConfigError::InvalidBaseUrl { .. })));

        let err = Settings::resolve(RawSettings {
            environment: "staging".to_string(),
            ..raw()
        });
        assert!(matches!(err, Err(ConfigError::InvalidEnvironment(_))));

        let err = Settings::resolve(RawSettings {
            search_limit: 0,
            ..raw()
        });
        assert!(matches!(err, Err(ConfigError::InvalidSearchLimit)));

        let err = Settings::resolve(RawSettings {
            timeout_secs: 0,
            ..raw()
        });
        assert!(matches!(err, Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn test_flags_override_layers() {
        let overrides = ConfigOverrides {
            base_url: Some("http://127.0.0.1:1/api".to_string()),
            environment: Some("dev".to_string()),
            timeout_secs: Some(5),
            search_limit: Some(3),
        };
        let settings = Settings::load(&overrides).unwrap();
        assert_eq!(settings.base_url, "http://127.0.0.1:1/api");
        assert_eq!(settings.environment, ApiEnvironment::Local);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.search_config().limit, 3);
    }
}
