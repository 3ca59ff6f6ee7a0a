use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const LOCATION_SEARCH: &str = "/locations/search";
pub const CLIMATE_ANALYZE: &str = "/climate/analyze";
pub const CLIMATE_COMPARE: &str = "/climate/compare";
pub const CLIMATE_HEALTH: &str = "/climate/health";
/// Superseded single-location lookup; the location goes in the next path segment.
pub const CLIMATE_LEGACY_LOOKUP: &str = "/climate/test";

/// Which deployment of the backend a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    #[default]
    Production,
    Local,
}

impl ApiEnvironment {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://climate-migration-app.openeyemedia.net/api",
            Self::Local => "http://localhost:8000/api",
        }
    }

    /// Pages served from a loopback host talk to the local backend.
    pub fn for_host(hostname: &str) -> Self {
        match hostname {
            "localhost" | "127.0.0.1" | "[::1]" | "::1" => Self::Local,
            _ => Self::Production,
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "local" | "development" | "dev" => Ok(Self::Local),
            other => Err(format!("Unknown API environment: {}", other)),
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Joins a base URL and an endpoint path without doubling the slash.
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
