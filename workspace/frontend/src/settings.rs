use std::cell::RefCell;
use std::time::Duration;

use common::{ApiEnvironment, DEFAULT_SEARCH_LIMIT};
use log::Level;
use session::{DEFAULT_DEBOUNCE, SearchConfig};
use web_sys::window;

const API_BASE_URL_KEY: &str = "climate_advisor_api_base_url";
const LOG_LEVEL_KEY: &str = "climate_advisor_log_level";
const DEBOUNCE_MS_KEY: &str = "climate_advisor_debounce_ms";
const SEARCH_LIMIT_KEY: &str = "climate_advisor_search_limit";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Which backend deployment to talk to
    pub environment: ApiEnvironment,

    /// Explicit base URL, overriding the environment's
    pub api_base_url_override: Option<String>,

    /// Default log level for the application
    pub log_level: Level,

    /// Quiet period before a location search is sent
    pub debounce_ms: u32,

    /// Suggestions requested per search
    pub search_limit: u32,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: ApiEnvironment::Production,
            api_base_url_override: None,
            log_level: Level::Info,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u32,
            search_limit: DEFAULT_SEARCH_LIMIT,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from the window location, then apply localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.environment = ApiEnvironment::for_host(&hostname);
            settings.debug_mode = settings.environment == ApiEnvironment::Local;

            // In development, use more verbose logging
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(base_url)) = storage.get_item(API_BASE_URL_KEY) {
                let base_url = base_url.trim();
                if !base_url.is_empty() {
                    settings.api_base_url_override = Some(base_url.to_string());
                }
            }

            if let Ok(Some(log_level)) = storage.get_item(LOG_LEVEL_KEY) {
                settings.log_level = log_level.parse::<Level>().unwrap_or(settings.log_level);
            }

            if let Ok(Some(debounce)) = storage.get_item(DEBOUNCE_MS_KEY) {
                if let Ok(debounce) = debounce.parse::<u32>() {
                    settings.debounce_ms = debounce;
                }
            }

            if let Ok(Some(limit)) = storage.get_item(SEARCH_LIMIT_KEY) {
                if let Ok(limit) = limit.parse::<u32>() {
                    if limit > 0 {
                        settings.search_limit = limit;
                    }
                }
            }
        }

        settings
    }

    /// Get the base API URL
    pub fn api_base_url(&self) -> String {
        self.api_base_url_override
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string())
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        common::join_url(&self.api_base_url(), endpoint)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            debounce: Duration::from_millis(u64::from(self.debounce_ms)),
            limit: self.search_limit,
        }
    }
}

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
