// ============================================================================
// CONFIG - compile-time application settings
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_API_BASE_URL, NOTIFICATION_DURATION_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Versioned API root, without trailing slash (e.g. `http://host/api/v1`)
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub notification_duration_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            notification_duration_ms: NOTIFICATION_DURATION_MS,
        }
    }
}

impl AppConfig {
    /// Load settings baked in at build time (see build.rs for the `.env` bridge)
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_BASE_URL"),
            option_env!("ENVIRONMENT"),
            option_env!("ENABLE_LOGGING"),
            option_env!("LOG_LEVEL"),
            option_env!("NOTIFICATION_DURATION_MS"),
        )
    }

    fn from_values(
        api_base_url: Option<&str>,
        environment: Option<&str>,
        enable_logging: Option<&str>,
        log_level: Option<&str>,
        notification_duration_ms: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: api_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            environment: environment
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: log_level
                .map(str::to_lowercase)
                .unwrap_or(defaults.log_level),
            notification_duration_ms: notification_duration_ms
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notification_duration_ms),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Level handed to the console logger; unknown names fall back to Info
    pub fn log_level(&self) -> log::Level {
        match self.log_level.as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let config = AppConfig::from_values(None, None, None, None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.notification_duration_ms, 4000);
    }

    #[test]
    fn values_are_parsed_and_normalised() {
        let config = AppConfig::from_values(
            Some("https://api.school.test/api/v1/"),
            Some("production"),
            Some("false"),
            Some("DEBUG"),
            Some("2500"),
        );
        assert_eq!(config.api_base_url, "https://api.school.test/api/v1");
        assert!(config.is_production());
        assert!(!config.enable_logging);
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.notification_duration_ms, 2500);
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = AppConfig::from_values(None, None, Some("yes"), Some("loud"), Some("soon"));
        assert!(config.enable_logging);
        assert_eq!(config.log_level(), log::Level::Info);
        assert_eq!(config.notification_duration_ms, 4000);
    }
}
