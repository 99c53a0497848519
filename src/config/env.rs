// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::models::{DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT};
use dotenv::dotenv;
use std::env;
use std::time::Duration;

/// Default Google Maps Platform web service root
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Delay before requesting a continuation page.
/// Google needs a moment before a freshly issued next_page_token becomes valid.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 2000;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8080)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Maps API key, shared by geocoding, text search and details
    pub google_maps_api_key: String,

    /// Root URL for the Maps web services (overridable for tests)
    pub maps_base_url: String,

    /// Pause between paginated search calls, in milliseconds
    pub page_delay_ms: u64,

    /// Per-call timeout for outbound HTTP requests, in seconds
    pub http_timeout_secs: u64,

    /// Result cap used when a request does not specify maxResults
    pub default_max_results: usize,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .map(|key| key.trim().to_string())
                .unwrap_or_default(),

            maps_base_url: env::var("GOOGLE_MAPS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MAPS_BASE_URL.to_string()),

            page_delay_ms: env::var("PAGE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_DELAY_MS),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            default_max_results: env::var("DEFAULT_MAX_RESULTS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_RESULTS)
                .clamp(1, MAX_RESULTS_LIMIT),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: A missing API key does not stop the server from starting,
    /// but every extraction request is refused until it is set.
    pub fn validate(&self) -> Result<(), String> {
        if self.maps_base_url.is_empty() {
            return Err("GOOGLE_MAPS_BASE_URL must not be empty".to_string());
        }

        if self.server_port == 0 {
            return Err("SERVER_PORT must be a non-zero port".to_string());
        }

        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        !self.google_maps_api_key.is_empty()
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 8080,
            environment: "test".to_string(),
            log_level: "info".to_string(),
            google_maps_api_key: String::new(),
            maps_base_url: DEFAULT_MAPS_BASE_URL.to_string(),
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            http_timeout_secs: 30,
            default_max_results: DEFAULT_MAX_RESULTS,
        }
    }

    #[test]
    fn test_missing_key_is_not_a_startup_failure() {
        let config = sample_config();
        assert!(config.validate().is_ok());
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let mut config = sample_config();
        config.maps_base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_delay_defaults_to_two_seconds() {
        let config = sample_config();
        assert_eq!(config.page_delay(), Duration::from_millis(2000));
    }
}
