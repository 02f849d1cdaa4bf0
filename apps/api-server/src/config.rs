//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "rate-limit")]
use thinkspeak_infra::RateLimitConfig;

/// Credentials of the account created at startup.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@thinkspeak.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub admin: AdminConfig,
    /// Load the sample categories and tags.
    pub seed_sample_data: bool,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            admin: AdminConfig::default(),
            seed_sample_data: true,
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            admin: AdminConfig {
                username: env::var("ADMIN_USERNAME").unwrap_or(defaults.admin.username),
                email: env::var("ADMIN_EMAIL").unwrap_or(defaults.admin.email),
                password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
            },
            seed_sample_data: env::var("SEED_SAMPLE_DATA")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.seed_sample_data),
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}
