//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the CampuSync
//! API server. It retrieves configuration values from environment variables
//! and provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `SESSION_TTL_HOURS`: Lifetime of login session tokens (default: 24)
//! - `HOLIDAY_FEED_URL`: Base URL of the public-holiday feed
//!   (default: "https://date.nager.at/api/v3/PublicHolidays")
//! - `HOLIDAY_FEED_YEAR`: Year requested from the feed (default: 2025)
//! - `HOLIDAY_FEED_COUNTRY`: ISO country code for the feed (default: "IN")
//! - `HOLIDAY_FEED_TIMEOUT_SECONDS`: Upper bound on the feed call
//!   (default: 5)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the CampuSync API server
///
/// This struct encapsulates all configuration options for the API server,
/// including networking, database connections, session lifetime, and the
/// external public-holiday feed.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Lifetime of session tokens, in hours
    pub session_ttl_hours: i64,

    /// Base URL of the external public-holiday feed
    pub holiday_feed_url: String,

    /// Year the feed is queried for
    pub holiday_feed_year: i32,

    /// ISO country code the feed is queried for
    pub holiday_feed_country: String,

    /// Upper bound on the feed request, in seconds. The feed call must never
    /// block a stats computation indefinitely.
    pub holiday_feed_timeout: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// This function loads configuration values from environment variables,
    /// providing sensible defaults where possible. Some values like
    /// DATABASE_URL are required and will cause an error if not set.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Session settings
        let session_ttl_hours = env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        // External holiday feed settings
        let holiday_feed_url = env::var("HOLIDAY_FEED_URL")
            .unwrap_or_else(|_| "https://date.nager.at/api/v3/PublicHolidays".to_string());
        let holiday_feed_year = env::var("HOLIDAY_FEED_YEAR")
            .unwrap_or_else(|_| "2025".to_string())
            .parse()
            .unwrap_or(2025);
        let holiday_feed_country =
            env::var("HOLIDAY_FEED_COUNTRY").unwrap_or_else(|_| "IN".to_string());
        let holiday_feed_timeout = env::var("HOLIDAY_FEED_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            session_ttl_hours,
            holiday_feed_url,
            holiday_feed_year,
            holiday_feed_country,
            holiday_feed_timeout,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
