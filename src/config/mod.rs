//! Configuration module for the MentorHub backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Lifetime of a login session in hours
    pub session_ttl_hours: i64,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("MENTORHUB_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("MENTORHUB_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .expect("Invalid MENTORHUB_BIND_ADDR format");

        let log_level = env::var("MENTORHUB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let session_ttl_hours = env::var("MENTORHUB_SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        let max_upload_bytes = env::var("MENTORHUB_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(16 * 1024 * 1024);

        Self {
            db_path,
            bind_addr,
            log_level,
            session_ttl_hours,
            max_upload_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("MENTORHUB_DB_PATH");
        env::remove_var("MENTORHUB_BIND_ADDR");
        env::remove_var("MENTORHUB_LOG_LEVEL");
        env::remove_var("MENTORHUB_SESSION_TTL_HOURS");
        env::remove_var("MENTORHUB_MAX_UPLOAD_BYTES");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
    }
}
