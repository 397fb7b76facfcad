//! Configuration module

use std::env;

use sqlx::mysql::MySqlConnectOptions;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database host
    pub db_host: String,

    /// Database user
    pub db_user: String,

    /// Database password
    pub db_password: String,

    /// Database name
    pub db_name: String,

    /// Database port
    pub db_port: u16,

    /// HTTP server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            db_host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),

            db_user: env::var("DB_USER").unwrap_or_else(|_| "root".to_string()),

            db_password: env::var("DB_PASSWORD").unwrap_or_else(|_| "password".to_string()),

            db_name: env::var("DB_NAME").unwrap_or_else(|_| "threat_intelligence".to_string()),

            db_port: env::var("DB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3306),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Connection options for the configured database
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }
}
