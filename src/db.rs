//! Database module - MySQL connection and schema

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::MySqlExecutor;

/// Create database connection pool
pub async fn create_pool(options: MySqlConnectOptions) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
}

/// Apply the database schema
pub async fn ensure_schema(executor: impl MySqlExecutor<'_>) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA_SQL).execute(executor).await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
///
/// The list-valued columns (indicators, recommendations, tags) hold JSON
/// arrays of strings and are written on every insert, even when empty.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS threats (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(500) NOT NULL,
    description TEXT,
    severity VARCHAR(20) NOT NULL,
    type VARCHAR(100) NOT NULL DEFAULT 'unknown',
    source VARCHAR(255),
    status VARCHAR(50),
    confidence FLOAT,
    indicators JSON NOT NULL,
    recommendations JSON NOT NULL,
    tags JSON NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
    INDEX idx_threats_severity (severity),
    INDEX idx_threats_status (status),
    INDEX idx_threats_created (created_at)
)
"#;
