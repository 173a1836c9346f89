use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Failure outcome of every persistence operation
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database unavailable: {0}")]
    Connection(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => PersistenceError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation()
                    || db_err.is_unique_violation()
                    || db_err.is_check_violation() =>
            {
                PersistenceError::Constraint(db_err.message().to_string())
            }
            sqlx::Error::Io(e) => PersistenceError::Connection(e.to_string()),
            sqlx::Error::PoolTimedOut => PersistenceError::Connection("connection pool timed out".to_string()),
            sqlx::Error::PoolClosed => PersistenceError::Connection("connection pool closed".to_string()),
            other => PersistenceError::Sqlx(other),
        }
    }
}

/// Builds the PostgreSQL connection pool and applies the bootstrap schema
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool using the configured URL and limits
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, PersistenceError> {
        let url = config
            .url
            .as_deref()
            .ok_or(PersistenceError::ConfigMissing("DATABASE_URL"))?;

        let mut options = PgConnectOptions::from_str(url)?;
        if !config.enable_query_logging {
            options = options.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(pool)
    }

    /// Apply `sql/schema.sql`. Every statement is `IF NOT EXISTS`, so running
    /// this twice is harmless.
    pub async fn migrate(pool: &PgPool) -> Result<(), PersistenceError> {
        for statement in schema_statements(SCHEMA_SQL) {
            sqlx::query(statement).execute(pool).await?;
        }
        info!("Schema applied");
        Ok(())
    }
}

/// Split a SQL script into executable statements, dropping `--` comment lines
fn schema_statements(script: &str) -> Vec<&str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|chunk| {
            chunk
                .lines()
                .any(|line| !line.trim().is_empty() && !line.trim_start().starts_with("--"))
        })
        .collect()
}
