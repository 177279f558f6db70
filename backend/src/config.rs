use anyhow::Context;

use crate::dates::ShiftPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    /// Mandatory. There is no fallback store; startup fails without it.
    pub database_url: String,
    /// Overrides the database named in `database_url` when set.
    pub database_name: Option<String>,
    pub db_max_connections: u32,
    pub listen_addr: String,
    pub cors_origins: Vec<String>,
    pub shift_policy: ShiftPolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_name: std::env::var("DATABASE_NAME")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a number")?,
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            shift_policy: std::env::var("TIME_OFF_DATE_SHIFT")
                .unwrap_or_else(|_| "read".into())
                .parse()
                .context("TIME_OFF_DATE_SHIFT must be 'read' or 'legacy'")?,
        })
    }
}
