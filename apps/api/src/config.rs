use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if `DATABASE_URL` is missing or a numeric value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            run_migrations: parse_flag(
                &std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".to_string()),
            )
            .context("RUN_MIGRATIONS must be true or false")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised flag value '{other}'"),
    }
}
