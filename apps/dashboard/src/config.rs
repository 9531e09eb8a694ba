use std::time::Duration;

use anyhow::{Context, Result};

use crate::evaluation::profile::ViewProfile;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub backend_max_retries: u32,
    /// Which agent roles the dashboard surfaces.
    pub view: ViewProfile,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: require_env("BACKEND_URL")?,
            backend_timeout: Duration::from_secs(
                optional_env("BACKEND_TIMEOUT_SECS", "30")
                    .parse::<u64>()
                    .context("BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            backend_max_retries: optional_env("BACKEND_MAX_RETRIES", "3")
                .parse::<u32>()
                .context("BACKEND_MAX_RETRIES must be a non-negative integer")?,
            view: optional_env("DASHBOARD_VIEW", "full")
                .parse::<ViewProfile>()
                .map_err(anyhow::Error::msg)
                .context("DASHBOARD_VIEW is invalid")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
