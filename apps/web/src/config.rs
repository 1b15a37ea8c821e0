use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "http://backend:8000";
const DEFAULT_PUBLIC_API_BASE: &str = "http://localhost:8000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every setting has a default; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL for server-side calls (inside the container network).
    pub api_base: String,
    /// Backend base URL as the browser sees it; used for report download links.
    pub public_api_base: String,
    pub port: u16,
    pub rust_log: String,
    pub backend_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base: env_or("API_BASE", DEFAULT_API_BASE),
            public_api_base: env_or("PUBLIC_API_BASE", DEFAULT_PUBLIC_API_BASE),
            port: parse_env("PORT", 3000)?,
            rust_log: env_or("RUST_LOG", "info"),
            backend_timeout: Duration::from_secs(parse_env("BACKEND_TIMEOUT_SECS", 120)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        _ => Ok(default),
    }
}
