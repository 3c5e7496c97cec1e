use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::analysis::matching::{CostBasis, DEFAULT_PROCUREMENT_VOLUME};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a value that is present but unparseable fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON catalog file. A missing file falls back to the embedded catalog.
    pub catalog_path: PathBuf,
    /// Presentation delay applied before each analysis response.
    pub analysis_delay: Duration,
    pub procurement_volume: f64,
    pub cost_basis: CostBasis,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_path: std::env::var("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("db.json")),
            analysis_delay: Duration::from_millis(parse_env("ANALYSIS_DELAY_MS", 2500)?),
            procurement_volume: parse_env("PROCUREMENT_VOLUME", DEFAULT_PROCUREMENT_VOLUME)?,
            cost_basis: parse_env("COST_BASIS", CostBasis::AllMatches)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            rust_log: "info".to_string(),
            catalog_path: PathBuf::from("db.json"),
            analysis_delay: Duration::from_millis(2500),
            procurement_volume: DEFAULT_PROCUREMENT_VOLUME,
            cost_basis: CostBasis::AllMatches,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
