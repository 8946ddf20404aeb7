//! Runtime configuration read from the environment (and `.env`, loaded by
//! `main` through `dotenvy`).

use anyhow::{Context, Result};

use crate::infra::openweathermap::DEFAULT_BASE_URL;

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const BASE_URL_VAR: &str = "OPENWEATHER_BASE_URL";
pub const LOG_FILE_VAR: &str = "LOG_FILE_PATH";
pub const DEFAULT_LOG_FILE: &str = "logs/city_weather.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .with_context(|| format!("{API_KEY_VAR} must be set"))?;
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }
}

pub fn log_file_path() -> String {
    std::env::var(LOG_FILE_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string())
}
