// src/config.rs

use super::error::ConfigError;

const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct Config {
    pub account_id: String,
    pub api_token: String,
    pub api_base_url: String,
    pub bind_addr: String,
    pub port: u16,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenv().ok()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            account_id: required("CF_ACCOUNT_ID")?,
            api_token: required("CF_API_TOKEN")?,
            api_base_url: lookup("CF_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port,
        })
    }
}
