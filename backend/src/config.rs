//! Runtime configuration read from the environment.

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:budget.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_RISING_THRESHOLD_PERCENT: f64 = 20.0;
pub const DEFAULT_MAX_MONTH_COUNT: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    /// Default minimum rise (percent) for a category to be flagged
    pub rising_threshold_percent: f64,
    /// Upper bound for "last N months" requests
    pub max_month_count: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            rising_threshold_percent: DEFAULT_RISING_THRESHOLD_PERCENT,
            max_month_count: DEFAULT_MAX_MONTH_COUNT,
        }
    }
}

impl AppConfig {
    /// Load from the process environment, after an optional `.env` file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rising_threshold_percent: f64 =
            parse_var(&get, "RISING_THRESHOLD_PERCENT", defaults.rising_threshold_percent)?;
        if !rising_threshold_percent.is_finite() || rising_threshold_percent < 0.0 {
            bail!(
                "RISING_THRESHOLD_PERCENT must be a non-negative number, got {}",
                rising_threshold_percent
            );
        }

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_var(&get, "PORT", defaults.port)?,
            cors_origin: get("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            rising_threshold_percent,
            max_month_count: parse_var(&get, "MAX_MONTH_COUNT", defaults.max_month_count)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        assert_eq!(config_from(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "8081"),
            ("RISING_THRESHOLD_PERCENT", "12.5"),
            ("MAX_MONTH_COUNT", "36"),
            ("HOST", "  "),
        ])
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 8081);
        assert_eq!(config.rising_threshold_percent, 12.5);
        assert_eq!(config.max_month_count, 36);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.bind_address(), "127.0.0.1:8081");
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("MAX_MONTH_COUNT", "-1")]).is_err());
        assert!(config_from(&[("RISING_THRESHOLD_PERCENT", "-5")]).is_err());
        assert!(config_from(&[("RISING_THRESHOLD_PERCENT", "vingt")]).is_err());
    }
}
