use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::{MunchError, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://munch.db";
const DEFAULT_MEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub mealdb_url: String,
    pub mealdb_category: String,
    pub mealdb_delay: Duration,
}

impl Config {
    /// Read settings from `MUNCH_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_url: try_load(&lookup, "MUNCH_DATABASE_URL", DEFAULT_DATABASE_URL)?,
            max_connections: try_load(&lookup, "MUNCH_MAX_CONNECTIONS", "5")?,
            mealdb_url: try_load(&lookup, "MUNCH_MEALDB_URL", DEFAULT_MEALDB_URL)?,
            mealdb_category: try_load(&lookup, "MUNCH_MEALDB_CATEGORY", "Vegetarian")?,
            mealdb_delay: Duration::from_millis(try_load(&lookup, "MUNCH_MEALDB_DELAY_MS", "100")?),
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| MunchError::Config {
            key,
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("Defaults should load");

        assert_eq!(config.database_url, "sqlite://munch.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.mealdb_category, "Vegetarian");
        assert_eq!(config.mealdb_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("MUNCH_DATABASE_URL", "sqlite::memory:"),
            ("MUNCH_MAX_CONNECTIONS", "1"),
            ("MUNCH_MEALDB_DELAY_MS", "0"),
        ])
        .expect("Overrides should load");

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.mealdb_delay, Duration::ZERO);
    }

    #[test]
    fn test_invalid_value() {
        let result = config_from(&[("MUNCH_MAX_CONNECTIONS", "lots")]);

        match result {
            Err(MunchError::Config { key, .. }) => assert_eq!(key, "MUNCH_MAX_CONNECTIONS"),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }
}
