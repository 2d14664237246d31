use crate::constants::{
    DEFAULT_DB_PATH, DEFAULT_TABLE, DEFAULT_TIMEOUT_SECONDS, GT_SCHEDULER_BASE_URL,
};
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: GT_SCHEDULER_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory; a missing file
    /// yields the built-in defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    fn load_from(path: &str) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
