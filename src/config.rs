use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, time::Duration};

pub const CONFIG_PATH_VAR: &str = "NOTEMAKER_CONFIG";
pub const ENV_PREFIX: &str = "NOTEMAKER_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub storage: StorageKind,
    #[serde(default)]
    pub pg_dsn: Option<String>,
    /// Base URL the console client talks to
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    #[serde(default = "default_alert_capacity")]
    pub alert_capacity: usize,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

const fn default_port() -> u16 {
    8080
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

const fn default_alert_capacity() -> usize {
    5
}

const fn default_page_size() -> u32 {
    crate::models::DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            storage: StorageKind::default(),
            pg_dsn: None,
            api_url: default_api_url(),
            request_timeout: default_request_timeout(),
            alert_capacity: default_alert_capacity(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(
        "config file not found and environment variables are incomplete. \
         Tried: '{tried}', 'config.yaml', 'config.example.yaml', and environment variables. \
         Error: {source}"
    )]
    NotFound { tried: String, source: envy::Error },

    #[error("storage is 'postgres' but pg_dsn is not set")]
    MissingDsn,
}

impl Config {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.storage == StorageKind::Postgres && self.pg_dsn.is_none() {
            return Err(ConfigError::MissingDsn);
        }
        Ok(self)
    }
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&contents)?;
    config.validate()
}

pub fn load_from_env() -> Result<Config, envy::Error> {
    envy::prefixed(ENV_PREFIX).from_env::<Config>()
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_file("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            config.validate()
        }
        Err(source) => Err(ConfigError::NotFound {
            tried: config_path,
            source,
        }),
    }
}
