use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default = "default_logfile")]
    pub logfile: String,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            appdir: None,
            logfile: default_logfile(),
            tmdb: TmdbConfig::default(),
            client: ClientConfig::default(),
            debug_logs: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Settings consumed by the headless client pipeline (fetcher + view models).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Quiescence window for the search debouncer.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Artificial fetch delay so loading states stay visible during development.
    #[serde(default)]
    pub fake_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            fake_delay_ms: 0,
        }
    }
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_logfile() -> String {
    "stdout".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_debounce_ms() -> u64 {
    250
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// Resolve the TMDB API key from the value of the `TMDB_API_KEY`
    /// environment variable. The key is a secret and never lives in the
    /// config file; startup fails when it is absent.
    pub fn resolve_api_key(env_value: Option<String>) -> Result<String, ConfigError> {
        match env_value {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("TMDB_API_KEY is not set; refusing to start without an upstream API key")]
    MissingApiKey,
}
