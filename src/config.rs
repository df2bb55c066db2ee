//! Server configuration.
//!
//! Configuration is read from the YAML file named by `REEL_CONFIG` when that
//! variable is set; otherwise the built-in defaults are used. A handful of
//! environment variables override individual fields afterwards.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "REEL_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub movies: MoviesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Upper bound on connections handled at the same time.
    pub max_connections: usize,
    /// How long a client may take to send its request line.
    pub read_timeout_secs: u64,
    /// Deadline for producing a response once the request line is in.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
    pub index: String,
    /// Serve text files byte-for-byte instead of joining their lines.
    pub preserve_newlines: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MoviesConfig {
    pub route_prefix: String,
    pub provider_url: String,
    pub api_key: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:35000".to_string(),
            max_connections: 256,
            read_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            index: "index.html".to_string(),
            preserve_newlines: false,
        }
    }
}

impl Default for MoviesConfig {
    fn default() -> Self {
        Self {
            route_prefix: "/movies".to_string(),
            provider_url: "http://www.omdbapi.com/".to_string(),
            api_key: String::new(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl MoviesConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl LoggingConfig {
    /// Parsed log level, falling back to INFO for unrecognized values.
    pub fn max_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl Config {
    /// Loads the configuration from `REEL_CONFIG` (if set) and applies
    /// environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml(&raw).with_context(|| format!("Invalid config file {}", path))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies `LISTEN`, `ASSET_ROOT` and `OMDB_API_KEY` through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Some(root) = lookup("ASSET_ROOT") {
            self.static_files.root = PathBuf::from(root);
        }
        if let Some(key) = lookup("OMDB_API_KEY") {
            self.movies.api_key = key;
        }
    }
}
