use homeroom_push::PushConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub push: PushConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database_url() -> String {
    "homeroom.db".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path));
        }
        let content = std::fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loaded config, or defaults when no file exists, with environment overrides applied.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let config = match Self::load() {
            Ok(config) => config,
            Err(ConfigError::NotFound(path)) => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// `HOMEROOM_CONFIG`, else the platform config dir.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("HOMEROOM_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("homeroom")
            .join("config.toml")
    }

    fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = var("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database_url = url;
        }
        self
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            server: ServerConfig::default(),
            push: PushConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_url, "homeroom.db");
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.push.chunk_size.get(), 100);
        assert_eq!(config.push.timeout_secs.get(), 10);
        assert_eq!(config.push.pacing_ms, 200);
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
            database_url = "/var/lib/homeroom/school.db"

            [server]
            port = 9000

            [push]
            endpoint = "http://localhost:4000/push"
            chunk_size = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url, "/var/lib/homeroom/school.db");
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
        assert_eq!(config.push.endpoint, "http://localhost:4000/push");
        assert_eq!(config.push.chunk_size.get(), 50);
        assert_eq!(config.push.pacing_ms, 200);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = Config::parse("[push]\nchunk_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_database_url_override() {
        let config = Config::default().with_env_overrides(|key| {
            (key == "DATABASE_URL").then(|| "override.db".to_string())
        });
        assert_eq!(config.database_url, "override.db");

        let config = Config::default().with_env_overrides(|_| None);
        assert_eq!(config.database_url, "homeroom.db");
    }
}
