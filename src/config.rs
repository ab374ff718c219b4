//! Configuration handling for the TUI
//!
//! Values come from `config.json` in the platform config directory, then
//! environment variables, then built-in defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_LOOKUP_URL: &str = "https://brasilapi.com.br/api/cep/v2";
pub const DEFAULT_REGISTER_URL: &str = "https://apis.codante.io/api/register-user/register";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const LOOKUP_URL_VAR: &str = "CADASTRO_LOOKUP_URL";
const REGISTER_URL_VAR: &str = "CADASTRO_REGISTER_URL";
const TIMEOUT_VAR: &str = "CADASTRO_TIMEOUT_SECS";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// User configuration as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Base URL of the CEP lookup service
    pub lookup_base_url: Option<String>,
    /// Registration endpoint
    pub register_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Fully resolved service endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub lookup_base_url: Url,
    pub register_url: Url,
    pub timeout_secs: u64,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "cadastro", "cadastro-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, falling back to defaults when absent
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Save configuration as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve endpoints using the process environment for overrides
    pub fn resolve(&self) -> Result<ServiceConfig, ConfigError> {
        self.resolve_with(|var| std::env::var(var).ok())
    }

    /// Resolve endpoints with an explicit environment lookup
    pub fn resolve_with<F>(&self, env: F) -> Result<ServiceConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup_raw = env(LOOKUP_URL_VAR)
            .or_else(|| self.lookup_base_url.clone())
            .unwrap_or_else(|| DEFAULT_LOOKUP_URL.to_string());
        let register_raw = env(REGISTER_URL_VAR)
            .or_else(|| self.register_url.clone())
            .unwrap_or_else(|| DEFAULT_REGISTER_URL.to_string());
        let timeout_secs = env(TIMEOUT_VAR)
            .and_then(|s| s.parse().ok())
            .or(self.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(ServiceConfig {
            lookup_base_url: parse_url("lookup_base_url", &lookup_raw)?,
            register_url: parse_url("register_url", &register_raw)?,
            timeout_secs,
        })
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.lookup_base_url.is_none());
        assert!(config.register_url.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = TuiConfig::default().resolve_with(no_env).unwrap();
        assert_eq!(resolved.lookup_base_url.as_str(), DEFAULT_LOOKUP_URL);
        assert_eq!(resolved.register_url.as_str(), DEFAULT_REGISTER_URL);
        assert_eq!(resolved.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let config = TuiConfig {
            register_url: Some("http://localhost:8000/register".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let resolved = config.resolve_with(no_env).unwrap();
        assert_eq!(resolved.register_url.as_str(), "http://localhost:8000/register");
        assert_eq!(resolved.lookup_base_url.as_str(), DEFAULT_LOOKUP_URL);
        assert_eq!(resolved.timeout_secs, 5);
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            (LOOKUP_URL_VAR, "http://127.0.0.1:9000/cep"),
            (TIMEOUT_VAR, "12"),
        ]
        .into_iter()
        .collect();
        let config = TuiConfig {
            lookup_base_url: Some("http://file.example/cep".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };

        let resolved = config
            .resolve_with(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(resolved.lookup_base_url.as_str(), "http://127.0.0.1:9000/cep");
        assert_eq!(resolved.timeout_secs, 12);
    }

    #[test]
    fn test_unparseable_timeout_env_is_ignored() {
        let config = TuiConfig {
            timeout_secs: Some(7),
            ..Default::default()
        };
        let resolved = config
            .resolve_with(|var| (var == TIMEOUT_VAR).then(|| "soon".to_string()))
            .unwrap();
        assert_eq!(resolved.timeout_secs, 7);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let config = TuiConfig {
            register_url: Some("not a url".to_string()),
            ..Default::default()
        };
        let err = config.resolve_with(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(ref name, _) if name == "register_url"));
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            lookup_base_url: Some("http://localhost:1/cep".to_string()),
            register_url: Some("http://localhost:2/register".to_string()),
            timeout_secs: Some(10),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_then_load_from_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadastro").join("config.json");
        let config = TuiConfig {
            register_url: Some("http://localhost:8000/register".to_string()),
            timeout_secs: Some(15),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"register_url\""));
        assert_eq!(TuiConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = TuiConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, TuiConfig::default());
    }

    #[test]
    fn test_load_from_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = TuiConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"timeout_secs": 3, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.timeout_secs, Some(3));
        assert!(parsed.register_url.is_none());
    }
}
