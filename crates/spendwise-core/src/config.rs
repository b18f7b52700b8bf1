//! Client configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded in three layers, later layers winning:
//! 1. Embedded defaults (compiled into binary)
//! 2. Override file: `--config PATH`, else `~/.local/share/spendwise/config.toml`
//!    when it exists
//! 3. Environment: `SPENDWISE_URL`, `SPENDWISE_SESSION`, `SPENDWISE_CURRENCY`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/spendwise.toml");

pub const URL_ENV: &str = "SPENDWISE_URL";
pub const SESSION_ENV: &str = "SPENDWISE_SESSION";
pub const CURRENCY_ENV: &str = "SPENDWISE_CURRENCY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the tracker API
    pub server_url: String,
    /// Session cookie (bare id or `name=value`)
    pub session_cookie: Option<String>,
    pub currency_symbol: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            session_cookie: None,
            currency_symbol: "₹".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Resolve all three layers
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        config.merge_toml(DEFAULT_CONFIG)?;

        let file = match override_path {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = file {
            debug!(path = %path.display(), "Loading config override");
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
            config.merge_toml(&content)?;
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML document on top of the built-in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config = Self::default();
        config.merge_toml(content)?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply only the keys present in `content`
    fn merge_toml(&mut self, content: &str) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        if let Some(server) = raw.server {
            if let Some(url) = server.url {
                self.server_url = url;
            }
            if let Some(timeout) = server.timeout_secs {
                self.timeout_secs = timeout;
            }
            if let Some(session) = server.session {
                self.session_cookie = Some(session).filter(|s| !s.trim().is_empty());
            }
        }

        if let Some(display) = raw.display {
            if let Some(currency) = display.currency {
                self.currency_symbol = currency;
            }
        }

        Ok(())
    }

    /// Environment layer; `lookup` is `std::env::var` outside tests
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(URL_ENV).filter(|v| !v.is_empty()) {
            self.server_url = url;
        }
        if let Some(session) = lookup(SESSION_ENV).filter(|v| !v.is_empty()) {
            self.session_cookie = Some(session);
        }
        if let Some(currency) = lookup(CURRENCY_ENV) {
            self.currency_symbol = currency;
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendwise").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    server: Option<RawServer>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    url: Option<String>,
    timeout_secs: Option<u64>,
    session: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = Config::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_override_keeps_other_keys() {
        let config = Config::from_toml(
            r#"
            [server]
            url = "https://money.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.server_url, "https://money.example.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[server\nurl=").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_blank_session_is_none() {
        let config = Config::from_toml("[server]\nsession = \"  \"\n").unwrap();
        assert!(config.session_cookie.is_none());
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            (URL_ENV, "http://10.0.0.2:5000"),
            (SESSION_ENV, "abc123"),
            (CURRENCY_ENV, "$"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.server_url, "http://10.0.0.2:5000");
        assert_eq!(config.session_cookie.as_deref(), Some("abc123"));
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\ntimeout_secs = 5\n[display]\ncurrency = \"€\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        // env may set the currency on a developer machine
        if std::env::var(CURRENCY_ENV).is_err() {
            assert_eq!(config.currency_symbol, "€");
        }
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
