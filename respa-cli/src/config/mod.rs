//! Configuration loading
//!
//! Settings come from, in increasing priority: built-in defaults, the TOML
//! config file, `RESPA_*` environment variables (a `.env` file is loaded
//! first) and command-line flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "respa-cli";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "respa.db";

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

pub const ENV_DATABASE_URL: &str = "RESPA_DATABASE_URL";
pub const ENV_SHEET_URL: &str = "RESPA_SHEET_URL";
pub const ENV_BIND: &str = "RESPA_BIND";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite URL; defaults to a file in the user data directory
    pub database_url: Option<String>,
    pub import: ImportConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Sheet URL used instead of the importer's built-in one
    pub sheet_url: Option<String>,
    /// Sheet download timeout; unset waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

impl Config {
    /// `<config dir>/respa-cli/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the config file
    ///
    /// An explicitly given path must exist. The default path is optional and
    /// a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No config file found, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML")
    }

    /// Apply `RESPA_*` environment variables
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(url) = get(ENV_DATABASE_URL).filter(|v| !v.is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(url) = get(ENV_SHEET_URL).filter(|v| !v.is_empty()) {
            self.import.sheet_url = Some(url);
        }
        if let Some(bind) = get(ENV_BIND).filter(|v| !v.is_empty()) {
            self.server.bind = Some(bind);
        }
    }

    /// Database URL to connect to, creating the data directory for the
    /// default location
    pub fn resolve_database_url(&self) -> Result<String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }

        let dir = dirs::data_dir()
            .context("Could not determine data directory; set database_url")?
            .join(APP_DIR);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;

        Ok(format!("sqlite://{}", dir.join(DATABASE_FILE).display()))
    }

    pub fn bind(&self) -> &str {
        self.server.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.import.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml(
            r#"
            database_url = "sqlite::memory:"

            [import]
            request_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.import.sheet_url, None);
        assert_eq!(config.bind(), DEFAULT_BIND);
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        assert!(Config::from_toml("[server]\nbind = 8000\n").is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::from_toml("[server]\nbind = \"0.0.0.0:80\"\n").unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BIND, "127.0.0.1:9000"),
            (ENV_SHEET_URL, "https://example.org/sheet.csv"),
            (ENV_DATABASE_URL, ""),
        ]);

        config.apply_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.bind(), "127.0.0.1:9000");
        assert_eq!(
            config.import.sheet_url.as_deref(),
            Some("https://example.org/sheet.csv")
        );
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url = \"sqlite:///tmp/respa.db\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.resolve_database_url().unwrap(), "sqlite:///tmp/respa.db");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        assert!(Config::load(Some(Path::new("/nonexistent/respa.toml"))).is_err());
    }
}
