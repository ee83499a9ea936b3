//! Environment configuration
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `MAIN_DB_URI` | store for normal operation | `file://./bookshelf.json` |
//! | `TEST_DB_URI` | store used when `APP_ENV=test` | `memory://test` |
//! | `APP_ENV` | `test` selects the test store | `production` |
//! | `HOST` | bind host | `0.0.0.0` |
//! | `PORT` | bind port | `3000` |
//! | `RUST_LOG` | log filter | `info` |
//!
//! Values may also come from a `.env` file. Variables set in the process
//! environment win over the file.

use std::collections::HashMap;
use std::path::Path;

use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

fn default_main_db_uri() -> String {
    "file://./bookshelf.json".to_string()
}

fn default_test_db_uri() -> String {
    "memory://test".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Which database the process talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Primary database; failing to connect is fatal
    #[default]
    Production,
    /// Separate test database
    Test,
}

impl RunMode {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("test") => RunMode::Test,
            _ => RunMode::Production,
        }
    }
}

/// Full process configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: HttpServerConfig,
    pub mode: RunMode,
    pub main_db_uri: String,
    pub test_db_uri: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            mode: RunMode::default(),
            main_db_uri: default_main_db_uri(),
            test_db_uri: default_test_db_uri(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment and the nearest `.env` file, if any
    pub fn from_env() -> CliResult<Self> {
        let file = dotenv_entries(dotenvy::dotenv_iter())?;
        Self::from_lookup(layered(|key| std::env::var(key).ok(), file))
    }

    /// Load from `process`, falling back to the entries of the `.env` file at `path`
    pub fn from_env_file(
        path: impl AsRef<Path>,
        process: impl Fn(&str) -> Option<String>,
    ) -> CliResult<Self> {
        let file = dotenv_entries(dotenvy::from_path_iter(path.as_ref()))?;
        Self::from_lookup(layered(process, file))
    }

    /// Load from any key lookup; unset and empty values take defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CliResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| CliError::config_error(format!("invalid PORT {:?}: {}", raw, e)))?,
            None => defaults.server.port,
        };

        Ok(Self {
            server: HttpServerConfig::new(get("HOST").unwrap_or(defaults.server.host), port),
            mode: RunMode::from_env_value(get("APP_ENV").as_deref()),
            main_db_uri: get("MAIN_DB_URI").unwrap_or(defaults.main_db_uri),
            test_db_uri: get("TEST_DB_URI").unwrap_or(defaults.test_db_uri),
            log_filter: get("RUST_LOG").unwrap_or(defaults.log_filter),
        })
    }

    /// Connection string for the current mode
    pub fn store_uri(&self) -> &str {
        match self.mode {
            RunMode::Production => &self.main_db_uri,
            RunMode::Test => &self.test_db_uri,
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}

/// Entries of a `.env` file; a missing file has none
fn dotenv_entries<R: std::io::Read>(
    iter: dotenvy::Result<dotenvy::Iter<R>>,
) -> CliResult<HashMap<String, String>> {
    match iter {
        Ok(iter) => iter
            .collect::<dotenvy::Result<HashMap<_, _>>>()
            .map_err(|e| CliError::config_error(format!("invalid .env file: {}", e))),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(CliError::config_error(format!("cannot read .env file: {}", e))),
    }
}

fn layered(
    process: impl Fn(&str) -> Option<String>,
    file: HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> {
    move |key| process(key).or_else(|| file.get(key).cloned())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> CliResult<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.mode, RunMode::Production);
        assert_eq!(config.store_uri(), "file://./bookshelf.json");
    }

    #[test]
    fn test_test_mode_selects_test_store() {
        let config = load(&[
            ("APP_ENV", "test"),
            ("MAIN_DB_URI", "file:///var/lib/bookshelf/main.json"),
            ("TEST_DB_URI", "memory://suite"),
        ])
        .unwrap();
        assert_eq!(config.mode, RunMode::Test);
        assert_eq!(config.store_uri(), "memory://suite");
    }

    #[test]
    fn test_other_modes_use_main_store() {
        let config = load(&[("APP_ENV", "staging"), ("MAIN_DB_URI", "memory://main")]).unwrap();
        assert_eq!(config.store_uri(), "memory://main");
    }

    #[test]
    fn test_port_parsing() {
        assert_eq!(load(&[("PORT", "8080")]).unwrap().server.port, 8080);
        assert_eq!(load(&[("PORT", "")]).unwrap().server.port, 3000);

        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.code(), &crate::cli::CliErrorCode::ConfigError);
    }

    #[test]
    fn test_dotenv_file_fills_unset_variables() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        std::fs::write(
            &path,
            "APP_ENV=test\nTEST_DB_URI=memory://from-file\nPORT=4000\nHOST=127.0.0.1\n",
        )
        .unwrap();

        let process: HashMap<&str, &str> = [("PORT", "5000")].into_iter().collect();
        let config =
            AppConfig::from_env_file(&path, |key| process.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.store_uri(), "memory://from-file");
    }

    #[test]
    fn test_missing_dotenv_file_uses_process_only() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::from_env_file(tmp.path().join(".env"), |key| {
            (key == "MAIN_DB_URI").then(|| "memory://main".to_string())
        })
        .unwrap();
        assert_eq!(config.store_uri(), "memory://main");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_malformed_dotenv_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        std::fs::write(&path, "PORT 4000\n").unwrap();

        let err = AppConfig::from_env_file(&path, |_| None).unwrap_err();
        assert_eq!(err.code(), &crate::cli::CliErrorCode::ConfigError);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[("PORT", "8080")])
            .unwrap()
            .with_overrides(Some("127.0.0.1".to_string()), Some(9000));
        assert_eq!(config.server.socket_addr(), "127.0.0.1:9000");
    }
}
