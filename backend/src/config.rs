//! Server configuration.
//!
//! Defaults, then an optional YAML file, then environment overrides. The file
//! is read from `GIG_CALENDAR_CONFIG` when set, else `<data dir>/config.yaml`.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_VAR: &str = "GIG_CALENDAR_CONFIG";
pub const DATA_DIR_VAR: &str = "GIG_CALENDAR_DATA_DIR";
pub const BIND_VAR: &str = "GIG_CALENDAR_BIND";
pub const CORS_ORIGIN_VAR: &str = "GIG_CALENDAR_CORS_ORIGIN";

const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the document and account files
    pub data_directory: PathBuf,
    pub bind_address: String,
    /// The one origin allowed by CORS
    pub cors_origin: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gig-calendar")
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Load configuration reading variables through `lookup`
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = match lookup(CONFIG_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => lookup(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_data_directory)
                .join(CONFIG_FILE_NAME),
        };

        let mut config = if config_path.exists() {
            info!("Loading configuration from {:?}", config_path);
            Self::from_file(&config_path)?
        } else {
            debug!("No configuration file at {:?}, using defaults", config_path);
            Self::default()
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        Self::from_yaml(&yaml).with_context(|| format!("Invalid configuration file {:?}", path))
    }

    /// Parse YAML; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_VAR) {
            self.data_directory = PathBuf::from(dir);
        }
        if let Some(bind) = lookup(BIND_VAR) {
            self.bind_address = bind;
        }
        if let Some(origin) = lookup(CORS_ORIGIN_VAR) {
            self.cors_origin = origin;
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind address {:?}", self.bind_address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from<'a>(vars: &'a HashMap<&'a str, String>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.cors_origin, "http://localhost:8080");
        assert_eq!(config.log_filter, "info");
        assert!(config.data_directory.ends_with("gig-calendar"));
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml("bind_address: 0.0.0.0:8000\nlog_filter: debug\n").unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.cors_origin, "http://localhost:8080");

        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
        assert!(AppConfig::from_yaml("bind_address: [1, 2]").is_err());
    }

    #[test]
    fn test_file_in_data_directory_then_env_overrides() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.yaml"),
            "cors_origin: https://gigs.example.com\nbind_address: 127.0.0.1:4000\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert(DATA_DIR_VAR, temp.path().to_string_lossy().to_string());
        vars.insert(BIND_VAR, "127.0.0.1:5000".to_string());

        let config = AppConfig::load_with(lookup_from(&vars)).unwrap();
        assert_eq!(config.data_directory, temp.path());
        assert_eq!(config.cors_origin, "https://gigs.example.com");
        assert_eq!(config.bind_address, "127.0.0.1:5000");
    }

    #[test]
    fn test_explicit_config_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        fs::write(&path, "log_filter: warn\n").unwrap();

        let mut vars = HashMap::new();
        vars.insert(CONFIG_PATH_VAR, path.to_string_lossy().to_string());
        vars.insert(CORS_ORIGIN_VAR, "http://localhost:4200".to_string());

        let config = AppConfig::load_with(lookup_from(&vars)).unwrap();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.cors_origin, "http://localhost:4200");
    }

    #[test]
    fn test_invalid_bind_address() {
        let config = AppConfig {
            bind_address: "not an address".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
