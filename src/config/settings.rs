//! TOML-based configuration for mantis-gis.
//!
//! Supports a config file (mantis-gis.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [connections.legacy]
//! driver = "mysql"
//! server_version = "5.5.62"
//!
//! [connections.production]
//! driver = "mysql"
//! server_version = "${MYSQL_SERVER_VERSION}"
//!
//! [gis]
//! default_srid = 4326
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::connection::SpatialConnection;
use crate::error::GisError;
use crate::field::DEFAULT_SRID;
use crate::sql::dialect::SpatialBackend;
use crate::version::ServerVersion;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Unsupported driver: {0}. Supported: mysql, mariadb")]
    UnsupportedDriver(String),

    #[error("Invalid connection settings: {0}")]
    Gis(#[from] GisError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named database connections.
    pub connections: HashMap<String, ConnectionSettings>,

    /// GIS defaults.
    pub gis: GisSettings,
}

/// Connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Database driver (mysql, mariadb).
    pub driver: String,

    /// Server version string (supports ${ENV_VAR} expansion).
    pub server_version: String,
}

impl ConnectionSettings {
    /// Get the spatial backend for the driver.
    pub fn backend(&self) -> Result<SpatialBackend, SettingsError> {
        SpatialBackend::from_str(&self.driver)
            .ok_or_else(|| SettingsError::UnsupportedDriver(self.driver.clone()))
    }

    /// Get the server version with environment variables expanded.
    pub fn resolved_server_version(&self) -> Result<ServerVersion, SettingsError> {
        let raw = expand_env_vars(&self.server_version)?;
        Ok(ServerVersion::parse(&raw)?)
    }

    /// Build the spatial capabilities for this connection.
    pub fn open(&self) -> Result<SpatialConnection, SettingsError> {
        Ok(SpatialConnection::with_version(
            self.resolved_server_version()?,
            self.backend()?,
        ))
    }
}

/// GIS defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GisSettings {
    /// SRID for geometry fields that do not declare one.
    pub default_srid: u32,
}

impl Default for GisSettings {
    fn default() -> Self {
        Self {
            default_srid: DEFAULT_SRID,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            connections = settings.connections.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `MANTIS_GIS_CONFIG`
    /// 2. `./mantis-gis.toml`
    /// 3. `~/.config/mantis-gis/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("MANTIS_GIS_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("mantis-gis.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("mantis-gis").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Build the spatial capabilities for a connection with the GIS defaults applied.
    pub fn open(&self, connection: &ConnectionSettings) -> Result<SpatialConnection, SettingsError> {
        Ok(connection.open()?.with_default_srid(self.gis.default_srid))
    }

    /// Build the spatial capabilities for a named connection.
    pub fn open_connection(&self, name: &str) -> Result<SpatialConnection, SettingsError> {
        self.open(self.get_connection(name)?)
    }

    /// Get a connection by name.
    pub fn get_connection(&self, name: &str) -> Result<&ConnectionSettings, SettingsError> {
        self.connections
            .get(name)
            .ok_or_else(|| SettingsError::ConnectionNotFound(name.to_string()))
    }

    /// Get the default connection ("default" if it exists, otherwise the first by name).
    pub fn default_connection(&self) -> Option<(&str, &ConnectionSettings)> {
        if let Some(conn) = self.connections.get("default") {
            return Some(("default", conn));
        }
        self.connections
            .iter()
            .min_by_key(|(k, _)| k.as_str())
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                name.push(ch);
                chars.next();
            }
            if name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
