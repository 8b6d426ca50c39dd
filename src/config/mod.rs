//! Configuration module for mantis-gis.
//!
//! Handles named connection settings, environment variables, and GIS defaults.

mod settings;

pub use settings::{expand_env_vars, ConnectionSettings, GisSettings, Settings, SettingsError};
