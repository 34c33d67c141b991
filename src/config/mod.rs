//! Configuration module for aggsql.
//!
//! Handles the settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, ComposerSettings, LoggingSettings, Settings, SettingsError, CONFIG_ENV,
};
