//! TOML settings for the composer and its CLI.
//!
//! Example configuration:
//! ```toml
//! [composer]
//! dialect = "bigquery"          # bigquery | duckdb
//! spec_dir = "${HOME}/specs"
//!
//! [logging]
//! level = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::Dialect;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "AGGSQL_CONFIG";

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
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub composer: ComposerSettings,
    pub logging: LoggingSettings,
}

/// Query composition settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ComposerSettings {
    /// Target SQL dialect.
    pub dialect: Dialect,

    /// Directory relative spec paths are resolved against
    /// (supports `${ENV_VAR}` expansion).
    pub spec_dir: Option<String>,
}

impl ComposerSettings {
    /// Resolve a spec path. Absolute paths, and all paths when no
    /// `spec_dir` is set, are returned unchanged.
    pub fn resolve_spec_path<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, SettingsError> {
        let path = path.as_ref();
        match &self.spec_dir {
            Some(dir) if path.is_relative() => {
                Ok(PathBuf::from(expand_env_vars(dir)?).join(path))
            }
            _ => Ok(path.to_path_buf()),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
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
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `AGGSQL_CONFIG`
    /// 2. `./aggsql.toml`
    /// 3. `<config_dir>/aggsql/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("aggsql.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("aggsql").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR`. A `$` not followed by a name is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let lookup =
        |name: &str| env::var(name).map_err(|_| SettingsError::MissingEnvVar(name.to_string()));

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('$') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            let end = braced.find('}').unwrap_or(braced.len());
            result.push_str(&lookup(&braced[..end])?);
            rest = braced.get(end + 1..).unwrap_or("");
        } else {
            let end = after
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if end == 0 {
                result.push('$');
            } else {
                result.push_str(&lookup(&after[..end])?);
            }
            rest = &after[end..];
        }
    }
    result.push_str(rest);

    Ok(result)
}
