//! Loading raw query specs from JSON documents.
//!
//! The loader only reads and parses: it checks that the document is a JSON
//! object and hands back the untyped mapping. Field-level validation lives
//! in [`super::schema`].

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Untyped top-level mapping of a query spec document.
pub type RawSpec = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Can not open file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a valid JSON format: {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Query spec must be a JSON object: {path}")]
    NotAnObject { path: PathBuf },
}

/// Read and parse the spec document at `path`.
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<RawSpec, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_spec(&content, path)
}

/// Parse spec text. `origin` only labels errors.
pub fn parse_spec<P: AsRef<Path>>(content: &str, origin: P) -> Result<RawSpec, LoadError> {
    let origin = origin.as_ref();
    let value: Value = serde_json::from_str(content).map_err(|source| LoadError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAnObject {
            path: origin.to_path_buf(),
        }),
    }
}
