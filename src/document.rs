//! Structured document reading.
//! Recipes, answers and configuration files are JSON, with YAML accepted as a fallback.

use crate::error::{Error, Result};
use log::debug;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads a file to a string, classifying missing and unreadable paths.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    debug!("Reading '{}'", path.display());
    std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))
}

/// Parses document content, trying JSON first and YAML second.
///
/// # Arguments
/// * `content` - Raw document text
/// * `origin` - Where the content came from, used in error messages
///
/// # Errors
/// * `Error::MalformedInput` if neither format accepts the content
pub fn parse_document<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
            debug!("'{origin}' is not valid JSON ({json_err}) nor YAML ({yaml_err})");
            Error::MalformedInput { path: origin.to_string(), reason: json_err.to_string() }
        }),
    }
}

/// Reads and parses a structured document from disk.
pub fn load_document<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let content = read_text(path)?;
    parse_document(&content, &path.display().to_string())
}
