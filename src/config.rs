//! Configuration handling for crispin cookbooks.
//! An optional `crispin.json`, `crispin.yml` or `crispin.yaml` in the cookbook
//! root sets server and menu defaults.

use crate::constants::{
    CONFIG_FILES, DEFAULT_MENU_TIMEOUT_MS, DEFAULT_MENU_TITLE, DEFAULT_PORT, DEFAULT_PREFIX,
    DEFAULT_SCHEME,
};
use crate::document::load_document;
use crate::error::Result;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Where rendered kickstarts are served from.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub scheme: String,
    pub hostname: String,
    pub port: u16,
    /// First path segment of the retrieval URL.
    pub prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            hostname: "localhost".to_string(),
            port: DEFAULT_PORT,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl ServerConfig {
    /// `<scheme>://<host>:<port>`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.hostname, self.port)
    }

    /// URL a booting target fetches its kickstart from.
    pub fn callback_url(&self, entry: &str) -> String {
        format!("{}/{}/get/{}", self.base_url(), self.prefix, entry)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MenuSettings {
    pub title: String,
    pub timeout_ms: u64,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self { title: DEFAULT_MENU_TITLE.to_string(), timeout_ms: DEFAULT_MENU_TIMEOUT_MS }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KickstartSettings {
    /// Annotate `%pre`/`%post` sections with a log destination.
    pub logging: bool,
}

/// Cookbook configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub menu: MenuSettings,
    pub kickstart: KickstartSettings,
}

/// Loads the first configuration file found in `cookbook_dir`.
///
/// # Arguments
/// * `cookbook_dir` - Cookbook root directory
/// * `config_files` - File names to try, in order
///
/// # Returns
/// * `Result<Config>` - Parsed configuration, or defaults if no file exists
///
/// # Errors
/// * `Error::MalformedInput` if the file found cannot be parsed
pub fn load_config<P: AsRef<Path>>(cookbook_dir: P, config_files: &[&str]) -> Result<Config> {
    for file in config_files {
        let config_path = cookbook_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return load_document(&config_path);
        }
    }

    debug!("No configuration file found (tried: {}), using defaults", config_files.join(", "));
    Ok(Config::default())
}

/// Loads the cookbook configuration from the standard file names.
pub fn get_config<P: AsRef<Path>>(cookbook_dir: P) -> Result<Config> {
    load_config(cookbook_dir, &CONFIG_FILES)
}
