//! Configuration management.
//!
//! Settings load from a TOML file (`--config` path, else
//! `starfield.toml` in the working directory) and fall back to built-in
//! defaults. Every field is optional in the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stars::StarsConfig;

/// Config file looked for when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "starfield.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub stars: StarsConfig,
}

/// Branding for the rendered pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub title: String,
    #[serde(default = "default_site_tagline")]
    pub tagline: String,
}

fn default_site_title() -> String {
    "Starfield".to_string()
}

fn default_site_tagline() -> String {
    "Notes from under the night sky".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            tagline: default_site_tagline(),
        }
    }
}

/// Web server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Load settings from an explicit path, else the default file, else
/// built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let candidate = match path {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            fallback.exists().then_some(fallback)
        }
    };

    let settings: Settings = match candidate {
        Some(p) => {
            tracing::info!("Loading settings from {}", p.display());
            toml::from_str(&fs::read_to_string(&p)?)?
        }
        None => Settings::default(),
    };

    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.stars.container_id.is_empty() {
        return Err(ConfigError::Invalid(
            "stars.container_id must not be empty".to_string(),
        ));
    }

    for (name, span) in [
        ("stars.size", settings.stars.size),
        ("stars.opacity", settings.stars.opacity),
        ("stars.duration", settings.stars.duration),
    ] {
        if !(span.min < span.max) {
            return Err(ConfigError::Invalid(format!(
                "{} range is empty: min {} must be below max {}",
                name, span.min, span.max
            )));
        }
    }

    Ok(())
}
