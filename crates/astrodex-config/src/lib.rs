//! Configuration for the astrodex viewer.
//!
//! Layered with figment: built-in defaults, then `config.toml` (platform
//! config dir or an explicit path), then `ASTRODEX_*` environment variables
//! with `__` separating nested keys (`ASTRODEX_SOURCE__BASE`).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use astrodex_api::{DEFAULT_DATA_PATH, DataSource};
use astrodex_core::{CardMode, FilterSpec, default_filters};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    /// Initial mode for result cards: `icon`, `compact` or `detailed`.
    #[serde(default = "default_card_mode")]
    pub card_mode: String,

    /// Recipe tables on the crafting screen, top to bottom.
    #[serde(default = "default_filters")]
    pub panels: Vec<FilterSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            card_mode: default_card_mode(),
            panels: default_filters(),
        }
    }
}

/// Where the data document and icons are served from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// `http(s)://` URL or local directory.
    #[serde(default = "default_base")]
    pub base: String,

    #[serde(default = "default_data_path")]
    pub data_path: String,

    #[serde(default = "default_image_path")]
    pub image_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            data_path: default_data_path(),
            image_path: default_image_path(),
        }
    }
}

fn default_base() -> String {
    "http://localhost:8000/".into()
}
fn default_data_path() -> String {
    DEFAULT_DATA_PATH.into()
}
fn default_image_path() -> String {
    "images/".into()
}
fn default_card_mode() -> String {
    CardMode::default().to_string()
}

impl Config {
    /// Resolve the data document location.
    pub fn data_source(&self) -> Result<DataSource, ConfigError> {
        DataSource::resolve(&self.source.base, &self.source.data_path).map_err(|e| {
            ConfigError::Validation {
                field: "source.base".into(),
                reason: e.to_string(),
            }
        })
    }

    /// Where the icon `filename` is served from.
    pub fn icon_location(&self, filename: &str) -> Result<String, ConfigError> {
        let dir = self.source.image_path.trim_end_matches('/');
        let relative = if dir.is_empty() {
            filename.to_owned()
        } else {
            format!("{dir}/{filename}")
        };
        DataSource::resolve(&self.source.base, &relative)
            .map(|source| source.to_string())
            .map_err(|e| ConfigError::Validation {
                field: "source.image_path".into(),
                reason: e.to_string(),
            })
    }

    /// The configured result-card mode.
    pub fn card_mode(&self) -> Result<CardMode, ConfigError> {
        CardMode::parse(&self.card_mode).map_err(|e| ConfigError::Validation {
            field: "card_mode".into(),
            reason: e.to_string(),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "astrodex", "astrodex").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("astrodex");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ASTRODEX_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}
