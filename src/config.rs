//! Optional TOML configuration for the report's presentation

use crate::error::Result;
use dirs::config_dir;
use serde::Deserialize;
use std::{env, fs, io, path::Path, path::PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "KERNELVIEW_CONFIG";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub colors: ColorConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    pub separator: String,
    pub clear_screen: bool,
    /// One row per detected GPU instead of the primary one only
    pub show_all_gpus: bool,
    /// Row labels left out of the report
    pub hidden: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "KernelView".to_string(),
            separator: ": ".to_string(),
            clear_screen: true,
            show_all_gpus: false,
            hidden: Vec::new(),
        }
    }
}

impl DisplayConfig {
    pub fn is_hidden(&self, label: &str) -> bool {
        self.hidden.iter().any(|hidden| hidden.eq_ignore_ascii_case(label))
    }
}

/// Colors accept names, 256-palette indices or `#rrggbb`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub title: String,
    pub category: String,
    pub key: String,
    pub value: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            title: "blue".to_string(),
            category: "blue".to_string(),
            key: "255".to_string(),
            value: "249".to_string(),
        }
    }
}

impl Config {
    /// Load from `$KERNELVIEW_CONFIG` or the user config directory.
    /// No file at all means the built-in defaults.
    pub fn load() -> Result<Config> {
        match config_path() {
            Some(path) => Config::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        match fs::read_to_string(path) {
            Ok(data) => {
                log::debug!("loading config from {}", path.display());
                Config::from_toml_str(&data)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Config> {
        Ok(toml::de::from_str(data)?)
    }
}

/// Where the config is looked up
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var(CONFIG_ENV).ok().filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(shellexpand::tilde(explicit.trim()).to_string()));
    }
    config_dir().map(|dir| dir.join("kernelview").join("config.toml"))
}
