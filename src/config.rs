use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_DIR: &str = "block-keeper";
const CONFIG_FILE: &str = "config.toml";
const HOME_CONFIG_FILE: &str = ".block-keeper.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) command: Option<String>,
    #[serde(default)]
    pub(crate) args: Option<Vec<String>>,
}

/// Result of the config lookup.
///
/// Diagnostics are collected rather than logged because the log filter
/// itself depends on the loaded config.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) warnings: Vec<ConfigError>,
}

impl LoadedConfig {
    pub(crate) fn report(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
        match &self.path {
            Some(path) => tracing::debug!("Loaded config from {}", path.display()),
            None => tracing::debug!("No config file found, using defaults"),
        }
    }
}

impl Config {
    pub(crate) fn load() -> LoadedConfig {
        Self::load_from(&Self::get_config_paths())
    }

    /// First file that exists and parses wins
    fn load_from(paths: &[PathBuf]) -> LoadedConfig {
        let mut loaded = LoadedConfig::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::read(path) {
                Ok(config) => {
                    loaded.config = config;
                    loaded.path = Some(path.clone());
                    return loaded;
                }
                Err(e) => loaded.warnings.push(e),
            }
        }

        loaded
    }

    fn read(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/block-keeper/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join(APP_DIR).join(CONFIG_FILE));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/block-keeper/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join(APP_DIR).join(CONFIG_FILE);
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.block-keeper.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(HOME_CONFIG_FILE));
        }

        paths
    }
}
