//! Settings Persistence
//!
//! Locates the config file and keeps the loaded [`Config`] paired with the
//! path it came from.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};

pub const APP_DIR: &str = "penplot";
pub const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/penplot/config.toml`
pub fn default_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no platform config directory".to_string())
    })?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    path: PathBuf,
    config: Config,
}

impl SettingsPersistence {
    /// Loads the config at `path`. A missing file yields defaults; any other
    /// failure is returned.
    pub fn open(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = if path.exists() {
            Config::load_from_file(&path)?
        } else {
            debug!("No config at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self { path, config })
    }

    /// Opens the default location.
    pub fn open_default() -> SettingsResult<Self> {
        Self::open(default_path()?)
    }

    /// Like [`open`](Self::open), but falls back to defaults when the file is
    /// unreadable or invalid.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                warn!("Ignoring config at {}: {}", path.display(), e);
                Self {
                    path,
                    config: Config::default(),
                }
            }
        }
    }

    pub fn save(&self) -> SettingsResult<()> {
        self.config.save_to_file(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Replaces the config after validating it.
    pub fn replace(&mut self, config: Config) -> SettingsResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
