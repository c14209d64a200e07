//! Configuration for PenPlot
//!
//! Supports JSON and TOML files, chosen by extension. Every section falls back
//! to its defaults when missing, so partial files load cleanly.
//!
//! Configuration is organized into sections:
//! - Machine work area
//! - Sampling (step, nominal speed)
//! - Placement (grid and snapping)
//! - Playback (tick period)
//! - Keyboard nudge steps

use std::fs;
use std::path::Path;
use std::time::Duration;

use penplot_core::MachineConfig;
use penplot_designer::{NudgeSettings, SamplerConfig, SnapSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// Grid and snapping preferences for the placement view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    pub show_grid: bool,
    pub grid_step_mm: f64,
    pub snap_to_grid: bool,
    pub snap_step_mm: f64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_step_mm: 10.0,
            snap_to_grid: false,
            snap_step_mm: 1.0,
        }
    }
}

/// Playback timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub tick_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { tick_ms: 30 }
    }
}

impl PlaybackSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub machine: MachineConfig,
    pub sampling: SamplerConfig,
    pub placement: PlacementSettings,
    pub playback: PlaybackSettings,
    pub nudge: NudgeSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses config text in the given format and validates it.
    ///
    /// Machine dimensions are clamped while deserializing, never rejected.
    pub fn from_str_as(content: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates and serializes the config in the given format.
    pub fn to_string_as(&self, format: ConfigFormat) -> SettingsResult<String> {
        self.validate()?;
        Ok(match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        let config = Self::from_str_as(&content, format)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = self.to_string_as(ConfigFormat::from_path(path)?)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.sampling.step) {
            return Err(SettingsError::invalid("sampling.step", "must be > 0"));
        }
        if !positive(self.sampling.nominal_speed) {
            return Err(SettingsError::invalid(
                "sampling.nominal_speed",
                "must be > 0",
            ));
        }

        if !positive(self.placement.grid_step_mm) {
            return Err(SettingsError::invalid(
                "placement.grid_step_mm",
                "must be > 0",
            ));
        }
        if !self.placement.snap_step_mm.is_finite() || self.placement.snap_step_mm < 0.0 {
            return Err(SettingsError::invalid(
                "placement.snap_step_mm",
                "must be >= 0",
            ));
        }

        if self.playback.tick_ms == 0 {
            return Err(SettingsError::invalid("playback.tick_ms", "must be > 0"));
        }

        let n = &self.nudge;
        let steps = [
            ("nudge.move_mm", n.move_mm),
            ("nudge.move_coarse_mm", n.move_coarse_mm),
            ("nudge.move_fine_mm", n.move_fine_mm),
            ("nudge.rotate_deg", n.rotate_deg),
            ("nudge.rotate_coarse_deg", n.rotate_coarse_deg),
            ("nudge.scale_step", n.scale_step),
            ("nudge.scale_coarse_step", n.scale_coarse_step),
        ];
        if let Some((key, _)) = steps.iter().find(|(_, v)| !positive(*v)) {
            return Err(SettingsError::invalid(key, "must be > 0"));
        }

        Ok(())
    }

    /// Sampling parameters for the SVG sampler.
    pub fn sampler_config(&self) -> SamplerConfig {
        self.sampling.sanitized()
    }

    /// Snap settings for placement edits.
    pub fn snap_step(&self) -> SnapSettings {
        SnapSettings::new(self.placement.snap_to_grid, self.placement.snap_step_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use penplot_core::{LengthUnit, MIN_MACHINE_DIMENSION};

    #[test]
    fn test_defaults_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.machine.width, 420.0);
        assert_eq!(config.playback.tick(), Duration::from_millis(30));
        assert_eq!(config.sampler_config().step, 5.0);
        assert!(!config.snap_step().enabled);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
[machine]
width = 11.0
height = 8.5
unit = "in"

[placement]
snap_to_grid = true
"#;
        let config = Config::from_str_as(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.machine.unit, LengthUnit::In);
        assert!(config.snap_step().enabled);
        assert_eq!(config.snap_step().step_mm, 1.0);
        assert_eq!(config.sampling, SamplerConfig::default());
    }

    #[test]
    fn test_zero_machine_size_is_clamped() {
        let text = r#"
[machine]
width = 0.0
height = -10.0
"#;
        let config = Config::from_str_as(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.machine.width, MIN_MACHINE_DIMENSION);
        assert_eq!(config.machine.height, MIN_MACHINE_DIMENSION);

        let mut config = Config::new();
        config.machine.width = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::new();
        config.sampling.step = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "sampling.step"
        ));

        let mut config = Config::new();
        config.nudge.rotate_deg = -1.0;
        assert!(config.to_string_as(ConfigFormat::Json).is_err());

        let mut config = Config::new();
        config.playback.tick_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/config.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("config.yaml")),
            Err(SettingsError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
    }
}
