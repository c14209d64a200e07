//! Machine work-area configuration

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::units::LengthUnit;

/// Smallest width/height accepted for a machine, in the declared unit.
///
/// Zero or negative dimensions are clamped to this value.
pub const MIN_MACHINE_DIMENSION: f64 = 1e-3;

/// Physical work-area dimensions in the declared unit
///
/// Deserialized dimensions are clamped like [`MachineConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMachineConfig")]
pub struct MachineConfig {
    pub width: f64,
    pub height: f64,
    pub unit: LengthUnit,
}

#[derive(Deserialize)]
struct RawMachineConfig {
    width: f64,
    height: f64,
    #[serde(default)]
    unit: LengthUnit,
}

impl From<RawMachineConfig> for MachineConfig {
    fn from(raw: RawMachineConfig) -> Self {
        Self::new(raw.width, raw.height, raw.unit)
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        // A3 landscape
        Self {
            width: 420.0,
            height: 297.0,
            unit: LengthUnit::Mm,
        }
    }
}

impl MachineConfig {
    /// Create a configuration, clamping non-positive dimensions.
    pub fn new(width: f64, height: f64, unit: LengthUnit) -> Self {
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
            unit,
        }
    }

    /// Returns a copy with both dimensions clamped to valid values.
    pub fn sanitized(self) -> Self {
        Self::new(self.width, self.height, self.unit)
    }

    pub fn width_mm(&self) -> f64 {
        self.unit.to_mm(self.width)
    }

    pub fn height_mm(&self) -> f64 {
        self.unit.to_mm(self.height)
    }

    /// Width and height in millimetres.
    pub fn size_mm(&self) -> (f64, f64) {
        (self.width_mm(), self.height_mm())
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = clamp_dimension(width);
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_dimension(height);
    }

    /// Switches the declared unit, rescaling the stored dimensions so the
    /// physical size of the work area does not change.
    pub fn set_unit(&mut self, unit: LengthUnit) {
        if unit == self.unit {
            return;
        }
        let (width_mm, height_mm) = self.size_mm();
        self.width = clamp_dimension(unit.from_mm(width_mm));
        self.height = clamp_dimension(unit.from_mm(height_mm));
        debug!(
            "Machine unit {} -> {}: {:.4} x {:.4}",
            self.unit, unit, self.width, self.height
        );
        self.unit = unit;
    }
}

fn clamp_dimension(value: f64) -> f64 {
    if value.is_finite() && value > MIN_MACHINE_DIMENSION {
        value
    } else {
        MIN_MACHINE_DIMENSION
    }
}
