//! Grid snapping

use serde::{Deserialize, Serialize};

/// Rounds `value` to the nearest multiple of `step`. Non-positive steps disable snapping.
pub fn snap_value(value: f64, step: f64) -> f64 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

/// Snapping state for placement edits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapSettings {
    pub enabled: bool,
    pub step_mm: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            step_mm: 1.0,
        }
    }
}

impl SnapSettings {
    pub fn new(enabled: bool, step_mm: f64) -> Self {
        Self { enabled, step_mm }
    }

    /// Snaps `value` when enabled, otherwise returns it unchanged.
    pub fn apply(&self, value: f64) -> f64 {
        if self.enabled {
            snap_value(value, self.step_mm)
        } else {
            value
        }
    }
}
