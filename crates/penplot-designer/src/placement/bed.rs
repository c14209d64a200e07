//! Bed metrics: where the machine work area sits on the stage
//!
//! `px_per_mm` computed here is the single conversion point between stage
//! pixels and machine millimetres.

use penplot_core::MachineConfig;
use serde::{Deserialize, Serialize};

/// Fraction of the stage the bed may occupy along each axis.
pub const BED_FILL: f64 = 0.7;

const GUARD: f64 = 1e-6;

/// Stage size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(300.0, 300.0)
    }
}

/// Derived bed rectangle on the stage. Never stored; recompute on change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedMetrics {
    pub bed_w: f64,
    pub bed_h: f64,
    pub bed_x: f64,
    pub bed_y: f64,
    pub bed_cx: f64,
    pub bed_cy: f64,
    pub px_per_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl BedMetrics {
    /// Fits the machine aspect ratio into 70% of the viewport, width first,
    /// then limited by height, and centres it.
    pub fn compute(viewport: ViewportSize, machine: &MachineConfig) -> Self {
        let (width_mm, height_mm) = machine.size_mm();
        let ratio = width_mm / height_mm.max(GUARD);
        let max_w = viewport.width * BED_FILL;
        let max_h = viewport.height * BED_FILL;

        let mut bed_w = max_w;
        let mut bed_h = bed_w / ratio.max(GUARD);
        if bed_h > max_h {
            bed_h = max_h;
            bed_w = bed_h * ratio;
        }

        let bed_x = (viewport.width - bed_w) / 2.0;
        let bed_y = (viewport.height - bed_h) / 2.0;

        Self {
            bed_w,
            bed_h,
            bed_x,
            bed_y,
            bed_cx: bed_x + bed_w / 2.0,
            bed_cy: bed_y + bed_h / 2.0,
            px_per_mm: bed_w / width_mm.max(GUARD),
            width_mm,
            height_mm,
        }
    }

    /// Stage pixels to millimetres.
    pub fn px_to_mm(&self, px: f64) -> f64 {
        px / self.px_per_mm
    }

    /// Millimetres to stage pixels.
    pub fn mm_to_px(&self, mm: f64) -> f64 {
        mm * self.px_per_mm
    }
}

/// Scale that fits the artwork inside the bed, before any user scaling.
pub fn base_scale(art_w: f64, art_h: f64, bed_w: f64, bed_h: f64) -> f64 {
    (bed_w / art_w.max(1.0)).min(bed_h / art_h.max(1.0))
}
