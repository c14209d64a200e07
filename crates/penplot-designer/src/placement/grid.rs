//! Bed grid line positions

use serde::Serialize;

use super::bed::BedMetrics;

/// Minimum spacing between minor grid lines in pixels.
pub const MIN_MINOR_PX: f64 = 4.0;
/// Minor steps per major line.
pub const MAJOR_EVERY: f64 = 5.0;
/// Smallest grid step honoured, in millimetres.
pub const MIN_GRID_STEP_MM: f64 = 0.1;

/// Stage-pixel positions of the grid lines over the bed
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GridLines {
    pub minor_px: f64,
    pub major_px: f64,
    /// x positions of vertical minor lines
    pub minor_v: Vec<f64>,
    /// y positions of horizontal minor lines
    pub minor_h: Vec<f64>,
    pub major_v: Vec<f64>,
    pub major_h: Vec<f64>,
}

impl GridLines {
    pub fn compute(bed: &BedMetrics, grid_step_mm: f64) -> Self {
        let minor_px = (bed.px_per_mm * grid_step_mm.max(MIN_GRID_STEP_MM)).max(MIN_MINOR_PX);
        let major_px = minor_px * MAJOR_EVERY;

        Self {
            minor_px,
            major_px,
            minor_v: positions(bed.bed_x, bed.bed_w, minor_px),
            minor_h: positions(bed.bed_y, bed.bed_h, minor_px),
            major_v: positions(bed.bed_x, bed.bed_w, major_px),
            major_h: positions(bed.bed_y, bed.bed_h, major_px),
        }
    }
}

/// `start + i * step` for every position not past `start + extent`.
fn positions(start: f64, extent: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) || !extent.is_finite() || extent < 0.0 {
        return Vec::new();
    }
    let count = (extent / step).floor() as usize;
    (0..=count).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::bed::ViewportSize;
    use penplot_core::{LengthUnit, MachineConfig};

    #[test]
    fn test_grid_spacing() {
        let machine = MachineConfig::new(100.0, 50.0, LengthUnit::Mm);
        let bed = BedMetrics::compute(ViewportSize::new(1000.0, 1000.0), &machine);
        // 7 px/mm, 10 mm step
        let grid = GridLines::compute(&bed, 10.0);
        assert!((grid.minor_px - 70.0).abs() < 1e-9);
        assert!((grid.major_px - 350.0).abs() < 1e-9);
        assert_eq!(grid.minor_v.len(), 11);
        assert_eq!(grid.major_v.len(), 3);
        assert_eq!(grid.minor_v[0], bed.bed_x);
    }

    #[test]
    fn test_minimum_spacing() {
        let machine = MachineConfig::new(1000.0, 1000.0, LengthUnit::Mm);
        let bed = BedMetrics::compute(ViewportSize::new(100.0, 100.0), &machine);
        let grid = GridLines::compute(&bed, 0.0);
        assert_eq!(grid.minor_px, MIN_MINOR_PX);
    }
}
