//! Stage pan/zoom and pointer conversion.
//!
//! Handles conversion between stage pixel coordinates (pointer space) and
//! scene coordinates (where the bed is laid out), and from scene pixels to
//! millimetres relative to the bed centre.

use std::fmt;

use penplot_core::Point2;
use serde::{Deserialize, Serialize};

use super::bed::BedMetrics;

/// Smallest stage zoom.
pub const MIN_VIEW_SCALE: f64 = 0.2;
/// Largest stage zoom.
pub const MAX_VIEW_SCALE: f64 = 8.0;
/// Zoom factor applied per wheel notch.
pub const WHEEL_ZOOM_IN: f64 = 1.06;
pub const WHEEL_ZOOM_OUT: f64 = 0.94;

/// Pan offset and zoom of the stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasView {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl CanvasView {
    /// Stage pixels to scene pixels.
    ///
    /// ```text
    /// scene = (stage - pan) / scale
    /// ```
    pub fn stage_to_scene(&self, stage: Point2) -> Point2 {
        let scale = self.scale.max(1e-6);
        Point2::new((stage.x - self.x) / scale, (stage.y - self.y) / scale)
    }

    /// Scene pixels to stage pixels.
    pub fn scene_to_stage(&self, scene: Point2) -> Point2 {
        Point2::new(scene.x * self.scale + self.x, scene.y * self.scale + self.y)
    }

    /// Pans by a delta amount.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Zooms one wheel notch about the pointer, keeping the scene point
    /// under the pointer fixed. Positive `delta_y` zooms out.
    pub fn zoom_at(&mut self, pointer: Point2, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom_to(pointer, self.scale * factor);
    }

    /// Sets the zoom, clamped, keeping the scene point under `pointer` fixed.
    pub fn zoom_to(&mut self, pointer: Point2, scale: f64) {
        let anchor = self.stage_to_scene(pointer);
        self.scale = scale.clamp(MIN_VIEW_SCALE, MAX_VIEW_SCALE);
        self.x = pointer.x - anchor.x * self.scale;
        self.y = pointer.y - anchor.y * self.scale;
    }

    /// Resets to the fitted, centred camera.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for CanvasView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "View(pan: ({:.2}, {:.2}), zoom: {:.2}x)",
            self.x, self.y, self.scale
        )
    }
}

/// Converts a stage pointer position into millimetres from the bed centre.
///
/// Returns `None` when the pointer is outside the bed.
pub fn pointer_to_bed_mm(pointer: Point2, view: &CanvasView, bed: &BedMetrics) -> Option<Point2> {
    let scene = view.stage_to_scene(pointer);
    let x_mm = bed.px_to_mm(scene.x - bed.bed_cx);
    let y_mm = bed.px_to_mm(scene.y - bed.bed_cy);
    if !x_mm.is_finite()
        || !y_mm.is_finite()
        || x_mm.abs() > bed.width_mm / 2.0
        || y_mm.abs() > bed.height_mm / 2.0
    {
        return None;
    }
    Some(Point2::new(x_mm, y_mm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::bed::ViewportSize;
    use penplot_core::{LengthUnit, MachineConfig};

    fn bed() -> BedMetrics {
        let machine = MachineConfig::new(200.0, 100.0, LengthUnit::Mm);
        BedMetrics::compute(ViewportSize::new(1000.0, 1000.0), &machine)
    }

    #[test]
    fn test_pointer_at_bed_centre() {
        let bed = bed();
        let mm = pointer_to_bed_mm(Point2::new(500.0, 500.0), &CanvasView::default(), &bed).unwrap();
        assert!(mm.x.abs() < 1e-9);
        assert!(mm.y.abs() < 1e-9);
    }

    #[test]
    fn test_pointer_with_pan_and_zoom() {
        let bed = bed();
        let view = CanvasView {
            x: 100.0,
            y: 0.0,
            scale: 2.0,
        };
        // scene (535, 500) is 35 px = 10 mm right of centre at 3.5 px/mm
        let stage = view.scene_to_stage(Point2::new(535.0, 500.0));
        let mm = pointer_to_bed_mm(stage, &view, &bed).unwrap();
        assert!((mm.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_outside_bed() {
        let bed = bed();
        assert!(pointer_to_bed_mm(Point2::new(10.0, 10.0), &CanvasView::default(), &bed).is_none());
    }

    #[test]
    fn test_zoom_keeps_anchor() {
        let mut view = CanvasView::default();
        let pointer = Point2::new(300.0, 200.0);
        let before = view.stage_to_scene(pointer);
        view.zoom_at(pointer, -1.0);
        assert!((view.scale - WHEEL_ZOOM_IN).abs() < 1e-12);
        let after = view.stage_to_scene(pointer);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut view = CanvasView::default();
        view.zoom_to(Point2::ORIGIN, 100.0);
        assert_eq!(view.scale, MAX_VIEW_SCALE);
        view.zoom_to(Point2::ORIGIN, 0.0);
        assert_eq!(view.scale, MIN_VIEW_SCALE);
    }
}
