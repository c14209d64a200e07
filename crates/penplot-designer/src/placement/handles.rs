//! Drag and transform-handle resolution.
//!
//! The stage reports the artwork node in scene pixels. These helpers turn
//! that back into transform patches in millimetres.

use penplot_core::Point2;
use serde::{Deserialize, Serialize};

use super::bed::BedMetrics;
use super::snap::SnapSettings;
use crate::commands::{ArtTransform, ArtTransformPatch, MIN_SCALE};

/// Artwork node as reported by the stage after a handle interaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    /// Anchor (artwork centre) in scene pixels.
    pub x: f64,
    pub y: f64,
    /// Total node scale, including the base fit scale.
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
}

/// Scene-pixel anchor of the artwork centre.
pub fn art_center_px(transform: &ArtTransform, bed: &BedMetrics) -> Point2 {
    Point2::new(
        bed.bed_cx + bed.mm_to_px(transform.x_mm),
        bed.bed_cy + bed.mm_to_px(transform.y_mm),
    )
}

/// Position patch for an artwork dragged to `node_px`.
pub fn drag_to_transform(node_px: Point2, bed: &BedMetrics, snap: &SnapSettings) -> ArtTransformPatch {
    let x_mm = bed.px_to_mm(node_px.x - bed.bed_cx);
    let y_mm = bed.px_to_mm(node_px.y - bed.bed_cy);
    ArtTransformPatch::position(snap.apply(x_mm), snap.apply(y_mm))
}

/// Full patch for the end of a resize/rotate handle interaction.
///
/// Node scale is divided by the base scale and floored at [`MIN_SCALE`].
pub fn handle_transform_end(node: &NodeState, bed: &BedMetrics, base_scale: f64) -> ArtTransformPatch {
    let base = base_scale.max(1e-6);
    ArtTransformPatch {
        x_mm: Some(bed.px_to_mm(node.x - bed.bed_cx)),
        y_mm: Some(bed.px_to_mm(node.y - bed.bed_cy)),
        scale_x: Some((node.scale_x / base).max(MIN_SCALE)),
        scale_y: Some((node.scale_y / base).max(MIN_SCALE)),
        rotation: Some(node.rotation),
    }
}
