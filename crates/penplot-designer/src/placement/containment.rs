//! Work-area containment test

use penplot_core::Point2;

use super::bed::BedMetrics;
use crate::commands::ArtTransform;
use crate::svg::SvgSize;

/// Slack in pixels absorbing floating-point error on exact-fit placements.
pub const CONTAINMENT_EPSILON_PX: f64 = 1e-9;

/// Corners of the placed artwork in bed-centred stage pixels.
pub fn placed_corners(
    transform: &ArtTransform,
    art: SvgSize,
    base_scale: f64,
    bed: &BedMetrics,
) -> [Point2; 4] {
    let hw = art.width * base_scale * transform.scale_x / 2.0;
    let hh = art.height * base_scale * transform.scale_y / 2.0;
    let offset = Point2::new(bed.mm_to_px(transform.x_mm), bed.mm_to_px(transform.y_mm));

    [
        Point2::new(-hw, -hh),
        Point2::new(hw, -hh),
        Point2::new(hw, hh),
        Point2::new(-hw, hh),
    ]
    .map(|corner| corner.rotated_about(Point2::ORIGIN, transform.rotation) + offset)
}

/// True when every corner of the rotated artwork rectangle lies inside the bed.
pub fn is_inside_work_area(
    candidate: &ArtTransform,
    art: SvgSize,
    base_scale: f64,
    bed: &BedMetrics,
) -> bool {
    let half_w = bed.bed_w / 2.0 + CONTAINMENT_EPSILON_PX;
    let half_h = bed.bed_h / 2.0 + CONTAINMENT_EPSILON_PX;

    placed_corners(candidate, art, base_scale, bed)
        .iter()
        .all(|p| p.is_finite() && p.x.abs() <= half_w && p.y.abs() <= half_h)
}
