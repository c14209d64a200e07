//! Artwork placement on the machine work area
//!
//! This module provides:
//! - Bed metrics (stage layout of the work area and the px/mm factor)
//! - Rotated-rectangle containment test
//! - Grid snapping and grid line layout
//! - Stage pan/zoom and pointer conversion
//! - Drag and handle resolution
//! - The gated placement session

pub mod bed;
pub mod containment;
pub mod grid;
pub mod handles;
pub mod session;
pub mod snap;
pub mod view;

pub use bed::{base_scale, BedMetrics, ViewportSize, BED_FILL};
pub use containment::{is_inside_work_area, placed_corners, CONTAINMENT_EPSILON_PX};
pub use grid::GridLines;
pub use handles::{art_center_px, drag_to_transform, handle_transform_end, NodeState};
pub use session::{ApplyOutcome, PlacementSession, TransformField};
pub use snap::{snap_value, SnapSettings};
pub use view::{pointer_to_bed_mm, CanvasView};
