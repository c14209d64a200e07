//! # PenPlot Designer
//!
//! This crate turns vector artwork into pen-plotter toolpaths and places the
//! artwork on the machine work area.
//!
//! ## Core Components
//!
//! - **SVG**: document parsing and arc-length sampling into frames
//! - **Commands**: pure reducer over the artwork transform
//! - **Placement**: bed metrics, containment gate, snapping, grid and pointer math
//! - **Nudge**: keyboard mapping onto transform actions
//!
//! ## Architecture
//!
//! ```text
//! SVG text ──> SvgDocument ──> sampler ──> frames + summary
//!
//! edit (drag / handle / nudge / field)
//!   └── ArtTransformAction ──> reduce ──> PlacementSession::apply_if_valid
//!                                            └── is_inside_work_area
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use penplot_designer::{sample_svg, SamplerConfig};
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><line x2="20"/></svg>"#;
//! let toolpath = sample_svg(svg, &SamplerConfig::default());
//! assert_eq!(toolpath.frames.len(), 5);
//! ```

pub mod commands;
pub mod error;
pub mod nudge;
pub mod placement;
pub mod svg;

pub use commands::{reduce, ArtTransform, ArtTransformAction, ArtTransformPatch, MIN_SCALE};
pub use error::{DesignerError, Result};
pub use nudge::{action_for_key, Modifiers, NudgeKey, NudgeOutcome, NudgeSettings};
pub use placement::{
    art_center_px, base_scale, drag_to_transform, handle_transform_end, is_inside_work_area,
    placed_corners, pointer_to_bed_mm, snap_value, ApplyOutcome, BedMetrics, CanvasView,
    GridLines, NodeState, PlacementSession, SnapSettings, TransformField, ViewportSize,
};
pub use svg::{
    sample_document, sample_many, sample_svg, SampledToolpath, SamplerConfig, ShapeKind,
    SvgDocument, SvgElement, SvgSize,
};
