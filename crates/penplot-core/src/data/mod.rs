//! Data models shared across the workspace
//!
//! This module provides:
//! - Machine work-area configuration with unit handling
//! - Toolpath frames, strokes and summary metrics

pub mod machine;
pub mod toolpath;

pub use machine::{MachineConfig, MIN_MACHINE_DIMENSION};
pub use toolpath::{Frame, FrameKind, PenState, Stroke, ToolpathSummary};
