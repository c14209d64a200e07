//! # PenPlot Core
//!
//! Core types and utilities for PenPlot.
//! Provides the geometry primitives, unit conversion, machine work-area model
//! and the toolpath exchange types (frames, strokes, summaries) shared by the
//! designer and visualizer crates.

pub mod data;
pub mod error;
pub mod geometry;
pub mod units;

pub use data::{
    Frame, FrameKind, MachineConfig, PenState, Stroke, ToolpathSummary, MIN_MACHINE_DIMENSION,
};

pub use error::{Error, Result};

pub use geometry::{Bounds2, Point2};

pub use units::{
    convert, format_length, in_to_mm, leading_number, mm_to_in, parse_length, LengthUnit,
    MM_PER_INCH,
};
