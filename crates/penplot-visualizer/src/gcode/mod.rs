//! G-code reading
//!
//! This module provides:
//! - The streaming stroke interpreter
//! - Stroke statistics for reporting

pub mod interpreter;
pub mod stats;

pub use interpreter::{parse_strokes, GcodeInterpreter};
pub use stats::StrokeStats;
