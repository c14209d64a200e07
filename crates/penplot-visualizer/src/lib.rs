//! # PenPlot Visualizer
//!
//! G-code stroke preview and frame playback for PenPlot.
//! Includes the stroke interpreter, the playback model and its ticker, and a
//! hash-keyed toolpath cache for the preview overlay.

pub mod gcode;
pub mod playback;
pub mod toolpath_cache;

pub use gcode::{parse_strokes, GcodeInterpreter, StrokeStats};
pub use playback::{strokes_from_frames, Playback, PlaybackTicker, DEFAULT_TICK};
pub use toolpath_cache::{content_hash, ToolpathCache};
