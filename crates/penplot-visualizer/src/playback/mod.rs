//! Frame playback
//!
//! This module provides:
//! - Stroke reconstruction from frames
//! - The playback state machine
//! - A tokio-driven ticker

pub mod model;
pub mod ticker;

pub use model::{strokes_from_frames, Playback};
pub use ticker::{PlaybackTicker, DEFAULT_TICK};
