//! # PenPlot
//!
//! Toolpath tooling for pen plotters:
//! - SVG artwork sampled into pen-up/pen-down frames with a time estimate
//! - G-code programs read back into drawn strokes
//! - Frame playback for previews
//! - Artwork placement on the machine bed with containment checks
//!
//! ## Architecture
//!
//! PenPlot is organized as a workspace with multiple crates:
//!
//! 1. **penplot-core** - Geometry, units, machine model, toolpath types
//! 2. **penplot-designer** - SVG sampler, placement engine, transform reducer
//! 3. **penplot-visualizer** - G-code interpreter, playback model and ticker
//! 4. **penplot-settings** - Configuration files
//! 5. **penplot** - CLI binary that integrates all crates

pub mod cli;

pub use penplot_designer as designer;
pub use penplot_settings as settings;
pub use penplot_visualizer as visualizer;

pub use penplot_core::{
    Bounds2, Error, Frame, LengthUnit, MachineConfig, PenState, Point2, Result, Stroke,
    ToolpathSummary,
};

pub use penplot_designer::{
    reduce, sample_svg, ArtTransform, ArtTransformAction, PlacementSession, SamplerConfig,
    SvgDocument,
};

pub use penplot_visualizer::{parse_strokes, strokes_from_frames, Playback, PlaybackTicker};

pub use penplot_settings::{Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for command results
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
