//! SVG artwork handling
//!
//! - [`document`]: strict parse into geometry elements and declared size
//! - [`shapes`]: element geometry to lyon paths
//! - [`sampler`]: arc-length sampling into pen-plotter frames

pub mod document;
pub mod sampler;
pub mod shapes;

pub use document::{ShapeKind, SvgDocument, SvgElement, SvgSize};
pub use sampler::{
    sample_document, sample_many, sample_path, sample_svg, SampledToolpath, SamplerConfig,
    DEFAULT_NOMINAL_SPEED, DEFAULT_SAMPLE_STEP,
};
