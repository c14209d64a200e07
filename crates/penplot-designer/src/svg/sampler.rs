//! SVG toolpath sampler
//!
//! Walks every geometry element in document order, samples its outline at
//! fixed arc-length intervals and emits pen-up/pen-down frames plus summary
//! metrics. The sampler never fails: malformed documents produce an empty
//! toolpath and malformed elements are skipped.

use lyon::algorithms::measure::{PathMeasurements, SampleType};
use lyon::path::Path;
use penplot_core::{Frame, Point2, ToolpathSummary};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::document::{SvgDocument, SvgElement};

/// Default arc-length interval between samples.
pub const DEFAULT_SAMPLE_STEP: f64 = 5.0;

/// Default nominal drawing speed in document units per second.
pub const DEFAULT_NOMINAL_SPEED: f64 = 20.0;

/// Flattening tolerance used when measuring curved outlines.
const MEASURE_TOLERANCE: f32 = 1e-3;

/// Measured lengths of curves run short by about two flattening tolerances
/// per full turn, and accumulate single-precision rounding along the path.
fn measurement_slack(length: f64) -> f64 {
    4.0 * MEASURE_TOLERANCE as f64 + length * 1e-6
}

/// Sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Arc-length distance between consecutive samples.
    pub step: f64,
    /// Speed used for the time estimate.
    pub nominal_speed: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_SAMPLE_STEP,
            nominal_speed: DEFAULT_NOMINAL_SPEED,
        }
    }
}

impl SamplerConfig {
    /// Returns a copy with non-positive or non-finite values replaced by the defaults.
    pub fn sanitized(self) -> Self {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        Self {
            step: if valid(self.step) {
                self.step
            } else {
                DEFAULT_SAMPLE_STEP
            },
            nominal_speed: if valid(self.nominal_speed) {
                self.nominal_speed
            } else {
                DEFAULT_NOMINAL_SPEED
            },
        }
    }
}

/// Sampled frames and their summary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampledToolpath {
    pub frames: Vec<Frame>,
    /// `None` when no shape produced frames.
    pub summary: Option<ToolpathSummary>,
}

impl SampledToolpath {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Samples SVG text into a toolpath.
pub fn sample_svg(text: &str, config: &SamplerConfig) -> SampledToolpath {
    match SvgDocument::parse(text) {
        Ok(document) => sample_document(&document, config),
        Err(e) => {
            warn!("Cannot sample SVG: {}", e);
            SampledToolpath::default()
        }
    }
}

/// Samples an already parsed document.
pub fn sample_document(document: &SvgDocument, config: &SamplerConfig) -> SampledToolpath {
    let config = config.sanitized();
    let mut frames = Vec::new();
    let mut distance = 0.0;
    let mut shapes = 0usize;

    for element in document.elements() {
        let Some(points) = sample_element(element, config.step) else {
            continue;
        };

        shapes += 1;
        frames.push(Frame::travel(points[0]));
        for pair in points.windows(2) {
            distance += pair[0].distance_to(pair[1]);
            frames.push(Frame::draw(pair[1]));
        }
    }

    if frames.is_empty() {
        debug!("SVG produced no drawable shapes");
        return SampledToolpath::default();
    }

    let summary = ToolpathSummary::from_distance(distance, shapes, config.nominal_speed);
    debug!(
        "Sampled {} shapes into {} frames ({} mm, {} lifts)",
        shapes,
        frames.len(),
        summary.distance_mm,
        summary.pen_lifts
    );

    SampledToolpath {
        frames,
        summary: Some(summary),
    }
}

/// Samples a batch of documents on worker threads. Results keep input order.
pub fn sample_many<S>(texts: &[S], config: &SamplerConfig) -> Vec<SampledToolpath>
where
    S: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| sample_svg(text.as_ref(), config))
        .collect()
}

/// Samples one element, returning at least two points or `None`.
fn sample_element(element: &SvgElement, step: f64) -> Option<Vec<Point2>> {
    let path = match element.to_path() {
        Ok(path) => path,
        Err(e) => {
            debug!("Skipping <{}>: {}", element.kind, e);
            return None;
        }
    };

    let points = sample_path(&path, step);
    if points.len() < 2 {
        trace!("Dropping <{}> with {} samples", element.kind, points.len());
        return None;
    }
    Some(points)
}

/// Samples `path` at distances `i * step` for `i = 0..=floor(length / step)`.
pub fn sample_path(path: &Path, step: f64) -> Vec<Point2> {
    let measurements = PathMeasurements::from_path(path, MEASURE_TOLERANCE);
    let length = measurements.length() as f64;
    if !length.is_finite() || length <= 0.0 {
        return Vec::new();
    }

    let count = ((length + measurement_slack(length)) / step).floor() as usize;
    let mut sampler = measurements.create_sampler(path, SampleType::Distance);
    (0..=count)
        .map(|i| {
            let d = (i as f64 * step).min(length);
            let p = sampler.sample(d as f32).position();
            Point2::new(p.x as f64, p.y as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use penplot_core::PenState;

    fn svg(body: &str) -> String {
        format!(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200">{body}</svg>"#)
    }

    #[test]
    fn test_line_frame_count() {
        let out = sample_svg(&svg(r#"<line x1="0" y1="0" x2="20" y2="0"/>"#), &SamplerConfig::default());
        assert_eq!(out.frames.len(), 5);
        assert_eq!(out.frames[0].pen, PenState::Up);
        assert!(out.frames[1..].iter().all(|f| f.pen == PenState::Down));
        assert!((out.frames[4].x - 20.0).abs() < 1e-4);

        let summary = out.summary.unwrap();
        assert_eq!(summary.distance_mm, 20);
        assert_eq!(summary.estimated_time_s, 1);
        assert_eq!(summary.pen_lifts, 0);
    }

    #[test]
    fn test_short_shape_dropped() {
        let out = sample_svg(&svg(r#"<line x1="0" y1="0" x2="4" y2="0"/>"#), &SamplerConfig::default());
        assert!(out.frames.is_empty());
        assert!(out.summary.is_none());
    }

    #[test]
    fn test_custom_step() {
        let config = SamplerConfig {
            step: 2.0,
            ..SamplerConfig::default()
        };
        let out = sample_svg(&svg(r#"<line x2="10"/>"#), &config);
        assert_eq!(out.frames.len(), 6);
    }

    #[test]
    fn test_sanitized_config() {
        let config = SamplerConfig {
            step: 0.0,
            nominal_speed: f64::NAN,
        }
        .sanitized();
        assert_eq!(config, SamplerConfig::default());
    }

    #[test]
    fn test_malformed_document_is_empty() {
        let out = sample_svg("<svg><line", &SamplerConfig::default());
        assert!(out.is_empty());
        assert!(out.summary.is_none());
    }
}
