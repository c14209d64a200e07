use penplot_core::{Bounds2, Stroke};
use serde::Serialize;

/// Aggregate figures over a stroke list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStats {
    pub strokes: usize,
    pub points: usize,
    pub drawn_length: f64,
    /// `None` when there are no strokes.
    pub bounds: Option<Bounds2>,
}

impl StrokeStats {
    pub fn from_strokes(strokes: &[Stroke]) -> Self {
        let bounds: Bounds2 = strokes
            .iter()
            .flat_map(|s| s.points().iter().copied())
            .collect();

        Self {
            strokes: strokes.len(),
            points: strokes.iter().map(Stroke::len).sum(),
            drawn_length: strokes.iter().map(Stroke::length).sum(),
            bounds: bounds.is_valid().then_some(bounds),
        }
    }
}
