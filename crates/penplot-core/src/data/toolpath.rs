//! Toolpath frames, strokes and summary metrics
//!
//! A frame sequence is the exchange format between the sampler, the playback
//! model and any preview endpoint. Its JSON form is
//! `{"type": "move", "x": .., "y": .., "pen": "up" | "down"}`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::Point2;

/// Pen state at a sampled position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenState {
    Up,
    Down,
}

impl PenState {
    pub fn is_down(self) -> bool {
        matches!(self, PenState::Down)
    }
}

impl fmt::Display for PenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenState::Up => write!(f, "up"),
            PenState::Down => write!(f, "down"),
        }
    }
}

/// Frame kind. Only linear moves are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    #[default]
    Move,
}

/// One sampled position with an explicit pen state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "type", default)]
    pub kind: FrameKind,
    pub x: f64,
    pub y: f64,
    pub pen: PenState,
}

impl Frame {
    pub fn new(x: f64, y: f64, pen: PenState) -> Self {
        Self {
            kind: FrameKind::Move,
            x,
            y,
            pen,
        }
    }

    /// Travel move to `p`.
    pub fn travel(p: Point2) -> Self {
        Self::new(p.x, p.y, PenState::Up)
    }

    /// Drawing move to `p`.
    pub fn draw(p: Point2) -> Self {
        Self::new(p.x, p.y, PenState::Down)
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen.is_down()
    }
}

/// An ordered run of pen-down points. Always holds at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2>", into = "Vec<Point2>")]
pub struct Stroke {
    points: Vec<Point2>,
}

impl Stroke {
    /// Builds a stroke, rejecting runs shorter than two points.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::DegenerateStroke {
                points: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Builds a stroke from a run, dropping single-point or empty runs.
    pub fn from_run(points: Vec<Point2>) -> Option<Self> {
        Self::new(points).ok()
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point2 {
        self.points[0]
    }

    pub fn last(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum()
    }

    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }
}

impl TryFrom<Vec<Point2>> for Stroke {
    type Error = Error;

    fn try_from(points: Vec<Point2>) -> Result<Self> {
        Stroke::new(points)
    }
}

impl From<Stroke> for Vec<Point2> {
    fn from(stroke: Stroke) -> Self {
        stroke.points
    }
}

/// Derived metrics for a frame sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolpathSummary {
    pub estimated_time_s: u64,
    pub distance_mm: u64,
    pub pen_lifts: u64,
}

impl ToolpathSummary {
    /// Builds the summary from the accumulated drawing distance and the number
    /// of emitted shapes.
    ///
    /// The first travel move only positions the pen, so it is not counted as a
    /// lift. The time estimate assumes a constant nominal speed in document
    /// units per second and is not calibrated to any machine.
    pub fn from_distance(distance: f64, shapes: usize, nominal_speed: f64) -> Self {
        let distance = if distance.is_finite() { distance.max(0.0) } else { 0.0 };
        let estimated_time_s = if nominal_speed > 0.0 {
            (distance / nominal_speed).round() as u64
        } else {
            0
        };
        Self {
            estimated_time_s,
            distance_mm: distance.round() as u64,
            pen_lifts: shapes.saturating_sub(1) as u64,
        }
    }
}
