//! Element geometry to lyon paths
//!
//! Each element is built in its own user space. `transform` attributes on the
//! element or its ancestors are not applied.

use std::f64::consts::{FRAC_PI_2, PI};
use std::str::FromStr;

use lyon::math::{point, Point};
use lyon::path::builder::SvgPathBuilder;
use lyon::path::Path;
use svgtypes::{PointsParser, SimplePathSegment, SimplifyingPathParser};
use tracing::debug;

use super::document::{ShapeKind, SvgElement};
use crate::error::{DesignerError, Result};

/// Largest angle spanned by one cubic segment of an elliptical arc.
const MAX_ARC_SEGMENT: f64 = PI / 16.0;

impl SvgElement {
    /// Builds the element outline as a lyon path.
    ///
    /// Returns an error when a required attribute is missing or unparsable.
    /// Zero-length outlines are not an error; the sampler skips them.
    pub fn to_path(&self) -> Result<Path> {
        match self.kind {
            ShapeKind::Path => self.path_data(),
            ShapeKind::Line => self.line(),
            ShapeKind::Polyline => self.poly(false),
            ShapeKind::Polygon => self.poly(true),
            ShapeKind::Rect => self.rect(),
            ShapeKind::Circle => {
                let r = self.number("r", 0.0)?;
                self.ellipse_path(r, r)
            }
            ShapeKind::Ellipse => {
                let rx = self.number("rx", 0.0)?;
                let ry = self.number("ry", 0.0)?;
                self.ellipse_path(rx, ry)
            }
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> DesignerError {
        DesignerError::invalid_geometry(self.kind.tag(), reason)
    }

    /// Reads a user-unit number attribute, falling back to `default` when absent.
    fn number(&self, name: &str, default: f64) -> Result<f64> {
        let Some(raw) = self.attr(name) else {
            return Ok(default);
        };
        let length = svgtypes::Length::from_str(raw)
            .map_err(|e| self.invalid(format!("{name}=\"{raw}\": {e}")))?;
        match length.unit {
            svgtypes::LengthUnit::None | svgtypes::LengthUnit::Px => Ok(length.number),
            _ => Err(self.invalid(format!("{name}=\"{raw}\": unsupported unit"))),
        }
    }

    fn path_data(&self) -> Result<Path> {
        let data = self
            .attr("d")
            .ok_or_else(|| self.invalid("missing 'd' attribute"))?;

        let mut builder = Path::builder().with_svg();
        let mut segments = 0usize;
        for segment in SimplifyingPathParser::from(data) {
            let segment = match segment {
                Ok(segment) => segment,
                Err(e) => {
                    // Rendering stops at the first error; keep what came before
                    debug!("Path data error after {} segments: {}", segments, e);
                    break;
                }
            };
            match segment {
                SimplePathSegment::MoveTo { x, y } => {
                    builder.move_to(pt(x, y));
                }
                SimplePathSegment::LineTo { x, y } => {
                    builder.line_to(pt(x, y));
                }
                SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    builder.quadratic_bezier_to(pt(x1, y1), pt(x, y));
                }
                SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    builder.cubic_bezier_to(pt(x1, y1), pt(x2, y2), pt(x, y));
                }
                SimplePathSegment::ClosePath => {
                    builder.close();
                }
            }
            segments += 1;
        }

        if segments == 0 {
            return Err(self.invalid("no drawable path data"));
        }
        Ok(builder.build())
    }

    fn line(&self) -> Result<Path> {
        let from = pt(self.number("x1", 0.0)?, self.number("y1", 0.0)?);
        let to = pt(self.number("x2", 0.0)?, self.number("y2", 0.0)?);

        let mut builder = Path::builder().with_svg();
        builder.move_to(from);
        builder.line_to(to);
        Ok(builder.build())
    }

    fn poly(&self, closed: bool) -> Result<Path> {
        let raw = self
            .attr("points")
            .ok_or_else(|| self.invalid("missing 'points' attribute"))?;

        let mut points = PointsParser::from(raw);
        let (x, y) = points
            .next()
            .ok_or_else(|| self.invalid("empty 'points' attribute"))?;

        let mut builder = Path::builder().with_svg();
        builder.move_to(pt(x, y));
        for (x, y) in points {
            builder.line_to(pt(x, y));
        }
        if closed {
            builder.close();
        }
        Ok(builder.build())
    }

    fn rect(&self) -> Result<Path> {
        let x = self.number("x", 0.0)?;
        let y = self.number("y", 0.0)?;
        let w = self.number("width", 0.0)?;
        let h = self.number("height", 0.0)?;
        if w <= 0.0 || h <= 0.0 {
            return Err(self.invalid(format!("non-positive size {w} x {h}")));
        }

        let (rx, ry) = corner_radii(
            self.number("rx", -1.0)?,
            self.number("ry", -1.0)?,
            w,
            h,
        );

        let mut builder = Path::builder().with_svg();
        if rx <= 0.0 || ry <= 0.0 {
            builder.move_to(pt(x, y));
            builder.line_to(pt(x + w, y));
            builder.line_to(pt(x + w, y + h));
            builder.line_to(pt(x, y + h));
            builder.close();
            return Ok(builder.build());
        }

        let corner = |cx: f64, cy: f64, start: f64| EllipseArc {
            cx,
            cy,
            rx,
            ry,
            start,
            sweep: FRAC_PI_2,
        };
        builder.move_to(pt(x + rx, y));
        builder.line_to(pt(x + w - rx, y));
        corner(x + w - rx, y + ry, -FRAC_PI_2).append_to(&mut builder);
        builder.line_to(pt(x + w, y + h - ry));
        corner(x + w - rx, y + h - ry, 0.0).append_to(&mut builder);
        builder.line_to(pt(x + rx, y + h));
        corner(x + rx, y + h - ry, FRAC_PI_2).append_to(&mut builder);
        builder.line_to(pt(x, y + ry));
        corner(x + rx, y + ry, PI).append_to(&mut builder);
        builder.close();
        Ok(builder.build())
    }

    /// Ellipse outline starting at `(cx + rx, cy)`, clockwise.
    fn ellipse_path(&self, rx: f64, ry: f64) -> Result<Path> {
        let cx = self.number("cx", 0.0)?;
        let cy = self.number("cy", 0.0)?;
        if rx <= 0.0 || ry <= 0.0 {
            return Err(self.invalid(format!("non-positive radius {rx} x {ry}")));
        }

        let mut builder = Path::builder().with_svg();
        builder.move_to(pt(cx + rx, cy));
        EllipseArc {
            cx,
            cy,
            rx,
            ry,
            start: 0.0,
            sweep: 2.0 * PI,
        }
        .append_to(&mut builder);
        builder.close();
        Ok(builder.build())
    }
}

/// Axis-aligned elliptical arc. Angles are in radians; positive sweep turns
/// clockwise in a y-down coordinate system.
#[derive(Debug, Clone, Copy)]
struct EllipseArc {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    start: f64,
    sweep: f64,
}

impl EllipseArc {
    fn at(&self, angle: f64) -> (f64, f64) {
        let (sin, cos) = angle.sin_cos();
        (self.cx + self.rx * cos, self.cy + self.ry * sin)
    }

    /// Tangent scaled to the parameter, `d/dθ` of [`Self::at`].
    fn derivative(&self, angle: f64) -> (f64, f64) {
        let (sin, cos) = angle.sin_cos();
        (-self.rx * sin, self.ry * cos)
    }

    /// Appends the arc as cubic béziers, assuming the builder's current
    /// point is the arc start.
    ///
    /// Segments span at most [`MAX_ARC_SEGMENT`], keeping them within about
    /// 1e-9 of the larger radius from the true curve.
    fn append_to<B: SvgPathBuilder>(&self, builder: &mut B) {
        let segments = (self.sweep.abs() / MAX_ARC_SEGMENT - 1e-9).ceil().max(1.0) as usize;
        let delta = self.sweep / segments as f64;
        let k = 4.0 / 3.0 * (delta / 4.0).tan();

        for i in 0..segments {
            let a0 = self.start + delta * i as f64;
            let a1 = a0 + delta;
            let (x0, y0) = self.at(a0);
            let (x1, y1) = self.at(a1);
            let (dx0, dy0) = self.derivative(a0);
            let (dx1, dy1) = self.derivative(a1);
            builder.cubic_bezier_to(
                pt(x0 + k * dx0, y0 + k * dy0),
                pt(x1 - k * dx1, y1 - k * dy1),
                pt(x1, y1),
            );
        }
    }
}

/// Resolves rounded-corner radii: a missing or negative radius takes the
/// other's value, and both are clamped to half the rectangle size.
fn corner_radii(rx: f64, ry: f64, w: f64, h: f64) -> (f64, f64) {
    let (rx, ry) = match (rx >= 0.0, ry >= 0.0) {
        (true, true) => (rx, ry),
        (true, false) => (rx, rx),
        (false, true) => (ry, ry),
        (false, false) => (0.0, 0.0),
    };
    (rx.min(w / 2.0), ry.min(h / 2.0))
}

fn pt(x: f64, y: f64) -> Point {
    point(x as f32, y as f32)
}
