//! SVG document model
//!
//! Parses artwork text into an owned list of geometry elements in document
//! order, plus the declared document size.

use std::collections::HashMap;
use std::fmt;

use roxmltree::{Document, Node, ParsingOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use penplot_core::units::leading_number;

use crate::error::{DesignerError, Result};

/// Declared document size in user units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgSize {
    pub width: f64,
    pub height: f64,
}

/// Geometry element kinds that produce toolpath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Path,
    Line,
    Polyline,
    Polygon,
    Rect,
    Circle,
    Ellipse,
}

impl ShapeKind {
    /// Maps an element local name to a shape kind.
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "path" => Some(Self::Path),
            "line" => Some(Self::Line),
            "polyline" => Some(Self::Polyline),
            "polygon" => Some(Self::Polygon),
            "rect" => Some(Self::Rect),
            "circle" => Some(Self::Circle),
            "ellipse" => Some(Self::Ellipse),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Line => "line",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A geometry element with its raw attributes
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub kind: ShapeKind,
    attributes: HashMap<String, String>,
}

impl SvgElement {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn from_node(kind: ShapeKind, node: Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .filter(|a| a.namespace().is_none())
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        Self { kind, attributes }
    }
}

/// Parsed artwork document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgDocument {
    size: Option<SvgSize>,
    elements: Vec<SvgElement>,
}

impl SvgDocument {
    /// Parses SVG text.
    ///
    /// Fails on malformed XML or when no `<svg>` element is present. Geometry
    /// attributes are not validated here; see [`SvgElement::to_path`].
    pub fn parse(text: &str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)?;

        let svg = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "svg")
            .ok_or_else(|| DesignerError::MissingSvgRoot {
                found: doc.root_element().tag_name().name().to_string(),
            })?;

        let elements: Vec<SvgElement> = svg
            .descendants()
            .filter(|n| n.is_element())
            .filter_map(|n| ShapeKind::from_tag(n.tag_name().name()).map(|k| (k, n)))
            .map(|(kind, node)| SvgElement::from_node(kind, node))
            .collect();

        let size = parse_size(
            svg.attribute("viewBox"),
            svg.attribute("width"),
            svg.attribute("height"),
        );

        debug!(
            "Parsed SVG: {} geometry elements, size {:?}",
            elements.len(),
            size
        );

        Ok(Self { size, elements })
    }

    /// Declared size: `viewBox` width/height when it holds four numbers,
    /// otherwise the leading numbers of `width` and `height`.
    pub fn size(&self) -> Option<SvgSize> {
        self.size
    }

    /// Geometry elements in document order.
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn parse_size(view_box: Option<&str>, width: Option<&str>, height: Option<&str>) -> Option<SvgSize> {
    if let Some(view_box) = view_box {
        let parts: Vec<f64> = view_box
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().unwrap_or(f64::NAN))
            .collect();
        if parts.len() == 4 && parts.iter().all(|n| !n.is_nan()) {
            return Some(SvgSize {
                width: parts[2],
                height: parts[3],
            });
        }
    }

    let width = leading_number(width?)?;
    let height = leading_number(height?)?;
    Some(SvgSize { width, height })
}
