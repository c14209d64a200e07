use std::collections::hash_map::DefaultHasher;
use std::fmt::Write;
use std::hash::{Hash, Hasher};

use penplot_core::Stroke;
use tracing::debug;

use crate::gcode::{parse_strokes, StrokeStats};

/// Content hash used to skip re-parsing unchanged programs.
pub fn content_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Parsed strokes for the last G-code program seen, plus an SVG path string
/// for the preview overlay.
#[derive(Debug, Default, Clone)]
pub struct ToolpathCache {
    content_hash: Option<u64>,
    strokes: Vec<Stroke>,
    overlay_path: String,
}

impl ToolpathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_update(&self, new_hash: u64) -> bool {
        self.content_hash != Some(new_hash)
    }

    /// Parses `gcode` unless it matches the cached program. Returns whether
    /// the cache was rebuilt.
    pub fn load(&mut self, gcode: &str) -> bool {
        let new_hash = content_hash(gcode);
        if !self.needs_update(new_hash) {
            debug!("G-code hash unchanged, skipping parse");
            return false;
        }
        debug!("Parsing new G-code (hash: {})", new_hash);
        self.update(new_hash, parse_strokes(gcode));
        true
    }

    pub fn update(&mut self, new_hash: u64, strokes: Vec<Stroke>) {
        self.content_hash = Some(new_hash);
        self.strokes = strokes;
        self.rebuild_path();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// One `M .. L ..` subpath per stroke.
    pub fn overlay_svg(&self) -> &str {
        &self.overlay_path
    }

    pub fn stats(&self) -> StrokeStats {
        StrokeStats::from_strokes(&self.strokes)
    }

    fn rebuild_path(&mut self) {
        self.overlay_path.clear();
        let points: usize = self.strokes.iter().map(Stroke::len).sum();
        self.overlay_path.reserve(points * 16);

        for stroke in &self.strokes {
            let first = stroke.first();
            let _ = write!(self.overlay_path, "M {:.2} {:.2} ", first.x, first.y);
            for p in &stroke.points()[1..] {
                let _ = write!(self.overlay_path, "L {:.2} {:.2} ", p.x, p.y);
            }
        }

        let trimmed = self.overlay_path.trim_end().len();
        self.overlay_path.truncate(trimmed);
        debug!(
            "Rebuilt overlay path: {} strokes, {} bytes",
            self.strokes.len(),
            self.overlay_path.len()
        );
    }
}
