//! Frame playback state
//!
//! Replays a sampled frame sequence one frame per tick, exposing the strokes
//! drawn so far and the current pen marker.

use penplot_core::{Frame, Point2, Stroke};
use tracing::{debug, trace};

/// Rebuilds pen-down strokes from a frame sequence.
///
/// Pen-down frames extend the current run. An empty run is seeded with the
/// last pen-up position, so a travel followed by draws yields a stroke that
/// starts where the pen went down. Runs shorter than two points are dropped.
pub fn strokes_from_frames(frames: &[Frame]) -> Vec<Stroke> {
    let mut strokes = Vec::new();
    let mut run: Vec<Point2> = Vec::new();
    let mut anchor: Option<Point2> = None;

    for frame in frames {
        let p = frame.position();
        if frame.is_pen_down() {
            if run.is_empty() {
                run.extend(anchor);
            }
            run.push(p);
        } else {
            if let Some(stroke) = Stroke::from_run(std::mem::take(&mut run)) {
                strokes.push(stroke);
            }
            anchor = Some(p);
        }
    }

    if let Some(stroke) = Stroke::from_run(run) {
        strokes.push(stroke);
    }
    strokes
}

/// Playback over a frame sequence
#[derive(Debug, Clone, Default)]
pub struct Playback {
    frames: Vec<Frame>,
    playhead: usize,
    playing: bool,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frames(frames: Vec<Frame>) -> Self {
        let mut playback = Self::new();
        playback.set_frames(frames);
        playback
    }

    /// Replaces the frames, rewinding and stopping playback.
    pub fn set_frames(&mut self, frames: Vec<Frame>) {
        debug!("Playback loaded {} frames", frames.len());
        self.frames = frames;
        self.playhead = 0;
        self.playing = false;
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn playhead(&self) -> usize {
        self.playhead
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once the playhead sits on the last frame.
    pub fn is_finished(&self) -> bool {
        !self.frames.is_empty() && self.playhead + 1 >= self.frames.len()
    }

    /// Starts playback. Restarts from the first frame when already at the end.
    pub fn play(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        if self.is_finished() {
            self.playhead = 0;
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn reset(&mut self) {
        self.playhead = 0;
        self.playing = false;
    }

    /// Moves the playhead, clamped to the frame range. Always pauses.
    pub fn scrub(&mut self, index: usize) {
        self.playing = false;
        self.playhead = index.min(self.frames.len().saturating_sub(1));
    }

    /// Advances one frame. Returns whether playback is still running.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.is_finished() {
            self.playing = false;
            return false;
        }

        self.playhead += 1;
        trace!("Playhead {}/{}", self.playhead, self.frames.len());
        if self.is_finished() {
            debug!("Playback reached last frame");
            self.playing = false;
        }
        self.playing
    }

    /// Frame under the playhead.
    pub fn marker(&self) -> Option<&Frame> {
        let last = self.frames.len().checked_sub(1)?;
        self.frames.get(self.playhead.min(last))
    }

    /// Strokes drawn up to and including the playhead.
    pub fn visible_strokes(&self) -> Vec<Stroke> {
        if self.frames.is_empty() {
            return Vec::new();
        }
        let end = self.playhead.min(self.frames.len() - 1);
        strokes_from_frames(&self.frames[..=end])
    }

    /// Fraction of the sequence played, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match self.frames.len() {
            0 => 0.0,
            1 => 1.0,
            n => self.playhead.min(n - 1) as f64 / (n - 1) as f64,
        }
    }
}
