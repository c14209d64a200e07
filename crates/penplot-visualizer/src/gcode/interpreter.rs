//! G-code stroke interpreter
//!
//! Reads plotter G-code line by line and recovers the pen-down strokes.
//! Only linear motion and pen commands are understood; everything else is
//! ignored without error.
//!
//! | Command      | Effect   |
//! |--------------|----------|
//! | `M3` / `M03` | pen down |
//! | `M5` / `M05` | pen up   |
//! | `G0` / `G00` | pen up   |
//! | `G1` / `G01` | pen down |

use std::mem;

use penplot_core::{leading_number, Point2, Stroke};
use tracing::{debug, trace};

/// Streaming interpreter with modal pen state
#[derive(Debug, Clone, Default)]
pub struct GcodeInterpreter {
    pen_down: bool,
    position: Point2,
    run: Vec<Point2>,
    strokes: Vec<Stroke>,
    lines_seen: usize,
    lines_skipped: usize,
}

impl GcodeInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a whole program. Lines may end in `\n` or `\r\n`.
    pub fn feed(&mut self, text: &str) {
        for line in text.lines() {
            self.feed_line(line);
        }
    }

    /// Feeds a single line.
    pub fn feed_line(&mut self, raw: &str) {
        self.lines_seen += 1;

        let line = raw.split(';').next().unwrap_or_default().trim();
        if line.is_empty() {
            return;
        }
        if line.contains('(') {
            self.lines_skipped += 1;
            trace!("Skipping parenthesised line: {}", line);
            return;
        }

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return;
        };
        match command.to_ascii_uppercase().as_str() {
            "M3" | "M03" | "G1" | "G01" => self.pen_down = true,
            "M5" | "M05" | "G0" | "G00" => self.pen_down = false,
            _ => {}
        }

        let mut target = self.position;
        for part in parts {
            let mut chars = part.chars();
            let Some(axis) = chars.next() else {
                continue;
            };
            let Some(value) = leading_number(chars.as_str()) else {
                continue;
            };
            match axis.to_ascii_uppercase() {
                'X' => target.x = value,
                'Y' => target.y = value,
                _ => {}
            }
        }

        if target != self.position {
            let previous = mem::replace(&mut self.position, target);
            if self.pen_down {
                if self.run.is_empty() {
                    self.run.push(previous);
                }
                self.run.push(target);
            } else {
                self.close_run();
            }
        }
    }

    /// Closes any stroke in progress and returns all strokes.
    pub fn finish(mut self) -> Vec<Stroke> {
        self.close_run();
        debug!(
            "G-code interpreted: {} lines ({} skipped), {} strokes",
            self.lines_seen,
            self.lines_skipped,
            self.strokes.len()
        );
        self.strokes
    }

    /// Strokes completed so far, excluding the one in progress.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn position(&self) -> Point2 {
        self.position
    }

    fn close_run(&mut self) {
        if self.run.is_empty() {
            return;
        }
        let run = mem::take(&mut self.run);
        let points = run.len();
        match Stroke::from_run(run) {
            Some(stroke) => self.strokes.push(stroke),
            None => trace!("Dropping {}-point run", points),
        }
    }
}

/// Interprets a whole program into strokes.
pub fn parse_strokes(text: &str) -> Vec<Stroke> {
    let mut interpreter = GcodeInterpreter::new();
    interpreter.feed(text);
    interpreter.finish()
}
