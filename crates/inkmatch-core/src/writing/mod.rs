//! Writing, LabelledSample - Handwritten character samples
//!
//! A [`Writing`] is an ordered list of strokes drawn on a logical canvas.
//! Stroke order is drawing order; the number of strokes is what the
//! recognizer buckets templates by.
//!
//! # See also
//!
//! - [`normalize`](Writing::normalize), [`downsample`](Writing::downsample),
//!   [`upsample`](Writing::upsample) for preprocessing
//! - `serial.rs` for the text serialization format

mod normalize;
mod serial;

pub use normalize::{NORMALIZE_MIN_SIZE, NORMALIZE_PROPORTION};

use crate::stroke::Stroke;
use crate::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

/// One handwritten character sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Writing {
    strokes: Vec<Stroke>,
    width: u32,
    height: u32,
}

impl Default for Writing {
    fn default() -> Self {
        Self::new()
    }
}

impl Writing {
    /// Create an empty writing on the canonical 1000x1000 canvas.
    pub fn new() -> Self {
        Self::with_canvas(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }

    /// Create an empty writing on a canvas of the given size.
    pub fn with_canvas(width: u32, height: u32) -> Self {
        Self {
            strokes: Vec::new(),
            width,
            height,
        }
    }

    /// Create a writing on the canonical canvas from its strokes.
    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self {
            strokes,
            ..Self::new()
        }
    }

    /// Logical canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Append a stroke.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Get the strokes in drawing order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Number of strokes.
    #[inline]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Total number of points across all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    /// Check if the writing has no strokes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Bounding box of all points.
    ///
    /// Returns `(x_min, y_min, x_max, y_max)`, or `None` if empty.
    pub fn bounding_box(&self) -> Option<(i32, i32, i32, i32)> {
        let mut points = self.strokes.iter().flat_map(|s| s.iter());
        let first = points.next()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(points.fold(init, |(x0, y0, x1, y1), p| {
            (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
        }))
    }

    /// Position and extent of the drawing: `(x, y, width, height)`.
    pub fn size(&self) -> Option<(i32, i32, i32, i32)> {
        self.bounding_box()
            .map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0, y1 - y0))
    }

    /// Translate every stroke by `(dx, dy)`.
    pub fn move_rel(&mut self, dx: i32, dy: i32) {
        for stroke in &mut self.strokes {
            stroke.move_rel(dx, dy);
        }
    }

    /// Scale every stroke relative to the canvas origin.
    pub fn resize(&mut self, xrate: f32, yrate: f32) {
        for stroke in &mut self.strokes {
            stroke.resize(xrate, yrate);
        }
    }
}

/// A writing tagged with the character it represents.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledSample {
    /// Target character
    pub label: char,
    /// The handwritten sample
    pub writing: Writing,
}

impl LabelledSample {
    /// Create a labelled sample.
    pub fn new(label: char, writing: Writing) -> Self {
        Self { label, writing }
    }

    /// Label as a Unicode codepoint.
    pub fn codepoint(&self) -> u32 {
        self.label as u32
    }
}
