//! Writing preprocessing: size/position normalization and resampling.
//!
//! All operations mutate the writing in place.

use crate::error::Result;
use crate::writing::Writing;

/// Fraction of the canvas the drawing occupies after normalization, per axis
pub const NORMALIZE_PROPORTION: f32 = 0.7;

/// Drawings thinner than this fraction of the canvas on an axis are not
/// scaled along that axis
pub const NORMALIZE_MIN_SIZE: f32 = 0.1;

impl Writing {
    /// Normalize size, then re-center the drawing on the canvas.
    pub fn normalize(&mut self) {
        self.normalize_size();
        self.normalize_position();
    }

    /// Rescale each axis so the drawing spans [`NORMALIZE_PROPORTION`] of
    /// the canvas on that axis.
    ///
    /// An axis whose extent is at most [`NORMALIZE_MIN_SIZE`] of the canvas
    /// is left unscaled, so a horizontal bar is not blown up vertically.
    pub fn normalize_size(&mut self) {
        let Some((_, _, width, height)) = self.size() else {
            return;
        };

        let xrate = axis_rate(width, self.width);
        let yrate = axis_rate(height, self.height);
        if xrate != 1.0 || yrate != 1.0 {
            self.resize(xrate, yrate);
        }
    }

    /// Translate the drawing so left/right and top/bottom margins are equal.
    pub fn normalize_position(&mut self) {
        let Some((x, y, width, height)) = self.size() else {
            return;
        };

        let dx = (self.width as i32 - width) / 2 - x;
        let dy = (self.height as i32 - height) / 2 - y;
        self.move_rel(dx, dy);
    }

    /// Downsample every stroke with the given distance threshold.
    ///
    /// See [`Stroke::downsample`](crate::Stroke::downsample).
    pub fn downsample(&mut self, threshold: u32) {
        for stroke in &mut self.strokes {
            stroke.downsample(threshold);
        }
    }

    /// Upsample every stroke with the given distance threshold.
    ///
    /// See [`Stroke::upsample`](crate::Stroke::upsample).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter)
    /// if `threshold` is 0.
    pub fn upsample(&mut self, threshold: u32) -> Result<()> {
        for stroke in &mut self.strokes {
            stroke.upsample(threshold)?;
        }
        Ok(())
    }
}

fn axis_rate(extent: i32, canvas: u32) -> f32 {
    if canvas == 0 || extent as f32 / canvas as f32 <= NORMALIZE_MIN_SIZE {
        return 1.0;
    }
    canvas as f32 * NORMALIZE_PROPORTION / extent as f32
}
