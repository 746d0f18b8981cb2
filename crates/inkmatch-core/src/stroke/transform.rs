//! Stroke geometric transformations and point-density resampling.

use crate::error::{Error, Result};
use crate::stroke::{Point, Stroke};

impl Stroke {
    /// Translate all points by `(dx, dy)`.
    pub fn move_rel(&mut self, dx: i32, dy: i32) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }

    /// Scale all points relative to the canvas origin, rounding to the grid.
    pub fn resize(&mut self, xrate: f32, yrate: f32) {
        for p in &mut self.points {
            p.x = (p.x as f32 * xrate).round() as i32;
            p.y = (p.y as f32 * yrate).round() as i32;
        }
    }

    /// Drop points closer than `threshold` to the last kept point.
    ///
    /// The first and last points are always kept, so a stroke never
    /// shrinks below `min(len, 2)` points.
    pub fn downsample(&mut self, threshold: u32) {
        let n = self.points.len();
        if n <= 2 {
            return;
        }
        let t = threshold as f32;

        let mut kept: Vec<Point> = Vec::with_capacity(n);
        kept.push(self.points[0]);
        for p in &self.points[1..n - 1] {
            let last = kept[kept.len() - 1];
            if p.distance(&last) > t {
                kept.push(*p);
            }
        }
        kept.push(self.points[n - 1]);
        self.points = kept;
    }

    /// Insert evenly spaced colinear points so that no two consecutive
    /// points are more than `threshold` apart.
    ///
    /// Inserted points carry coordinates only. On the integer grid a gap
    /// bound below 2 cannot always be met; the segment count is capped at
    /// one insertion per unit of length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `threshold` is 0.
    pub fn upsample(&mut self, threshold: u32) -> Result<()> {
        if threshold == 0 {
            return Err(Error::InvalidParameter(
                "upsample threshold must be positive".to_string(),
            ));
        }
        let t = threshold as f32;

        let mut out: Vec<Point> = Vec::with_capacity(self.points.len());
        out.push(self.points[0]);
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let dist = a.distance(&b);
            if dist > t {
                out.extend(interpolate_within(&a, &b, dist, t));
            }
            out.push(b);
        }
        self.points = out;
        Ok(())
    }
}

/// Points strictly between `a` and `b` such that every gap, after rounding
/// to the grid, is at most `t`.
fn interpolate_within(a: &Point, b: &Point, dist: f32, t: f32) -> Vec<Point> {
    let max_segments = (dist.ceil() as usize).max(1);
    let mut segments = ((dist / t).ceil() as usize).max(2);

    loop {
        let inner = interpolate(a, b, segments);
        if segments >= max_segments || gaps_within(a, &inner, b, t) {
            return inner;
        }
        segments += 1;
    }
}

fn interpolate(a: &Point, b: &Point, segments: usize) -> Vec<Point> {
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    (1..segments)
        .map(|i| {
            let f = i as f32 / segments as f32;
            Point::new(
                (a.x as f32 + dx * f).round() as i32,
                (a.y as f32 + dy * f).round() as i32,
            )
        })
        .collect()
}

fn gaps_within(a: &Point, inner: &[Point], b: &Point, t: f32) -> bool {
    let mut prev = a;
    for p in inner.iter().chain(std::iter::once(b)) {
        if prev.distance(p) > t {
            return false;
        }
        prev = p;
    }
    true
}
