//! Point, Stroke - Pen samples and pen gestures
//!
//! A [`Stroke`] is the ordered list of [`Point`]s captured between one
//! pen-down and the following pen-up. Strokes are never empty.
//!
//! Coordinates are integers on the logical canvas of the owning
//! [`Writing`](crate::Writing); the optional pressure, tilt and timestamp
//! channels are carried through preprocessing untouched but are not used
//! by the matcher.

mod transform;

use crate::error::{Error, Result};

/// One pen sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate on the logical canvas
    pub x: i32,
    /// Y coordinate on the logical canvas
    pub y: i32,
    /// Pen pressure, if the capture device reports it
    pub pressure: Option<f32>,
    /// Pen tilt along x
    pub xtilt: Option<f32>,
    /// Pen tilt along y
    pub ytilt: Option<f32>,
    /// Capture time in milliseconds
    pub timestamp: Option<u32>,
}

impl Point {
    /// Create a point with coordinates only.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns `true` if pressure, tilt or timestamp is set.
    pub fn has_extras(&self) -> bool {
        self.pressure.is_some()
            || self.xtilt.is_some()
            || self.ytilt.is_some()
            || self.timestamp.is_some()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Ordered, non-empty sequence of points from one pen gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Create a stroke from its points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStroke`] if `points` is empty.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyStroke);
        }
        Ok(Self { points })
    }

    /// Create a stroke from bare `(x, y)` coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStroke`] if `coords` is empty.
    pub fn from_coords(coords: &[(i32, i32)]) -> Result<Self> {
        Self::from_points(coords.iter().copied().map(Point::from).collect())
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by index.
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// First point of the stroke.
    pub fn first(&self) -> &Point {
        &self.points[0]
    }

    /// Last point of the stroke.
    pub fn last(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }

    /// Replace a point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the index is out of bounds.
    pub fn set(&mut self, index: usize, point: Point) -> Result<()> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Append a point.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get all points as a slice.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Sum of the distances between consecutive points.
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// Duration between first and last timestamp, if both are present.
    pub fn duration(&self) -> Option<u32> {
        let start = self.first().timestamp?;
        let end = self.last().timestamp?;
        end.checked_sub(start)
    }
}

impl<'a> IntoIterator for &'a Stroke {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
