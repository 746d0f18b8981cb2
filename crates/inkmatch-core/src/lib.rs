//! inkmatch-core - Pen-stroke data structures and preprocessing
//!
//! This crate provides the data model shared by training and recognition:
//!
//! - [`Point`] - One pen sample on the logical canvas
//! - [`Stroke`] - Points of one pen-down..pen-up gesture
//! - [`Writing`] - One handwritten character sample (ordered strokes + canvas size)
//! - [`LabelledSample`] - A writing tagged with its target character
//!
//! Preprocessing (size/position normalization, downsampling and upsampling)
//! lives on [`Writing`] and [`Stroke`] and mutates in place; clone first if the
//! original is still needed.
//!
//! # Example
//!
//! ```
//! use inkmatch_core::{Point, Stroke, Writing};
//!
//! let stroke = Stroke::from_points(vec![Point::new(100, 500), Point::new(900, 500)]).unwrap();
//! let mut writing = Writing::new();
//! writing.push_stroke(stroke);
//!
//! writing.normalize();
//! writing.upsample(50).unwrap();
//! assert!(writing.point_count() > 2);
//! ```

pub mod error;
pub mod stroke;
pub mod writing;

pub use error::{Error, Result};
pub use stroke::{Point, Stroke};
pub use writing::{LabelledSample, NORMALIZE_MIN_SIZE, NORMALIZE_PROPORTION, Writing};

/// Canonical logical canvas width
pub const DEFAULT_CANVAS_WIDTH: u32 = 1000;

/// Canonical logical canvas height
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1000;
