//! inkmatch - Handwriting recognition by stroke template matching
//!
//! Recognizes single handwritten characters by comparing their pen strokes
//! against one template per character with dynamic time warping.
//!
//! # Overview
//!
//! - Pen-stroke data model with a readable text format
//! - Size/position normalization and point-density resampling
//! - Selectable per-point feature transforms
//! - Medoid template training into a compact binary model
//! - Recognition restricted to templates with the input's stroke count
//!
//! # Example
//!
//! ```
//! use inkmatch::{Stroke, Writing};
//!
//! let stroke = Stroke::from_coords(&[(100, 500), (500, 500), (900, 500)]).unwrap();
//! let mut writing = Writing::from_strokes(vec![stroke]);
//! writing.normalize();
//! assert_eq!(writing.stroke_count(), 1);
//! assert_eq!(writing.size().unwrap().2, 700);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use inkmatch_core::*;

// Re-export the recognizer as a module to avoid name conflicts
pub use inkmatch_recog as recog;
