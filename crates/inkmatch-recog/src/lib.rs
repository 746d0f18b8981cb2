//! inkmatch-recog - Trainable stroke-matching recognizer
//!
//! This crate turns handwriting samples into templates and matches unknown
//! writings against them:
//!
//! - **Feature extraction**: Map a writing to a sequence of fixed-width frames
//! - **DTW distance**: Dynamic time warping between two frame sequences
//! - **Training**: Pick one medoid template per label and write a model file
//! - **Recognition**: Rank the templates sharing the input's stroke count
//!
//! # Quick Start
//!
//! ```no_run
//! use inkmatch_core::Writing;
//! use inkmatch_recog::model::Model;
//!
//! let model = Model::open_from_meta("models/kanji.model.meta").unwrap();
//! let writing = Writing::read_from_file("input.wrt").unwrap();
//! for candidate in model.recognize(&writing, 10) {
//!     println!("{} {}", candidate.label, candidate.distance);
//! }
//! ```
//!
//! # Modules
//!
//! - [`features`]: Feature transforms
//! - [`dtw`]: DTW distance
//! - [`recog`]: Training and recognition
//! - [`model`]: Binary model file
//! - [`meta`]: Training metadata side-car
//! - [`config`]: Training and recognition options

pub mod config;
pub mod dtw;
mod error;
pub mod features;
pub mod meta;
pub mod model;
pub mod recog;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use config::{RecognizerConfig, TrainOptions};
pub use features::{FeatureKind, MAX_FRAME_WIDTH};
pub use meta::TrainingMeta;
pub use model::{Model, ModelSummary};
pub use recog::{Candidate, TrainingSet, recognize, train};

// Re-export core for convenience
pub use inkmatch_core;
