//! Template training and recognition
//!
//! # Overview
//!
//! The recognizer works by:
//! 1. Grouping labelled samples by character into a [`TrainingSet`]
//! 2. Selecting the DTW medoid of each label as its template
//! 3. Writing all templates to a model file bucketed by stroke count
//! 4. Ranking unknown writings against the templates of their bucket
//!
//! # Example
//!
//! ```no_run
//! use inkmatch_core::{Stroke, Writing};
//! use inkmatch_recog::meta::TrainingMeta;
//! use inkmatch_recog::model::Model;
//! use inkmatch_recog::recog::{TrainingSet, train};
//!
//! let stroke = Stroke::from_coords(&[(100, 500), (900, 500)]).unwrap();
//! let mut set = TrainingSet::new();
//! set.add('一', Writing::from_strokes(vec![stroke.clone()]));
//!
//! let meta = TrainingMeta::with_names("Kanji", "kj");
//! let (_, meta_path) = train(&set, &meta, "out/kanji.model").unwrap();
//!
//! let model = Model::open_from_meta(&meta_path).unwrap();
//! let best = model.recognize(&Writing::from_strokes(vec![stroke]), 5);
//! assert_eq!(best[0].label, '一');
//! ```

mod ident;
mod select;
mod train;
mod types;

pub use ident::*;
pub use select::*;
pub use train::*;
pub use types::*;
