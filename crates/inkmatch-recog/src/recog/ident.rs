//! Recognition against a loaded model
//!
//! The input is preprocessed the same way the templates were, then compared
//! by DTW distance against every template of the group with the same stroke
//! count. Templates with another stroke count are never considered.

use inkmatch_core::Writing;
use tracing::trace;

use crate::dtw;
use crate::features::{MAX_FRAME_WIDTH, extract};
use crate::model::Model;
use crate::recog::train::preprocess;
use crate::recog::types::Candidate;

/// Rank the templates closest to `writing`.
///
/// Returns at most `top_n` candidates in ascending distance order; equal
/// distances keep template order. An input whose stroke count has no
/// group in the model yields an empty list. The caller's writing is not
/// modified.
pub fn recognize(model: &Model, writing: &Writing, top_n: usize) -> Vec<Candidate> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut input = writing.clone();
    preprocess(&mut input, model.header().downsample_threshold);

    let Some(group) = model.group_for_stroke_count(input.stroke_count()) else {
        trace!(strokes = input.stroke_count(), "no template group for stroke count");
        return Vec::new();
    };

    let features = extract(model.config().feature, &input);

    let mut candidates: Vec<Candidate> = group
        .template_range()
        .filter_map(|i| {
            let entry = model.templates().get(i)?;
            let data = model.template_data(i)?;
            let distance =
                dtw::distance(&features, data, MAX_FRAME_WIDTH).unwrap_or(f32::INFINITY);
            Some(Candidate {
                label: entry.label,
                distance,
            })
        })
        .collect();

    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates.truncate(top_n);
    candidates
}

impl Model {
    /// Rank the templates closest to `writing`; see [`recognize`].
    pub fn recognize(&self, writing: &Writing, top_n: usize) -> Vec<Candidate> {
        recognize(self, writing, top_n)
    }
}
