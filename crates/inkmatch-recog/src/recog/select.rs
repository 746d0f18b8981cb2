//! Template selection
//!
//! Each label is represented in the model by exactly one of its samples,
//! the DTW medoid: the sample whose summed distance to every other sample
//! of the label is smallest.

use inkmatch_core::Writing;
use tracing::debug;

use crate::dtw;
use crate::error::RecogResult;
use crate::features::{FeatureKind, MAX_FRAME_WIDTH, extract};

/// Pick the representative sample of one label.
///
/// Samples are expected to be preprocessed already. Writings without
/// strokes are ignored. With one or two usable samples the first one is
/// returned, since a medoid of two is not meaningful. Ties are broken by
/// sample order.
///
/// # Errors
///
/// Only fails if the DTW distance rejects the extracted sequences, which
/// cannot happen for sequences produced by [`extract`].
pub fn select(samples: &[Writing], kind: FeatureKind) -> RecogResult<Option<&Writing>> {
    Ok(select_index(samples, kind)?.map(|i| &samples[i]))
}

/// Same as [`select`], returning the index of the chosen sample.
pub fn select_index(samples: &[Writing], kind: FeatureKind) -> RecogResult<Option<usize>> {
    let usable: Vec<usize> = (0..samples.len())
        .filter(|&i| !samples[i].is_empty())
        .collect();

    match usable.len() {
        0 => return Ok(None),
        1 | 2 => return Ok(Some(usable[0])),
        _ => {}
    }

    let features: Vec<Vec<f32>> = usable.iter().map(|&i| extract(kind, &samples[i])).collect();
    let totals = pairwise_totals(&features)?;

    let mut best = 0;
    for (k, &total) in totals.iter().enumerate() {
        if total < totals[best] {
            best = k;
        }
    }

    debug!(
        candidates = usable.len(),
        chosen = usable[best],
        total = totals[best],
        "selected medoid"
    );
    Ok(Some(usable[best]))
}

/// Summed DTW distance from each sequence to all others.
///
/// Only the upper triangle of the `k x k` matrix is computed; the lower
/// triangle is mirrored from it.
fn pairwise_totals(features: &[Vec<f32>]) -> RecogResult<Vec<f32>> {
    let k = features.len();
    let mut matrix = vec![0.0f32; k * k];

    for i in 0..k {
        for j in (i + 1)..k {
            let d = dtw::distance(&features[i], &features[j], MAX_FRAME_WIDTH)?;
            matrix[i * k + j] = d;
            matrix[j * k + i] = d;
        }
    }

    Ok((0..k)
        .map(|i| matrix[i * k..(i + 1) * k].iter().sum())
        .collect())
}
