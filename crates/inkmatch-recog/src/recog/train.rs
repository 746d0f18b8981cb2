//! Model training
//!
//! Training turns a [`TrainingSet`] into a model file and its metadata
//! side-car:
//!
//! 1. every sample is normalized and downsampled,
//! 2. the medoid of each label's samples is selected,
//! 3. the medoid is upsampled and converted to a feature sequence,
//! 4. all templates are written, bucketed by stroke count.
//!
//! Labels that produce no usable template are skipped with a warning
//! rather than failing the whole run.

use std::path::{Path, PathBuf};

use inkmatch_core::Writing;
use tracing::{info, warn};

use crate::config::TrainOptions;
use crate::error::RecogResult;
use crate::features::extract;
use crate::meta::{META_PATH, TrainingMeta};
use crate::model::{Template, meta_path_for, write_model};
use crate::recog::select::select_index;
use crate::recog::types::{LabelGroup, TrainingSet};

/// Apply the preprocessing shared by training and recognition.
pub fn preprocess(writing: &mut Writing, downsample_threshold: u32) {
    writing.normalize();
    writing.downsample(downsample_threshold);
}

/// Build one template per label, in label order.
///
/// Labels without a usable sample are left out.
pub fn build_templates(set: &TrainingSet, options: &TrainOptions) -> Vec<Template> {
    set.groups()
        .iter()
        .filter_map(|group| match build_template(group, options) {
            Ok(Some(template)) => Some(template),
            Ok(None) => {
                warn!(label = %group.label, "no usable samples, label skipped");
                None
            }
            Err(e) => {
                warn!(label = %group.label, error = %e, "template failed, label skipped");
                None
            }
        })
        .collect()
}

fn build_template(group: &LabelGroup, options: &TrainOptions) -> RecogResult<Option<Template>> {
    let samples: Vec<Writing> = group
        .samples
        .iter()
        .map(|w| {
            let mut w = w.clone();
            preprocess(&mut w, options.downsample_threshold);
            w
        })
        .collect();

    let Some(index) = select_index(&samples, options.feature)? else {
        return Ok(None);
    };

    let mut chosen = samples[index].clone();
    chosen.upsample(options.upsample_threshold)?;

    Ok(Some(Template {
        label: group.label,
        stroke_count: chosen.stroke_count() as u32,
        features: extract(options.feature, &chosen),
    }))
}

/// Train a model and write it to `output_path`.
///
/// Preprocessing options are read from `meta` (see
/// [`TrainOptions::from_meta`]). The side-car is written next to the model
/// as `<output_path>.meta`, holding the input metadata plus the model file
/// name and the effective options.
///
/// Returns the paths of the model file and of its side-car.
///
/// # Errors
///
/// - [`RecogError::Config`](crate::RecogError::Config) if `name` or
///   `shortname` is missing from `meta`
/// - [`RecogError::InvalidOption`](crate::RecogError::InvalidOption) for an
///   unsupported option value
/// - I/O errors while writing either file
pub fn train(
    set: &TrainingSet,
    meta: &TrainingMeta,
    output_path: impl AsRef<Path>,
) -> RecogResult<(PathBuf, PathBuf)> {
    meta.validate()?;
    let options = TrainOptions::from_meta(meta)?;

    let model_path = output_path.as_ref().to_path_buf();
    let templates = build_templates(set, &options);
    let summary = write_model(
        &templates,
        options.feature.dimension() as u32,
        options.downsample_threshold,
        &model_path,
    )?;

    let mut out_meta = meta.clone();
    if let Some(file_name) = model_path.file_name() {
        out_meta.set(META_PATH, file_name.to_string_lossy());
    }
    options.write_to_meta(&mut out_meta);
    let meta_path = meta_path_for(&model_path);
    out_meta.write_to_file(&meta_path)?;

    info!(
        model = %model_path.display(),
        labels = set.label_count(),
        samples = set.len(),
        templates = summary.template_count,
        groups = summary.group_count,
        skipped = set.label_count() - templates.len() + summary.skipped,
        feature = %options.feature,
        "trained model"
    );

    Ok((model_path, meta_path))
}
