//! Reading and writing model files
//!
//! See the [module documentation](super) for the binary layout.

use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::RecognizerConfig;
use crate::error::{RecogError, RecogResult};
use crate::features::MAX_FRAME_WIDTH;
use crate::meta::{META_EXTENSION, TrainingMeta};
use crate::model::{
    GROUP_RECORD_SIZE, GroupEntry, HEADER_SIZE, MODEL_ALIGNMENT, MODEL_MAGIC, Model, ModelHeader,
    TEMPLATE_RECORD_SIZE, Template, TemplateEntry, align_up,
};

/// Maximum model file size in bytes.
const MAX_MODEL_SIZE: u64 = u32::MAX as u64;

/// Counts of what was written to a model file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSummary {
    pub template_count: usize,
    pub group_count: usize,
    /// Templates dropped because they had no usable feature data
    pub skipped: usize,
}

// ============================================================================
// Writing
// ============================================================================

/// Planned placement of one group in the output file.
struct GroupPlan<'a> {
    stroke_count: u32,
    offset: usize,
    templates: Vec<&'a Template>,
}

/// Serialize templates to a model file, creating its directory if needed.
///
/// # Errors
///
/// Returns [`RecogError::InvalidParameter`] if the model would not fit the
/// 32-bit offsets of the format, or an I/O error.
pub fn write_model(
    templates: &[Template],
    feature_dimension: u32,
    downsample_threshold: u32,
    path: impl AsRef<Path>,
) -> RecogResult<ModelSummary> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    let summary =
        write_model_to_writer(templates, feature_dimension, downsample_threshold, &mut writer)?;
    writer.flush()?;
    Ok(summary)
}

/// Serialize templates to a writer.
///
/// Templates are grouped by stroke count (ascending) and, within a group,
/// ordered by ascending feature length; input order breaks ties. Templates
/// with no frames are skipped with a warning.
pub fn write_model_to_writer(
    templates: &[Template],
    feature_dimension: u32,
    downsample_threshold: u32,
    writer: &mut impl Write,
) -> RecogResult<ModelSummary> {
    let mut kept: Vec<&Template> = Vec::with_capacity(templates.len());
    for t in templates {
        if t.features.is_empty() || t.features.len() % MAX_FRAME_WIDTH != 0 {
            warn!(
                label = %t.label,
                scalars = t.features.len(),
                "skipping template without usable feature data"
            );
            continue;
        }
        kept.push(t);
    }
    let skipped = templates.len() - kept.len();

    kept.sort_by_key(|t| (t.stroke_count, t.features.len()));

    let mut plans: Vec<GroupPlan<'_>> = Vec::new();
    for t in kept.iter().copied() {
        match plans.last_mut() {
            Some(plan) if plan.stroke_count == t.stroke_count => plan.templates.push(t),
            _ => plans.push(GroupPlan {
                stroke_count: t.stroke_count,
                offset: 0,
                templates: vec![t],
            }),
        }
    }

    let table_end =
        HEADER_SIZE + kept.len() * TEMPLATE_RECORD_SIZE + plans.len() * GROUP_RECORD_SIZE;
    let data_start = align_up(table_end);
    let mut cursor = data_start;
    for plan in &mut plans {
        plan.offset = cursor;
        cursor += plan
            .templates
            .iter()
            .map(|t| t.features.len() * std::mem::size_of::<f32>())
            .sum::<usize>();
    }
    if cursor as u64 > MAX_MODEL_SIZE {
        return Err(RecogError::InvalidParameter(format!(
            "model of {cursor} bytes exceeds the 32-bit offset range"
        )));
    }

    // Header
    for value in [
        MODEL_MAGIC,
        kept.len() as u32,
        plans.len() as u32,
        feature_dimension,
        downsample_threshold,
    ] {
        writer.write_all(&value.to_le_bytes())?;
    }

    // Template table, in group order
    for plan in &plans {
        for t in &plan.templates {
            writer.write_all(&(t.label as u32).to_le_bytes())?;
            writer.write_all(&(t.frame_count() as u32).to_le_bytes())?;
        }
    }

    // Group table
    for plan in &plans {
        for value in [
            plan.stroke_count,
            plan.templates.len() as u32,
            plan.offset as u32,
            0,
        ] {
            writer.write_all(&value.to_le_bytes())?;
        }
    }

    writer.write_all(&vec![0u8; data_start - table_end])?;

    // Vector data
    for plan in &plans {
        for t in &plan.templates {
            for value in &t.features {
                writer.write_all(&value.to_le_bytes())?;
            }
        }
    }

    Ok(ModelSummary {
        template_count: kept.len(),
        group_count: plans.len(),
        skipped,
    })
}

// ============================================================================
// Reading
// ============================================================================

impl Model {
    /// Open a model file.
    ///
    /// If a `<path>.meta` side-car exists, the transform it records must be
    /// `config.feature`.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Load`] if the file is missing, truncated,
    /// carries the wrong magic number, has inconsistent tables, was built
    /// with a feature dimension other than `config.feature`'s, or its
    /// side-car names another transform.
    pub fn open(path: impl AsRef<Path>, config: &RecognizerConfig) -> RecogResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| RecogError::Load(format!("cannot open {}: {e}", path.display())))?;

        let mut data = Vec::new();
        BufReader::new(file)
            .take(MAX_MODEL_SIZE + 1)
            .read_to_end(&mut data)
            .map_err(|e| RecogError::Load(format!("cannot read {}: {e}", path.display())))?;
        if data.len() as u64 > MAX_MODEL_SIZE {
            return Err(RecogError::Load(format!(
                "{} exceeds the maximum model size",
                path.display()
            )));
        }

        let model = Self::from_bytes(&data, config)?;
        check_side_car_feature(path, config)?;
        debug!(
            path = %path.display(),
            templates = model.templates.len(),
            groups = model.groups.len(),
            feature = %config.feature,
            "loaded model"
        );
        Ok(model)
    }

    /// Open the model described by a metadata side-car.
    ///
    /// The model path is the side-car's `path` entry, resolved against the
    /// side-car's directory, or the side-car path without its `.meta`
    /// extension if the entry is absent. The feature transform comes from
    /// the side-car as well.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Load`] if the side-car cannot be read,
    /// [`RecogError::InvalidOption`] for an unknown feature name, and any
    /// error of [`Model::open`].
    pub fn open_from_meta(meta_path: impl AsRef<Path>) -> RecogResult<Self> {
        let meta_path = meta_path.as_ref();
        let meta = TrainingMeta::read_from_file(meta_path).map_err(|e| {
            RecogError::Load(format!("cannot read {}: {e}", meta_path.display()))
        })?;
        let config = RecognizerConfig::from_meta(&meta)?;
        let model_path = resolve_model_path(meta_path, &meta);
        Self::open(model_path, &config)
    }

    /// Parse a model from an in-memory file image.
    ///
    /// # Errors
    ///
    /// Same as [`Model::open`], minus the file access.
    pub fn from_bytes(data: &[u8], config: &RecognizerConfig) -> RecogResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(RecogError::Load(format!(
                "model truncated: {} bytes is shorter than the header",
                data.len()
            )));
        }

        let magic = read_u32(data, 0);
        if magic != MODEL_MAGIC {
            return Err(RecogError::Load(format!(
                "bad magic number {magic:#010x}, expected {MODEL_MAGIC:#010x}"
            )));
        }

        let header = ModelHeader {
            template_count: read_u32(data, 4),
            group_count: read_u32(data, 8),
            feature_dimension: read_u32(data, 12),
            downsample_threshold: read_u32(data, 16),
        };
        if header.feature_dimension as usize != config.feature.dimension() {
            return Err(RecogError::Load(format!(
                "model feature dimension {} does not match transform '{}' of dimension {}",
                header.feature_dimension,
                config.feature,
                config.feature.dimension()
            )));
        }

        let ntemplates = header.template_count as usize;
        let ngroups = header.group_count as usize;
        let table_end = ntemplates
            .checked_mul(TEMPLATE_RECORD_SIZE)
            .and_then(|t| t.checked_add(ngroups.checked_mul(GROUP_RECORD_SIZE)?))
            .and_then(|t| t.checked_add(HEADER_SIZE))
            .ok_or_else(|| RecogError::Load("table sizes overflow".to_string()))?;
        let data_start = align_up(table_end);
        if data.len() < data_start {
            return Err(RecogError::Load(format!(
                "model truncated: tables need {data_start} bytes, file has {}",
                data.len()
            )));
        }

        let mut templates = Vec::with_capacity(ntemplates);
        for i in 0..ntemplates {
            let pos = HEADER_SIZE + i * TEMPLATE_RECORD_SIZE;
            let codepoint = read_u32(data, pos);
            let label = char::from_u32(codepoint).ok_or_else(|| {
                RecogError::Load(format!("template {i} has invalid codepoint {codepoint:#x}"))
            })?;
            templates.push(TemplateEntry {
                label,
                frame_count: read_u32(data, pos + 4),
            });
        }

        let groups_start = HEADER_SIZE + ntemplates * TEMPLATE_RECORD_SIZE;
        let mut groups = Vec::with_capacity(ngroups);
        let mut offsets = Vec::with_capacity(ntemplates);
        let mut first_template = 0usize;
        let mut prev_stroke_count = None;
        for g in 0..ngroups {
            let pos = groups_start + g * GROUP_RECORD_SIZE;
            let group = GroupEntry {
                stroke_count: read_u32(data, pos),
                template_count: read_u32(data, pos + 4),
                offset: read_u32(data, pos + 8),
                first_template,
            };

            if prev_stroke_count.is_some_and(|prev| prev >= group.stroke_count) {
                return Err(RecogError::Load(format!(
                    "group {g} breaks ascending stroke-count order"
                )));
            }
            prev_stroke_count = Some(group.stroke_count);

            let offset = group.offset as usize;
            if offset < data_start || offset % MODEL_ALIGNMENT != 0 {
                return Err(RecogError::Load(format!(
                    "group {g} has invalid data offset {offset}"
                )));
            }

            let end = first_template + group.template_count as usize;
            if end > ntemplates {
                return Err(RecogError::Load(format!(
                    "group {g} claims more templates than the table holds"
                )));
            }

            let mut cursor = offset;
            for entry in &templates[first_template..end] {
                offsets.push(cursor);
                cursor += entry.frame_count as usize * MODEL_ALIGNMENT;
            }
            if cursor > data.len() {
                return Err(RecogError::Load(format!(
                    "model truncated: group {g} data ends at {cursor}, file has {} bytes",
                    data.len()
                )));
            }

            first_template = end;
            groups.push(group);
        }
        if first_template != ntemplates {
            return Err(RecogError::Load(format!(
                "groups cover {first_template} of {ntemplates} templates"
            )));
        }

        let vector_data: Vec<f32> = data[data_start..]
            .chunks_exact(std::mem::size_of::<f32>())
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Model {
            header,
            templates,
            groups,
            offsets,
            data_start,
            data: vector_data,
            config: *config,
        })
    }
}

/// Side-car path for a model file (`<model>.meta`).
pub(crate) fn meta_path_for(model_path: &Path) -> PathBuf {
    let mut name = model_path.as_os_str().to_owned();
    name.push(".");
    name.push(META_EXTENSION);
    PathBuf::from(name)
}

/// Reject a model whose side-car records a different transform.
fn check_side_car_feature(model_path: &Path, config: &RecognizerConfig) -> RecogResult<()> {
    let meta_path = meta_path_for(model_path);
    if !meta_path.is_file() {
        return Ok(());
    }
    let meta = TrainingMeta::read_from_file(&meta_path)
        .map_err(|e| RecogError::Load(format!("cannot read {}: {e}", meta_path.display())))?;
    let trained = RecognizerConfig::from_meta(&meta).map_err(|e| {
        RecogError::Load(format!("{}: {e}", meta_path.display()))
    })?;
    if trained.feature != config.feature {
        return Err(RecogError::Load(format!(
            "model was trained with transform '{}', opened with '{}'",
            trained.feature, config.feature
        )));
    }
    Ok(())
}

fn resolve_model_path(meta_path: &Path, meta: &TrainingMeta) -> PathBuf {
    match meta.path() {
        Some(p) => {
            let p = Path::new(p);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                meta_path
                    .parent()
                    .map_or_else(|| p.to_path_buf(), |dir| dir.join(p))
            }
        }
        None => meta_path.with_extension(""),
    }
}

#[inline]
fn read_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}
