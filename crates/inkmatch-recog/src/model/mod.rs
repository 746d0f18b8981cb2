//! Serialized template model
//!
//! A model file holds one template per label, bucketed by the stroke count
//! of the writing the template was taken from. All integers are `u32` and
//! all scalars `f32`, little-endian; offsets are byte offsets from the start
//! of the file.
//!
//! ```text
//! [0]  magic                    MODEL_MAGIC
//! [4]  template_count
//! [8]  group_count
//! [12] feature_dimension        logical scalars per frame
//! [16] downsample_threshold     used when the templates were built
//! template_count x { label_codepoint, frame_count }
//! group_count    x { stroke_count, group_template_count, group_offset, 0 }
//! zero padding up to a multiple of MODEL_ALIGNMENT
//! per group, per template: frame_count x MAX_FRAME_WIDTH f32
//! ```
//!
//! Groups are in ascending stroke-count order and, within a group,
//! templates are in ascending frame-count order. Every frame is
//! `MODEL_ALIGNMENT` bytes, so every template starts on an aligned offset
//! and can be viewed as a raw block of frames with no per-record parsing.

mod serial;

pub(crate) use serial::meta_path_for;
pub use serial::{ModelSummary, write_model, write_model_to_writer};

use crate::config::RecognizerConfig;
use crate::features::MAX_FRAME_WIDTH;

/// Magic number at offset 0 (`"WINK"` as little-endian bytes)
pub const MODEL_MAGIC: u32 = 0x4B4E_4957;

/// Header size in bytes
pub const HEADER_SIZE: usize = 20;

/// Size of one `{ label, frame_count }` record
pub const TEMPLATE_RECORD_SIZE: usize = 8;

/// Size of one `{ stroke_count, count, offset, pad }` record
pub const GROUP_RECORD_SIZE: usize = 16;

/// Alignment of the vector-data section and of every template in it
pub const MODEL_ALIGNMENT: usize = MAX_FRAME_WIDTH * std::mem::size_of::<f32>();

/// A selected template, ready to be serialized
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Character the template represents
    pub label: char,
    /// Stroke count of the writing the template was taken from
    pub stroke_count: u32,
    /// Padded feature sequence (`frames * MAX_FRAME_WIDTH` scalars)
    pub features: Vec<f32>,
}

impl Template {
    /// Number of frames in the feature sequence
    pub fn frame_count(&self) -> usize {
        self.features.len() / MAX_FRAME_WIDTH
    }
}

/// Fixed-size model header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHeader {
    pub template_count: u32,
    pub group_count: u32,
    /// Logical scalars per frame of the transform the model was built with
    pub feature_dimension: u32,
    /// Downsampling threshold applied to writings before extraction
    pub downsample_threshold: u32,
}

/// One entry of the flat template table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub label: char,
    pub frame_count: u32,
}

/// One entry of the group table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupEntry {
    pub stroke_count: u32,
    pub template_count: u32,
    /// Byte offset of the group's first template
    pub offset: u32,
    /// Index of the group's first template in the template table
    pub first_template: usize,
}

impl GroupEntry {
    /// Template-table indices belonging to this group
    pub fn template_range(&self) -> std::ops::Range<usize> {
        self.first_template..self.first_template + self.template_count as usize
    }
}

/// A loaded, read-only model.
///
/// The header and both tables are parsed eagerly; the vector-data section
/// is decoded once into a contiguous buffer and addressed by the byte
/// offsets recorded in the file. A `Model` is never mutated after loading
/// and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) header: ModelHeader,
    pub(crate) templates: Vec<TemplateEntry>,
    pub(crate) groups: Vec<GroupEntry>,
    /// Byte offset of every template, parallel to `templates`
    pub(crate) offsets: Vec<usize>,
    /// Byte offset of `data[0]` in the file
    pub(crate) data_start: usize,
    pub(crate) data: Vec<f32>,
    pub(crate) config: RecognizerConfig,
}

impl Model {
    pub fn header(&self) -> &ModelHeader {
        &self.header
    }

    /// Configuration the model was opened with
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Flat template table, in group order
    pub fn templates(&self) -> &[TemplateEntry] {
        &self.templates
    }

    /// Group table, in ascending stroke-count order
    pub fn groups(&self) -> &[GroupEntry] {
        &self.groups
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the model has no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Find the group whose templates have `stroke_count` strokes.
    pub fn group_for_stroke_count(&self, stroke_count: usize) -> Option<&GroupEntry> {
        let stroke_count = u32::try_from(stroke_count).ok()?;
        self.groups
            .binary_search_by_key(&stroke_count, |g| g.stroke_count)
            .ok()
            .map(|i| &self.groups[i])
    }

    /// Byte offset of a template's data in the model file.
    pub fn template_offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    /// Padded feature data of a template.
    pub fn template_data(&self, index: usize) -> Option<&[f32]> {
        let entry = self.templates.get(index)?;
        let offset = *self.offsets.get(index)?;
        let start = (offset - self.data_start) / std::mem::size_of::<f32>();
        let len = entry.frame_count as usize * MAX_FRAME_WIDTH;
        self.data.get(start..start + len)
    }
}

/// Round `offset` up to the next multiple of [`MODEL_ALIGNMENT`].
#[inline]
pub(crate) fn align_up(offset: usize) -> usize {
    offset.div_ceil(MODEL_ALIGNMENT) * MODEL_ALIGNMENT
}
