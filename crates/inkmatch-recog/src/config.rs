//! Training and recognition configuration
//!
//! Configuration is an explicit value passed to `train`, `Model::open` and
//! (through the model) `recognize`; there is no process-wide default state,
//! so models trained with different settings can be used side by side.
//!
//! Both option sets round-trip through the [`TrainingMeta`] side-car.

use crate::error::{RecogError, RecogResult};
use crate::features::FeatureKind;
use crate::meta::TrainingMeta;

/// Meta key of the feature transform name
pub const OPT_FEATURE: &str = "feature";
/// Meta key of the downsampling distance threshold
pub const OPT_DOWNSAMPLE_THRESHOLD: &str = "downsample_threshold";
/// Meta key of the template upsampling distance threshold
pub const OPT_UPSAMPLE_THRESHOLD: &str = "upsample_threshold";

/// Default downsampling threshold, in canvas units
pub const DEFAULT_DOWNSAMPLE_THRESHOLD: u32 = 50;

/// Default template upsampling threshold, in canvas units
pub const DEFAULT_UPSAMPLE_THRESHOLD: u32 = 50;

/// Smallest upsampling threshold whose gap bound holds on the integer grid
pub const MIN_UPSAMPLE_THRESHOLD: u32 = 2;

/// Preprocessing options used while training a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainOptions {
    /// Feature transform for every sample
    pub feature: FeatureKind,
    /// Points closer than this to the last kept point are dropped
    pub downsample_threshold: u32,
    /// Selected templates get points inserted so no gap exceeds this;
    /// at least [`MIN_UPSAMPLE_THRESHOLD`]
    pub upsample_threshold: u32,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            feature: FeatureKind::default(),
            downsample_threshold: DEFAULT_DOWNSAMPLE_THRESHOLD,
            upsample_threshold: DEFAULT_UPSAMPLE_THRESHOLD,
        }
    }
}

impl TrainOptions {
    /// Read options from metadata, falling back to defaults for absent keys.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidOption`] for an unknown feature name, a
    /// downsampling threshold that is not a positive integer, or an
    /// upsampling threshold below [`MIN_UPSAMPLE_THRESHOLD`].
    pub fn from_meta(meta: &TrainingMeta) -> RecogResult<Self> {
        let defaults = Self::default();
        let feature = match meta.get(OPT_FEATURE) {
            Some(name) => FeatureKind::from_name(name)?,
            None => defaults.feature,
        };
        Ok(Self {
            feature,
            downsample_threshold: threshold_option(
                meta,
                OPT_DOWNSAMPLE_THRESHOLD,
                defaults.downsample_threshold,
                1,
            )?,
            upsample_threshold: threshold_option(
                meta,
                OPT_UPSAMPLE_THRESHOLD,
                defaults.upsample_threshold,
                MIN_UPSAMPLE_THRESHOLD,
            )?,
        })
    }

    /// Record the options in metadata.
    pub fn write_to_meta(&self, meta: &mut TrainingMeta) {
        meta.set(OPT_FEATURE, self.feature.name());
        meta.set(OPT_DOWNSAMPLE_THRESHOLD, self.downsample_threshold.to_string());
        meta.set(OPT_UPSAMPLE_THRESHOLD, self.upsample_threshold.to_string());
    }
}

/// Options a recognizer needs beyond what the model header records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecognizerConfig {
    /// Feature transform the model was trained with
    pub feature: FeatureKind,
}

impl RecognizerConfig {
    /// Create a configuration for the given transform.
    pub fn new(feature: FeatureKind) -> Self {
        Self { feature }
    }

    /// Read the configuration recorded in a model's side-car.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidOption`] for an unknown feature name.
    pub fn from_meta(meta: &TrainingMeta) -> RecogResult<Self> {
        let feature = match meta.get(OPT_FEATURE) {
            Some(name) => FeatureKind::from_name(name)?,
            None => FeatureKind::default(),
        };
        Ok(Self { feature })
    }
}

impl From<&TrainOptions> for RecognizerConfig {
    fn from(options: &TrainOptions) -> Self {
        Self {
            feature: options.feature,
        }
    }
}

fn threshold_option(meta: &TrainingMeta, key: &str, default: u32, min: u32) -> RecogResult<u32> {
    let Some(raw) = meta.get(key) else {
        return Ok(default);
    };
    match raw.parse::<u32>() {
        Ok(v) if v >= min => Ok(v),
        _ => Err(RecogError::InvalidOption {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}
