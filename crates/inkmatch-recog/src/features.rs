//! Feature extraction
//!
//! Maps a preprocessed [`Writing`] to a flat `f32` sequence with one frame
//! per point, strokes concatenated in drawing order. Every frame is padded
//! with zeros to [`MAX_FRAME_WIDTH`] scalars regardless of the transform's
//! logical dimension, so frames lay out as fixed-size records both in memory
//! and in the model file.

use inkmatch_core::Writing;

use crate::error::{RecogError, RecogResult};

/// Storage width of one frame, in scalars
pub const MAX_FRAME_WIDTH: usize = 4;

/// Feature transform applied to every point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeatureKind {
    /// Raw coordinates `(x, y)`
    #[default]
    Xy,
    /// Absolute deltas to the previous point of the same stroke `(|dx|, |dy|)`
    Delta,
    /// Coordinates followed by deltas `(x, y, |dx|, |dy|)`
    XyDelta,
}

impl FeatureKind {
    /// Every available transform
    pub const ALL: [FeatureKind; 3] = [FeatureKind::Xy, FeatureKind::Delta, FeatureKind::XyDelta];

    /// Registry name of the transform
    pub fn name(&self) -> &'static str {
        match self {
            FeatureKind::Xy => "xy",
            FeatureKind::Delta => "delta",
            FeatureKind::XyDelta => "xy-delta",
        }
    }

    /// Look a transform up by its registry name.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidOption`] for an unknown name.
    pub fn from_name(name: &str) -> RecogResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| RecogError::InvalidOption {
                key: "feature".to_string(),
                value: name.to_string(),
            })
    }

    /// Logical number of scalars per point
    pub fn dimension(&self) -> usize {
        match self {
            FeatureKind::Xy => 2,
            FeatureKind::Delta => 2,
            FeatureKind::XyDelta => 4,
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extract the padded feature sequence of a writing.
///
/// The result holds `writing.point_count() * MAX_FRAME_WIDTH` scalars.
pub fn extract(kind: FeatureKind, writing: &Writing) -> Vec<f32> {
    let mut out = Vec::with_capacity(writing.point_count() * MAX_FRAME_WIDTH);

    for stroke in writing.strokes() {
        let mut prev = stroke.first();
        for p in stroke {
            let x = p.x as f32;
            let y = p.y as f32;
            let dx = (p.x - prev.x).abs() as f32;
            let dy = (p.y - prev.y).abs() as f32;

            let frame: [f32; MAX_FRAME_WIDTH] = match kind {
                FeatureKind::Xy => [x, y, 0.0, 0.0],
                FeatureKind::Delta => [dx, dy, 0.0, 0.0],
                FeatureKind::XyDelta => [x, y, dx, dy],
            };
            out.extend_from_slice(&frame);
            prev = p;
        }
    }

    out
}

/// Number of frames in a padded feature sequence.
#[inline]
pub fn frame_count(features: &[f32]) -> usize {
    features.len() / MAX_FRAME_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkmatch_core::Stroke;

    fn sample() -> Writing {
        Writing::from_strokes(vec![
            Stroke::from_coords(&[(10, 20), (13, 16)]).unwrap(),
            Stroke::from_coords(&[(100, 200)]).unwrap(),
        ])
    }

    #[test]
    fn test_feature_names() {
        for kind in FeatureKind::ALL {
            assert_eq!(FeatureKind::from_name(kind.name()).unwrap(), kind);
            assert!(kind.dimension() <= MAX_FRAME_WIDTH);
        }
        assert!(matches!(
            FeatureKind::from_name("curvature"),
            Err(RecogError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_extract_xy() {
        let f = extract(FeatureKind::Xy, &sample());
        assert_eq!(frame_count(&f), 3);
        assert_eq!(
            f,
            vec![10.0, 20.0, 0.0, 0.0, 13.0, 16.0, 0.0, 0.0, 100.0, 200.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_extract_delta_restarts_per_stroke() {
        let f = extract(FeatureKind::Delta, &sample());
        assert_eq!(
            f,
            vec![0.0, 0.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_extract_xy_delta() {
        let f = extract(FeatureKind::XyDelta, &sample());
        assert_eq!(&f[4..8], &[13.0, 16.0, 3.0, 4.0]);
    }

    #[test]
    fn test_extract_empty_writing() {
        assert!(extract(FeatureKind::Xy, &Writing::new()).is_empty());
    }
}
