//! Type definitions for training and recognition

use inkmatch_core::{LabelledSample, Writing};

/// A recognition candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Label of the matched template
    pub label: char,
    /// DTW distance between the input and the template (smaller is closer)
    pub distance: f32,
}

/// All training samples of one label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGroup {
    pub label: char,
    pub samples: Vec<Writing>,
}

/// Training samples grouped by label
///
/// Labels keep the order in which they were first added; samples keep
/// their insertion order within a label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    groups: Vec<LabelGroup>,
}

impl TrainingSet {
    /// Create an empty training set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a training set from labelled samples.
    pub fn from_samples(samples: impl IntoIterator<Item = LabelledSample>) -> Self {
        let mut set = Self::new();
        for sample in samples {
            set.push(sample);
        }
        set
    }

    /// Add a labelled sample.
    pub fn push(&mut self, sample: LabelledSample) {
        self.add(sample.label, sample.writing);
    }

    /// Add a writing under a label.
    pub fn add(&mut self, label: char, writing: Writing) {
        match self.groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.samples.push(writing),
            None => self.groups.push(LabelGroup {
                label,
                samples: vec![writing],
            }),
        }
    }

    /// Per-label sample groups, in first-occurrence order.
    pub fn groups(&self) -> &[LabelGroup] {
        &self.groups
    }

    /// Distinct labels, in first-occurrence order.
    pub fn labels(&self) -> Vec<char> {
        self.groups.iter().map(|g| g.label).collect()
    }

    /// Samples of one label.
    pub fn samples(&self, label: char) -> Option<&[Writing]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.samples.as_slice())
    }

    /// Number of distinct labels
    pub fn label_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.samples.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<LabelledSample> for TrainingSet {
    fn from_iter<I: IntoIterator<Item = LabelledSample>>(iter: I) -> Self {
        Self::from_samples(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkmatch_core::Stroke;

    fn sample(label: char, x: i32) -> LabelledSample {
        let stroke = Stroke::from_coords(&[(x, 0), (x, 100)]).unwrap();
        LabelledSample::new(label, Writing::from_strokes(vec![stroke]))
    }

    #[test]
    fn test_grouping_order() {
        let set: TrainingSet = vec![
            sample('b', 1),
            sample('a', 2),
            sample('b', 3),
            sample('c', 4),
            sample('a', 5),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.labels(), vec!['b', 'a', 'c']);
        assert_eq!(set.label_count(), 3);
        assert_eq!(set.len(), 5);

        let b = set.samples('b').unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(b[1].strokes()[0].points()[0].x, 3);
        assert!(set.samples('z').is_none());
    }

    #[test]
    fn test_empty_set() {
        let set = TrainingSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.labels().is_empty());
    }
}
