// ============================================================
// Layer 3 — Sample Types
// ============================================================
// Exercise 1 samples are dense float vectors whose class is the
// position of their largest element. Exercise 2 samples are
// fixed-length character id sequences with one label per slot.

use serde::{Deserialize, Serialize};

/// Input id used to fill short character sequences.
pub const PAD_ID: u32 = 0;

/// Label value excluded from the segmentation loss and accuracy.
pub const IGNORE_LABEL: i64 = -100;

/// A vector with a single 1.0 at `index`.
///
/// # Panics
/// Panics if `index >= len`.
pub fn one_hot(len: usize, index: usize) -> Vec<f32> {
    assert!(index < len, "one-hot index {index} out of range for length {len}");
    let mut v = vec![0.0; len];
    v[index] = 1.0;
    v
}

/// Index of the first maximum, `None` for an empty slice.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// One synthetic classification example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSample {
    pub features: Vec<f32>,
    /// One-hot over the classes, hot at the argmax of `features`
    pub label: Vec<f32>,
}

impl VectorSample {
    /// Build a sample whose label is derived from its own features.
    ///
    /// # Panics
    /// Panics if `features` is empty or its argmax is not a
    /// valid class index.
    pub fn new(features: Vec<f32>, num_classes: usize) -> Self {
        let Some(hot) = argmax(&features) else {
            panic!("features must not be empty");
        };
        let label = one_hot(num_classes, hot);
        Self { features, label }
    }

    pub fn class_index(&self) -> usize {
        argmax(&self.label).unwrap_or_default()
    }
}

/// One padded segmentation example.
/// Both vectors always have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSample {
    pub input_ids: Vec<u32>,
    pub labels:    Vec<i64>,
}

impl SegmentSample {
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Number of positions tagged as a word end.
    pub fn boundary_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }
}
