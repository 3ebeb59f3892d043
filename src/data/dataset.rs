use burn::data::dataset::Dataset;

use crate::domain::sample::{SegmentSample, VectorSample};

/// Read-only in-memory dataset. Built once, never mutated.
pub struct SampleDataset<T> {
    samples: Vec<T>,
}

pub type VectorDataset  = SampleDataset<VectorSample>;
pub type SegmentDataset = SampleDataset<SegmentSample>;

impl<T> SampleDataset<T> {
    pub fn new(samples: Vec<T>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl<T> Dataset<T> for SampleDataset<T>
where
    T: Clone + Send + Sync,
{
    fn get(&self, index: usize) -> Option<T> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_clones_in_order() {
        let ds = SegmentDataset::new(vec![
            SegmentSample { input_ids: vec![3, 4], labels: vec![0, 1] },
            SegmentSample { input_ids: vec![5, 0], labels: vec![1, -100] },
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).map(|s| s.input_ids), Some(vec![5, 0]));
        assert!(ds.get(2).is_none());
    }
}
