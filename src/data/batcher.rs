// ============================================================
// Layer 4 — Batchers
// ============================================================
// Implements Burn's Batcher trait for both sample types.
//
//   VectorBatcher:  N × VectorSample  → features [N, input]
//                                       targets  [N, classes]
//   SegmentBatcher: N × SegmentSample → input_ids [N, S]
//                                       labels    [N, S]
//
// Samples are flattened row-major and reshaped, which is only
// valid because every sample in a set has the same length
// (synthetic vectors are fixed-size, segment samples are
// pre-padded).
//
// The batchers hold no state; the DataLoader hands each call
// the device the batch belongs on.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::{SegmentSample, VectorSample};

// ─── Exercise 1 ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct VectorBatch<B: Backend> {
    /// [batch_size, input_size]
    pub features: Tensor<B, 2>,
    /// One-hot labels, [batch_size, num_classes]
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug, Default)]
pub struct VectorBatcher;

impl<B: Backend> Batcher<B, VectorSample, VectorBatch<B>> for VectorBatcher {
    fn batch(&self, items: Vec<VectorSample>, device: &B::Device) -> VectorBatch<B> {
        let batch_size  = items.len();
        let input_size  = items[0].features.len();
        let num_classes = items[0].label.len();

        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();
        let targets_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.label.iter().copied())
            .collect();

        let features = Tensor::<B, 1>::from_floats(features_flat.as_slice(), device)
            .reshape([batch_size, input_size]);
        let targets = Tensor::<B, 1>::from_floats(targets_flat.as_slice(), device)
            .reshape([batch_size, num_classes]);

        VectorBatch { features, targets }
    }
}

// ─── Exercise 2 ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct SegmentBatch<B: Backend> {
    /// Character ids, [batch_size, max_length]
    pub input_ids: Tensor<B, 2, Int>,
    /// 0, 1 or IGNORE_LABEL, [batch_size, max_length]
    pub labels: Tensor<B, 2, Int>,
}

#[derive(Clone, Debug, Default)]
pub struct SegmentBatcher;

impl<B: Backend> Batcher<B, SegmentSample, SegmentBatch<B>> for SegmentBatcher {
    fn batch(&self, items: Vec<SegmentSample>, device: &B::Device) -> SegmentBatch<B> {
        let batch_size = items.len();
        let seq_len    = items[0].input_ids.len();

        let ids_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();
        let labels_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.labels.iter().map(|&x| x as i32))
            .collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(ids_flat.as_slice(), device)
            .reshape([batch_size, seq_len]);
        let labels = Tensor::<B, 1, Int>::from_ints(labels_flat.as_slice(), device)
            .reshape([batch_size, seq_len]);

        SegmentBatch { input_ids, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::IGNORE_LABEL;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_vector_batch_shapes() {
        let items = vec![
            VectorSample::new(vec![0.9, 0.1, 0.2, 0.3, 0.4], 5),
            VectorSample::new(vec![0.1, 0.2, 0.3, 0.4, 0.95], 5),
            VectorSample::new(vec![0.1, 0.8, 0.3, 0.4, 0.5], 5),
        ];
        let batch: VectorBatch<TestBackend> = VectorBatcher.batch(items, &Default::default());
        assert_eq!(batch.features.dims(), [3, 5]);
        assert_eq!(batch.targets.dims(), [3, 5]);

        let targets = batch.targets.into_data().to_vec::<f32>().unwrap();
        assert_eq!(&targets[5..10], &[0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_segment_batch_keeps_ignore_label() {
        let items = vec![
            SegmentSample { input_ids: vec![4, 5, 0], labels: vec![0, 1, IGNORE_LABEL] },
            SegmentSample { input_ids: vec![6, 7, 8], labels: vec![1, 0, 1] },
        ];
        let batch: SegmentBatch<TestBackend> = SegmentBatcher.batch(items, &Default::default());
        assert_eq!(batch.input_ids.dims(), [2, 3]);

        let labels: Vec<i64> = batch.labels
            .into_data()
            .iter::<i64>()
            .collect();
        assert_eq!(labels, vec![0, 1, -100, 1, 0, 1]);
    }
}
