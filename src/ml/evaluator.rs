// ============================================================
// Layer 5 — Classifier Evaluation
// ============================================================
// Runs after every epoch on a freshly drawn sample set, so the
// score reflects generalisation rather than memorisation.
//
// Logged per call:
//   actual totals    — how many samples of each class there are
//   predicted totals — per-class sum of predicted probabilities
//
// Accuracy is argmax(prediction) == argmax(label).

use anyhow::{anyhow, Result};
use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::{
    batcher::{VectorBatch, VectorBatcher},
    synthetic::class_totals,
};
use crate::domain::sample::{argmax, VectorSample};
use crate::ml::classifier::Classifier;

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub correct:          usize,
    pub wrong:            usize,
    pub actual_totals:    Vec<usize>,
    pub predicted_totals: Vec<f32>,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        let total = self.correct + self.wrong;
        if total == 0 { 0.0 } else { self.correct as f64 / total as f64 }
    }
}

/// Score `model` on `samples` without tracking gradients.
/// Pass a model obtained via `.valid()` when training.
pub fn evaluate_classifier<B: Backend>(
    model:   &Classifier<B>,
    samples: &[VectorSample],
    device:  &B::Device,
) -> Result<Evaluation> {
    // Linear weights are [d_input, d_output]
    let num_classes = model.linear2.weight.val().dims()[1];
    let actual_totals = class_totals(samples, num_classes);

    if samples.is_empty() {
        return Ok(Evaluation {
            correct: 0,
            wrong: 0,
            actual_totals,
            predicted_totals: vec![0.0; num_classes],
        });
    }

    let batch: VectorBatch<B> = VectorBatcher.batch(samples.to_vec(), device);
    let probs = model.forward(batch.features);

    let predicted_totals = probs
        .clone()
        .sum_dim(0)
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Cannot read predicted totals: {e:?}"))?;
    let probs = probs
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Cannot read predictions: {e:?}"))?;

    let mut correct = 0usize;
    for (row, sample) in probs.chunks(num_classes).zip(samples) {
        if argmax(row) == Some(sample.class_index()) {
            correct += 1;
        }
    }
    let wrong = samples.len() - correct;

    tracing::info!("Actual class totals: {:?}", actual_totals);
    tracing::info!("Predicted class totals: {:?}", predicted_totals);

    Ok(Evaluation { correct, wrong, actual_totals, predicted_totals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::ClassifierConfig;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_counts_add_up() {
        let device = Default::default();
        let model: Classifier<TestBackend> = ClassifierConfig::new().init(&device);
        let samples = vec![
            VectorSample::new(vec![0.9, 0.1, 0.1, 0.1, 0.1], 5),
            VectorSample::new(vec![0.1, 0.9, 0.1, 0.1, 0.1], 5),
            VectorSample::new(vec![0.1, 0.1, 0.1, 0.1, 0.9], 5),
        ];

        let eval = evaluate_classifier(&model, &samples, &device).unwrap();
        assert_eq!(eval.correct + eval.wrong, 3);
        assert_eq!(eval.actual_totals, vec![1, 1, 0, 0, 1]);

        let prob_mass: f32 = eval.predicted_totals.iter().sum();
        assert!((prob_mass - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_set() {
        let device = Default::default();
        let model: Classifier<TestBackend> = ClassifierConfig::new().init(&device);
        let eval = evaluate_classifier(&model, &[], &device).unwrap();
        assert_eq!(eval.accuracy(), 0.0);
    }
}
