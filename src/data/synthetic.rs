// ============================================================
// Layer 4 — Synthetic Classification Data
// ============================================================
// Every sample is `input_size` uniform draws from [0, 1).
// The class is the position of the largest draw, so a perfect
// model just has to learn argmax.
//
// The RNG is passed in so training can be made reproducible
// with a seed, and tests can pin exact values.

use rand::Rng;

use crate::domain::sample::VectorSample;

/// Draw one sample.
pub fn build_sample<R: Rng + ?Sized>(
    rng:         &mut R,
    input_size:  usize,
    num_classes: usize,
) -> VectorSample {
    let features: Vec<f32> = (0..input_size).map(|_| rng.gen::<f32>()).collect();
    VectorSample::new(features, num_classes)
}

/// Draw `total` independent samples.
pub fn build_dataset<R: Rng + ?Sized>(
    rng:         &mut R,
    total:       usize,
    input_size:  usize,
    num_classes: usize,
) -> Vec<VectorSample> {
    (0..total)
        .map(|_| build_sample(rng, input_size, num_classes))
        .collect()
}

/// Sum of one-hot labels per class, i.e. how many samples of
/// each class the set contains.
pub fn class_totals(samples: &[VectorSample], num_classes: usize) -> Vec<usize> {
    let mut totals = vec![0usize; num_classes];
    for s in samples {
        let idx = s.class_index();
        if idx < num_classes {
            totals[idx] += 1;
        }
    }
    totals
}
