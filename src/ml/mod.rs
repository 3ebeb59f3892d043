// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here.
//
//   classifier.rs — exercise 1: Linear → sigmoid → Linear,
//                   softmax on the way out
//   bert.rs       — BERT encoder assembled from Burn layers,
//                   shaped to accept HuggingFace weights
//   segmenter.rs  — exercise 2: BERT + per-character 2-way head
//   loss.rs       — soft-target and masked cross entropy,
//                   masked accuracy
//   evaluator.rs  — per-epoch accuracy check for the classifier
//   trainer.rs    — both epoch loops
//   inferencer.rs — loads a segmenter checkpoint, segments text
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Devlin et al. (2019) BERT

pub mod classifier;

pub mod bert;

pub mod segmenter;

pub mod loss;

pub mod evaluator;

pub mod trainer;

pub mod inferencer;
