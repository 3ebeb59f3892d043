// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types shared by both exercises. Nothing in here
// touches Burn, the filesystem, or jieba.
//
//   sample.rs       — VectorSample (exercise 1), SegmentSample
//                     (exercise 2), one-hot and argmax helpers
//   segmentation.rs — boundary labelling and rendering of
//                     predicted boundaries back into text
//   traits.rs       — WordSplitter, the seam the weak labeller
//                     plugs into

pub mod sample;

pub mod segmentation;

pub mod traits;
