// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw inputs and tensor batches.
//
// Exercise 1 (classify):
//
//   rand RNG ──▶ synthetic ──▶ VectorDataset ──▶ VectorBatcher
//
// Exercise 2 (segment):
//
//   vocab.txt ──▶ Vocab ─────────────┐
//                                    ▼
//   corpus.txt ──▶ CorpusLoader ──▶ ids + jieba labels
//                                    │
//                                    ▼
//                                 padding ──▶ splitter
//                                    │
//                                    ▼
//                          SegmentDataset ──▶ SegmentBatcher
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Synthetic 5-d argmax samples
pub mod synthetic;

/// Character vocabulary loaded from vocab.txt
pub mod vocab;

/// jieba-backed word splitter and boundary labelling
pub mod labeler;

/// Fixed-length padding and truncation
pub mod padding;

/// Reads the segmentation corpus into padded samples
pub mod corpus;

/// Seeded shuffle + train/validation split
pub mod splitter;

/// Burn Dataset over in-memory samples
pub mod dataset;

/// Burn Batchers for both exercises
pub mod batcher;
