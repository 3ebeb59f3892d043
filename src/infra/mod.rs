// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by both exercises:
//
//   device.rs     — backend type aliases and device selection
//   checkpoint.rs — model weights (Burn CompactRecorder) and
//                   JSON configs next to them
//   pretrained.rs — imports HuggingFace BERT weights into the
//                   Burn encoder via burn-import
//   metrics.rs    — per-epoch CSV log and in-memory history
//
// Reference: Burn Book §5 (Records and Checkpointing)

/// Backend selection (wgpu or ndarray)
pub mod device;

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Pretrained BERT directory (config, vocab, weights)
pub mod pretrained;

/// Training metrics CSV logger
pub mod metrics;
