// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// One use case per subcommand. Each owns its config, wires the
// data, ml and infra layers together, and returns a result for
// the CLI to print. No model math here.

// Exercise 1: train + evaluate the synthetic classifier
pub mod classify_use_case;

// Exercise 2: fine-tune the BERT segmenter
pub mod segment_train_use_case;

// Exercise 2: segment sentences with a trained checkpoint
pub mod segment_predict_use_case;
