// ============================================================
// Layer 2 — SegmentPredictUseCase
// ============================================================
// Rebuilds the segmenter from a checkpoint directory and runs
// it over each input sentence. The vocabulary comes from the
// path recorded at training time unless one is given.

use anyhow::Result;
use std::path::PathBuf;

use crate::application::segment_train_use_case::{SegmentTrainConfig, SEGMENT_TRAIN_CONFIG_FILE};
use crate::data::vocab::Vocab;
use crate::infra::{
    checkpoint::CheckpointManager,
    device::{init_device, InferBackend},
};
use crate::ml::inferencer::SegmentInferencer;

/// Sentences segmented when none are given on the command line.
pub const DEMO_SENTENCES: [&str; 4] = [
    "同时国内有望出台新汽车刺激方案",
    "沪胶后市有望延续强势",
    "经过两个交易日的强势调整后",
    "昨日上海天然橡胶期货价格再度大幅上扬",
];

#[derive(Debug, Clone)]
pub struct SegmentPredictConfig {
    pub checkpoint_dir: String,
    pub vocab_path:     Option<String>,
}

pub struct SegmentPredictUseCase {
    inferencer: SegmentInferencer<InferBackend>,
}

impl SegmentPredictUseCase {
    pub fn new(config: SegmentPredictConfig) -> Result<Self> {
        let ckpt = CheckpointManager::new(&config.checkpoint_dir);

        let vocab_path = match &config.vocab_path {
            Some(p) => PathBuf::from(p),
            None    => ckpt
                .load_config::<SegmentTrainConfig>(SEGMENT_TRAIN_CONFIG_FILE)?
                .resolved_vocab_path(),
        };
        let vocab = Vocab::load(vocab_path)?;

        let device     = init_device();
        let inferencer = SegmentInferencer::from_checkpoint(&ckpt, vocab, &device)?;
        Ok(Self { inferencer })
    }

    /// One segmented line per input, in order.
    pub fn segment_all<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Vec<String>> {
        inputs
            .iter()
            .map(|s| self.inferencer.segment(s.as_ref()))
            .collect()
    }
}
