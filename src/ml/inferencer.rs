// ============================================================
// Layer 5 — Segmentation Inferencer
// ============================================================
use anyhow::{bail, Result};
use burn::prelude::*;

use crate::application::segment_train_use_case::SEGMENTER_MODEL_FILE;
use crate::data::vocab::Vocab;
use crate::domain::segmentation::render_segmented;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::segmenter::{Segmenter, SegmenterConfig};

pub struct SegmentInferencer<B: Backend> {
    model:         Segmenter<B>,
    vocab:         Vocab,
    max_positions: usize,
    device:        B::Device,
}

impl<B: Backend> SegmentInferencer<B> {
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        mut vocab:    Vocab,
        device:       &B::Device,
    ) -> Result<Self> {
        let model_cfg: SegmenterConfig = ckpt_manager.load_config(SEGMENTER_MODEL_FILE)?;
        vocab.restrict_to(model_cfg.bert.vocab_size)?;

        let model: Segmenter<B> = model_cfg.init(device);
        let model = ckpt_manager.load_model(model, device)?;
        tracing::info!("Segmenter loaded from checkpoint");

        Ok(Self {
            model,
            vocab,
            max_positions: model_cfg.bert.max_position_embeddings,
            device: device.clone(),
        })
    }

    /// Predicted 0/1 tag per char of `text`.
    pub fn tags(&self, text: &str) -> Result<Vec<u8>> {
        let ids = self.vocab.sentence_to_sequence(text);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        if ids.len() > self.max_positions {
            bail!(
                "Input has {} characters, the encoder accepts at most {}",
                ids.len(),
                self.max_positions
            );
        }

        let flat: Vec<i32> = ids.iter().map(|&x| x as i32).collect();
        let input = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([1, ids.len()]);

        let tags = self.model.predict(input).into_iter().next().unwrap_or_default();
        tracing::debug!("tags for '{}': {:?}", text, tags);
        Ok(tags)
    }

    /// `text` with a space after every predicted word end.
    pub fn segment(&self, text: &str) -> Result<String> {
        let tags = self.tags(text)?;
        Ok(render_segmented(text, &tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::bert::tests::tiny_config;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn vocab() -> Vocab {
        Vocab::from_tokens(["[PAD]", "[UNK]", "我", "爱", "你"]).unwrap()
    }

    /// Untrained tiny segmenter written as a checkpoint.
    fn checkpoint(dir: &std::path::Path) -> CheckpointManager {
        let device = Default::default();
        let ckpt   = CheckpointManager::new(dir);
        let cfg    = SegmenterConfig::new(tiny_config());
        let model: Segmenter<TestBackend> = cfg.init(&device);
        ckpt.save_config(SEGMENTER_MODEL_FILE, &cfg).unwrap();
        ckpt.save_model(&model, 1).unwrap();
        ckpt
    }

    #[test]
    fn test_segment_keeps_every_char() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = checkpoint(dir.path());
        let inf  = SegmentInferencer::<TestBackend>::from_checkpoint(&ckpt, vocab(), &Default::default()).unwrap();

        let out = inf.segment("我爱你").unwrap();
        assert_eq!(out.replace(' ', ""), "我爱你");
        assert_eq!(inf.tags("我爱你").unwrap().len(), 3);
    }

    #[test]
    fn test_empty_text_segments_to_empty() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = checkpoint(dir.path());
        let inf  = SegmentInferencer::<TestBackend>::from_checkpoint(&ckpt, vocab(), &Default::default()).unwrap();
        assert_eq!(inf.segment("").unwrap(), "");
    }

    #[test]
    fn test_text_longer_than_positions_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = checkpoint(dir.path());
        let inf  = SegmentInferencer::<TestBackend>::from_checkpoint(&ckpt, vocab(), &Default::default()).unwrap();

        // tiny_config has 16 positions
        let err = inf.segment(&"我".repeat(17)).unwrap_err();
        assert!(err.to_string().contains("at most 16"), "{err}");
    }

    #[test]
    fn test_missing_model_config_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        assert!(SegmentInferencer::<TestBackend>::from_checkpoint(&ckpt, vocab(), &Default::default()).is_err());
    }
}
