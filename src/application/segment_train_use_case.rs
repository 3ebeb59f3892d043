// ============================================================
// Layer 2 — SegmentTrainUseCase
// ============================================================
// Orchestrates the segmentation fine-tune:
//
//   Step 1: Read the pretrained BERT config      (Layer 6 - infra)
//   Step 2: Load the character vocabulary        (Layer 4 - data)
//   Step 3: Read + weakly label the corpus       (Layer 4 - data)
//   Step 4: Train / validation split             (Layer 4 - data)
//   Step 5: Save configs for inference           (Layer 6 - infra)
//   Step 6: Import pretrained weights, add head  (Layer 6 + 5)
//   Step 7: Run the training loop                (Layer 5 - ml)

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    corpus::CorpusLoader,
    dataset::SegmentDataset,
    labeler::JiebaSplitter,
    splitter::split_train_val,
    vocab::Vocab,
};
use crate::infra::{
    checkpoint::CheckpointManager,
    device::{init_device, TrainBackend},
    metrics::{MetricsHistory, MetricsLogger},
    pretrained::PretrainedDir,
};
use crate::ml::{
    segmenter::{Segmenter, SegmenterConfig},
    trainer::train_segmenter,
};

pub const SEGMENT_TRAIN_CONFIG_FILE: &str = "segment_train_config.json";
pub const SEGMENTER_MODEL_FILE: &str = "segmenter_model.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentTrainConfig {
    /// HF model directory: config.json, vocab.txt, weights
    pub pretrained_dir: String,
    /// Falls back to <pretrained_dir>/vocab.txt
    pub vocab_path:     Option<String>,
    pub corpus_path:    String,
    pub checkpoint_dir: String,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub max_length:     usize,
    pub lr:             f64,
    pub max_samples:    usize,
    pub train_fraction: f64,
    pub seed:           u64,
}

impl Default for SegmentTrainConfig {
    fn default() -> Self {
        Self {
            pretrained_dir: "../bert".to_string(),
            vocab_path:     None,
            corpus_path:    "corpus.txt".to_string(),
            checkpoint_dir: "checkpoints/segmenter".to_string(),
            epochs:         10,
            batch_size:     20,
            max_length:     20,
            lr:             1e-3,
            max_samples:    10_000,
            train_fraction: 1.0,
            seed:           42,
        }
    }
}

impl SegmentTrainConfig {
    pub fn resolved_vocab_path(&self) -> PathBuf {
        match &self.vocab_path {
            Some(p) => PathBuf::from(p),
            None    => PretrainedDir::new(&self.pretrained_dir).vocab_path(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size must be positive");
        ensure!(self.max_length > 0, "max_length must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.train_fraction) && self.train_fraction > 0.0,
            "train_fraction must be in (0, 1], got {}",
            self.train_fraction
        );
        Ok(())
    }
}

pub struct SegmentTrainUseCase {
    config: SegmentTrainConfig,
}

impl SegmentTrainUseCase {
    pub fn new(config: SegmentTrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<MetricsHistory> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Pretrained architecture ───────────────────────────────────
        let pretrained = PretrainedDir::new(&cfg.pretrained_dir);
        let bert_cfg   = pretrained.load_config()?;
        ensure!(
            cfg.max_length <= bert_cfg.max_position_embeddings,
            "max_length ({}) exceeds the encoder's {} positions",
            cfg.max_length, bert_cfg.max_position_embeddings
        );

        // ── Step 2: Vocabulary ───────────────────────────────────────────────
        let mut vocab = Vocab::load(cfg.resolved_vocab_path())?;
        vocab.restrict_to(bert_cfg.vocab_size)?;

        // ── Step 3: Corpus with jieba labels ─────────────────────────────────
        let splitter = JiebaSplitter::new();
        let samples  = CorpusLoader::new(&cfg.corpus_path, cfg.max_length, cfg.max_samples)
            .load(&vocab, &splitter)?;
        if samples.is_empty() {
            bail!("Corpus '{}' contains no sentences", cfg.corpus_path);
        }
        let boundaries: usize = samples.iter().map(|s| s.boundary_count()).sum();
        tracing::info!(
            "Corpus: {} sentences, {} word boundaries",
            samples.len(),
            boundaries
        );

        // ── Step 4: Split ────────────────────────────────────────────────────
        let (train_samples, val_samples) = split_train_val(samples, cfg.train_fraction, cfg.seed);
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(),
            val_samples.len()
        );

        // ── Step 5: Configs for inference ────────────────────────────────────
        let model_cfg    = SegmenterConfig::new(bert_cfg.clone());
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(SEGMENT_TRAIN_CONFIG_FILE, cfg)?;
        ckpt_manager.save_config(SEGMENTER_MODEL_FILE, &model_cfg)?;

        // ── Step 6: Model ────────────────────────────────────────────────────
        let device  = init_device();
        let encoder = pretrained.load_encoder::<TrainBackend>(&model_cfg.bert, &device)?;
        let model   = Segmenter::with_encoder(encoder, &model_cfg.bert, &device);

        // ── Step 7: Train ────────────────────────────────────────────────────
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;
        train_segmenter(
            cfg,
            model,
            SegmentDataset::new(train_samples),
            SegmentDataset::new(val_samples),
            &device,
            &ckpt_manager,
            &metrics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_defaults_to_pretrained_dir() {
        let cfg = SegmentTrainConfig::default();
        assert_eq!(cfg.resolved_vocab_path(), PathBuf::from("../bert/vocab.txt"));

        let cfg = SegmentTrainConfig { vocab_path: Some("v.txt".into()), ..Default::default() };
        assert_eq!(cfg.resolved_vocab_path(), PathBuf::from("v.txt"));
    }

    #[test]
    fn test_validate() {
        assert!(SegmentTrainConfig::default().validate().is_ok());
        let bad = SegmentTrainConfig { train_fraction: 0.0, ..Default::default() };
        assert!(bad.validate().is_err());
        let bad = SegmentTrainConfig { max_length: 0, ..Default::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_missing_pretrained_dir_fails_early() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SegmentTrainConfig {
            pretrained_dir: dir.path().join("nope").display().to_string(),
            checkpoint_dir: dir.path().join("ckpt").display().to_string(),
            ..Default::default()
        };
        assert!(SegmentTrainUseCase::new(cfg).execute().is_err());
    }
}
