// ============================================================
// Layer 6 — Pretrained BERT Directory
// ============================================================
// A HuggingFace-style model directory:
//
//   bert/
//     config.json            ← architecture
//     vocab.txt              ← one token per line
//     model.safetensors      ← weights (preferred)
//     pytorch_model.bin      ← weights (fallback)
//
// Weights go through burn-import's recorders with the PyTorch
// adapter, which transposes Linear weights and renames
// LayerNorm weight/bias to gamma/beta. The remap table below
// rewrites HF parameter paths onto ml::bert's field names.
// Keys with no counterpart (pooler, MLM head, position_ids)
// are ignored by the record deserialiser.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, Recorder},
};
use burn_import::{pytorch, safetensors};

use crate::ml::bert::{BertConfig, BertEncoder, BertEncoderRecord};

/// Applied in order to every tensor name in the weight file.
pub const KEY_REMAP: &[(&str, &str)] = &[
    (r"^bert\.", ""),
    // older checkpoints name LayerNorm params gamma/beta
    (r"\.gamma$", ".weight"),
    (r"\.beta$", ".bias"),
    (r"^encoder\.layer\.([0-9]+)\.attention\.self\.(query|key|value)", "layers.$1.attention.$2"),
    (r"^encoder\.layer\.([0-9]+)\.attention\.output\.dense", "layers.$1.attention.output"),
    (r"^encoder\.layer\.([0-9]+)\.attention\.output\.LayerNorm", "layers.$1.attention_norm"),
    (r"^encoder\.layer\.([0-9]+)\.intermediate\.dense", "layers.$1.intermediate"),
    (r"^encoder\.layer\.([0-9]+)\.output\.dense", "layers.$1.output"),
    (r"^encoder\.layer\.([0-9]+)\.output\.LayerNorm", "layers.$1.output_norm"),
    (r"^embeddings\.LayerNorm", "embeddings.layer_norm"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightsFile {
    Safetensors(PathBuf),
    PyTorch(PathBuf),
}

pub struct PretrainedDir {
    dir: PathBuf,
}

impl PretrainedDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }

    pub fn vocab_path(&self) -> PathBuf {
        self.dir.join("vocab.txt")
    }

    pub fn weights_file(&self) -> Result<WeightsFile> {
        let st = self.dir.join("model.safetensors");
        if st.exists() {
            return Ok(WeightsFile::Safetensors(st));
        }
        let pt = self.dir.join("pytorch_model.bin");
        if pt.exists() {
            return Ok(WeightsFile::PyTorch(pt));
        }
        bail!(
            "No model.safetensors or pytorch_model.bin in '{}'",
            self.dir.display()
        )
    }

    pub fn load_config(&self) -> Result<BertConfig> {
        let path = self.config_path();
        let cfg = BertConfig::from_hf_file(&path)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build the encoder described by `cfg` and fill it with the
    /// pretrained weights.
    pub fn load_encoder<B: Backend>(&self, cfg: &BertConfig, device: &B::Device) -> Result<BertEncoder<B>> {
        let weights = self.weights_file()?;
        tracing::info!("Importing pretrained weights from {:?}", weights);

        let record: BertEncoderRecord<B> = match &weights {
            WeightsFile::Safetensors(path) => {
                let mut args = safetensors::LoadArgs::new(path.clone())
                    .with_adapter_type(safetensors::AdapterType::PyTorch);
                for (pattern, replacement) in KEY_REMAP {
                    args = args.with_key_remap(pattern, replacement);
                }
                safetensors::SafetensorsFileRecorder::<FullPrecisionSettings>::default()
                    .load(args, device)
                    .with_context(|| format!("Cannot import '{}'", path.display()))?
            }
            WeightsFile::PyTorch(path) => {
                let mut args = pytorch::LoadArgs::new(path.clone());
                for (pattern, replacement) in KEY_REMAP {
                    args = args.with_key_remap(pattern, replacement);
                }
                pytorch::PyTorchFileRecorder::<FullPrecisionSettings>::default()
                    .load(args, device)
                    .with_context(|| format!("Cannot import '{}'", path.display()))?
            }
        };

        let encoder = cfg.init::<B>(device).load_record(record);
        tracing::info!(
            "Pretrained encoder ready: {} layers, hidden={}",
            cfg.num_hidden_layers,
            cfg.hidden_size
        );
        Ok(encoder)
    }
}
