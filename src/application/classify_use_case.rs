// ============================================================
// Layer 2 — ClassifyUseCase
// ============================================================
// Steps:
//   1. Validate the config
//   2. Select the device                    (Layer 6 - infra)
//   3. Save the config next to the weights  (Layer 6 - infra)
//   4. Train + evaluate every epoch         (Layer 5 - ml)
//   5. Return the [accuracy, loss] history

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::infra::{
    checkpoint::CheckpointManager,
    device::{init_device, TrainBackend},
    metrics::{MetricsHistory, MetricsLogger},
};
use crate::ml::{classifier::ClassifierConfig, trainer::train_classifier};

pub const CLASSIFY_CONFIG_FILE: &str = "classify_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    pub checkpoint_dir: String,
    pub epochs:         usize,
    pub batch_size:     usize,
    /// Samples in the training set, drawn once
    pub train_samples:  usize,
    /// Fresh samples drawn for each epoch's evaluation
    pub eval_samples:   usize,
    pub input_size:     usize,
    pub hidden_size:    usize,
    pub output_size:    usize,
    pub lr:             f64,
    /// Fixed seed for reproducible data; entropy when None
    pub seed:           Option<u64>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir: "checkpoints/classifier".to_string(),
            epochs:         100,
            batch_size:     100,
            train_samples:  5000,
            eval_samples:   100,
            input_size:     5,
            hidden_size:    15,
            output_size:    5,
            lr:             1e-3,
            seed:           None,
        }
    }
}

impl ClassifyConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size must be positive");
        ensure!(
            self.train_samples >= self.batch_size,
            "train_samples ({}) must hold at least one batch of {}",
            self.train_samples, self.batch_size
        );
        ensure!(self.input_size > 0 && self.hidden_size > 0, "layer sizes must be positive");
        // the label is the argmax of the input, so every input
        // position needs a class
        ensure!(
            self.output_size >= self.input_size,
            "output_size ({}) must be at least input_size ({})",
            self.output_size, self.input_size
        );
        Ok(())
    }

    pub fn model_config(&self) -> ClassifierConfig {
        ClassifierConfig::new()
            .with_input_size(self.input_size)
            .with_hidden_size(self.hidden_size)
            .with_output_size(self.output_size)
    }
}

pub struct ClassifyUseCase {
    config: ClassifyConfig,
}

impl ClassifyUseCase {
    pub fn new(config: ClassifyConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<MetricsHistory> {
        let cfg = &self.config;
        cfg.validate()?;

        let device = init_device();

        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(CLASSIFY_CONFIG_FILE, cfg)?;
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

        let history = train_classifier::<TrainBackend>(cfg, &device, &ckpt_manager, &metrics)?;
        tracing::info!("Metrics written to '{}'", metrics.csv_path().display());
        Ok(history)
    }
}
