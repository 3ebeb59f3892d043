// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records one row per epoch to <checkpoint_dir>/metrics.csv:
//
//   epoch,loss,accuracy,val_loss,val_accuracy
//   1,1.603412,0.310000,,
//   2,1.552190,0.420000,,
//
// `accuracy` is the argmax accuracy the exercise reports each
// epoch: held-out synthetic samples for the classifier,
// non-padding training positions for the segmenter. The
// validation columns stay empty when there is no validation
// split.
//
// The file is appended to across runs; the header is written
// only when the file is created. Plot it to get the acc/loss
// curves.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Starts at 1
    pub epoch: usize,

    /// Mean training loss over the epoch's batches
    pub loss: f64,

    /// Range: [0.0, 1.0]
    pub accuracy: f64,

    pub val_loss: Option<f64>,

    pub val_accuracy: Option<f64>,
}

impl EpochMetrics {
    pub fn new(epoch: usize, loss: f64, accuracy: f64) -> Self {
        Self { epoch, loss, accuracy, val_loss: None, val_accuracy: None }
    }

    pub fn with_validation(mut self, val_loss: f64, val_accuracy: f64) -> Self {
        self.val_loss     = Some(val_loss);
        self.val_accuracy = Some(val_accuracy);
        self
    }

    /// Returns true if this epoch's accuracy beats `best_accuracy`
    pub fn is_improvement(&self, best_accuracy: f64) -> bool {
        self.accuracy > best_accuracy
    }
}

/// The `[accuracy, loss]` pairs of a whole run, in epoch order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsHistory {
    pub epochs: Vec<EpochMetrics>,
}

impl MetricsHistory {
    pub fn push(&mut self, m: EpochMetrics) {
        self.epochs.push(m);
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    pub fn best_accuracy(&self) -> Option<f64> {
        self.epochs.iter().map(|m| m.accuracy).reduce(f64::max)
    }

    pub fn pairs(&self) -> Vec<[f64; 2]> {
        self.epochs.iter().map(|m| [m.accuracy, m.loss]).collect()
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,loss,accuracy,val_loss,val_accuracy")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        let opt = |v: Option<f64>| v.map(|x| format!("{x:.6}")).unwrap_or_default();

        writeln!(
            f,
            "{},{:.6},{:.6},{},{}",
            m.epoch,
            m.loss,
            m.accuracy,
            opt(m.val_loss),
            opt(m.val_accuracy),
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: loss={:.4}, accuracy={:.4}",
            m.epoch,
            m.loss,
            m.accuracy,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
