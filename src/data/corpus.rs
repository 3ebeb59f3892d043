// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads the segmentation corpus, one sentence per line, and
// turns each line into a padded SegmentSample:
//
//   line ──▶ vocab ids ──┐
//        └─▶ jieba labels ┴──▶ pad/truncate ──▶ SegmentSample
//
// Only the first `max_samples` non-blank lines are used; the
// full corpus makes each epoch far slower without changing how
// the pipeline behaves.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use crate::data::{labeler::sequence_to_label, padding::pad_sample, vocab::Vocab};
use crate::domain::{sample::SegmentSample, traits::WordSplitter};

pub struct CorpusLoader {
    path:        PathBuf,
    max_length:  usize,
    max_samples: usize,
}

impl CorpusLoader {
    pub fn new(path: impl Into<PathBuf>, max_length: usize, max_samples: usize) -> Self {
        Self { path: path.into(), max_length, max_samples }
    }

    pub fn load(&self, vocab: &Vocab, splitter: &dyn WordSplitter) -> Result<Vec<SegmentSample>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open corpus '{}'", self.path.display()))?;

        let mut samples = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            if samples.len() >= self.max_samples {
                break;
            }
            let line = line.with_context(|| {
                format!("Cannot read line {} of '{}'", line_no + 1, self.path.display())
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let sequence = vocab.sentence_to_sequence(&line);
            let labels   = sequence_to_label(&line, splitter);
            samples.push(pad_sample(sequence, labels, self.max_length));
        }

        tracing::info!(
            "Loaded {} samples from '{}' (max_length={})",
            samples.len(),
            self.path.display(),
            self.max_length
        );
        Ok(samples)
    }
}
