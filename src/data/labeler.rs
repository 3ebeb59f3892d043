// ============================================================
// Layer 4 — Weak Labeller
// ============================================================
// There is no hand-labelled corpus, so jieba's segmentation is
// taken as ground truth. The model learns to reproduce jieba's
// word ends from characters alone.

use jieba_rs::Jieba;

use crate::domain::{segmentation::boundary_labels, traits::WordSplitter};

/// jieba with its bundled dictionary and HMM enabled for
/// unknown words.
pub struct JiebaSplitter {
    jieba: Jieba,
}

impl JiebaSplitter {
    pub fn new() -> Self {
        tracing::debug!("Loading jieba dictionary");
        Self { jieba: Jieba::new() }
    }
}

impl Default for JiebaSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSplitter for JiebaSplitter {
    fn split<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        self.jieba.cut(sentence, true)
    }
}

/// Boundary labels for `sentence` as produced by `splitter`.
pub fn sequence_to_label(sentence: &str, splitter: &dyn WordSplitter) -> Vec<i64> {
    let words = splitter.split(sentence);
    boundary_labels(sentence, &words)
}
