use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
};

use crate::domain::sample::IGNORE_LABEL;
use crate::ml::bert::{BertConfig, BertEncoder};
use crate::ml::loss::{masked_accuracy, masked_cross_entropy};

/// Number of tags per character: 0 = inside word, 1 = word end.
pub const NUM_TAGS: usize = 2;

#[derive(Config, Debug)]
pub struct SegmenterConfig {
    pub bert: BertConfig,
}

impl SegmenterConfig {
    /// Fresh, randomly initialised model. Used to rebuild the
    /// architecture before loading a fine-tuned checkpoint.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Segmenter<B> {
        Segmenter::with_encoder(self.bert.init(device), &self.bert, device)
    }
}

/// BERT encoder with a linear boundary tagger on every position.
#[derive(Module, Debug)]
pub struct Segmenter<B: Backend> {
    pub bert:     BertEncoder<B>,
    pub classify: Linear<B>,
}

pub struct SegmentOutput<B: Backend> {
    /// Scalar loss, averaged over non-padding positions
    pub loss:    Tensor<B, 1>,
    /// [batch * seq, 2]
    pub logits:  Tensor<B, 2>,
    /// [batch * seq]
    pub targets: Tensor<B, 1, Int>,
}

impl<B: Backend> SegmentOutput<B> {
    /// (correct, counted) over non-padding positions.
    pub fn accuracy(&self) -> (usize, usize) {
        masked_accuracy(self.logits.clone(), self.targets.clone(), IGNORE_LABEL)
    }
}

impl<B: Backend> Segmenter<B> {
    /// Attach a fresh tagging head to an (usually pretrained) encoder.
    pub fn with_encoder(bert: BertEncoder<B>, cfg: &BertConfig, device: &B::Device) -> Self {
        let classify = LinearConfig::new(cfg.hidden_size, NUM_TAGS).init(device);
        Self { bert, classify }
    }

    /// input_ids: [batch, seq] → logits [batch, seq, 2]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        self.classify.forward(self.bert.forward(input_ids))
    }

    /// Flattens [batch, seq, 2] / [batch, seq] to per-position
    /// rows before scoring, so every character counts once.
    pub fn forward_loss(&self, input_ids: Tensor<B, 2, Int>, labels: Tensor<B, 2, Int>) -> SegmentOutput<B> {
        let [batch_size, seq_len] = labels.dims();
        let rows = batch_size * seq_len;

        let logits  = self.forward(input_ids).reshape([rows, NUM_TAGS]);
        let targets = labels.reshape([rows]);
        let loss    = masked_cross_entropy(logits.clone(), targets.clone(), IGNORE_LABEL);

        SegmentOutput { loss, logits, targets }
    }

    /// Most likely tag per position, one Vec per batch row.
    pub fn predict(&self, input_ids: Tensor<B, 2, Int>) -> Vec<Vec<u8>> {
        let [batch_size, seq_len] = input_ids.dims();
        let tags: Vec<u8> = self
            .forward(input_ids)
            .argmax(2)
            .reshape([batch_size * seq_len])
            .into_data()
            .iter::<i64>()
            .map(|t| t as u8)
            .collect();

        tags.chunks(seq_len.max(1)).map(<[u8]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::bert::tests::tiny_config;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn model() -> Segmenter<TestBackend> {
        SegmenterConfig::new(tiny_config()).init(&Default::default())
    }

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let ids = Tensor::<TestBackend, 2, Int>::zeros([3, 6], &device);
        assert_eq!(model().forward(ids).dims(), [3, 6, NUM_TAGS]);
    }

    #[test]
    fn test_predict_returns_binary_tags_per_row() {
        let device = Default::default();
        let ids = Tensor::<TestBackend, 1, Int>::from_ints([3, 4, 5, 6, 7, 8], &device)
            .reshape([2, 3]);

        let tags = model().predict(ids);
        assert_eq!(tags.len(), 2);
        assert!(tags.iter().all(|row| row.len() == 3));
        assert!(tags.iter().flatten().all(|&t| t <= 1));
    }

    #[test]
    fn test_loss_skips_padding_in_accuracy() {
        let device = Default::default();
        let ids = Tensor::<TestBackend, 1, Int>::from_ints([3, 4, 0, 5, 0, 0], &device)
            .reshape([2, 3]);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([0, 1, -100, 1, -100, -100], &device)
            .reshape([2, 3]);

        let out = model().forward_loss(ids, labels);
        let loss: f32 = out.loss.clone().into_scalar().elem();
        assert!(loss.is_finite() && loss > 0.0);

        let (_, counted) = out.accuracy();
        assert_eq!(counted, 3);
    }
}
