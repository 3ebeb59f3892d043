// ============================================================
// Layer 5 — BERT Encoder
// ============================================================
// A standard post-norm BERT encoder built from Burn's layers.
// Field names follow the HuggingFace checkpoint layout closely
// enough that infra::pretrained only needs a short remap table:
//
//   embeddings.word_embeddings        ← bert.embeddings.word_embeddings
//   embeddings.layer_norm             ← bert.embeddings.LayerNorm
//   layers.N.attention.{query,key,value}
//                                     ← bert.encoder.layer.N.attention.self.*
//   layers.N.attention.output         ← ...attention.output.dense
//   layers.N.attention_norm           ← ...attention.output.LayerNorm
//   layers.N.intermediate             ← ...intermediate.dense
//   layers.N.output                   ← ...output.dense
//   layers.N.output_norm              ← ...output.LayerNorm
//
// The pooler is not used for token classification and is left
// out.

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::gelu,
};
use anyhow::Context;
use serde::Deserialize;
use std::{fs, path::Path};

/// Encoder hyper-parameters, named as in a HuggingFace
/// `config.json`. Read one with [`BertConfig::from_hf_file`].
#[derive(Config, Debug)]
pub struct BertConfig {
    pub vocab_size:          usize,
    pub hidden_size:         usize,
    pub num_hidden_layers:   usize,
    pub num_attention_heads: usize,
    pub intermediate_size:   usize,
    #[config(default = 512)]
    pub max_position_embeddings: usize,
    #[config(default = 2)]
    pub type_vocab_size: usize,
    #[config(default = 1e-12)]
    pub layer_norm_eps: f64,
    #[config(default = 0.1)]
    pub hidden_dropout_prob: f64,
    #[config(default = 0.1)]
    pub attention_probs_dropout_prob: f64,
}

/// The subset of `config.json` the encoder needs. Only the
/// shape fields are required; anything else missing takes the
/// `BertConfig` default, and unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct HfBertConfig {
    vocab_size:          usize,
    hidden_size:         usize,
    num_hidden_layers:   usize,
    num_attention_heads: usize,
    intermediate_size:   usize,
    #[serde(default)]
    max_position_embeddings: Option<usize>,
    #[serde(default)]
    type_vocab_size: Option<usize>,
    #[serde(default)]
    layer_norm_eps: Option<f64>,
    #[serde(default)]
    hidden_dropout_prob: Option<f64>,
    #[serde(default)]
    attention_probs_dropout_prob: Option<f64>,
}

impl From<HfBertConfig> for BertConfig {
    fn from(hf: HfBertConfig) -> Self {
        let mut cfg = BertConfig::new(
            hf.vocab_size,
            hf.hidden_size,
            hf.num_hidden_layers,
            hf.num_attention_heads,
            hf.intermediate_size,
        );
        if let Some(v) = hf.max_position_embeddings      { cfg.max_position_embeddings = v; }
        if let Some(v) = hf.type_vocab_size              { cfg.type_vocab_size = v; }
        if let Some(v) = hf.layer_norm_eps               { cfg.layer_norm_eps = v; }
        if let Some(v) = hf.hidden_dropout_prob          { cfg.hidden_dropout_prob = v; }
        if let Some(v) = hf.attention_probs_dropout_prob { cfg.attention_probs_dropout_prob = v; }
        cfg
    }
}

impl BertConfig {
    /// Parse a HuggingFace `config.json`.
    pub fn from_hf_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read BERT config '{}'", path.display()))?;
        Self::from_hf_json(&json)
            .with_context(|| format!("Invalid BERT config '{}'", path.display()))
    }

    pub fn from_hf_json(json: &str) -> anyhow::Result<Self> {
        let hf: HfBertConfig = serde_json::from_str(json)?;
        Ok(hf.into())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.num_attention_heads > 0 && self.hidden_size % self.num_attention_heads == 0,
            "hidden_size ({}) must be divisible by num_attention_heads ({})",
            self.hidden_size,
            self.num_attention_heads
        );
        Ok(())
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> BertEncoder<B> {
        let embeddings = BertEmbeddings {
            word_embeddings:       EmbeddingConfig::new(self.vocab_size, self.hidden_size).init(device),
            position_embeddings:   EmbeddingConfig::new(self.max_position_embeddings, self.hidden_size).init(device),
            token_type_embeddings: EmbeddingConfig::new(self.type_vocab_size, self.hidden_size).init(device),
            layer_norm: LayerNormConfig::new(self.hidden_size)
                .with_epsilon(self.layer_norm_eps)
                .init(device),
            dropout: DropoutConfig::new(self.hidden_dropout_prob).init(),
        };
        let layers = (0..self.num_hidden_layers)
            .map(|_| self.build_layer(device))
            .collect();
        BertEncoder { embeddings, layers }
    }

    fn build_layer<B: Backend>(&self, device: &B::Device) -> BertLayer<B> {
        let norm = || {
            LayerNormConfig::new(self.hidden_size)
                .with_epsilon(self.layer_norm_eps)
                .init(device)
        };
        BertLayer {
            attention: MultiHeadAttentionConfig::new(self.hidden_size, self.num_attention_heads)
                .with_dropout(self.attention_probs_dropout_prob)
                .init(device),
            attention_norm: norm(),
            intermediate:   LinearConfig::new(self.hidden_size, self.intermediate_size).init(device),
            output:         LinearConfig::new(self.intermediate_size, self.hidden_size).init(device),
            output_norm:    norm(),
            dropout:        DropoutConfig::new(self.hidden_dropout_prob).init(),
        }
    }
}

#[derive(Module, Debug)]
pub struct BertEmbeddings<B: Backend> {
    pub word_embeddings:       Embedding<B>,
    pub position_embeddings:   Embedding<B>,
    pub token_type_embeddings: Embedding<B>,
    pub layer_norm:            LayerNorm<B>,
    pub dropout:               Dropout,
}

impl<B: Backend> BertEmbeddings<B> {
    /// input_ids: [batch, seq] → [batch, seq, hidden]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = input_ids.dims();
        let device = input_ids.device();

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        // single-segment input
        let token_types = Tensor::<B, 2, Int>::zeros([batch_size, seq_len], &device);

        let x = self.word_embeddings.forward(input_ids)
            + self.position_embeddings.forward(positions)
            + self.token_type_embeddings.forward(token_types);
        self.dropout.forward(self.layer_norm.forward(x))
    }
}

#[derive(Module, Debug)]
pub struct BertLayer<B: Backend> {
    pub attention:      MultiHeadAttention<B>,
    pub attention_norm: LayerNorm<B>,
    pub intermediate:   Linear<B>,
    pub output:         Linear<B>,
    pub output_norm:    LayerNorm<B>,
    pub dropout:        Dropout,
}

impl<B: Backend> BertLayer<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attn = self.attention.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.attention_norm.forward(x + self.dropout.forward(attn));

        let ffn = self.output.forward(gelu(self.intermediate.forward(x.clone())));
        self.output_norm.forward(x + self.dropout.forward(ffn))
    }
}

#[derive(Module, Debug)]
pub struct BertEncoder<B: Backend> {
    pub embeddings: BertEmbeddings<B>,
    pub layers:     Vec<BertLayer<B>>,
}

impl<B: Backend> BertEncoder<B> {
    /// input_ids: [batch, seq] → hidden states [batch, seq, hidden]
    ///
    /// Every position attends to every other, padding included.
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let mut x = self.embeddings.forward(input_ids);
        for layer in &self.layers {
            x = layer.forward(x);
        }
        x
    }
}
