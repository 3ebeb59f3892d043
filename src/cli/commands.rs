// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Every flag defaults to the value the exercises were written
// with, so each command runs with no arguments at all.

use clap::{Args, Subcommand};

use crate::application::{
    classify_use_case::ClassifyConfig,
    segment_predict_use_case::SegmentPredictConfig,
    segment_train_use_case::SegmentTrainConfig,
};

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Train the 5-class argmax classifier on synthetic vectors
    Classify(ClassifyArgs),

    /// Fine-tune a pretrained BERT encoder for word segmentation
    SegmentTrain(SegmentTrainArgs),

    /// Segment sentences with a fine-tuned checkpoint
    SegmentPredict(SegmentPredictArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Where weights, config and metrics.csv are written
    #[arg(long, default_value = "checkpoints/classifier")]
    pub checkpoint_dir: String,

    #[arg(long, default_value_t = 100)]
    pub epochs: usize,

    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,

    /// Size of the training set, drawn once before the first epoch
    #[arg(long, default_value_t = 5000)]
    pub train_samples: usize,

    /// Fresh samples drawn for each epoch's accuracy check
    #[arg(long, default_value_t = 100)]
    pub eval_samples: usize,

    #[arg(long, default_value_t = 5)]
    pub input_size: usize,

    #[arg(long, default_value_t = 15)]
    pub hidden_size: usize,

    #[arg(long, default_value_t = 5)]
    pub output_size: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Seed for the synthetic data; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<ClassifyArgs> for ClassifyConfig {
    fn from(a: ClassifyArgs) -> Self {
        ClassifyConfig {
            checkpoint_dir: a.checkpoint_dir,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            train_samples:  a.train_samples,
            eval_samples:   a.eval_samples,
            input_size:     a.input_size,
            hidden_size:    a.hidden_size,
            output_size:    a.output_size,
            lr:             a.lr,
            seed:           a.seed,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SegmentTrainArgs {
    /// Directory with config.json, vocab.txt and model weights
    #[arg(long, default_value = "../bert")]
    pub pretrained_dir: String,

    /// Vocabulary file (defaults to <pretrained-dir>/vocab.txt)
    #[arg(long)]
    pub vocab_path: Option<String>,

    /// Plain-text corpus, one sentence per line
    #[arg(long, default_value = "corpus.txt")]
    pub corpus_path: String,

    #[arg(long, default_value = "checkpoints/segmenter")]
    pub checkpoint_dir: String,

    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    /// Every sentence is padded or truncated to this many chars
    #[arg(long, default_value_t = 20)]
    pub max_length: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Only the first N sentences of the corpus are used
    #[arg(long, default_value_t = 10_000)]
    pub max_samples: usize,

    /// Share of samples used for training; the rest validates
    #[arg(long, default_value_t = 1.0)]
    pub train_fraction: f64,

    /// Seed for the split and the per-epoch shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<SegmentTrainArgs> for SegmentTrainConfig {
    fn from(a: SegmentTrainArgs) -> Self {
        SegmentTrainConfig {
            pretrained_dir: a.pretrained_dir,
            vocab_path:     a.vocab_path,
            corpus_path:    a.corpus_path,
            checkpoint_dir: a.checkpoint_dir,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            max_length:     a.max_length,
            lr:             a.lr,
            max_samples:    a.max_samples,
            train_fraction: a.train_fraction,
            seed:           a.seed,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SegmentPredictArgs {
    /// Sentences to segment; the demo sentences when empty
    pub texts: Vec<String>,

    #[arg(long, default_value = "checkpoints/segmenter")]
    pub checkpoint_dir: String,

    /// Overrides the vocabulary path recorded at training time
    #[arg(long)]
    pub vocab_path: Option<String>,
}

impl From<SegmentPredictArgs> for SegmentPredictConfig {
    fn from(a: SegmentPredictArgs) -> Self {
        SegmentPredictConfig {
            checkpoint_dir: a.checkpoint_dir,
            vocab_path:     a.vocab_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_classify_defaults_match_config() {
        let cli = Cli::try_parse_from(["exercise-models", "classify"]).unwrap();
        let Commands::Classify(args) = cli.command else { panic!("wrong subcommand") };
        let cfg: ClassifyConfig = args.into();
        let def = ClassifyConfig::default();
        assert_eq!(cfg.epochs, def.epochs);
        assert_eq!(cfg.train_samples, def.train_samples);
        assert_eq!(cfg.lr, def.lr);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn test_segment_train_flags() {
        let cli = Cli::try_parse_from([
            "exercise-models", "segment-train",
            "--pretrained-dir", "bert-base-chinese",
            "--max-length", "32",
            "--train-fraction", "0.9",
        ])
        .unwrap();
        let Commands::SegmentTrain(args) = cli.command else { panic!("wrong subcommand") };
        let cfg: SegmentTrainConfig = args.into();
        assert_eq!(cfg.pretrained_dir, "bert-base-chinese");
        assert_eq!(cfg.max_length, 32);
        assert_eq!(cfg.train_fraction, 0.9);
        assert_eq!(cfg.batch_size, 20);
    }

    #[test]
    fn test_segment_predict_positional_texts() {
        let cli = Cli::try_parse_from(["exercise-models", "segment-predict", "你好世界", "再见"]).unwrap();
        let Commands::SegmentPredict(args) = cli.command else { panic!("wrong subcommand") };
        assert_eq!(args.texts, vec!["你好世界", "再见"]);
        assert_eq!(args.checkpoint_dir, "checkpoints/segmenter");
    }
}
