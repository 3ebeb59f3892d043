// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
// Three commands are supported:
//   1. `classify`        — train + evaluate the argmax classifier
//   2. `segment-train`   — fine-tune BERT for word boundaries
//   3. `segment-predict` — segment sentences with a checkpoint

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ClassifyArgs, Commands, SegmentPredictArgs, SegmentTrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "exercise-models",
    version,
    about = "Synthetic argmax classifier and BERT Chinese word segmentation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Routes only, never computes.
    pub fn run(self) -> Result<()> {
        match self.command.clone() {
            Commands::Classify(args)       => self.run_classify(args),
            Commands::SegmentTrain(args)   => self.run_segment_train(args),
            Commands::SegmentPredict(args) => self.run_segment_predict(args),
        }
    }

    fn run_classify(&self, args: ClassifyArgs) -> Result<()> {
        use crate::application::classify_use_case::ClassifyUseCase;

        let history = ClassifyUseCase::new(args.into()).execute()?;

        println!("{:?}", history.pairs());
        if let Some(best) = history.best_accuracy() {
            println!("Training complete. Best accuracy: {:.1}%", best * 100.0);
        }
        Ok(())
    }

    fn run_segment_train(&self, args: SegmentTrainArgs) -> Result<()> {
        use crate::application::segment_train_use_case::SegmentTrainUseCase;

        tracing::info!("Fine-tuning on corpus: {}", args.corpus_path);

        let history = SegmentTrainUseCase::new(args.into()).execute()?;
        if let Some(last) = history.last() {
            println!(
                "Training complete. Final loss {:.4}, boundary accuracy {:.1}%",
                last.loss,
                last.accuracy * 100.0
            );
        }
        Ok(())
    }

    fn run_segment_predict(&self, args: SegmentPredictArgs) -> Result<()> {
        use crate::application::segment_predict_use_case::{DEMO_SENTENCES, SegmentPredictUseCase};

        let inputs: Vec<String> = if args.texts.is_empty() {
            DEMO_SENTENCES.iter().map(|s| s.to_string()).collect()
        } else {
            args.texts.clone()
        };

        let use_case = SegmentPredictUseCase::new(args.into())?;
        for line in use_case.segment_all(&inputs)? {
            println!("{line}");
        }
        Ok(())
    }
}
