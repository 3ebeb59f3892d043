// ============================================================
// Layer 5 — Training Loops
// ============================================================
// Both loops follow the same shape:
//
//   for epoch in 1..=epochs
//     for batch in loader
//       loss = model.forward_loss(batch)
//       grads = loss.backward()
//       model = adam.step(lr, model, grads)
//     evaluate on the inner backend (model.valid(), no
//     autodiff, dropout off)
//     log metrics
//
// The classifier iterates its synthetic set in order and only
// over whole batches; the segmenter shuffles every epoch.
//
// Both are generic over the autodiff backend, so the binary
// trains on infra::device::TrainBackend while tests run on
// Autodiff<NdArray>.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::{rngs::StdRng, SeedableRng};

use crate::application::classify_use_case::ClassifyConfig;
use crate::application::segment_train_use_case::SegmentTrainConfig;
use crate::data::{
    batcher::{SegmentBatcher, VectorBatcher},
    dataset::{SegmentDataset, VectorDataset},
    synthetic::build_dataset,
};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsHistory, MetricsLogger},
};
use crate::ml::{
    classifier::Classifier,
    evaluator::evaluate_classifier,
    segmenter::Segmenter,
};

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn ratio(correct: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { correct as f64 / total as f64 }
}

// ─── Exercise 1 ───────────────────────────────────────────────────────────────
pub fn train_classifier<B: AutodiffBackend>(
    cfg:          &ClassifyConfig,
    device:       &B::Device,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
) -> Result<MetricsHistory> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let mut model: Classifier<B> = cfg.model_config().init(device);
    let mut optim = AdamConfig::new().init();
    tracing::info!(
        "Classifier ready: {} → {} → {}",
        cfg.input_size, cfg.hidden_size, cfg.output_size
    );

    // Built once; only whole batches are used
    let mut train = build_dataset(&mut rng, cfg.train_samples, cfg.input_size, cfg.output_size);
    train.truncate((cfg.train_samples / cfg.batch_size) * cfg.batch_size);
    tracing::info!("Training set: {} samples", train.len());

    let loader = DataLoaderBuilder::new(VectorBatcher)
        .set_device(device.clone())
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(VectorDataset::new(train));

    let mut history = MetricsHistory::default();

    for epoch in 1..=cfg.epochs {
        let mut losses = Vec::new();

        for batch in loader.iter() {
            let loss = model.forward_loss(batch.features, batch.targets);
            losses.push(loss.clone().into_scalar().elem::<f64>());

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(cfg.lr, model, grads);
        }
        let avg_loss = mean(&losses);

        let eval_set: Vec<_> = build_dataset(&mut rng, cfg.eval_samples, cfg.input_size, cfg.output_size);
        let model_valid: Classifier<B::InnerBackend> = model.valid();
        let eval = evaluate_classifier(&model_valid, &eval_set, device)?;

        println!(
            "Epoch {:>3}/{} | mean_loss={:.6} | correct={} | accuracy={:.6}",
            epoch, cfg.epochs, avg_loss, eval.correct, eval.accuracy(),
        );

        let m = EpochMetrics::new(epoch, avg_loss, eval.accuracy());
        metrics.log(&m)?;
        history.push(m);
    }

    ckpt_manager.save_model(&model, cfg.epochs)?;
    tracing::info!("Classifier weights saved to '{}'", ckpt_manager.dir().display());

    Ok(history)
}

// ─── Exercise 2 ───────────────────────────────────────────────────────────────
pub fn train_segmenter<B: AutodiffBackend>(
    cfg:           &SegmentTrainConfig,
    mut model:     Segmenter<B>,
    train_dataset: SegmentDataset,
    val_dataset:   SegmentDataset,
    device:        &B::Device,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
) -> Result<MetricsHistory> {
    let mut optim = AdamConfig::new().init();
    let has_val = val_dataset.sample_count() > 0;

    let train_loader = DataLoaderBuilder::new(SegmentBatcher)
        .set_device(device.clone())
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // Validation runs on the inner backend, without autodiff
    let val_loader = DataLoaderBuilder::new(SegmentBatcher)
        .set_device(device.clone())
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut history = MetricsHistory::default();

    for epoch in 1..=cfg.epochs {
        let mut losses  = Vec::new();
        let mut correct = 0usize;
        let mut counted = 0usize;

        for batch in train_loader.iter() {
            let out = model.forward_loss(batch.input_ids, batch.labels);
            let (c, n) = out.accuracy();
            correct += c;
            counted += n;
            losses.push(out.loss.clone().into_scalar().elem::<f64>());

            let grads = GradientsParams::from_grads(out.loss.backward(), &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let mut m = EpochMetrics::new(epoch, mean(&losses), ratio(correct, counted));

        if has_val {
            let model_valid: Segmenter<B::InnerBackend> = model.valid();
            let mut val_losses  = Vec::new();
            let mut val_correct = 0usize;
            let mut val_counted = 0usize;

            for batch in val_loader.iter() {
                let out = model_valid.forward_loss(batch.input_ids, batch.labels);
                let (c, n) = out.accuracy();
                val_correct += c;
                val_counted += n;
                val_losses.push(out.loss.into_scalar().elem::<f64>());
            }
            m = m.with_validation(mean(&val_losses), ratio(val_correct, val_counted));
        }

        match (m.val_loss, m.val_accuracy) {
            (Some(vl), Some(va)) => println!(
                "Epoch {:>3}/{} | mean_loss={:.6} | boundary_acc={:.1}% | val_loss={:.6} | val_acc={:.1}%",
                epoch, cfg.epochs, m.loss, m.accuracy * 100.0, vl, va * 100.0,
            ),
            _ => println!(
                "Epoch {:>3}/{} | mean_loss={:.6} | boundary_acc={:.1}%",
                epoch, cfg.epochs, m.loss, m.accuracy * 100.0,
            ),
        }

        if history.best_accuracy().map_or(true, |best| m.is_improvement(best)) {
            tracing::info!("New best boundary accuracy: {:.1}%", m.accuracy * 100.0);
        }

        metrics.log(&m)?;
        history.push(m);

        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::segment_train_use_case::SEGMENTER_MODEL_FILE;
    use crate::data::vocab::Vocab;
    use crate::domain::sample::{SegmentSample, IGNORE_LABEL};
    use crate::ml::{bert::tests::tiny_config, inferencer::SegmentInferencer, segmenter::SegmenterConfig};
    use burn::backend::{Autodiff, NdArray};

    type TestBackend  = NdArray<f32>;
    type TestAutodiff = Autodiff<TestBackend>;

    #[test]
    fn test_classifier_run_logs_every_epoch() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ClassifyConfig {
            checkpoint_dir: dir.path().display().to_string(),
            epochs:         3,
            batch_size:     10,
            train_samples:  55,
            eval_samples:   20,
            seed:           Some(7),
            ..Default::default()
        };
        let device  = Default::default();
        let ckpt    = CheckpointManager::new(dir.path());
        let metrics = MetricsLogger::new(dir.path()).unwrap();

        let history = train_classifier::<TestAutodiff>(&cfg, &device, &ckpt, &metrics).unwrap();

        assert_eq!(history.len(), 3);
        assert!(history.pairs().iter().all(|[acc, loss]| (0.0..=1.0).contains(acc) && loss.is_finite()));
        assert_eq!(ckpt.latest_epoch().unwrap(), 3);

        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.starts_with("epoch,loss,accuracy,val_loss,val_accuracy"));
    }

    fn segment_samples() -> Vec<SegmentSample> {
        vec![
            SegmentSample { input_ids: vec![3, 4, 5, 0], labels: vec![0, 1, 1, IGNORE_LABEL] },
            SegmentSample { input_ids: vec![5, 3, 4, 5], labels: vec![1, 0, 1, 1] },
            SegmentSample { input_ids: vec![4, 4, 0, 0], labels: vec![0, 1, IGNORE_LABEL, IGNORE_LABEL] },
            SegmentSample { input_ids: vec![3, 5, 4, 0], labels: vec![1, 0, 1, IGNORE_LABEL] },
        ]
    }

    #[test]
    fn test_segmenter_run_then_segment_from_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SegmentTrainConfig {
            checkpoint_dir: dir.path().display().to_string(),
            epochs:         2,
            batch_size:     2,
            max_length:     4,
            ..Default::default()
        };
        let device    = Default::default();
        let ckpt      = CheckpointManager::new(dir.path());
        let metrics   = MetricsLogger::new(dir.path()).unwrap();
        let model_cfg = SegmenterConfig::new(tiny_config());
        ckpt.save_config(SEGMENTER_MODEL_FILE, &model_cfg).unwrap();

        let mut samples = segment_samples();
        let val = samples.split_off(3);
        let model: Segmenter<TestAutodiff> = model_cfg.init(&device);

        let history = train_segmenter(
            &cfg,
            model,
            SegmentDataset::new(samples),
            SegmentDataset::new(val),
            &device,
            &ckpt,
            &metrics,
        )
        .unwrap();

        assert_eq!(history.len(), 2);
        let last = history.last().unwrap();
        assert!(last.loss.is_finite());
        assert!(last.val_loss.is_some() && last.val_accuracy.is_some());
        assert_eq!(ckpt.latest_epoch().unwrap(), 2);

        let vocab = Vocab::from_tokens(["[PAD]", "[UNK]", "我", "爱", "你"]).unwrap();
        let inferencer = SegmentInferencer::<TestBackend>::from_checkpoint(&ckpt, vocab, &device).unwrap();
        assert_eq!(inferencer.segment("我爱你").unwrap().replace(' ', ""), "我爱你");
        assert_eq!(inferencer.segment("").unwrap(), "");
        assert!(inferencer.segment(&"你".repeat(17)).is_err());
    }

    #[test]
    fn test_segmenter_without_validation_leaves_columns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SegmentTrainConfig {
            checkpoint_dir: dir.path().display().to_string(),
            epochs:         1,
            batch_size:     4,
            ..Default::default()
        };
        let device  = Default::default();
        let ckpt    = CheckpointManager::new(dir.path());
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let model: Segmenter<TestAutodiff> = SegmenterConfig::new(tiny_config()).init(&device);

        let history = train_segmenter(
            &cfg,
            model,
            SegmentDataset::new(segment_samples()),
            SegmentDataset::new(Vec::new()),
            &device,
            &ckpt,
            &metrics,
        )
        .unwrap();

        assert_eq!(history.len(), 1);
        assert!(history.last().unwrap().val_loss.is_none());
        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with(",,"));
    }
}
