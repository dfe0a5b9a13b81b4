// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Train + validation loop using burn's DataLoader and Adam.
//
//   - Training runs on an AutodiffBackend so loss.backward()
//     can produce gradients
//   - model.valid() returns the model on B::InnerBackend, so the
//     validation batcher is built for the inner backend too
//   - argmax(1) returns [batch, 1], flatten before .equal()
//
// One line per epoch is printed: loss/accuracy for both sets.

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::classify_use_case::ClassifyConfig;
use crate::data::{batcher::NewsBatcher, dataset::NewsDataset};
use crate::domain::error::PipelineError;
use crate::infra::metrics::{EpochMetrics, TrainingHistory};
use crate::ml::model::NewsClassifier;

/// Running sums over the batches of one pass.
#[derive(Default)]
struct PassTotals {
    loss_sum: f64,
    correct:  usize,
    samples:  usize,
}

impl PassTotals {
    /// Fold in one batch whose mean loss is `batch_loss`.
    fn add_batch(&mut self, batch_loss: f64, correct: usize, samples: usize) {
        self.loss_sum += batch_loss * samples as f64;
        self.correct  += correct;
        self.samples  += samples;
    }

    /// Per-sample mean, so a short last batch weighs less.
    fn mean_loss(&self) -> f64 {
        if self.samples > 0 { self.loss_sum / self.samples as f64 } else { f64::NAN }
    }

    fn accuracy(&self) -> f64 {
        if self.samples > 0 { self.correct as f64 / self.samples as f64 } else { 0.0 }
    }
}

/// Number of rows where argmax(logits) equals the label.
fn count_correct<B: Backend>(logits: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> usize {
    let predicted = logits.argmax(1).flatten::<1>(0, 1);
    predicted
        .equal(labels)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>() as usize
}

pub fn run_training<B: AutodiffBackend>(
    cfg:           &ClassifyConfig,
    model:         NewsClassifier<B>,
    train_dataset: NewsDataset,
    val_dataset:   NewsDataset,
    device:        &B::Device,
) -> Result<(NewsClassifier<B>, TrainingHistory)> {
    if train_dataset.sample_count() == 0 {
        return Err(PipelineError::EmptyTrainingSet.into());
    }

    let mut model = model;

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_loader = DataLoaderBuilder::new(NewsBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend, no autodiff overhead) ───────────
    let val_loader = DataLoaderBuilder::new(NewsBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut history = TrainingHistory::default();

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut train = PassTotals::default();

        for batch in train_loader.iter() {
            let samples = batch.labels.dims()[0];
            let step    = model.forward_classification(batch.tokens, batch.labels.clone());

            let loss    = step.loss.clone().into_scalar().elem::<f64>();
            train.add_batch(loss, count_correct(step.logits, batch.labels), samples);

            // Backward pass + Adam update
            let grads = step.loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();
        let mut val     = PassTotals::default();

        for batch in val_loader.iter() {
            let samples = batch.labels.dims()[0];
            let step    = model_valid.forward_classification(batch.tokens, batch.labels.clone());

            let loss    = step.loss.into_scalar().elem::<f64>();
            val.add_batch(loss, count_correct(step.logits, batch.labels), samples);
        }

        let metrics = EpochMetrics::new(
            epoch,
            train.mean_loss(),
            train.accuracy(),
            val.mean_loss(),
            val.accuracy(),
        );

        println!(
            "Epoch {:>3}/{} | loss={:.4} | accuracy={:.4} | val_loss={:.4} | val_accuracy={:.4}",
            epoch, cfg.epochs,
            metrics.train_loss, metrics.train_accuracy,
            metrics.val_loss, metrics.val_accuracy,
        );
        tracing::debug!("Epoch {} metrics: {:?}", epoch, metrics);

        history.push(metrics);
    }

    tracing::info!("Training complete after {} epochs", cfg.epochs);
    Ok((model, history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::NewsSample;
    use crate::ml::model::NewsClassifierConfig;
    use burn::backend::{Autodiff, NdArray};

    type TestBackend = Autodiff<NdArray>;

    fn dataset(rows: &[(Vec<u32>, usize)]) -> NewsDataset {
        NewsDataset::new(
            rows.iter()
                .map(|(ids, label)| NewsSample { token_ids: ids.clone(), label: *label })
                .collect(),
        )
    }

    fn tiny_run_config(epochs: usize) -> ClassifyConfig {
        ClassifyConfig { epochs, batch_size: 2, ..ClassifyConfig::default() }
    }

    #[test]
    fn test_records_one_entry_per_epoch() {
        let device = Default::default();
        let model  = NewsClassifierConfig::new(8, 2)
            .with_embedding_dim(4)
            .with_lstm1_dim(3)
            .with_lstm2_dim(2)
            .init::<TestBackend>(&device);

        let train = dataset(&[
            (vec![2, 3, 0], 0),
            (vec![4, 5, 0], 1),
            (vec![2, 2, 3], 0),
        ]);
        let val = dataset(&[(vec![5, 4, 0], 1)]);

        let (_, history) = run_training(&tiny_run_config(2), model, train, val, &device).unwrap();

        assert_eq!(history.len(), 2);
        for m in history.epochs() {
            assert!(m.train_loss.is_finite());
            assert!(m.val_loss.is_finite());
            assert!((0.0..=1.0).contains(&m.train_accuracy));
            assert!((0.0..=1.0).contains(&m.val_accuracy));
        }
    }

    #[test]
    fn test_empty_validation_set_gives_nan_loss() {
        let device = Default::default();
        let model  = NewsClassifierConfig::new(6, 2)
            .with_embedding_dim(2)
            .with_lstm1_dim(2)
            .with_lstm2_dim(2)
            .init::<TestBackend>(&device);

        let train = dataset(&[(vec![2, 3], 0), (vec![4, 5], 1)]);
        let val   = dataset(&[]);

        let (_, history) = run_training(&tiny_run_config(1), model, train, val, &device).unwrap();
        let last = history.last().unwrap();
        assert!(last.val_loss.is_nan());
        assert_eq!(last.val_accuracy, 0.0);
    }

    #[test]
    fn test_mean_loss_weights_batches_by_size() {
        let mut totals = PassTotals::default();
        totals.add_batch(1.0, 3, 4);
        totals.add_batch(4.0, 0, 1);

        // (1.0 * 4 + 4.0 * 1) / 5, not (1.0 + 4.0) / 2
        assert!((totals.mean_loss() - 1.6).abs() < 1e-12);
        assert!((totals.accuracy() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_empty_pass_has_nan_loss() {
        let totals = PassTotals::default();
        assert!(totals.mean_loss().is_nan());
        assert_eq!(totals.accuracy(), 0.0);
    }

    #[test]
    fn test_empty_training_set_is_rejected() {
        let device = Default::default();
        let model  = NewsClassifierConfig::new(4, 2).init::<TestBackend>(&device);

        let result = run_training(&tiny_run_config(1), model, dataset(&[]), dataset(&[]), &device);
        assert!(result.is_err());
    }
}
