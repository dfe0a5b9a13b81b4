// ============================================================
// Layer 6 - Training Metrics
// ============================================================
// Per-epoch metrics, their optional CSV export, and the text
// charts printed after training.
//
// Metrics recorded per epoch:
//   - epoch:          the epoch number (1, 2, 3, ...)
//   - train_loss:     mean cross-entropy over training batches
//   - train_accuracy: fraction of training rows classified right
//   - val_loss:       mean cross-entropy over validation batches
//   - val_accuracy:   fraction of validation rows classified right
//
// Example CSV output (metrics.csv):
//   epoch,train_loss,train_accuracy,val_loss,val_accuracy
//   1,1.604900,0.231000,1.598800,0.262000
//   2,1.571200,0.318000,1.560300,0.341000
//
// An empty validation set gives val_loss = NaN, val_accuracy = 0.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:          usize,
    pub train_loss:     f64,
    pub train_accuracy: f64,
    pub val_loss:       f64,
    pub val_accuracy:   f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:          usize,
        train_loss:     f64,
        train_accuracy: f64,
        val_loss:       f64,
        val_accuracy:   f64,
    ) -> Self {
        Self { epoch, train_loss, train_accuracy, val_loss, val_accuracy }
    }
}

/// Metrics for every completed epoch, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn push(&mut self, metrics: EpochMetrics) {
        self.epochs.push(metrics);
    }

    pub fn epochs(&self) -> &[EpochMetrics] {
        &self.epochs
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    fn series(&self, f: impl Fn(&EpochMetrics) -> f64) -> Vec<f64> {
        self.epochs.iter().map(f).collect()
    }

    pub fn train_loss(&self) -> Vec<f64> { self.series(|m| m.train_loss) }
    pub fn val_loss(&self) -> Vec<f64> { self.series(|m| m.val_loss) }
    pub fn train_accuracy(&self) -> Vec<f64> { self.series(|m| m.train_accuracy) }
    pub fn val_accuracy(&self) -> Vec<f64> { self.series(|m| m.val_accuracy) }
}

/// Writes a training history to `<dir>/metrics.csv`.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;
        Ok(Self { csv_path: dir.join("metrics.csv") })
    }

    /// Write one row per epoch, replacing any previous file.
    pub fn write(&self, history: &TrainingHistory) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.csv_path)
            .with_context(|| format!("Cannot create '{}'", self.csv_path.display()))?;

        for m in history.epochs() {
            writer.serialize(m)?;
        }
        writer.flush()?;

        tracing::info!(
            "Wrote {} epochs of metrics to '{}'",
            history.len(),
            self.csv_path.display()
        );
        Ok(())
    }
}

// ─── Text Charts ──────────────────────────────────────────────────────────────

const CHART_HEIGHT: usize = 10;
const TRAIN_MARK:   char  = 't';
const VAL_MARK:     char  = 'v';
const BOTH_MARK:    char  = '*';

/// Plot a training and a validation series, one column per epoch.
/// Non-finite points are skipped.
pub fn render_chart(title: &str, train: &[f64], val: &[f64], height: usize) -> String {
    let height = height.max(2);
    let mut out = format!("{title}\n");

    let (lo, hi) = train
        .iter()
        .chain(val)
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() {
        out.push_str("         (no data)\n");
        return out;
    }

    let span   = if hi > lo { hi - lo } else { 1.0 };
    let width  = train.len().max(val.len());
    let row_of = |v: f64| (((hi - v) / span) * (height - 1) as f64).round() as usize;

    let mut grid = vec![vec![' '; width]; height];
    for (series, mark) in [(train, TRAIN_MARK), (val, VAL_MARK)] {
        for (x, &v) in series.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let cell = &mut grid[row_of(v).min(height - 1)][x];
            *cell = if *cell == ' ' || *cell == mark { mark } else { BOTH_MARK };
        }
    }

    for (r, row) in grid.iter().enumerate() {
        let label = if r == 0 {
            format!("{hi:>8.4}")
        } else if r == height - 1 {
            format!("{lo:>8.4}")
        } else {
            " ".repeat(8)
        };
        out.push_str(&format!("{label} |{}\n", row.iter().collect::<String>()));
    }
    out.push_str(&format!("{} +{}\n", " ".repeat(8), "-".repeat(width)));
    out.push_str(&format!(
        "{} epochs 1..{width}  {TRAIN_MARK}=training {VAL_MARK}=validation {BOTH_MARK}=both\n",
        " ".repeat(8)
    ));
    out
}

/// Accuracy and loss charts for a whole training run.
pub fn render_curves(history: &TrainingHistory) -> String {
    let accuracy = render_chart(
        "Training & validation accuracy over epochs",
        &history.train_accuracy(),
        &history.val_accuracy(),
        CHART_HEIGHT,
    );
    let loss = render_chart(
        "Training & validation loss over epochs",
        &history.train_loss(),
        &history.val_loss(),
        CHART_HEIGHT,
    );
    format!("{accuracy}\n{loss}")
}
