// ============================================================
// Layer 5 - Predictor
// ============================================================
// Runs the trained classifier over encoded test sequences in a
// single batched forward pass and picks the most probable class
// for every row.

use anyhow::{ensure, Result};
use burn::prelude::*;

use crate::data::batcher::tokens_tensor;
use crate::ml::model::NewsClassifier;

/// Index of the largest value; the lowest index wins ties.
pub fn argmax(row: &[f32]) -> usize {
    let mut best = 0usize;
    for (i, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = i;
        }
    }
    best
}

pub struct Predictor<B: Backend> {
    model:  NewsClassifier<B>,
    device: B::Device,
}

impl<B: Backend> Predictor<B> {
    pub fn new(model: NewsClassifier<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Class probabilities, one row per input sequence.
    pub fn predict_proba(&self, sequences: &[Vec<u32>]) -> Result<Vec<Vec<f32>>> {
        if sequences.is_empty() {
            return Ok(Vec::new());
        }

        let seq_len = sequences[0].len();
        ensure!(seq_len > 0, "cannot predict on zero-length sequences");
        ensure!(
            sequences.iter().all(|s| s.len() == seq_len),
            "all sequences must be padded to the same length"
        );

        let tokens = tokens_tensor::<B>(sequences, &self.device);
        let probs  = self.model.forward_probabilities(tokens);
        let [rows, classes] = probs.dims();
        ensure!(classes > 0, "model has no output classes");

        let flat: Vec<f32> = probs.into_data().iter::<f32>().collect();
        let table: Vec<Vec<f32>> = flat.chunks(classes).map(<[f32]>::to_vec).collect();

        tracing::debug!("Predicted probabilities for {} rows x {} classes", rows, classes);
        Ok(table)
    }

    /// Most probable class index per input sequence.
    pub fn predict(&self, sequences: &[Vec<u32>]) -> Result<Vec<usize>> {
        Ok(self
            .predict_proba(sequences)?
            .iter()
            .map(|row| argmax(row))
            .collect())
    }
}
