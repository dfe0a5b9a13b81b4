// ============================================================
// Layer 4 - News Dataset
// ============================================================
// In-memory burn Dataset over encoded articles. Each sample is
// a max_len id sequence plus its 0-based class index; the
// NewsBatcher stacks them into tensors.

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

/// One encoded article: a fixed-length id sequence and its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSample {
    pub token_ids: Vec<u32>,
    pub label:     usize,
}

pub struct NewsDataset {
    samples: Vec<NewsSample>,
}

impl NewsDataset {
    pub fn new(samples: Vec<NewsSample>) -> Self { Self { samples } }

    /// Zip encoded sequences with their class indices.
    pub fn from_encoded(
        sequences: Vec<Vec<u32>>,
        labels:    Vec<usize>,
    ) -> Result<Self, PipelineError> {
        if sequences.len() != labels.len() {
            return Err(PipelineError::LengthMismatch {
                texts:  sequences.len(),
                labels: labels.len(),
            });
        }
        let samples = sequences
            .into_iter()
            .zip(labels)
            .map(|(token_ids, label)| NewsSample { token_ids, label })
            .collect();
        Ok(Self::new(samples))
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<NewsSample> for NewsDataset {
    fn get(&self, index: usize) -> Option<NewsSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_encoded_pairs_in_order() {
        let ds = NewsDataset::from_encoded(vec![vec![1, 2], vec![3, 0]], vec![1, 0]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1), Some(NewsSample { token_ids: vec![3, 0], label: 0 }));
        assert_eq!(ds.get(2), None);
    }

    #[test]
    fn test_from_encoded_rejects_mismatch() {
        assert!(NewsDataset::from_encoded(vec![vec![1]], vec![]).is_err());
    }
}
