// ============================================================
// Layer 4 - News Batcher
// ============================================================
// Implements burn's Batcher trait to stack NewsSamples into
// tensors:
//
//   Input:  Vec of N NewsSamples, each with max_len token ids
//   Output: NewsBatch with tokens [N, max_len] and labels [N]
//
// All sequences are already padded to the same length by the
// SequenceEncoder, so batching is a flatten + reshape.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::NewsSample;

/// A batch of encoded articles ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct NewsBatch<B: Backend> {
    /// Token ids - shape: [batch_size, max_len]
    pub tokens: Tensor<B, 2, Int>,

    /// Class indices - shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct NewsBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> NewsBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

/// Stack equal-length id sequences into a [rows, len] Int tensor.
///
/// `sequences` must be non-empty and every row the same length.
pub fn tokens_tensor<B: Backend>(sequences: &[Vec<u32>], device: &B::Device) -> Tensor<B, 2, Int> {
    let rows    = sequences.len();
    let seq_len = sequences[0].len();

    // Vec<Vec<u32>> → Vec<i32>, burn builds Int tensors from i32
    let flat: Vec<i32> = sequences
        .iter()
        .flat_map(|s| s.iter().map(|&x| x as i32))
        .collect();

    Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device).reshape([rows, seq_len])
}

impl<B: Backend> Batcher<NewsSample, NewsBatch<B>> for NewsBatcher<B> {
    fn batch(&self, items: Vec<NewsSample>) -> NewsBatch<B> {
        let labels: Vec<i32> = items.iter().map(|s| s.label as i32).collect();
        let sequences: Vec<Vec<u32>> = items.into_iter().map(|s| s.token_ids).collect();

        let tokens = tokens_tensor::<B>(&sequences, &self.device);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        NewsBatch { tokens, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_batch_shapes() {
        let device  = Default::default();
        let batcher = NewsBatcher::<TestBackend>::new(device);
        let items   = vec![
            NewsSample { token_ids: vec![2, 3, 0, 0], label: 1 },
            NewsSample { token_ids: vec![4, 1, 5, 0], label: 0 },
            NewsSample { token_ids: vec![6, 0, 0, 0], label: 1 },
        ];

        let batch = batcher.batch(items);
        assert_eq!(batch.tokens.dims(), [3, 4]);
        assert_eq!(batch.labels.dims(), [3]);
    }

    #[test]
    fn test_rows_keep_their_ids() {
        let device = Default::default();
        let tensor = tokens_tensor::<TestBackend>(&[vec![7, 8], vec![9, 0]], &device);

        let values: Vec<i64> = tensor.into_data().iter::<i64>().collect();
        assert_eq!(values, vec![7, 8, 9, 0]);
    }
}
