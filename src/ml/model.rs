use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        BiLstm, BiLstmConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::softmax,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally, do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct NewsClassifierConfig {
    /// Embedding rows: every vocabulary rank plus the padding id
    pub vocab_size:    usize,
    #[config(default = 16)]
    pub embedding_dim: usize,
    /// Hidden size of each direction of the first BiLSTM
    #[config(default = 32)]
    pub lstm1_dim:     usize,
    /// Hidden size of each direction of the second BiLSTM
    #[config(default = 16)]
    pub lstm2_dim:     usize,
    pub num_classes:   usize,
}

impl NewsClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> NewsClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let encoder   = BiLstmConfig::new(self.embedding_dim, self.lstm1_dim, true).init(device);
        let pooler    = BiLstmConfig::new(2 * self.lstm1_dim, self.lstm2_dim, true).init(device);
        let output    = LinearConfig::new(2 * self.lstm2_dim, self.num_classes).init(device);
        NewsClassifier { embedding, encoder, pooler, output }
    }
}

/// embedding → BiLSTM (full sequence) → BiLSTM (final state) → dense
#[derive(Module, Debug)]
pub struct NewsClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub encoder:   BiLstm<B>,
    pub pooler:    BiLstm<B>,
    pub output:    Linear<B>,
}

pub struct ClassificationStep<B: Backend> {
    pub loss:   Tensor<B, 1>,
    pub logits: Tensor<B, 2>,
}

impl<B: Backend> NewsClassifier<B> {
    /// tokens: [batch, seq_len] → logits: [batch, num_classes]
    pub fn forward(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(tokens);       // [batch, seq_len, emb]
        let (x, _) = self.encoder.forward(x, None);   // [batch, seq_len, 2*h1]
        let (x, _) = self.pooler.forward(x, None);    // [batch, seq_len, 2*h2]
        self.output.forward(final_state(x))
    }

    /// Softmax over classes, rows sum to 1
    pub fn forward_probabilities(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        softmax(self.forward(tokens), 1)
    }

    /// Forward pass plus sparse cross-entropy against class indices.
    pub fn forward_classification(
        &self,
        tokens: Tensor<B, 2, Int>,
        labels: Tensor<B, 1, Int>,
    ) -> ClassificationStep<B> {
        let logits = self.forward(tokens);
        let loss   = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), labels);
        ClassificationStep { loss, logits }
    }
}

/// Collapse a bidirectional sequence output to one vector per row.
///
/// The forward direction has read the whole sequence at the last
/// step; the backward direction has read it at the first step.
/// [batch, seq_len, 2*h] → [batch, 2*h]
fn final_state<B: Backend>(sequence: Tensor<B, 3>) -> Tensor<B, 2> {
    let [batch, seq_len, width] = sequence.dims();
    let hidden = width / 2;

    let forward_last = sequence
        .clone()
        .slice([0..batch, seq_len - 1..seq_len, 0..hidden])
        .reshape([batch, hidden]);
    let backward_first = sequence
        .slice([0..batch, 0..1, hidden..width])
        .reshape([batch, hidden]);

    Tensor::cat(vec![forward_last, backward_first], 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn tiny_config() -> NewsClassifierConfig {
        NewsClassifierConfig::new(12, 3)
            .with_embedding_dim(4)
            .with_lstm1_dim(5)
            .with_lstm2_dim(3)
    }

    #[test]
    fn test_logits_shape() {
        let device = Default::default();
        let model  = tiny_config().init::<TestBackend>(&device);
        let tokens = Tensor::<TestBackend, 2, Int>::from_ints([[1, 2, 3, 0], [4, 0, 0, 0]], &device);

        assert_eq!(model.forward(tokens).dims(), [2, 3]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let device = Default::default();
        let model  = tiny_config().init::<TestBackend>(&device);
        let tokens = Tensor::<TestBackend, 2, Int>::from_ints([[5, 6, 7], [8, 9, 10]], &device);

        let sums: Vec<f32> = model
            .forward_probabilities(tokens)
            .sum_dim(1)
            .into_data()
            .iter::<f32>()
            .collect();
        for s in sums {
            assert!((s - 1.0).abs() < 1e-4, "row sums to {s}");
        }
    }

    #[test]
    fn test_final_state_picks_last_forward_and_first_backward() {
        let device = Default::default();
        // batch 1, seq_len 2, width 4 (hidden 2)
        let seq = Tensor::<TestBackend, 3>::from_floats(
            [[[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]]],
            &device,
        );
        let values: Vec<f32> = final_state(seq).into_data().iter::<f32>().collect();
        assert_eq!(values, vec![5.0, 6.0, 3.0, 4.0]);
    }

    #[test]
    fn test_loss_is_finite() {
        let device = Default::default();
        let model  = tiny_config().init::<TestBackend>(&device);
        let tokens = Tensor::<TestBackend, 2, Int>::from_ints([[1, 2], [3, 4]], &device);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([0, 2], &device);

        let step = model.forward_classification(tokens, labels);
        let loss: f32 = step.loss.into_scalar().elem::<f32>();
        assert!(loss.is_finite());
        assert_eq!(step.logits.dims(), [2, 3]);
    }
}
