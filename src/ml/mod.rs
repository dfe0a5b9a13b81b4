// ============================================================
// Layer 5 - ML / Model Layer (burn)
// ============================================================
// All burn model code lives here.
//
//   model.rs     - NewsClassifier: embedding, two stacked
//                  bidirectional LSTMs, dense output
//   trainer.rs   - epoch loop: forward, cross-entropy, backward,
//                  Adam step, validation metrics
//   predictor.rs - batched inference + argmax
//
// The default backend is ndarray on the CPU; build with
// `--features wgpu` to train on the GPU.

/// Bidirectional LSTM text classifier
pub mod model;

/// Training loop with per-epoch validation
pub mod trainer;

/// Batched inference over encoded test data
pub mod predictor;

#[cfg(not(feature = "wgpu"))]
pub type InferBackend = burn::backend::NdArray;

#[cfg(feature = "wgpu")]
pub type InferBackend = burn::backend::Wgpu;

/// Backend used for training: the inference backend plus autodiff
pub type TrainBackend = burn::backend::Autodiff<InferBackend>;
