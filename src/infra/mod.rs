// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting helpers used by the data and ml layers:
//
//   word_tokenizer.rs - HuggingFace WordLevel tokenizer built in
//                       memory from a Vocabulary; turns text into
//                       vocabulary ranks
//
//   metrics.rs        - per-epoch metrics, CSV export and the
//                       text-rendered accuracy/loss curves

/// Word-level tokenizer over the training vocabulary
pub mod word_tokenizer;

/// Training metrics, CSV logger and text charts
pub mod metrics;
