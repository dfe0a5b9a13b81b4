// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between the CSV files and burn tensor batches.
//
//   CSV files
//       │
//       ▼
//   CsvLoader         → reads (id, text, category) rows
//       │
//       ▼
//   StopwordFilter    → lowercases, drops common words
//       │
//       ▼
//   splitter          → ordered train / validation split
//       │
//       ▼
//   Vocabulary        → top-N training words + <OOV>
//       │
//       ▼
//   SequenceEncoder   → fixed-length padded id sequences
//   LabelEncoder      → category → class index
//       │
//       ▼
//   NewsDataset       → implements burn's Dataset trait
//       │
//       ▼
//   NewsBatcher       → stacks samples into tensor batches

/// Reads news CSV files using the csv crate
pub mod loader;

/// Fixed English stopword list and the filter that applies it
pub mod stopwords;

/// Deterministic prefix/suffix train/validation split
pub mod splitter;

/// Frequency-ranked word vocabulary with an OOV slot
pub mod vocabulary;

/// Text → fixed-length integer sequence
pub mod encoder;

/// Category string → class index
pub mod labels;

/// Implements burn's Dataset trait for encoded articles
pub mod dataset;

/// Implements burn's Batcher trait to create tensor batches
pub mod batcher;
