// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the news
// classification problem. No burn types, no file I/O.
//
//   record.rs - one CSV row (id, text, optional category)
//   error.rs  - the failures the pipeline can report
//   traits.rs - seams the data layer implements

/// A single news article as read from disk
pub mod record;

/// Typed pipeline errors (thiserror)
pub mod error;

/// Core abstractions (traits) that other layers implement
pub mod traits;
