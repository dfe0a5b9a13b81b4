// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits, so the
// CSV loader could be swapped for another source without
// touching the pipeline.

use anyhow::Result;

use crate::domain::record::NewsRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce news records.
///
/// Implementations:
///   - CsvLoader → reads a delimited file with a header row
pub trait RecordSource {
    /// Load every record from this source, in file order.
    fn load_all(&self) -> Result<Vec<NewsRecord>>;
}

// ─── TextFilter ───────────────────────────────────────────────────────────────
/// Any text-to-text cleaning step applied before tokenisation.
///
/// Implementations:
///   - StopwordFilter → case folding + stopword removal
pub trait TextFilter {
    fn apply(&self, text: &str) -> String;

    /// Apply the filter to every text, preserving order.
    fn apply_all(&self, texts: &[String]) -> Vec<String> {
        texts.iter().map(|t| self.apply(t)).collect()
    }
}
