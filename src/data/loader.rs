// ============================================================
// Layer 4 - CSV Loader
// ============================================================
// Loads news articles from a delimited file with a header row.
//
// Training file:  ArticleId,Text,Category
// Test file:      ArticleId,Text
//
// Quoted fields (commas and newlines inside article text) are
// handled by the csv crate. Rows are returned in file order;
// the splitter relies on that order.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::error::PipelineError;
use crate::domain::record::NewsRecord;
use crate::domain::traits::RecordSource;

/// The header row and first data row of a CSV file, as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPreview {
    pub header:     String,
    pub first_data: Option<String>,
}

/// Loads news records from one CSV file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    path:             PathBuf,
    /// Training files must carry a category in the third column
    require_category: bool,
}

impl CsvLoader {
    /// Loader for a training file: (id, text, category)
    pub fn labelled(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), require_category: true }
    }

    /// Loader for a test file: (id, text), any extra column is kept
    /// as an optional category
    pub fn unlabelled(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), require_category: false }
    }

    fn reader(&self) -> Result<csv::Reader<std::fs::File>> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open CSV file '{}'", self.path.display()))
    }

    /// Return the header and the first data point, re-joined with commas.
    pub fn preview(&self) -> Result<CsvPreview> {
        let mut reader = self.reader()?;

        let header = reader
            .headers()
            .with_context(|| format!("Cannot read header of '{}'", self.path.display()))?
            .iter()
            .collect::<Vec<_>>()
            .join(",");

        let first_data = match reader.records().next() {
            Some(row) => Some(
                row.with_context(|| format!("Cannot read first row of '{}'", self.path.display()))?
                    .iter()
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            None => None,
        };

        Ok(CsvPreview { header, first_data })
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<NewsRecord>> {
        let mut reader  = self.reader()?;
        let mut records = Vec::new();

        for (i, row) in reader.records().enumerate() {
            let row = row.with_context(|| {
                format!("Malformed CSV row in '{}'", self.path.display())
            })?;

            // 1-based line number including the header row
            let line = row
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(i + 2);

            let article_id = row
                .get(0)
                .ok_or(PipelineError::MissingColumn { line, column: "id" })?;
            let text = row
                .get(1)
                .ok_or(PipelineError::MissingColumn { line, column: "text" })?;

            let category = match row.get(2).map(str::trim) {
                Some(c) if !c.is_empty() => Some(c.to_string()),
                Some(_) if self.require_category => {
                    return Err(PipelineError::MissingCategory { line }.into());
                }
                None if self.require_category => {
                    return Err(PipelineError::MissingColumn { line, column: "category" }.into());
                }
                _ => None,
            };

            records.push(NewsRecord::new(article_id, text, category));
        }

        tracing::debug!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
