// ============================================================
// Layer 3 - News Record Domain Type
// ============================================================
// One row of the BBC-style news CSV:
//
//   ArticleId,Text,Category
//   1833,"worldcom ex-boss launches defence ...",business
//
// The test file has no Category column, so `category` is optional.

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

/// A raw news article before any cleaning or tokenisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    /// The article identifier from the first CSV column
    pub article_id: String,

    /// The full article text
    pub text: String,

    /// The category label, absent for test data
    pub category: Option<String>,
}

impl NewsRecord {
    pub fn new(
        article_id: impl Into<String>,
        text:       impl Into<String>,
        category:   Option<String>,
    ) -> Self {
        Self {
            article_id: article_id.into(),
            text:       text.into(),
            category,
        }
    }
}

/// Split labelled records into parallel (texts, labels) vectors.
///
/// Fails with `MissingCategory` on the first record without a label;
/// `line` is 1-based and counts the header row, as a spreadsheet would.
pub fn into_texts_and_labels(
    records: Vec<NewsRecord>,
) -> Result<(Vec<String>, Vec<String>), PipelineError> {
    let mut texts  = Vec::with_capacity(records.len());
    let mut labels = Vec::with_capacity(records.len());

    for (i, record) in records.into_iter().enumerate() {
        let category = record
            .category
            .ok_or(PipelineError::MissingCategory { line: i + 2 })?;
        texts.push(record.text);
        labels.push(category);
    }

    Ok((texts, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_into_parallel_vectors() {
        let records = vec![
            NewsRecord::new("1", "first text", Some("tech".into())),
            NewsRecord::new("2", "second text", Some("sport".into())),
        ];
        let (texts, labels) = into_texts_and_labels(records).unwrap();
        assert_eq!(texts, vec!["first text", "second text"]);
        assert_eq!(labels, vec!["tech", "sport"]);
    }

    #[test]
    fn test_unlabelled_record_is_rejected() {
        let records = vec![
            NewsRecord::new("1", "first", Some("tech".into())),
            NewsRecord::new("2", "second", None),
        ];
        let err = into_texts_and_labels(records).unwrap_err();
        assert_eq!(err, PipelineError::MissingCategory { line: 3 });
    }
}
