// ============================================================
// Layer 3 - Pipeline Errors
// ============================================================
// Typed failures raised by the data and application layers.
// Callers usually see them wrapped in anyhow::Error with extra
// context attached at the call site.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A CSV row had fewer columns than the loader needs
    #[error("line {line}: missing column '{column}'")]
    MissingColumn { line: usize, column: &'static str },

    /// A training row had an empty category field
    #[error("line {line}: record has no category")]
    MissingCategory { line: usize },

    /// A label that the label encoder was never fitted on
    #[error("unknown label '{0}'")]
    UnknownLabel(String),

    #[error("got {texts} texts but {labels} labels")]
    LengthMismatch { texts: usize, labels: usize },

    #[error("training partition is empty, nothing to fit")]
    EmptyTrainingSet,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
