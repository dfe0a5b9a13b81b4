// ============================================================
// Layer 4 - Train/Validation Splitter
// ============================================================
// Splits the labelled corpus into two ordered partitions:
//   - Training set:   the first floor(n * fraction) items
//   - Validation set: everything after that
//
// No shuffling: the same input order and fraction always give
// the same split. Texts and labels are split at the same index
// so their pairing survives.
//
// Example (n = 10, fraction = 0.8):
//   [0 1 2 3 4 5 6 7 | 8 9]
//    train (8)         val (2)

use crate::domain::error::PipelineError;

/// Number of training items for `total` items and `train_fraction`.
///
/// floor(total * fraction), clamped into 0..=total so that an
/// out-of-range fraction can never make slicing panic.
pub fn train_size(total: usize, train_fraction: f64) -> usize {
    let raw = ((total as f64) * train_fraction).floor();
    // `as usize` saturates: negatives and NaN become 0
    (raw as usize).min(total)
}

/// Split `items` into (train, validation) at `train_size`.
///
/// # Example
/// ```ignore
/// let (train, val) = split_train_val((0..10).collect::<Vec<_>>(), 0.8);
/// assert_eq!(train, vec![0, 1, 2, 3, 4, 5, 6, 7]);
/// assert_eq!(val,   vec![8, 9]);
/// ```
pub fn split_train_val<T>(mut items: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    let split_at = train_size(items.len(), train_fraction);

    // split_off(n) leaves [0..n) in `items` and returns [n..len)
    let val = items.split_off(split_at);
    (items, val)
}

/// The four partitions of a labelled corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainValSplit {
    pub train_texts:  Vec<String>,
    pub val_texts:    Vec<String>,
    pub train_labels: Vec<String>,
    pub val_labels:   Vec<String>,
}

/// Split parallel texts and labels at the same index.
pub fn split_texts_and_labels(
    texts:          Vec<String>,
    labels:         Vec<String>,
    train_fraction: f64,
) -> Result<TrainValSplit, PipelineError> {
    if texts.len() != labels.len() {
        return Err(PipelineError::LengthMismatch {
            texts:  texts.len(),
            labels: labels.len(),
        });
    }

    let total = texts.len();
    let (train_texts, val_texts)   = split_train_val(texts, train_fraction);
    let (train_labels, val_labels) = split_train_val(labels, train_fraction);

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        train_texts.len(),
        val_texts.len(),
        (train_texts.len() * 100) / total.max(1),
        (val_texts.len()   * 100) / total.max(1),
    );

    Ok(TrainValSplit { train_texts, val_texts, train_labels, val_labels })
}
