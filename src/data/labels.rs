// ============================================================
// Layer 4 - Label Encoder
// ============================================================
// Maps category strings to 0-based class indices.
//
// The encoder is fitted on the FULL label list (training and
// validation together) so that encoding either partition can
// never meet an unseen label. Classes are ordered by descending
// frequency, ties in first-seen order:
//
//   labels: sport, business, sport, tech, business, sport
//   classes: 0 = sport, 1 = business, 2 = tech

use std::collections::HashMap;

use crate::domain::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    /// class index → normalised label
    classes: Vec<String>,
    /// normalised label → class index
    index:   HashMap<String, usize>,
}

fn normalise(label: &str) -> String {
    label.trim().to_lowercase()
}

impl LabelEncoder {
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        // label → (count, first-seen position)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (pos, label) in labels.iter().enumerate() {
            counts.entry(normalise(label.as_ref())).or_insert((0, pos)).0 += 1;
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(label, (count, first))| (label, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let classes: Vec<String> = ranked.into_iter().map(|(label, _, _)| label).collect();
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        Self { classes, index }
    }

    /// Class index of one label
    pub fn encode_one(&self, label: &str) -> Result<usize, PipelineError> {
        let key = normalise(label);
        self.index
            .get(&key)
            .copied()
            .ok_or(PipelineError::UnknownLabel(key))
    }

    /// Class indices for `labels`, in order
    pub fn encode<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>, PipelineError> {
        labels.iter().map(|l| self.encode_one(l.as_ref())).collect()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_labels_get_valid_indices() {
        let enc     = LabelEncoder::fit(&["business", "tech"]);
        let encoded = enc.encode(&["tech"]).unwrap();

        assert_eq!(encoded.len(), 1);
        assert!(encoded[0] < enc.num_classes());
        assert!(enc.encode_one("business").unwrap() < enc.num_classes());
        assert_ne!(enc.encode_one("business").unwrap(), encoded[0]);
    }

    #[test]
    fn test_orders_by_frequency_then_first_seen() {
        let enc = LabelEncoder::fit(&["sport", "business", "sport", "tech", "business", "sport"]);
        assert_eq!(enc.classes(), &["sport", "business", "tech"]);
        assert_eq!(enc.encode_one("tech").unwrap(), 2);
    }

    #[test]
    fn test_normalises_case_and_whitespace() {
        let enc = LabelEncoder::fit(&["Tech", " tech "]);
        assert_eq!(enc.num_classes(), 1);
        assert_eq!(enc.encode_one("TECH").unwrap(), 0);
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let enc = LabelEncoder::fit(&["business"]);
        assert_eq!(
            enc.encode_one("politics"),
            Err(PipelineError::UnknownLabel("politics".into()))
        );
    }
}
