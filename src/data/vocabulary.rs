// ============================================================
// Layer 4 - Vocabulary Builder
// ============================================================
// Builds the word → rank mapping used to turn text into ids.
//
// Rank layout:
//   0        [PAD]  never assigned to a word
//   1        <OOV>  every word outside the vocabulary
//   2..=N+1         the N most frequent training words,
//                   most frequent first, ties in first-seen order
//
// Words are produced by `split_words`: lowercase, punctuation
// replaced by spaces, split on whitespace.
//
// The vocabulary must be built from the training partition only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id used to pad sequences to a fixed length
pub const PAD_ID: u32 = 0;

/// Id every out-of-vocabulary word maps to
pub const OOV_ID: u32 = 1;

/// Characters treated as word separators, in addition to whitespace
pub const SEPARATOR_CHARS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Lowercase `text`, replace separator characters with spaces and
/// split on whitespace.
pub fn split_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if SEPARATOR_CHARS.contains(c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// An immutable, frequency-ranked word vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// word → rank, including the OOV token at `OOV_ID`
    index:        HashMap<String, u32>,
    oov_token:    String,
    /// cap on retained words, not counting the OOV token
    max_words:    usize,
    /// distinct words seen in the corpus before the cap
    corpus_words: usize,
}

impl Vocabulary {
    /// Count words over `texts` and keep the `max_words` most frequent.
    pub fn build<S: AsRef<str>>(texts: &[S], max_words: usize, oov_token: &str) -> Self {
        // word → (count, first-seen position)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut seen = 0usize;

        for text in texts {
            for word in split_words(text.as_ref()) {
                let entry = counts.entry(word).or_insert_with(|| {
                    let fresh = (0, seen);
                    seen += 1;
                    fresh
                });
                entry.0 += 1;
            }
        }

        let corpus_words = counts.len();

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let mut index = HashMap::with_capacity(max_words.min(corpus_words) + 1);
        index.insert(oov_token.to_string(), OOV_ID);

        let mut next = OOV_ID + 1;
        for (word, _, _) in ranked {
            if index.len() > max_words {
                break;
            }
            if word == oov_token {
                continue;
            }
            index.insert(word, next);
            next += 1;
        }

        tracing::debug!(
            "Vocabulary: {} of {} corpus words kept (cap {})",
            index.len() - 1,
            corpus_words,
            max_words
        );

        Self {
            index,
            oov_token: oov_token.to_string(),
            max_words,
            corpus_words,
        }
    }

    /// Rank of `word`, if it is in the vocabulary
    pub fn rank(&self, word: &str) -> Option<u32> {
        self.index.get(word).copied()
    }

    /// Entries including the OOV token
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Rows the embedding table needs: every rank plus padding
    pub fn input_dim(&self) -> usize {
        self.index.len() + 1
    }

    pub fn corpus_words(&self) -> usize {
        self.corpus_words
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn oov_token(&self) -> &str {
        &self.oov_token
    }

    /// word → rank map, OOV included
    pub fn word_index(&self) -> &HashMap<String, u32> {
        &self.index
    }

    /// Words sorted by rank, starting with the OOV token
    pub fn words_by_rank(&self) -> Vec<&str> {
        let mut entries: Vec<(&str, u32)> = self
            .index
            .iter()
            .map(|(w, &r)| (w.as_str(), r))
            .collect();
        entries.sort_by_key(|&(_, r)| r);
        entries.into_iter().map(|(w, _)| w).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_frequent_word_ranks_first() {
        let vocab = Vocabulary::build(&["cat dog", "dog dog bird"], 2, "<OOV>");

        let dog = vocab.rank("dog").unwrap();
        assert_eq!(dog, 2);
        if let Some(cat) = vocab.rank("cat") {
            assert!(dog < cat);
        }
        if let Some(bird) = vocab.rank("bird") {
            assert!(dog < bird);
        }
    }

    #[test]
    fn test_cap_keeps_first_seen_on_ties() {
        let vocab = Vocabulary::build(&["cat dog", "dog dog bird"], 2, "<OOV>");

        assert_eq!(vocab.words_by_rank(), vec!["<OOV>", "dog", "cat"]);
        assert_eq!(vocab.rank("bird"), None);
        assert_eq!(vocab.corpus_words(), 3);
        assert_eq!(vocab.input_dim(), 4);
    }

    #[test]
    fn test_huge_cap_keeps_whole_corpus() {
        let vocab = Vocabulary::build(&["cat dog", "dog dog bird"], usize::MAX, "<OOV>");

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.words_by_rank(), vec!["<OOV>", "dog", "cat", "bird"]);
    }

    #[test]
    fn test_oov_token_has_reserved_rank() {
        let vocab = Vocabulary::build(&["alpha beta"], 10, "<OOV>");
        assert_eq!(vocab.rank("<OOV>"), Some(OOV_ID));
        assert!(vocab.word_index().values().all(|&r| r != PAD_ID));
    }

    #[test]
    fn test_ranks_are_contiguous() {
        let vocab = Vocabulary::build(&["a b c d e f", "a b c", "a"], 100, "<OOV>");
        let mut ranks: Vec<u32> = vocab.word_index().values().copied().collect();
        ranks.sort_unstable();
        let expected: Vec<u32> = (1..=vocab.len() as u32).collect();
        assert_eq!(ranks, expected);
    }

    #[test]
    fn test_only_given_texts_contribute() {
        let vocab = Vocabulary::build(&["training words only"], 100, "<OOV>");
        assert_eq!(vocab.rank("validation"), None);
    }

    #[test]
    fn test_split_words_strips_punctuation_and_case() {
        assert_eq!(
            split_words("Profits, rose (sharply) to $5.2bn!"),
            vec!["profits", "rose", "sharply", "to", "5", "2bn"]
        );
        // apostrophes are not separators
        assert_eq!(split_words("firm's"), vec!["firm's"]);
    }

    #[test]
    fn test_empty_corpus() {
        let empty: [&str; 0] = [];
        let vocab = Vocabulary::build(&empty, 5, "<OOV>");
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.corpus_words(), 0);
    }
}
