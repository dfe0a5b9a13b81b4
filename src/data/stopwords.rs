// ============================================================
// Layer 4 - Stopword Filter
// ============================================================
// Removes very common English words before tokenisation so the
// bounded vocabulary is spent on words that carry topic.
//
// Steps (applied in order):
//   1. Lowercase the whole text
//   2. Split on whitespace
//   3. Drop tokens found in the stopword set
//   4. Re-join the survivors with single spaces
//
// Tokens are matched whole, so "it's" is removed but "it's," is
// kept; punctuation is stripped later by the tokenizer.

use std::collections::HashSet;

use crate::domain::traits::TextFilter;

/// The fixed English stopword list.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "could", "did", "do", "does", "doing", "down",
    "during", "each", "few", "for", "from", "further", "had", "has", "have", "having",
    "he", "he'd", "he'll", "he's", "her", "here", "here's", "hers", "herself", "him",
    "himself", "his", "how", "how's", "i", "i'd", "i'll", "i'm", "i've", "if", "in",
    "into", "is", "it", "it's", "its", "itself", "let's", "me", "more", "most", "my",
    "myself", "nor", "of", "on", "once", "only", "or", "other", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "she'd", "she'll", "she's",
    "should", "so", "some", "such", "than", "that", "that's", "the", "their", "theirs",
    "them", "themselves", "then", "there", "there's", "these", "they", "they'd",
    "they'll", "they're", "they've", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "we'd", "we'll", "we're", "we've", "were",
    "what", "what's", "when", "when's", "where", "where's", "which", "while", "who",
    "who's", "whom", "why", "why's", "with", "would", "you", "you'd", "you'll",
    "you're", "you've", "your", "yours", "yourself", "yourselves",
];

/// A case-insensitive filter over a fixed stopword set.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Lowercase stopwords
    stopwords: HashSet<String>,
}

impl StopwordFilter {
    /// The filter over `ENGLISH_STOPWORDS`
    pub fn english() -> Self {
        Self::from_list(ENGLISH_STOPWORDS)
    }

    /// A filter over a custom list; entries are lowercased
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl TextFilter for StopwordFilter {
    fn apply(&self, text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .filter(|w| !self.stopwords.contains(*w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_stopwords_and_lowercases() {
        let f = StopwordFilter::english();
        assert_eq!(
            f.apply("The Bank of England raised THE rates"),
            "bank england raised rates"
        );
    }

    #[test]
    fn test_no_stopword_survives() {
        let f    = StopwordFilter::english();
        let text = "I'm sure THAT you'll find it's all Over when We're done, \
                    because they've got the   best  of what's left";
        let out  = f.apply(text);

        for token in out.split_whitespace() {
            assert!(
                !ENGLISH_STOPWORDS.contains(&token.to_lowercase().as_str()),
                "stopword '{token}' survived"
            );
        }
    }

    #[test]
    fn test_is_idempotent() {
        let f    = StopwordFilter::english();
        let once = f.apply("  Shares in   the firm ROSE after a strong quarter  ");
        assert_eq!(f.apply(&once), once);
    }

    #[test]
    fn test_collapses_whitespace() {
        let f = StopwordFilter::english();
        assert_eq!(f.apply("\tgoal\n\n  scored  "), "goal scored");
    }

    #[test]
    fn test_only_stopwords_gives_empty_string() {
        let f = StopwordFilter::english();
        assert_eq!(f.apply("the and of"), "");
        assert_eq!(f.apply(""), "");
    }

    #[test]
    fn test_english_list_has_no_duplicates() {
        let unique: HashSet<&str> = ENGLISH_STOPWORDS.iter().copied().collect();
        assert_eq!(unique.len(), ENGLISH_STOPWORDS.len());
    }

    #[test]
    fn test_apply_all_preserves_order() {
        let f     = StopwordFilter::from_list(&["x"]);
        let texts = vec!["a x b".to_string(), "x c".to_string()];
        assert_eq!(f.apply_all(&texts), vec!["a b", "c"]);
    }
}
