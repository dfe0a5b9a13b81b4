// ============================================================
// Layer 6 - Word-Level Tokenizer
// ============================================================
// Wraps a HuggingFace `tokenizers::Tokenizer` with a WordLevel
// model whose vocab is exactly our `Vocabulary`.
//
// The tokenizer JSON is assembled in memory and loaded with
// `Tokenizer::from_bytes`, which avoids the trainer/ModelWrapper
// type juggling of the builder API. Nothing is written to disk.
//
// Input text is first normalised with `split_words` (lowercase,
// punctuation → space), so the tokenizer only has to split on
// whitespace and look words up; misses become the OOV token.

use anyhow::{Context, Result};
use tokenizers::Tokenizer;

use crate::data::vocabulary::{split_words, Vocabulary};

pub struct WordTokenizer {
    inner: Tokenizer,
}

impl WordTokenizer {
    /// Build a tokenizer whose id for each word is its vocabulary rank.
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Result<Self> {
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": {
                "type": "WhitespaceSplit"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocabulary.word_index(),
                "unk_token": vocabulary.oov_token()
            }
        });

        let bytes = serde_json::to_vec(&tokenizer_json)
            .context("Cannot serialise tokenizer JSON")?;

        let inner = Tokenizer::from_bytes(bytes)
            .map_err(|e| anyhow::anyhow!("Cannot build word-level tokenizer: {e}"))?;

        tracing::debug!(
            "Word-level tokenizer ready ({} entries, unk='{}')",
            vocabulary.len(),
            vocabulary.oov_token()
        );

        Ok(Self { inner })
    }

    /// Vocabulary ranks for every word of `text`, OOV for misses.
    pub fn token_ids(&self, text: &str) -> Result<Vec<u32>> {
        let words = split_words(text);
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let joined   = words.join(" ");
        let encoding = self
            .inner
            .encode(joined.as_str(), false)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

        Ok(encoding.get_ids().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::OOV_ID;

    #[test]
    fn test_ids_match_vocabulary_ranks() {
        let vocab = Vocabulary::build(&["cat dog", "dog dog bird"], 10, "<OOV>");
        let tok   = WordTokenizer::from_vocabulary(&vocab).unwrap();

        let ids = tok.token_ids("Dog, cat. BIRD").unwrap();
        assert_eq!(
            ids,
            vec![
                vocab.rank("dog").unwrap(),
                vocab.rank("cat").unwrap(),
                vocab.rank("bird").unwrap(),
            ]
        );
    }

    #[test]
    fn test_unknown_words_map_to_oov() {
        let vocab = Vocabulary::build(&["cat dog"], 10, "<OOV>");
        let tok   = WordTokenizer::from_vocabulary(&vocab).unwrap();

        assert_eq!(tok.token_ids("zebra cat").unwrap(), vec![OOV_ID, vocab.rank("cat").unwrap()]);
    }

    #[test]
    fn test_empty_text_gives_no_ids() {
        let vocab = Vocabulary::build(&["cat"], 10, "<OOV>");
        let tok   = WordTokenizer::from_vocabulary(&vocab).unwrap();
        assert!(tok.token_ids("  ...  ").unwrap().is_empty());
    }
}
