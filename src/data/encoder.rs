// ============================================================
// Layer 4 - Sequence Encoder
// ============================================================
// Turns a text into exactly `max_len` integers:
//
//   "bank raised rates sharply"          (vocab lookup)
//        → [7, 12, 1, 40]                 1 = <OOV>
//        → [7, 12, 1, 40, 0, 0, ..., 0]   padding = post
//        → [0, ..., 0, 7, 12, 1, 40]      padding = pre
//
// Sequences longer than `max_len` lose their tail.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::vocabulary::{Vocabulary, PAD_ID};
use crate::infra::word_tokenizer::WordTokenizer;

/// Which side of a short sequence receives the padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// zeros before the tokens
    Pre,
    /// zeros after the tokens
    #[default]
    Post,
}

/// Truncate `ids` from the end to `max_len`, then pad with `PAD_ID`
/// on the `padding` side up to `max_len`.
pub fn pad_sequence(ids: &[u32], max_len: usize, padding: Padding) -> Vec<u32> {
    let kept = &ids[..ids.len().min(max_len)];
    let fill = max_len - kept.len();

    let mut out = Vec::with_capacity(max_len);
    match padding {
        Padding::Pre => {
            out.resize(fill, PAD_ID);
            out.extend_from_slice(kept);
        }
        Padding::Post => {
            out.extend_from_slice(kept);
            out.resize(max_len, PAD_ID);
        }
    }
    out
}

pub struct SequenceEncoder {
    tokenizer: WordTokenizer,
    max_len:   usize,
    padding:   Padding,
}

impl SequenceEncoder {
    pub fn new(vocabulary: &Vocabulary, max_len: usize, padding: Padding) -> Result<Self> {
        Ok(Self {
            tokenizer: WordTokenizer::from_vocabulary(vocabulary)?,
            max_len,
            padding,
        })
    }

    /// Encode one text to exactly `max_len` ids
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let ids = self.tokenizer.token_ids(text)?;
        Ok(pad_sequence(&ids, self.max_len, self.padding))
    }

    /// Encode every text, preserving order
    pub fn encode_all(&self, texts: &[String]) -> Result<Vec<Vec<u32>>> {
        texts.iter().map(|t| self.encode(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::OOV_ID;

    fn encoder(max_len: usize, padding: Padding) -> (Vocabulary, SequenceEncoder) {
        let vocab = Vocabulary::build(&["bank raised rates", "bank cut rates"], 100, "<OOV>");
        let enc   = SequenceEncoder::new(&vocab, max_len, padding).unwrap();
        (vocab, enc)
    }

    #[test]
    fn test_post_padding() {
        assert_eq!(pad_sequence(&[5, 6], 4, Padding::Post), vec![5, 6, 0, 0]);
    }

    #[test]
    fn test_pre_padding() {
        assert_eq!(pad_sequence(&[5, 6], 4, Padding::Pre), vec![0, 0, 5, 6]);
    }

    #[test]
    fn test_truncates_from_the_end() {
        assert_eq!(pad_sequence(&[1, 2, 3, 4, 5], 3, Padding::Post), vec![1, 2, 3]);
        assert_eq!(pad_sequence(&[1, 2, 3, 4, 5], 3, Padding::Pre), vec![1, 2, 3]);
    }

    #[test]
    fn test_length_is_always_max_len() {
        let (_, enc) = encoder(6, Padding::Post);
        let long     = "bank ".repeat(50);
        for text in ["", "bank", "bank raised rates cut", long.as_str()] {
            assert_eq!(enc.encode(text).unwrap().len(), 6, "text: {text:?}");
        }
    }

    #[test]
    fn test_encodes_known_and_unknown_words() {
        let (vocab, enc) = encoder(5, Padding::Post);
        let ids          = enc.encode("Bank raised profits").unwrap();

        assert_eq!(
            ids,
            vec![vocab.rank("bank").unwrap(), vocab.rank("raised").unwrap(), OOV_ID, 0, 0]
        );
    }

    #[test]
    fn test_encode_all_keeps_order() {
        let (vocab, enc) = encoder(2, Padding::Pre);
        let texts        = vec!["rates".to_string(), "cut".to_string()];
        let encoded      = enc.encode_all(&texts).unwrap();

        assert_eq!(encoded[0], vec![0, vocab.rank("rates").unwrap()]);
        assert_eq!(encoded[1], vec![0, vocab.rank("cut").unwrap()]);
    }
}
