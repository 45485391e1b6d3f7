//! Syllable segmentation engine.
//!
//! A word is encoded against the alphabet and consumed head-first: at every
//! step the shapes are tried in priority order, the first one that fires
//! emits a fragment, and the scan restarts on the remainder. The token
//! sequence of a word is its fragments followed by [`END_OF_WORD`].
//!
//! # Examples
//!
//! ```
//! use phonesis::alphabet::Alphabet;
//! use phonesis::analysis::segmenter::Segmenter;
//!
//! let segmenter = Segmenter::new(Alphabet::english());
//! let tokens = segmenter.segment("machine").unwrap();
//! let texts: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
//! assert_eq!(texts, vec!["mac", "hi", "ne", "#"]);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::analysis::normalizer;
use crate::analysis::shape::{self, Shape};
use crate::error::{PhonesisError, Result};

/// Marker appended after the last fragment of every word.
pub const END_OF_WORD: &str = "#";

/// A contiguous piece of a word recognized by one shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// The fragment text
    pub text: String,
    /// Byte offset where the fragment starts in the word
    pub start_offset: usize,
    /// Byte offset where the fragment ends in the word (exclusive)
    pub end_offset: usize,
    /// The shape that produced this fragment
    pub shape: Shape,
}

/// One element of a word's token sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordToken {
    Fragment(Fragment),
    EndOfWord,
}

impl WordToken {
    /// Vocabulary form of the token.
    pub fn as_str(&self) -> &str {
        match self {
            WordToken::Fragment(fragment) => &fragment.text,
            WordToken::EndOfWord => END_OF_WORD,
        }
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        match self {
            WordToken::Fragment(fragment) => Some(fragment),
            WordToken::EndOfWord => None,
        }
    }

    pub fn is_end_of_word(&self) -> bool {
        matches!(self, WordToken::EndOfWord)
    }
}

/// A normalized word of a text with its token sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentedWord {
    /// Slot of the word in the whitespace split of the text
    pub position: usize,
    pub word: String,
    pub tokens: Vec<WordToken>,
}

/// Segment `word` against `alphabet`.
///
/// The word must consist of alphabet letters only; anything else would
/// desynchronize the encoding from the word and is reported as a
/// segmentation error.
pub fn segment_word(alphabet: &Alphabet, word: &str) -> Result<Vec<WordToken>> {
    let encoding = alphabet.encode(word);
    let offsets: Vec<usize> = word.char_indices().map(|(offset, _)| offset).collect();

    if encoding.len() != offsets.len() {
        return Err(PhonesisError::segmentation(format!(
            "word {word:?} contains characters outside the alphabet"
        )));
    }

    let classes = encoding.classes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < classes.len() {
        let matched = shape::match_first(&classes[pos..]).ok_or_else(|| {
            PhonesisError::segmentation(format!(
                "no shape matches the residual {:?} of {word:?}",
                &word[offsets[pos]..]
            ))
        })?;

        let end = pos + matched.len;
        let start_offset = offsets[pos];
        let end_offset = offsets.get(end).copied().unwrap_or(word.len());

        tokens.push(WordToken::Fragment(Fragment {
            text: word[start_offset..end_offset].to_string(),
            start_offset,
            end_offset,
            shape: matched.shape,
        }));
        pos = end;
    }

    tokens.push(WordToken::EndOfWord);
    Ok(tokens)
}

/// Segmentation engine bound to one alphabet.
///
/// The alphabet is shared read-only, so a segmenter is cheap to clone and
/// safe to use from several threads at once.
#[derive(Clone, Debug)]
pub struct Segmenter {
    alphabet: Arc<Alphabet>,
}

impl Segmenter {
    pub fn new(alphabet: impl Into<Arc<Alphabet>>) -> Self {
        Segmenter {
            alphabet: alphabet.into(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub(crate) fn shared_alphabet(&self) -> Arc<Alphabet> {
        Arc::clone(&self.alphabet)
    }

    /// Segment a single pre-filtered word.
    pub fn segment(&self, word: &str) -> Result<Vec<WordToken>> {
        segment_word(&self.alphabet, word)
    }

    /// Normalize `text` and segment each of its words.
    pub fn segment_text(&self, text: &str) -> Result<Vec<SegmentedWord>> {
        normalizer::words(text, &self.alphabet)
            .into_iter()
            .map(|(position, word)| {
                let tokens = self.segment(&word)?;
                Ok(SegmentedWord {
                    position,
                    word,
                    tokens,
                })
            })
            .collect()
    }
}
