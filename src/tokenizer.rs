//! Vocabulary-backed syllable tokenizer.
//!
//! A [`Tokenizer`] holds an alphabet and a vocabulary. Text is normalized and
//! segmented exactly as during training, and every token is mapped to its
//! vocabulary index. Tokens missing from the vocabulary get [`UNKNOWN_ID`]
//! and the word they belong to is recorded, unless the tokenizer runs in
//! strict mode, in which case the first miss aborts with
//! [`PhonesisError::UnknownFragment`].
//!
//! # Examples
//!
//! ```
//! use phonesis::alphabet::Alphabet;
//! use phonesis::tokenizer::{Tokenizer, UNKNOWN_ID};
//! use phonesis::vocabulary::Vocabulary;
//!
//! let vocab = Vocabulary::from_entries(["#", "hi", "mac", "ne"]).unwrap();
//! let tokenizer = Tokenizer::new(Alphabet::english(), vocab);
//!
//! let encoded = tokenizer.encode("Machine code").unwrap();
//! assert_eq!(&encoded.ids[..4], &[2, 1, 3, 0]);
//! assert_eq!(encoded.ids[4], UNKNOWN_ID);
//! assert_eq!(encoded.unknowns.get("code"), Some(&1));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::analysis::normalizer;
use crate::analysis::segmenter::segment_word;
use crate::error::{PhonesisError, Result};
use crate::storage::{ModelRecord, RecordStore};
use crate::vocabulary::Vocabulary;

/// Index of a token in the vocabulary.
pub type TokenId = i64;

/// Index emitted for tokens missing from the vocabulary.
pub const UNKNOWN_ID: TokenId = -1;

/// Tokenizer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Fail on the first token missing from the vocabulary.
    pub strict: bool,
}

/// Result of tokenizing one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedText {
    /// Tokens of every word, each word closed by the end-of-word marker.
    pub fragments: Vec<String>,
    /// Vocabulary index of each token, aligned with `fragments`.
    pub ids: Vec<TokenId>,
    /// Words that produced unknown tokens, mapped to their slot position.
    ///
    /// A word seen at several positions keeps the last one.
    pub unknowns: BTreeMap<String, usize>,
}

impl TokenizedText {
    pub fn has_unknowns(&self) -> bool {
        !self.unknowns.is_empty()
    }
}

/// Maps text to vocabulary indices.
///
/// The alphabet and vocabulary are immutable snapshots behind `Arc`, so a
/// tokenizer can be shared across threads for read-only encoding.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    alphabet: Arc<Alphabet>,
    vocabulary: Arc<Vocabulary>,
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a lenient tokenizer.
    pub fn new(alphabet: Alphabet, vocabulary: Vocabulary) -> Self {
        Self::from_parts(Arc::new(alphabet), vocabulary, TokenizerConfig::default())
    }

    pub(crate) fn from_parts(
        alphabet: Arc<Alphabet>,
        vocabulary: Vocabulary,
        config: TokenizerConfig,
    ) -> Self {
        Tokenizer {
            alphabet,
            vocabulary: Arc::new(vocabulary),
            config,
        }
    }

    /// Build a tokenizer from a persisted record.
    pub fn from_record(record: &ModelRecord) -> Result<Self> {
        let alphabet = record.alphabet()?;
        let vocabulary = record.vocabulary()?;
        Ok(Self::new(alphabet, vocabulary))
    }

    pub fn with_config(mut self, config: TokenizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.config.strict = strict;
    }

    pub fn is_strict(&self) -> bool {
        self.config.strict
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Tokenize one text.
    pub fn encode(&self, text: &str) -> Result<TokenizedText> {
        let mut result = TokenizedText::default();

        for (position, word) in normalizer::words(text, &self.alphabet) {
            for token in segment_word(&self.alphabet, &word)? {
                let fragment = token.as_str();
                match self.vocabulary.index_of(fragment) {
                    Some(index) => result.ids.push(index as TokenId),
                    None => {
                        if self.config.strict {
                            return Err(PhonesisError::unknown_fragment(fragment));
                        }
                        result.ids.push(UNKNOWN_ID);
                        result.unknowns.insert(word.clone(), position);
                    }
                }
                result.fragments.push(fragment.to_string());
            }
        }

        if result.has_unknowns() {
            warn!(
                "{} word(s) with unknown fragments: {:?}",
                result.unknowns.len(),
                result.unknowns.keys().collect::<Vec<_>>()
            );
        }

        Ok(result)
    }

    /// Tokenize each text independently, in order.
    pub fn forward<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<TokenizedText>> {
        texts.iter().map(|text| self.encode(text.as_ref())).collect()
    }

    /// Tokenize texts on the rayon thread pool; results keep input order.
    pub fn par_forward<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<TokenizedText>> {
        texts
            .par_iter()
            .map(|text| self.encode(text.as_ref()))
            .collect()
    }

    /// Tokenize a single text as a one-element batch.
    pub fn call(&self, text: &str) -> Result<Vec<TokenizedText>> {
        self.forward(&[text])
    }

    /// Snapshot of the alphabet and vocabulary as a persistable record.
    pub fn to_record(&self) -> ModelRecord {
        ModelRecord::new(&self.alphabet, &self.vocabulary)
    }

    /// Replace alphabet and vocabulary with the content of `store`.
    ///
    /// The record is fully validated first; on error the tokenizer keeps
    /// its previous state. The strictness setting is kept.
    pub fn load(&mut self, store: &dyn RecordStore) -> Result<()> {
        let record = store.load()?;
        let alphabet = record.alphabet()?;
        let vocabulary = record.vocabulary()?;

        self.alphabet = Arc::new(alphabet);
        self.vocabulary = Arc::new(vocabulary);
        info!(
            "Loaded tokenizer with {} letters and {} tokens",
            self.alphabet.consonants().len() + self.alphabet.vowels().len(),
            self.vocabulary.len()
        );
        Ok(())
    }

    /// Write alphabet and vocabulary to `store`.
    pub fn save(&self, store: &dyn RecordStore) -> Result<()> {
        store.save(&self.to_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::train;

    fn trained(corpus: &[&str]) -> Tokenizer {
        let alphabet = Alphabet::english();
        let mut vocab = Vocabulary::new();
        train(corpus, &alphabet, &mut vocab).unwrap();
        Tokenizer::new(alphabet, vocab)
    }

    #[test]
    fn test_encode_known_text() {
        let tokenizer = trained(&["machine module"]);
        // ["#", "du", "hi", "le", "mac", "mo", "ne"]
        let encoded = tokenizer.encode("Module, machine.").unwrap();

        assert_eq!(
            encoded.fragments,
            vec!["mo", "du", "le", "#", "mac", "hi", "ne", "#"]
        );
        assert_eq!(encoded.ids, vec![5, 1, 3, 0, 4, 2, 6, 0]);
        assert!(!encoded.has_unknowns());
    }

    #[test]
    fn test_unknowns_recorded_in_lenient_mode() {
        let tokenizer = trained(&["machine"]);
        let encoded = tokenizer.encode("machine  module machine").unwrap();

        assert_eq!(encoded.fragments.len(), encoded.ids.len());
        assert_eq!(&encoded.ids[4..7], &[UNKNOWN_ID, UNKNOWN_ID, UNKNOWN_ID]);
        assert_eq!(encoded.ids[7], 0);
        assert_eq!(encoded.unknowns.len(), 1);
        assert_eq!(encoded.unknowns.get("module"), Some(&2));
    }

    #[test]
    fn test_unknowns_last_write_wins() {
        let tokenizer = trained(&["a"]);
        let encoded = tokenizer.encode("be a be").unwrap();
        assert_eq!(encoded.unknowns.get("be"), Some(&2));
        assert_eq!(encoded.unknowns.len(), 1);
    }

    #[test]
    fn test_only_spaces_separate_words() {
        let tokenizer = trained(&["ma\tne"]);
        assert_eq!(tokenizer.vocabulary().as_slice(), &["#", "ma", "ne"]);

        let encoded = tokenizer.encode("ma\tne ne\r\nma").unwrap();
        assert_eq!(encoded.fragments, vec!["ma", "ne", "#", "ne", "ma", "#"]);
        assert!(!encoded.has_unknowns());

        let encoded = tokenizer.encode("ma\tne su\tn").unwrap();
        assert_eq!(encoded.unknowns.get("sun"), Some(&1));
    }

    #[test]
    fn test_config_builder() {
        let tokenizer = trained(&["machine"]).with_config(TokenizerConfig { strict: true });
        assert!(tokenizer.is_strict());
        assert_eq!(tokenizer.config(), &TokenizerConfig { strict: true });
    }

    #[test]
    fn test_strict_mode_fails_on_unknown() {
        let tokenizer = trained(&["machine"]).with_strict(true);
        assert!(tokenizer.encode("machine").is_ok());

        match tokenizer.encode("machine module") {
            Err(PhonesisError::UnknownFragment { fragment }) => assert_eq!(fragment, "mo"),
            other => panic!("expected unknown fragment error, got {other:?}"),
        }
    }

    #[test]
    fn test_forward_is_independent_per_text() {
        let tokenizer = trained(&["each machine"]);
        let texts = ["each", "", "machine each"];

        let results = tokenizer.forward(&texts).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], tokenizer.encode("each").unwrap());
        assert!(results[1].fragments.is_empty());
        assert_eq!(results[2].fragments.len(), 7);

        assert_eq!(tokenizer.par_forward(&texts).unwrap(), results);
        assert_eq!(tokenizer.call("each").unwrap(), vec![results[0].clone()]);
    }

    #[test]
    fn test_record_snapshot() {
        let tokenizer = trained(&["machine"]);
        let record = tokenizer.to_record();

        assert_eq!(record.vowels, vec!["a", "e", "i", "o", "u"]);
        assert_eq!(record.vocab, vec!["#", "hi", "mac", "ne"]);

        let rebuilt = Tokenizer::from_record(&record).unwrap();
        assert_eq!(rebuilt.vocabulary(), tokenizer.vocabulary());
        assert_eq!(rebuilt.alphabet(), tokenizer.alphabet());
    }
}
