//! # Phonesis
//!
//! A phonetically-motivated sub-word tokenizer.
//!
//! ## Features
//!
//! - Consonant/vowel alphabets for any language
//! - Deterministic syllable segmentation driven by five fragment shapes
//! - Vocabulary training over arbitrary corpora
//! - Vocabulary lookup with unknown-fragment accounting and a strict mode
//! - JSON persistence of alphabet and vocabulary
//!
//! ## Example
//!
//! ```
//! use phonesis::prelude::*;
//!
//! let mut trainer = Trainer::new(Alphabet::english());
//! trainer.run(["Each machine learning module"]).unwrap();
//!
//! let tokenizer = trainer.into_tokenizer().with_strict(true);
//! let encoded = tokenizer.encode("machine learning").unwrap();
//! assert_eq!(encoded.fragments, vec!["mac", "hi", "ne", "#", "lear", "nin", "g", "#"]);
//! ```

pub mod alphabet;
pub mod analysis;
pub mod cli;
pub mod error;
pub mod storage;
pub mod tokenizer;
pub mod training;
pub mod vocabulary;

pub mod prelude {
    pub use crate::alphabet::{Alphabet, LetterClass};
    pub use crate::analysis::{END_OF_WORD, Fragment, Segmenter, Shape, WordToken};
    pub use crate::error::{PhonesisError, Result};
    pub use crate::storage::{JsonFileStore, ModelRecord, RecordStore};
    pub use crate::tokenizer::{TokenId, TokenizedText, Tokenizer, TokenizerConfig, UNKNOWN_ID};
    pub use crate::training::{Trainer, TrainerConfig};
    pub use crate::vocabulary::Vocabulary;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
