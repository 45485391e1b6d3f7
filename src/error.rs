//! Error types for the Phonesis library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`PhonesisError`] enum.
//!
//! # Examples
//!
//! ```
//! use phonesis::error::{PhonesisError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PhonesisError::invalid_alphabet("'a' is both a consonant and a vowel"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Phonesis operations.
#[derive(Error, Debug)]
pub enum PhonesisError {
    /// I/O errors (reading word lists, model files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The consonant/vowel alphabet cannot be used for segmentation
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// A persisted record is missing a field or carries inconsistent data
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A fragment is absent from the vocabulary while running in strict mode
    #[error("Unknown fragment: \"{fragment}\" is unknown")]
    UnknownFragment { fragment: String },

    /// The segmentation loop could not consume a word.
    ///
    /// This never happens for a valid alphabet and a pre-filtered word; it
    /// signals a defect rather than bad user input.
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// Invalid argument passed through the command line or the API
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PhonesisError.
pub type Result<T> = std::result::Result<T, PhonesisError>;

impl PhonesisError {
    /// Create a new invalid alphabet error.
    pub fn invalid_alphabet<S: Into<String>>(msg: S) -> Self {
        PhonesisError::InvalidAlphabet(msg.into())
    }

    /// Create a new malformed record error.
    pub fn malformed_record<S: Into<String>>(msg: S) -> Self {
        PhonesisError::MalformedRecord(msg.into())
    }

    /// Create a new unknown fragment error.
    pub fn unknown_fragment<S: Into<String>>(fragment: S) -> Self {
        PhonesisError::UnknownFragment {
            fragment: fragment.into(),
        }
    }

    /// Create a new segmentation error.
    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        PhonesisError::Segmentation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PhonesisError::InvalidArgument(msg.into())
    }
}
