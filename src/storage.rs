//! Persistence of alphabets and vocabularies.
//!
//! A model is stored as a JSON record with exactly three fields:
//!
//! ```json
//! {
//!   "consonants": ["b", "c", "d"],
//!   "vowels": ["a", "e"],
//!   "vocab": ["#", "ba", "ced"]
//! }
//! ```
//!
//! The [`RecordStore`] trait is the port through which tokenizers load and
//! save such records; [`JsonFileStore`] is the file-backed implementation.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::alphabet::Alphabet;
use crate::error::{PhonesisError, Result};
use crate::vocabulary::Vocabulary;

/// Serialized form of an alphabet and its vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub consonants: Vec<String>,
    pub vowels: Vec<String>,
    pub vocab: Vec<String>,
}

impl ModelRecord {
    pub fn new(alphabet: &Alphabet, vocabulary: &Vocabulary) -> Self {
        ModelRecord {
            consonants: alphabet.consonants().iter().map(char::to_string).collect(),
            vowels: alphabet.vowels().iter().map(char::to_string).collect(),
            vocab: vocabulary.as_slice().to_vec(),
        }
    }

    /// Parse a record, rejecting input with a missing field.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PhonesisError::malformed_record(format!("invalid model record: {e}")))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated alphabet of this record.
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::from_strings(&self.consonants, &self.vowels)
    }

    /// Validated vocabulary of this record.
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::from_entries(self.vocab.iter().cloned())
    }
}

/// Alphabet-only record accepted by the training entry point.
///
/// Extra fields are ignored, so a full model record is a valid alphabet
/// record too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetRecord {
    pub consonants: Vec<String>,
    pub vowels: Vec<String>,
}

impl AlphabetRecord {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PhonesisError::malformed_record(format!("invalid alphabet record: {e}")))
    }

    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::from_strings(&self.consonants, &self.vowels)
    }
}

/// Load/save port for model records.
pub trait RecordStore {
    fn load(&self) -> Result<ModelRecord>;

    fn save(&self, record: &ModelRecord) -> Result<()>;
}

/// Stores a record as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<ModelRecord> {
        let file = File::open(&self.path)?;
        let record: ModelRecord =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                PhonesisError::malformed_record(format!(
                    "failed to parse model file '{}': {e}",
                    self.path.display()
                ))
            })?;

        info!(
            "Read model record from '{}' ({} tokens)",
            self.path.display(),
            record.vocab.len()
        );
        Ok(record)
    }

    /// Write through a temporary file in the target directory, then rename
    /// it over the destination.
    fn save(&self, record: &ModelRecord) -> Result<()> {
        let parent_dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, record)?;
            writer.flush()?;
        }
        temp_file
            .persist(&self.path)
            .map_err(|e| PhonesisError::Io(e.error))?;

        info!(
            "Saved model record to '{}' ({} tokens)",
            self.path.display(),
            record.vocab.len()
        );
        Ok(())
    }
}

/// Read an alphabet record from a JSON file.
pub fn load_alphabet(path: &Path) -> Result<Alphabet> {
    let content = fs::read_to_string(path)?;
    AlphabetRecord::from_json(&content)?.alphabet()
}
