//! Consonant/vowel alphabets and the two-symbol word encoding.
//!
//! An [`Alphabet`] splits the letters of a language into two disjoint sets.
//! Every word is reduced to an [`Encoding`], one [`LetterClass`] per letter,
//! which is what the shape rules in [`crate::analysis::shape`] operate on.
//!
//! # Examples
//!
//! ```
//! use phonesis::alphabet::Alphabet;
//!
//! let alphabet = Alphabet::english();
//! assert_eq!(alphabet.encode("each").to_string(), "vvcc");
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::segmenter::END_OF_WORD;
use crate::error::{PhonesisError, Result};

/// English vowels used by [`Alphabet::english`].
pub const ENGLISH_VOWELS: &str = "aeiou";

/// English consonants used by [`Alphabet::english`].
pub const ENGLISH_CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

/// Class of a single letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterClass {
    Consonant,
    Vowel,
}

impl LetterClass {
    /// The symbol used for this class in an encoding string.
    pub fn symbol(self) -> char {
        match self {
            LetterClass::Consonant => 'c',
            LetterClass::Vowel => 'v',
        }
    }
}

/// Two disjoint sets of single characters.
///
/// The order in which letters were supplied is preserved so that a saved
/// alphabet reloads identically. Equality only looks at which class each
/// letter belongs to, not at that order.
#[derive(Clone, Debug)]
pub struct Alphabet {
    consonants: Vec<char>,
    vowels: Vec<char>,
    classes: HashMap<char, LetterClass>,
}

impl Alphabet {
    /// Build an alphabet from consonant and vowel characters.
    ///
    /// Fails when a character belongs to both sets, when a letter is
    /// whitespace or the end-of-word marker, or when both sets are empty.
    /// Repeated letters within one set are kept once.
    pub fn new<C, V>(consonants: C, vowels: V) -> Result<Self>
    where
        C: IntoIterator<Item = char>,
        V: IntoIterator<Item = char>,
    {
        let mut alphabet = Alphabet {
            consonants: Vec::new(),
            vowels: Vec::new(),
            classes: HashMap::new(),
        };

        for letter in consonants {
            alphabet.insert(letter, LetterClass::Consonant)?;
        }
        for letter in vowels {
            alphabet.insert(letter, LetterClass::Vowel)?;
        }

        if alphabet.classes.is_empty() {
            return Err(PhonesisError::invalid_alphabet("alphabet has no letters"));
        }

        Ok(alphabet)
    }

    /// Build an alphabet from the string lists of a persisted record.
    ///
    /// Each entry must hold exactly one character.
    pub fn from_strings<S: AsRef<str>>(consonants: &[S], vowels: &[S]) -> Result<Self> {
        let consonants = consonants
            .iter()
            .map(|s| single_char(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let vowels = vowels
            .iter()
            .map(|s| single_char(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Self::new(consonants, vowels)
    }

    /// The lowercase ASCII English alphabet with `a e i o u` as vowels.
    pub fn english() -> Self {
        let mut classes = HashMap::new();
        for c in ENGLISH_CONSONANTS.chars() {
            classes.insert(c, LetterClass::Consonant);
        }
        for v in ENGLISH_VOWELS.chars() {
            classes.insert(v, LetterClass::Vowel);
        }

        Alphabet {
            consonants: ENGLISH_CONSONANTS.chars().collect(),
            vowels: ENGLISH_VOWELS.chars().collect(),
            classes,
        }
    }

    fn insert(&mut self, letter: char, class: LetterClass) -> Result<()> {
        if letter.is_whitespace() {
            return Err(PhonesisError::invalid_alphabet(format!(
                "whitespace {letter:?} cannot be a letter"
            )));
        }
        if END_OF_WORD.contains(letter) {
            return Err(PhonesisError::invalid_alphabet(format!(
                "'{letter}' is reserved for the end-of-word marker"
            )));
        }

        match self.classes.get(&letter) {
            Some(existing) if *existing == class => Ok(()),
            Some(_) => Err(PhonesisError::invalid_alphabet(format!(
                "'{letter}' is both a consonant and a vowel"
            ))),
            None => {
                self.classes.insert(letter, class);
                match class {
                    LetterClass::Consonant => self.consonants.push(letter),
                    LetterClass::Vowel => self.vowels.push(letter),
                }
                Ok(())
            }
        }
    }

    /// Consonants in insertion order.
    pub fn consonants(&self) -> &[char] {
        &self.consonants
    }

    /// Vowels in insertion order.
    pub fn vowels(&self) -> &[char] {
        &self.vowels
    }

    /// Class of `letter`, or `None` when it is not part of the alphabet.
    pub fn class_of(&self, letter: char) -> Option<LetterClass> {
        self.classes.get(&letter).copied()
    }

    /// Whether `letter` is a consonant or a vowel of this alphabet.
    pub fn contains(&self, letter: char) -> bool {
        self.classes.contains_key(&letter)
    }

    /// Encode a word as a consonant/vowel sequence.
    ///
    /// Characters outside the alphabet are skipped, so the encoding only
    /// lines up with the word when the word was filtered beforehand.
    pub fn encode(&self, word: &str) -> Encoding {
        Encoding(word.chars().filter_map(|c| self.class_of(c)).collect())
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.classes == other.classes
    }
}

impl Eq for Alphabet {}

impl Default for Alphabet {
    fn default() -> Self {
        Self::english()
    }
}

fn single_char(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(PhonesisError::invalid_alphabet(format!(
            "alphabet entry {s:?} is not a single character"
        ))),
    }
}

/// A word reduced to its letter classes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Encoding(Vec<LetterClass>);

impl Encoding {
    /// The letter classes in word order.
    pub fn classes(&self) -> &[LetterClass] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.0 {
            write!(f, "{}", class.symbol())?;
        }
        Ok(())
    }
}
