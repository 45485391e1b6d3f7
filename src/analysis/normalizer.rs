//! Text normalization shared by training and tokenization.
//!
//! Text is lowercased, every character that is neither an alphabet letter
//! nor a plain space is dropped, and the remainder is split on each single
//! space. Other whitespace (tabs, line breaks, non-breaking spaces) is
//! dropped like punctuation, joining the letters around it. Consecutive
//! spaces produce empty slots; they are kept so that word positions
//! reflect the slot layout of the input, and skipped by [`words`].

use crate::alphabet::Alphabet;

/// The only character that separates words.
pub const SEPARATOR: char = ' ';

/// Lowercase `text`, keep only alphabet letters and spaces, and split on
/// every space.
///
/// # Examples
///
/// ```
/// use phonesis::alphabet::Alphabet;
/// use phonesis::analysis::normalizer::normalize;
///
/// let slots = normalize("Hello,  World!", &Alphabet::english());
/// assert_eq!(slots, vec!["hello", "", "world"]);
/// ```
pub fn normalize(text: &str, alphabet: &Alphabet) -> Vec<String> {
    let filtered: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| c == SEPARATOR || alphabet.contains(c))
        .collect();

    filtered.split(SEPARATOR).map(str::to_owned).collect()
}

/// Non-empty normalized words of `text`, paired with their slot position.
pub fn words(text: &str, alphabet: &Alphabet) -> Vec<(usize, String)> {
    normalize(text, alphabet)
        .into_iter()
        .enumerate()
        .filter(|(_, word)| !word.is_empty())
        .collect()
}
