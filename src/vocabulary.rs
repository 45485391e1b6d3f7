//! Ordered, deduplicated fragment vocabulary.

use std::collections::{BTreeSet, HashMap};

use crate::error::{PhonesisError, Result};

/// An ordered list of unique fragments with constant-time index lookup.
///
/// Entries keep their position forever; new fragments are only ever
/// appended, as one lexicographically sorted block per training pass.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    entries: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from entries in their stored order.
    ///
    /// Duplicate entries are rejected.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Vocabulary::new();
        for entry in entries {
            let entry = entry.into();
            if vocab.contains(&entry) {
                return Err(PhonesisError::malformed_record(format!(
                    "duplicate vocabulary entry {entry:?}"
                )));
            }
            vocab.push(entry);
        }
        Ok(vocab)
    }

    fn push(&mut self, entry: String) {
        self.index.insert(entry.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Position of `fragment`, if present.
    pub fn index_of(&self, fragment: &str) -> Option<usize> {
        self.index.get(fragment).copied()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.index.contains_key(fragment)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Append the fragments not yet present, in lexicographic order.
    ///
    /// Returns the number of entries added.
    pub fn extend_sorted<I, S>(&mut self, fragments: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fresh: BTreeSet<String> = fragments
            .into_iter()
            .map(Into::into)
            .filter(|fragment| !self.contains(fragment))
            .collect();

        let added = fresh.len();
        for fragment in fresh {
            self.push(fragment);
        }
        added
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Vocabulary {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let vocab = Vocabulary::from_entries(["ma", "#", "chi"]).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of("#"), Some(1));
        assert_eq!(vocab.index_of("ne"), None);
        assert_eq!(vocab.get(2), Some("chi"));
        assert!(vocab.contains("ma"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = Vocabulary::from_entries(["ma", "ma"]);
        assert!(matches!(result, Err(PhonesisError::MalformedRecord(_))));
    }

    #[test]
    fn test_extend_sorted_appends_block() {
        let mut vocab = Vocabulary::from_entries(["zo", "ba"]).unwrap();
        let added = vocab.extend_sorted(["ne", "ba", "ak", "ne"]);

        assert_eq!(added, 2);
        assert_eq!(vocab.as_slice(), &["zo", "ba", "ak", "ne"]);
        assert_eq!(vocab.index_of("ne"), Some(3));
    }

    #[test]
    fn test_extend_sorted_nothing_new() {
        let mut vocab = Vocabulary::from_entries(["a", "#"]).unwrap();
        assert_eq!(vocab.extend_sorted(["#", "a"]), 0);
        assert_eq!(vocab.len(), 2);
    }
}
