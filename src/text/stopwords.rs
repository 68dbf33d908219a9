//! Stopword sets
//!
//! Words are stored lowercase and looked up case-insensitively. The bundled
//! Persian list is the default; the English list is the one commonly shipped
//! with word cloud generators and is opt-in.

use crate::error::Result;
use std::collections::HashSet;
use std::path::Path;

const PERSIAN_STOPWORDS: &str = include_str!("../../assets/stopwords");
const ENGLISH_STOPWORDS: &str = include_str!("../../assets/stopwords_en");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Empty set; nothing is filtered
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bundled Persian stopwords
    pub fn persian() -> Self {
        Self::from_lines(PERSIAN_STOPWORDS)
    }

    /// Bundled English stopwords
    pub fn english() -> Self {
        Self::from_lines(ENGLISH_STOPWORDS)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Load a newline-separated list; lines are trimmed and blanks dropped
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_lines(&content))
    }

    fn from_lines(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.insert(word.to_lowercase())
    }

    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(&word.trim().to_lowercase())
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    pub fn union(mut self, other: &StopwordSet) -> Self {
        self.words.extend(other.words.iter().cloned());
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The bundled Persian stopwords plus `words`.
pub fn add_stop_words<I, S>(words: I) -> StopwordSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = StopwordSet::persian();
    set.extend(words);
    set
}
