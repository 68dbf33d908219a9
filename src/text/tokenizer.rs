//! Regex tokenizer

use crate::config::DEFAULT_TOKEN_PATTERN;
use crate::error::Result;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_TOKEN_PATTERN).expect("Invalid default token regex"),
        }
    }
}

impl Tokenizer {
    /// Build a tokenizer from a custom pattern, or [`DEFAULT_TOKEN_PATTERN`].
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        match pattern {
            Some(pattern) => Ok(Self {
                pattern: Regex::new(pattern)?,
            }),
            None => Ok(Self::default()),
        }
    }

    /// All non-overlapping matches, in reading order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}
