//! Text to word frequencies
//!
//! The pipeline runs in a fixed order:
//! tokenize, drop stopwords, strip possessive `'s`, drop numbers, optionally
//! normalize Arabic letterforms, reshape for display, reverse, count.

use crate::config::TextConfig;
use crate::error::Result;
use crate::text::frequency::{process_tokens, unigrams_and_bigrams, Frequencies};
use crate::text::normalize::PersianNormalizer;
use crate::text::reshape::{get_display, Reshaper};
use crate::text::stopwords::StopwordSet;
use crate::text::tokenizer::Tokenizer;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

pub struct TextPipeline {
    tokenizer: Tokenizer,
    stopwords: StopwordSet,
    normalizer: Option<PersianNormalizer>,
    reshaper: Reshaper,
    collocations: bool,
    normalize_plurals: bool,
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self {
            tokenizer: Tokenizer::default(),
            stopwords: StopwordSet::persian(),
            normalizer: None,
            reshaper: Reshaper::default(),
            collocations: true,
            normalize_plurals: true,
        }
    }
}

impl TextPipeline {
    pub fn from_config(config: &TextConfig) -> Result<Self> {
        let mut stopwords = match &config.stopwords_file {
            Some(path) => StopwordSet::from_file(path)?,
            None => StopwordSet::persian(),
        };
        if config.include_english_stopwords {
            stopwords = stopwords.union(&StopwordSet::english());
        }
        stopwords.extend(&config.extra_stopwords);
        debug!("Loaded {} stopwords", stopwords.len());

        Ok(Self {
            tokenizer: Tokenizer::new(config.regexp.as_deref())?,
            stopwords,
            normalizer: config.only_persian.then(PersianNormalizer::new),
            reshaper: Reshaper::default(),
            collocations: config.collocations,
            normalize_plurals: config.normalize_plurals,
        })
    }

    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_only_persian(mut self, only_persian: bool) -> Self {
        self.normalizer = only_persian.then(PersianNormalizer::new);
        self
    }

    pub fn with_collocations(mut self, collocations: bool) -> Self {
        self.collocations = collocations;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Display-ready tokens in the order they are counted
    pub fn filter_tokens(&self, text: &str) -> Vec<String> {
        let raw = self.tokenizer.tokenize(text);
        let raw_len = raw.len();

        let mut words: Vec<String> = raw
            .into_iter()
            .filter(|word| !self.stopwords.contains(word))
            .map(strip_possessive)
            .filter(|word| !word.is_empty() && !is_numeric(word))
            .map(|word| match &self.normalizer {
                Some(normalizer) => normalizer.normalize(&word),
                None => word,
            })
            .map(|word| get_display(&self.reshaper.reshape(&word)))
            .collect();
        words.reverse();

        debug!("Kept {} of {} tokens", words.len(), raw_len);
        words
    }

    /// Word frequencies, most frequent first
    pub fn process_text(&self, text: &str) -> Frequencies {
        let words = self.filter_tokens(text);
        let counts = if self.collocations {
            unigrams_and_bigrams(&words, self.normalize_plurals)
        } else {
            process_tokens(&words, self.normalize_plurals).0
        };
        Frequencies::from_counts(&counts)
    }
}

/// Drop a trailing `'s`, any case
fn strip_possessive(word: String) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with("'s") {
        let mut chars = word.chars();
        chars.next_back();
        chars.next_back();
        chars.as_str().to_string()
    } else {
        word
    }
}

/// Decimal digits of any script plus superscript and subscript digits.
/// Letter numbers such as `Ⅻ` and fractions are words.
fn is_numeric(word: &str) -> bool {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS
        .get_or_init(|| {
            Regex::new(r"^[\p{Nd}\x{00B2}\x{00B3}\x{00B9}\x{2070}\x{2074}-\x{2079}\x{2080}-\x{2089}]+$")
                .expect("Invalid digit pattern")
        })
        .is_match(word)
}
