//! Frequency counting with plural folding and collocation detection
//!
//! Every map here preserves first-seen order, so identical token streams
//! always produce identical frequencies, ties included.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bigrams scoring above this are kept as collocations
pub const COLLOCATION_THRESHOLD: f64 = 30.0;

/// Insertion-ordered counter
#[derive(Debug, Clone, Default)]
pub struct OrderedCounts {
    entries: Vec<(String, i64)>,
    index: HashMap<String, usize>,
}

impl OrderedCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, amount: i64) {
        match self.index.get(key) {
            Some(&idx) => self.entries[idx].1 += amount,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    pub fn set(&mut self, key: &str, value: i64) {
        match self.index.get(key) {
            Some(&idx) => self.entries[idx].1 = value,
            None => self.add(key, value),
        }
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.index.get(key).map(|&idx| self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }
}

/// All capitalizations seen for one lowercase form
#[derive(Debug)]
struct CaseGroup {
    lower: String,
    cases: OrderedCounts,
    merged: bool,
}

/// Count tokens case-insensitively.
///
/// Returns the counts keyed by the most common capitalization of each word,
/// and a map from every lowercase form (merged plurals included) to that
/// representative.
pub fn process_tokens<S: AsRef<str>>(
    words: &[S],
    normalize_plurals: bool,
) -> (OrderedCounts, HashMap<String, String>) {
    let mut groups: Vec<CaseGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in words {
        let word = word.as_ref();
        let lower = word.to_lowercase();
        let idx = *index.entry(lower.clone()).or_insert_with(|| {
            groups.push(CaseGroup {
                lower,
                cases: OrderedCounts::new(),
                merged: false,
            });
            groups.len() - 1
        });
        groups[idx].cases.add(word, 1);
    }

    let mut merged_plurals: Vec<(String, String)> = Vec::new();
    if normalize_plurals {
        for idx in 0..groups.len() {
            let key = groups[idx].lower.clone();
            if !key.ends_with('s') || key.ends_with("ss") {
                continue;
            }
            let singular = strip_last_char(&key).to_string();
            let Some(&singular_idx) = index.get(&singular) else {
                continue;
            };
            if groups[singular_idx].merged {
                continue;
            }

            let plural_cases: Vec<(String, i64)> = groups[idx]
                .cases
                .iter()
                .map(|(word, count)| (word.to_string(), count))
                .collect();
            for (word, count) in plural_cases {
                groups[singular_idx].cases.add(strip_last_char(&word), count);
            }
            groups[idx].merged = true;
            merged_plurals.push((key, singular));
        }
    }

    let mut fused_cases = OrderedCounts::new();
    let mut standard_cases: HashMap<String, String> = HashMap::new();
    for group in groups.iter().filter(|group| !group.merged) {
        let mut best: Option<(&str, i64)> = None;
        let mut total = 0;
        for (word, count) in group.cases.iter() {
            total += count;
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((word, count));
            }
        }
        if let Some((first, _)) = best {
            fused_cases.add(first, total);
            standard_cases.insert(group.lower.clone(), first.to_string());
        }
    }

    for (plural, singular) in merged_plurals {
        if let Some(standard) = standard_cases.get(&singular).cloned() {
            standard_cases.insert(plural, standard);
        }
    }

    (fused_cases, standard_cases)
}

fn strip_last_char(word: &str) -> &str {
    match word.char_indices().last() {
        Some((idx, _)) => &word[..idx],
        None => word,
    }
}

/// Dunning's log-likelihood term
fn log_likelihood(k: f64, n: f64, x: f64) -> f64 {
    x.max(1e-10).ln() * k + (1.0 - x).max(1e-10).ln() * (n - k)
}

/// Collocation score of a bigram given its count, its words' counts and the
/// number of tokens.
pub fn collocation_score(count_bigram: i64, count1: i64, count2: i64, n_words: usize) -> f64 {
    let n = n_words as f64;
    if n <= count1 as f64 || n <= count2 as f64 {
        // one word makes up the whole document
        return 0.0;
    }
    let c12 = count_bigram as f64;
    let c1 = count1 as f64;
    let c2 = count2 as f64;
    let p = c2 / n;
    let p1 = c12 / c1;
    let p2 = (c2 - c12) / (n - c1);
    let score = log_likelihood(c12, c1, p) + log_likelihood(c2 - c12, n - c1, p)
        - log_likelihood(c12, c1, p1)
        - log_likelihood(c2 - c12, n - c1, p2);
    -2.0 * score
}

/// Count unigrams and promote statistically significant bigrams.
///
/// A promoted bigram's count is taken away from both of its words; words
/// whose count drops to zero or below disappear.
pub fn unigrams_and_bigrams<S: AsRef<str>>(words: &[S], normalize_plurals: bool) -> OrderedCounts {
    let n_words = words.len();

    let mut pair_parts: HashMap<String, (String, String)> = HashMap::new();
    let bigrams: Vec<String> = words
        .windows(2)
        .map(|pair| {
            let (first, second) = (pair[0].as_ref(), pair[1].as_ref());
            let bigram = format!("{} {}", first, second);
            pair_parts
                .entry(bigram.to_lowercase())
                .or_insert_with(|| (first.to_lowercase(), second.to_lowercase()));
            bigram
        })
        .collect();

    let (mut counts_unigrams, standard_form) = process_tokens(words, normalize_plurals);
    let (counts_bigrams, _) = process_tokens(&bigrams, normalize_plurals);
    let orig_counts = counts_unigrams.clone();

    for (bigram, count) in counts_bigrams.iter() {
        let Some((first, second)) = pair_parts.get(&bigram.to_lowercase()) else {
            continue;
        };
        let (Some(word1), Some(word2)) = (standard_form.get(first), standard_form.get(second))
        else {
            continue;
        };
        let count1 = orig_counts.get(word1).unwrap_or(0);
        let count2 = orig_counts.get(word2).unwrap_or(0);

        if collocation_score(count, count1, count2, n_words) > COLLOCATION_THRESHOLD {
            counts_unigrams.add(word1, -count);
            counts_unigrams.add(word2, -count);
            counts_unigrams.set(bigram, count);
        }
    }

    let mut kept = OrderedCounts::new();
    for (word, count) in counts_unigrams.iter().filter(|(_, count)| *count > 0) {
        kept.add(word, count);
    }
    kept
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// Words ordered by descending count; ties keep first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequencies {
    entries: Vec<WordFrequency>,
}

impl Frequencies {
    pub fn from_counts(counts: &OrderedCounts) -> Self {
        Self::from_pairs(
            counts
                .iter()
                .filter(|(_, count)| *count > 0)
                .map(|(word, count)| (word.to_string(), count as usize)),
        )
    }

    /// Build from arbitrary (word, count) pairs. Zero counts are dropped.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut entries: Vec<WordFrequency> = pairs
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(word, count)| WordFrequency {
                word: word.into(),
                count,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.word == word)
            .map(|entry| entry.count)
    }

    pub fn max_count(&self) -> Option<usize> {
        self.entries.first().map(|entry| entry.count)
    }

    /// The `n` most frequent words
    pub fn top(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordFrequency> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn words(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.word.as_str()).collect()
    }
}
