//! Arabic-to-Persian letterform normalization

use aho_corasick::{AhoCorasick, MatchKind};

/// Arabic variants and their Persian replacements, matched leftmost-first.
///
/// The two-character keys are a letter carrying a kasra; the kasra is dropped.
pub const REPLACEMENTS: [(&str, &str); 9] = [
    ("\u{0643}", "\u{06A9}"),         // ك -> ک
    ("\u{062F}\u{0650}", "\u{062F}"), // دِ -> د
    ("\u{0628}\u{0650}", "\u{0628}"), // بِ -> ب
    ("\u{0632}\u{0650}", "\u{0632}"), // زِ -> ز
    ("\u{0630}\u{0650}", "\u{0630}"), // ذِ -> ذ
    ("\u{0634}\u{0650}", "\u{0634}"), // شِ -> ش
    ("\u{0633}\u{0650}", "\u{0633}"), // سِ -> س
    ("\u{0649}", "\u{06CC}"),         // ى -> ی
    ("\u{064A}", "\u{06CC}"),         // ي -> ی
];

pub struct PersianNormalizer {
    matcher: AhoCorasick,
}

impl Default for PersianNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PersianNormalizer {
    pub fn new() -> Self {
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(REPLACEMENTS.iter().map(|(from, _)| *from))
            .expect("Invalid Persian normalization patterns");
        Self { matcher }
    }

    pub fn normalize(&self, text: &str) -> String {
        let replacements: Vec<&str> = REPLACEMENTS.iter().map(|(_, to)| *to).collect();
        self.matcher.replace_all(text, &replacements)
    }
}

/// Normalize with a freshly built matcher. Prefer [`PersianNormalizer`] in loops.
pub fn normalize_persian(text: &str) -> String {
    PersianNormalizer::new().normalize(text)
}
