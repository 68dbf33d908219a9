//! Arabic script reshaping and bidirectional reordering
//!
//! Renderers without an Arabic shaper draw each code point on its own, so a
//! word is first rewritten into contextual presentation forms (isolated,
//! initial, medial, final) and then reordered into visual order. The result
//! can be laid out strictly left to right.

use std::borrow::Cow;
use unicode_bidi::BidiInfo;

const LAM: char = '\u{0644}';
const TATWEEL: char = '\u{0640}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joining {
    /// Joins only to the preceding letter
    Right,
    /// Joins on both sides
    Dual,
    /// Does not join
    None,
}

/// Presentation forms: isolated, final, initial, medial.
///
/// Right-joining letters repeat isolated/final in the initial/medial slots.
const LETTERS: &[(char, [char; 4])] = &[
    ('\u{0621}', ['\u{FE80}', '\u{FE80}', '\u{FE80}', '\u{FE80}']), // ء
    ('\u{0622}', ['\u{FE81}', '\u{FE82}', '\u{FE81}', '\u{FE82}']), // آ
    ('\u{0623}', ['\u{FE83}', '\u{FE84}', '\u{FE83}', '\u{FE84}']), // أ
    ('\u{0624}', ['\u{FE85}', '\u{FE86}', '\u{FE85}', '\u{FE86}']), // ؤ
    ('\u{0625}', ['\u{FE87}', '\u{FE88}', '\u{FE87}', '\u{FE88}']), // إ
    ('\u{0626}', ['\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}']), // ئ
    ('\u{0627}', ['\u{FE8D}', '\u{FE8E}', '\u{FE8D}', '\u{FE8E}']), // ا
    ('\u{0628}', ['\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}']), // ب
    ('\u{0629}', ['\u{FE93}', '\u{FE94}', '\u{FE93}', '\u{FE94}']), // ة
    ('\u{062A}', ['\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}']), // ت
    ('\u{062B}', ['\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}']), // ث
    ('\u{062C}', ['\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}']), // ج
    ('\u{062D}', ['\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}']), // ح
    ('\u{062E}', ['\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}']), // خ
    ('\u{062F}', ['\u{FEA9}', '\u{FEAA}', '\u{FEA9}', '\u{FEAA}']), // د
    ('\u{0630}', ['\u{FEAB}', '\u{FEAC}', '\u{FEAB}', '\u{FEAC}']), // ذ
    ('\u{0631}', ['\u{FEAD}', '\u{FEAE}', '\u{FEAD}', '\u{FEAE}']), // ر
    ('\u{0632}', ['\u{FEAF}', '\u{FEB0}', '\u{FEAF}', '\u{FEB0}']), // ز
    ('\u{0633}', ['\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}']), // س
    ('\u{0634}', ['\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}']), // ش
    ('\u{0635}', ['\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}']), // ص
    ('\u{0636}', ['\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}']), // ض
    ('\u{0637}', ['\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}']), // ط
    ('\u{0638}', ['\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}']), // ظ
    ('\u{0639}', ['\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}']), // ع
    ('\u{063A}', ['\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}']), // غ
    ('\u{0640}', ['\u{0640}', '\u{0640}', '\u{0640}', '\u{0640}']), // ـ
    ('\u{0641}', ['\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}']), // ف
    ('\u{0642}', ['\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}']), // ق
    ('\u{0643}', ['\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}']), // ك
    ('\u{0644}', ['\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}']), // ل
    ('\u{0645}', ['\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}']), // م
    ('\u{0646}', ['\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}']), // ن
    ('\u{0647}', ['\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}']), // ه
    ('\u{0648}', ['\u{FEED}', '\u{FEEE}', '\u{FEED}', '\u{FEEE}']), // و
    ('\u{0649}', ['\u{FEEF}', '\u{FEF0}', '\u{FBE8}', '\u{FBE9}']), // ى
    ('\u{064A}', ['\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}']), // ي
    ('\u{0671}', ['\u{FB50}', '\u{FB51}', '\u{FB50}', '\u{FB51}']), // ٱ
    ('\u{067E}', ['\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}']), // پ
    ('\u{0686}', ['\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}']), // چ
    ('\u{0698}', ['\u{FB8A}', '\u{FB8B}', '\u{FB8A}', '\u{FB8B}']), // ژ
    ('\u{06A9}', ['\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}']), // ک
    ('\u{06AF}', ['\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}']), // گ
    ('\u{06BE}', ['\u{FBAA}', '\u{FBAB}', '\u{FBAC}', '\u{FBAD}']), // ھ
    ('\u{06C0}', ['\u{FBA4}', '\u{FBA5}', '\u{FBA4}', '\u{FBA5}']), // ۀ
    ('\u{06CC}', ['\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}']), // ی
];

/// Lam followed by an alef variant: (alef, isolated ligature, final ligature)
const LAM_ALEF: &[(char, char, char)] = &[
    ('\u{0622}', '\u{FEF5}', '\u{FEF6}'),
    ('\u{0623}', '\u{FEF7}', '\u{FEF8}'),
    ('\u{0625}', '\u{FEF9}', '\u{FEFA}'),
    ('\u{0627}', '\u{FEFB}', '\u{FEFC}'),
];

const ISOLATED: usize = 0;
const FINAL: usize = 1;
const INITIAL: usize = 2;
const MEDIAL: usize = 3;

fn forms(c: char) -> Option<&'static [char; 4]> {
    LETTERS
        .binary_search_by_key(&c, |(letter, _)| *letter)
        .ok()
        .map(|idx| &LETTERS[idx].1)
}

fn joining(c: char) -> Joining {
    match forms(c) {
        Some(_) if c == '\u{0621}' => Joining::None,
        Some(f) if f[INITIAL] == f[ISOLATED] && c != TATWEEL => Joining::Right,
        Some(_) => Joining::Dual,
        None => Joining::None,
    }
}

/// Tashkeel and other combining marks that do not affect joining
fn is_harakah(c: char) -> bool {
    matches!(c, '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}')
}

/// A base character and the combining marks that follow it
struct Cluster {
    base: char,
    marks: Vec<char>,
}

#[derive(Debug, Clone)]
pub struct Reshaper {
    delete_harakat: bool,
}

impl Default for Reshaper {
    fn default() -> Self {
        Self {
            delete_harakat: true,
        }
    }
}

impl Reshaper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep diacritics instead of dropping them
    pub fn with_harakat(mut self) -> Self {
        self.delete_harakat = false;
        self
    }

    /// Rewrite Arabic-script letters into their contextual presentation forms.
    pub fn reshape(&self, text: &str) -> String {
        let clusters = self.clusters(text);
        let mut output = String::with_capacity(text.len());

        let mut i = 0;
        while i < clusters.len() {
            let cluster = &clusters[i];
            let joins_prev = i > 0
                && joining(clusters[i - 1].base) == Joining::Dual
                && joining(cluster.base) != Joining::None;

            if cluster.base == LAM {
                if let Some(next) = clusters.get(i + 1) {
                    if let Some(&(_, isolated, final_form)) =
                        LAM_ALEF.iter().find(|(alef, _, _)| *alef == next.base)
                    {
                        output.push(if joins_prev { final_form } else { isolated });
                        output.extend(cluster.marks.iter());
                        output.extend(next.marks.iter());
                        i += 2;
                        continue;
                    }
                }
            }

            match forms(cluster.base) {
                Some(letter_forms) => {
                    let joins_next = joining(cluster.base) == Joining::Dual
                        && clusters
                            .get(i + 1)
                            .map_or(false, |next| joining(next.base) != Joining::None);
                    let slot = match (joins_prev, joins_next) {
                        (true, true) => MEDIAL,
                        (true, false) => FINAL,
                        (false, true) => INITIAL,
                        (false, false) => ISOLATED,
                    };
                    output.push(letter_forms[slot]);
                }
                None => output.push(cluster.base),
            }
            output.extend(cluster.marks.iter());
            i += 1;
        }

        output
    }

    fn clusters(&self, text: &str) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = Vec::new();
        for c in text.chars() {
            if is_harakah(c) {
                if self.delete_harakat {
                    continue;
                }
                if let Some(last) = clusters.last_mut() {
                    last.marks.push(c);
                    continue;
                }
            }
            clusters.push(Cluster {
                base: c,
                marks: Vec::new(),
            });
        }
        clusters
    }
}

/// Reorder logical text into display order using the Unicode bidi algorithm.
pub fn get_display(text: &str) -> String {
    let bidi_info = BidiInfo::new(text, None);
    if !bidi_info.has_rtl() {
        return text.to_string();
    }

    let mut display = String::with_capacity(text.len());
    for para in &bidi_info.paragraphs {
        let line = para.range.clone();
        let reordered: Cow<'_, str> = bidi_info.reorder_line(para, line);
        display.push_str(&reordered);
    }
    display
}

/// Reshape with harakat removed
pub fn reshape(text: &str) -> String {
    Reshaper::default().reshape(text)
}

/// Reshape, then reorder for display
pub fn reshape_for_display(word: &str) -> String {
    get_display(&reshape(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_table_sorted() {
        assert!(LETTERS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_contextual_forms() {
        // کتاب: initial kaf, medial teh, final alef, isolated beh
        assert_eq!(reshape("کتاب"), "\u{FB90}\u{FE98}\u{FE8E}\u{FE8F}");
        // من: initial meem, final noon
        assert_eq!(reshape("من"), "\u{FEE3}\u{FEE6}");
        // single letter stays isolated
        assert_eq!(reshape("ژ"), "\u{FB8A}");
    }

    #[test]
    fn test_right_joining_breaks_chain() {
        // دو: dal never joins forward, so both letters are isolated
        assert_eq!(reshape("دو"), "\u{FEA9}\u{FEED}");
    }

    #[test]
    fn test_lam_alef_ligature() {
        // سلام: initial seen, final lam-alef, isolated meem
        assert_eq!(reshape("سلام"), "\u{FEB3}\u{FEFC}\u{FEE1}");
        assert_eq!(reshape("لا"), "\u{FEFB}");
    }

    #[test]
    fn test_harakat() {
        assert_eq!(reshape("مِن"), "\u{FEE3}\u{FEE6}");
        let kept = Reshaper::new().with_harakat().reshape("مِن");
        assert_eq!(kept, "\u{FEE3}\u{0650}\u{FEE6}");
    }

    #[test]
    fn test_latin_untouched() {
        assert_eq!(reshape("Rust"), "Rust");
        assert_eq!(get_display("Rust"), "Rust");
        assert_eq!(reshape_for_display("Rust"), "Rust");
    }

    #[test]
    fn test_display_order_reversed_for_rtl() {
        assert_eq!(reshape_for_display("سلام"), "\u{FEE1}\u{FEFC}\u{FEB3}");
        assert_eq!(get_display("من"), "نم");
    }
}
