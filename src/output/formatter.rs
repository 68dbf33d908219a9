//! Formatters for word frequencies and finished layouts

use crate::error::Result;
use crate::output::OutputFormat;
use crate::render::Layout;
use crate::text::Frequencies;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_frequencies(&self, frequencies: &Frequencies) -> Result<String>;
    fn format_layout(&self, layout: &Layout) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Table for the terminal, with a bar per word scaled to the top count
pub struct ConsoleFormatter {
    use_colors: bool,
    bar_width: usize,
}

pub struct JsonFormatter {
    pretty: bool,
}

/// One `word<TAB>count` line per entry, no header
pub struct TsvFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 30,
        }
    }

    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn bar(&self, count: usize, max_count: usize) -> String {
        let filled = if max_count == 0 {
            0
        } else {
            (count * self.bar_width).div_ceil(max_count)
        };
        let color = match filled * 3 / self.bar_width.max(1) {
            2.. => Color::Green,
            1 => Color::Yellow,
            _ => Color::Red,
        };
        self.colorize(&"▇".repeat(filled), color)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_frequencies(&self, frequencies: &Frequencies) -> Result<String> {
        let mut output = self.format_header("Word Frequencies");
        if frequencies.is_empty() {
            output.push_str("  No words left after filtering\n");
            return Ok(output);
        }

        let max_count = frequencies.max_count().unwrap_or(0);
        let rank_width = frequencies.len().to_string().len();
        let count_width = max_count.to_string().len();
        for (rank, entry) in frequencies.iter().enumerate() {
            output.push_str(&format!(
                "  {:>rank_width$}. {:>count_width$}  {}  {}\n",
                rank + 1,
                entry.count,
                self.bar(entry.count, max_count),
                self.colorize(&entry.word, Color::Cyan),
            ));
        }
        output.push_str(&format!(
            "\n  {} distinct words, {} occurrences\n",
            frequencies.len(),
            frequencies.iter().map(|entry| entry.count).sum::<usize>()
        ));
        Ok(output)
    }

    fn format_layout(&self, layout: &Layout) -> Result<String> {
        let mut output = self.format_header(&format!(
            "Layout {}x{} ({} words)",
            layout.width,
            layout.height,
            layout.len()
        ));
        for word in &layout.words {
            output.push_str(&format!(
                "  {:<20} size {:>3} at ({:>4}, {:>4}) {:?} {}\n",
                self.colorize(&word.word, Color::Cyan),
                word.font_size,
                word.x,
                word.y,
                word.orientation,
                word.color.to_hex(),
            ));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_frequencies(&self, frequencies: &Frequencies) -> Result<String> {
        self.to_json(frequencies)
    }

    fn format_layout(&self, layout: &Layout) -> Result<String> {
        self.to_json(layout)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for TsvFormatter {
    fn format_frequencies(&self, frequencies: &Frequencies) -> Result<String> {
        Ok(frequencies
            .iter()
            .map(|entry| format!("{}\t{}\n", entry.word, entry.count))
            .collect())
    }

    fn format_layout(&self, layout: &Layout) -> Result<String> {
        Ok(layout
            .words
            .iter()
            .map(|word| {
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{:?}\t{}\n",
                    word.word,
                    word.count,
                    word.font_size,
                    word.x,
                    word.y,
                    word.orientation,
                    word.color.to_hex()
                )
            })
            .collect())
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Tsv
    }
}

pub fn save_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Orientation, PlacedWord, Rgba};

    fn frequencies() -> Frequencies {
        Frequencies::from_pairs(vec![("کتاب", 2), ("rust", 4), ("خانه", 2)])
    }

    fn layout() -> Layout {
        Layout {
            width: 100,
            height: 50,
            words: vec![PlacedWord {
                word: "rust".to_string(),
                count: 4,
                font_size: 24,
                x: 3,
                y: 7,
                orientation: Orientation::Vertical,
                color: Rgba::rgb(255, 0, 16),
            }],
        }
    }

    #[test]
    fn test_console_lists_words_in_order() {
        let output = ConsoleFormatter::new(false)
            .format_frequencies(&frequencies())
            .unwrap();
        let rust = output.find("rust").unwrap();
        let book = output.find("کتاب").unwrap();
        let house = output.find("خانه").unwrap();
        assert!(rust < book && book < house);
        assert!(output.contains("3 distinct words, 8 occurrences"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_empty_frequencies() {
        let output = ConsoleFormatter::new(false)
            .format_frequencies(&Frequencies::default())
            .unwrap();
        assert!(output.contains("No words left"));
    }

    #[test]
    fn test_console_bar_scales_to_max() {
        let formatter = ConsoleFormatter::new(false).with_bar_width(10);
        assert_eq!(formatter.bar(4, 4).chars().count(), 10);
        assert_eq!(formatter.bar(2, 4).chars().count(), 5);
        assert_eq!(formatter.bar(1, 3).chars().count(), 4);
    }

    #[test]
    fn test_json_frequencies() {
        let output = JsonFormatter::new(false)
            .format_frequencies(&frequencies())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["entries"][0]["word"], "rust");
        assert_eq!(value["entries"][0]["count"], 4);
        assert_eq!(value["entries"][1]["word"], "کتاب");
    }

    #[test]
    fn test_json_layout_roundtrips() {
        let output = JsonFormatter::new(true).format_layout(&layout()).unwrap();
        let parsed: Layout = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, layout());
    }

    #[test]
    fn test_tsv() {
        let output = TsvFormatter.format_frequencies(&frequencies()).unwrap();
        assert_eq!(output, "rust\t4\nکتاب\t2\nخانه\t2\n");

        let output = TsvFormatter.format_layout(&layout()).unwrap();
        assert_eq!(output, "rust\t4\t24\t3\t7\tVertical\t#ff0010\n");
    }

    #[test]
    fn test_supports_format() {
        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Tsv] {
            assert_eq!(format.formatter(false).supports_format(), format);
        }
    }

    #[test]
    fn test_save_to_file_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("words.tsv");
        save_to_file("a\t1\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\t1\n");
    }
}
