//! Frequency and layout reports

pub mod formatter;

pub use formatter::{
    save_to_file, ConsoleFormatter, JsonFormatter, OutputFormatter, TsvFormatter,
};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Tsv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Console => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Tsv => "tsv",
        }
    }

    /// `path`, with this format's extension added when it has none
    pub fn file_path(self, path: &Path) -> PathBuf {
        match path.extension() {
            Some(_) => path.to_path_buf(),
            None => path.with_extension(self.extension()),
        }
    }

    /// Formatter for this format with its usual options
    pub fn formatter(self, use_colors: bool) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
            OutputFormat::Json => Box::new(JsonFormatter::new(true)),
            OutputFormat::Tsv => Box::new(TsvFormatter),
        }
    }
}
