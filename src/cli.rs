//! CLI interface for the word cloud generator

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "persian-wordcloud")]
#[command(about = "Word clouds for Persian and English text")]
#[command(long_about = "Count words in Persian and English documents, drop stopwords and numbers, reshape right-to-left script and lay the result out as a word cloud image")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Text processing options shared by `generate` and `words`
#[derive(clap::Args, Debug)]
pub struct TextArgs {
    /// Input files (PDF, TXT, MD); read in order and joined
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Keep only Persian letterforms, folding Arabic variants
    #[arg(long)]
    pub only_persian: bool,

    /// Count words one by one, without bigram collocations
    #[arg(long)]
    pub no_collocations: bool,

    /// Replace the bundled Persian stopwords with a file, one word per line
    #[arg(long)]
    pub stopwords: Option<PathBuf>,

    /// Extra stopword, may be repeated
    #[arg(long = "add-stopword")]
    pub add_stopword: Vec<String>,

    /// Also drop common English stopwords
    #[arg(long)]
    pub english_stopwords: bool,

    /// Token pattern (regular expression)
    #[arg(long)]
    pub regexp: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a word cloud image
    Generate {
        #[command(flatten)]
        text: TextArgs,

        /// Output PNG path
        #[arg(short, long, default_value = "wordcloud.png")]
        output: PathBuf,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Gap kept around each word
        #[arg(long)]
        margin: Option<u32>,

        /// Maximum number of words to place
        #[arg(long)]
        max_words: Option<usize>,

        /// Smallest font size before placement stops
        #[arg(long)]
        min_font_size: Option<u32>,

        /// Font size of the most frequent word
        #[arg(long)]
        max_font_size: Option<u32>,

        /// Output image scale relative to the layout canvas
        #[arg(long)]
        scale: Option<f32>,

        /// Font file (TTF/OTF) with Persian glyphs
        #[arg(short, long)]
        font: Option<PathBuf>,

        /// Colormap: viridis, plasma, magma, inferno, hsv, gray
        #[arg(long)]
        colormap: Option<String>,

        /// Background color name or hex
        #[arg(long)]
        background: Option<String>,

        /// Mask image; pure white pixels stay empty
        #[arg(long)]
        mask: Option<PathBuf>,

        /// Random seed for reproducible layouts
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the placed words as JSON
        #[arg(long)]
        layout_json: Option<PathBuf>,
    },

    /// Print word frequencies without rendering
    Words {
        #[command(flatten)]
        text: TextArgs,

        /// Output format: console, json, tsv
        #[arg(short, long, default_value = "console")]
        format: String,

        /// Show only the most frequent words
        #[arg(short, long)]
        top: Option<usize>,

        /// Save output to file; the format's extension is added when missing
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "tsv" => Ok(OutputFormat::Tsv),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, tsv",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
