//! Configuration management for the word cloud generator

use crate::error::{Result, WordCloudError};
use crate::render::color::{parse_color, Colormap};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Font used when neither the config nor `FONT_PATH` names one
pub const DEFAULT_FONT_FILE: &str = "fonts/Vazir-Light.ttf";

/// Default tokenizer: a letter, number or underscore followed by more of
/// them or apostrophes. ZWNJ and combining marks end a token.
pub const DEFAULT_TOKEN_PATTERN: &str = r"[\p{L}\p{N}_][\p{L}\p{N}_']+";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub layout: LayoutConfig,
    pub text: TextConfig,
    pub font: FontConfig,
    pub color: ColorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub scale: f32,
    pub background_color: String,
    pub mode: ColorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub max_words: usize,
    pub min_font_size: u32,
    pub max_font_size: Option<u32>,
    pub font_step: u32,
    pub prefer_horizontal: f32,
    pub relative_scaling: f32,
    pub random_state: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub only_persian: bool,
    pub regexp: Option<String>,
    pub collocations: bool,
    pub normalize_plurals: bool,
    pub stopwords_file: Option<PathBuf>,
    pub extra_stopwords: Vec<String>,
    pub include_english_stopwords: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FontConfig {
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColorConfig {
    pub colormap: Option<String>,
    pub mask: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            margin: 2,
            scale: 1.0,
            background_color: "black".to_string(),
            mode: ColorMode::Rgb,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_words: 200,
            min_font_size: 4,
            max_font_size: None,
            font_step: 1,
            prefer_horizontal: 0.9,
            relative_scaling: 0.5,
            random_state: None,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            only_persian: false,
            regexp: None,
            collocations: true,
            normalize_plurals: true,
            stopwords_file: None,
            extra_stopwords: Vec::new(),
            include_english_stopwords: false,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default file is created with default values; a missing
    /// explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WordCloudError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| WordCloudError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| WordCloudError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("persian-wordcloud")
            .join("config.toml")
    }

    /// Check every value before any text is processed.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if !(0.0..=1.0).contains(&layout.relative_scaling) {
            return Err(WordCloudError::Configuration(format!(
                "relative_scaling needs to be between 0 and 1, got {}.",
                layout.relative_scaling
            )));
        }
        if !(0.0..=1.0).contains(&layout.prefer_horizontal) {
            return Err(WordCloudError::Configuration(format!(
                "prefer_horizontal needs to be between 0 and 1, got {}.",
                layout.prefer_horizontal
            )));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(WordCloudError::Configuration(format!(
                "Canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.canvas.scale.is_nan() || self.canvas.scale <= 0.0 {
            return Err(WordCloudError::Configuration(format!(
                "scale must be positive, got {}",
                self.canvas.scale
            )));
        }
        if layout.max_words == 0 {
            return Err(WordCloudError::Configuration(
                "max_words must be at least 1".to_string(),
            ));
        }
        if layout.font_step == 0 {
            return Err(WordCloudError::Configuration(
                "font_step must be at least 1".to_string(),
            ));
        }
        if layout.min_font_size == 0 {
            return Err(WordCloudError::Configuration(
                "min_font_size must be at least 1".to_string(),
            ));
        }
        if layout.min_font_size > self.max_font_size() {
            return Err(WordCloudError::Configuration(format!(
                "min_font_size ({}) exceeds max_font_size ({})",
                layout.min_font_size,
                self.max_font_size()
            )));
        }
        parse_color(&self.canvas.background_color)?;
        Colormap::by_name(self.colormap_name())?;
        if let Some(pattern) = &self.text.regexp {
            regex::Regex::new(pattern)?;
        }
        Ok(())
    }

    /// Largest font size, defaulting to the canvas height
    pub fn max_font_size(&self) -> u32 {
        self.layout.max_font_size.unwrap_or(self.canvas.height)
    }

    pub fn colormap_name(&self) -> &str {
        self.color.colormap.as_deref().unwrap_or("viridis")
    }

    /// Resolve the font file: config, then `FONT_PATH`, then the bundled location.
    pub fn resolve_font_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.font.font_path {
            return Ok(path.clone());
        }
        if let Ok(env_path) = std::env::var("FONT_PATH") {
            if !env_path.is_empty() {
                return Ok(PathBuf::from(env_path));
            }
        }

        let mut candidates = vec![PathBuf::from(DEFAULT_FONT_FILE)];
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(DEFAULT_FONT_FILE));
        }
        candidates
            .into_iter()
            .find(|candidate| candidate.exists())
            .ok_or_else(|| {
                WordCloudError::Font(format!(
                    "No font found; set font_path, FONT_PATH or provide {}",
                    DEFAULT_FONT_FILE
                ))
            })
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.canvas.width = width;
        self.canvas.height = height;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.canvas.margin = margin;
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.canvas.background_color = color.into();
        self
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.layout.max_words = max_words;
        self
    }

    pub fn with_font_sizes(mut self, min: u32, max: Option<u32>) -> Self {
        self.layout.min_font_size = min;
        self.layout.max_font_size = max;
        self
    }

    pub fn with_relative_scaling(mut self, relative_scaling: f32) -> Self {
        self.layout.relative_scaling = relative_scaling;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.layout.random_state = Some(seed);
        self
    }

    pub fn with_only_persian(mut self, only_persian: bool) -> Self {
        self.text.only_persian = only_persian;
        self
    }

    pub fn with_collocations(mut self, collocations: bool) -> Self {
        self.text.collocations = collocations;
        self
    }

    pub fn with_regexp(mut self, pattern: impl Into<String>) -> Self {
        self.text.regexp = Some(pattern.into());
        self
    }

    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text.extra_stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font.font_path = Some(path.into());
        self
    }

    pub fn with_colormap(mut self, name: impl Into<String>) -> Self {
        self.color.colormap = Some(name.into());
        self
    }

    pub fn with_mask(mut self, path: impl Into<PathBuf>) -> Self {
        self.color.mask = Some(path.into());
        self
    }
}
