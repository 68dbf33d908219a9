//! Error handling for the word cloud generator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordCloudError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WordCloudError>;

/// Invalid tokenizer patterns surface as configuration errors
impl From<regex::Error> for WordCloudError {
    fn from(err: regex::Error) -> Self {
        WordCloudError::Configuration(format!("Invalid tokenizer pattern: {}", err))
    }
}

impl From<image::ImageError> for WordCloudError {
    fn from(err: image::ImageError) -> Self {
        WordCloudError::Image(err.to_string())
    }
}
