//! Persian and English word cloud library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod render;
pub mod text;
pub mod wordcloud;

pub use config::Config;
pub use error::{Result, WordCloudError};
pub use wordcloud::WordCloud;
