//! Input documents
//! Detects the file type, extracts plain text and caches results per path

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;
