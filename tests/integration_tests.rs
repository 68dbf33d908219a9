//! Integration tests for the word cloud generator

use persian_wordcloud::error::Result;
use persian_wordcloud::input::InputManager;
use persian_wordcloud::output::{OutputFormat, OutputFormatter, TsvFormatter};
use persian_wordcloud::render::{ShapedText, Shaper};
use persian_wordcloud::text::reshape::reshape_for_display;
use persian_wordcloud::text::{StopwordSet, TextPipeline};
use persian_wordcloud::{Config, WordCloud, WordCloudError};
use std::path::{Path, PathBuf};
use tiny_skia::{PathBuilder, Rect};

/// Fixed-advance boxes so rendering needs no font file
struct BoxShaper;

impl Shaper for BoxShaper {
    fn shape(&self, text: &str, font_size: f32) -> Result<ShapedText> {
        let width = (text.chars().count() as f32 * font_size * 0.5).ceil();
        let height = font_size.ceil();
        let path = Rect::from_xywh(0.0, 0.0, width, height).map(PathBuilder::from_rect);
        Ok(ShapedText {
            path,
            width,
            height,
        })
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/persian.txt"))
        .await
        .unwrap();
    assert!(text.contains("کتابخانه"));
    assert!(text.contains("۱۴۰۲"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample.md"))
        .await
        .unwrap();
    assert!(text.contains("Ferris Notes"));
    assert!(text.contains("harbors"));
    assert!(!text.contains("**"));
    assert!(!text.contains("hidden_function"));
    assert!(!text.contains("example.com"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/english.txt");

    let first = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);
    let second = manager.extract_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    let path = Path::new("tests/fixtures/english.txt");

    let first = manager.extract_text(path).await.unwrap();
    let second = manager.extract_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"))
        .await;
    assert!(matches!(result, Err(WordCloudError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"))
        .await;
    assert!(matches!(result, Err(WordCloudError::InvalidInput(_))));
}

#[tokio::test]
async fn test_extract_all_joins_in_order() {
    let mut manager = InputManager::new();
    let paths = vec![
        PathBuf::from("tests/fixtures/english.txt"),
        PathBuf::from("tests/fixtures/sample.md"),
    ];
    let text = manager.extract_all(&paths).await.unwrap();
    let rust = text.find("Rust").unwrap();
    let ferris = text.find("Ferris").unwrap();
    assert!(rust < ferris);
    assert_eq!(manager.cache_size(), 2);

    assert!(manager.extract_all(&[]).await.is_err());
}

#[tokio::test]
async fn test_persian_document_frequencies() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/persian.txt"))
        .await
        .unwrap();

    let pipeline = TextPipeline::default()
        .with_only_persian(true)
        .with_collocations(false);
    let frequencies = pipeline.process_text(&text);

    // كتاب with an Arabic kaf is folded into کتاب
    let book = reshape_for_display("کتاب");
    assert_eq!(frequencies.get(&book), Some(4));
    assert_eq!(frequencies.words()[0], book.as_str());
    assert_eq!(frequencies.get(&reshape_for_display("کتابخانه")), Some(2));

    // stopwords and Persian digits never reach the counts
    assert!(frequencies.get(&reshape_for_display("از")).is_none());
    assert!(frequencies.get(&reshape_for_display("در")).is_none());
    assert!(frequencies.iter().all(|entry| entry.word != "۱۴۰۲"));
}

#[tokio::test]
async fn test_english_document_frequencies() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/english.txt"))
        .await
        .unwrap();

    let pipeline = TextPipeline::default()
        .with_stopwords(StopwordSet::english())
        .with_collocations(false);
    let frequencies = pipeline.process_text(&text);

    assert_eq!(frequencies.words()[0], "rust");
    assert_eq!(frequencies.get("rust"), Some(4));
    assert_eq!(frequencies.get("compiler"), Some(2));
    assert_eq!(frequencies.get("language"), Some(2));
    assert!(frequencies.get("the").is_none());
    assert!(frequencies.get("2024").is_none());

    let tsv = TsvFormatter.format_frequencies(&frequencies.top(1)).unwrap();
    assert_eq!(tsv, "rust\t4\n");
    assert_eq!(TsvFormatter.supports_format(), OutputFormat::Tsv);
}

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = Config::default()
        .with_size(640, 320)
        .with_only_persian(true)
        .with_colormap("plasma");
    config.save_to(&path).unwrap();

    let loaded = Config::load(Some(&path)).unwrap();
    assert_eq!(loaded.canvas.width, 640);
    assert!(loaded.text.only_persian);
    assert_eq!(loaded.colormap_name(), "plasma");

    assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
}

#[test]
fn test_wordcloud_end_to_end() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("cloud.png");

    let config = Config::default()
        .with_size(300, 150)
        .with_random_state(11)
        .with_font_sizes(6, Some(60))
        .with_collocations(false);
    let mut wordcloud = WordCloud::with_shaper(config, Box::new(BoxShaper)).unwrap();

    let layout = wordcloud
        .generate("کتاب کتاب کتاب دفتر دفتر قلم rust rust")
        .unwrap();
    assert_eq!(layout.words[0].word, reshape_for_display("کتاب"));
    assert_eq!(layout.words[0].font_size, 60);
    assert!(layout.words.iter().all(|word| {
        word.x < 300 && word.y < 150
    }));

    wordcloud.to_file(&output).unwrap();
    let image = image::open(&output).unwrap();
    assert_eq!((image.width(), image.height()), (300, 150));
}

#[test]
fn test_relative_scaling_rejected() {
    let config = Config::default().with_relative_scaling(1.5);
    match WordCloud::with_shaper(config, Box::new(BoxShaper)) {
        Err(WordCloudError::Configuration(message)) => {
            assert!(message.contains("relative_scaling needs to be between 0 and 1"));
        }
        _ => panic!("expected a configuration error"),
    }
}
