//! Word cloud generation from raw text

use crate::config::Config;
use crate::error::{Result, WordCloudError};
use crate::render::raster::{encode_png, save_png};
use crate::render::{FontFace, GreedyLayout, Layout, LayoutEngine, Mask, Rasterizer, Shaper};
use crate::text::{Frequencies, TextPipeline};
use log::info;
use std::path::Path;
use tiny_skia::Pixmap;

pub struct WordCloud {
    config: Config,
    pipeline: TextPipeline,
    shaper: Box<dyn Shaper>,
    engine: Box<dyn LayoutEngine>,
    mask: Option<Mask>,
    frequencies: Option<Frequencies>,
    layout: Option<Layout>,
}

impl WordCloud {
    /// Validate the config and load the font and mask it names.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let font_path = config.resolve_font_path()?;
        info!("Using font {}", font_path.display());
        let font = FontFace::from_path(&font_path)?;
        Self::with_shaper(config, Box::new(font))
    }

    /// Like [`WordCloud::new`] but with a caller-provided shaper instead of a font file
    pub fn with_shaper(config: Config, shaper: Box<dyn Shaper>) -> Result<Self> {
        config.validate()?;
        let pipeline = TextPipeline::from_config(&config.text)?;
        let mask = match &config.color.mask {
            Some(path) => {
                let mask = Mask::from_path(path)?;
                info!("Mask leaves {} of {} pixels free", mask.free_pixels(), mask.blocked().len());
                Some(mask)
            }
            None => None,
        };

        Ok(Self {
            config,
            pipeline,
            shaper,
            engine: Box::new(GreedyLayout::new()),
            mask,
            frequencies: None,
            layout: None,
        })
    }

    pub fn with_engine(mut self, engine: Box<dyn LayoutEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Word frequencies for `text`, without laying anything out
    pub fn process_text(&self, text: &str) -> Frequencies {
        self.pipeline.process_text(text)
    }

    pub fn generate(&mut self, text: &str) -> Result<&Layout> {
        let frequencies = self.process_text(text);
        info!("Counted {} distinct words", frequencies.len());
        self.generate_from_frequencies(frequencies)
    }

    pub fn generate_from_frequencies(&mut self, frequencies: Frequencies) -> Result<&Layout> {
        let layout = self.engine.layout(
            &frequencies,
            self.shaper.as_ref(),
            self.mask.as_ref(),
            &self.config,
        )?;
        self.frequencies = Some(frequencies);
        Ok(self.layout.insert(layout))
    }

    pub fn frequencies(&self) -> Option<&Frequencies> {
        self.frequencies.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    fn require_layout(&self) -> Result<&Layout> {
        self.layout.as_ref().ok_or_else(|| {
            WordCloudError::Render(
                "WordCloud has not been generated yet, call generate first".to_string(),
            )
        })
    }

    pub fn to_image(&self) -> Result<Pixmap> {
        let layout = self.require_layout()?;
        Rasterizer::from_config(&self.config)?.render(layout, self.shaper.as_ref())
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        encode_png(&self.to_image()?)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        save_png(&self.to_image()?, path)?;
        info!("Saved word cloud to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::BlockShaper;

    fn cloud(config: Config) -> WordCloud {
        WordCloud::with_shaper(config, Box::new(BlockShaper)).unwrap()
    }

    #[test]
    fn test_invalid_config_fails_immediately() {
        let config = Config::default().with_relative_scaling(2.0);
        let result = WordCloud::with_shaper(config, Box::new(BlockShaper));
        assert!(matches!(result, Err(WordCloudError::Configuration(_))));
    }

    #[test]
    fn test_image_requires_generate() {
        let wordcloud = cloud(Config::default());
        assert!(wordcloud.to_image().is_err());
        assert!(wordcloud.layout().is_none());
    }

    #[test]
    fn test_generate_and_render() {
        let config = Config::default()
            .with_size(200, 120)
            .with_random_state(5)
            .with_font_sizes(4, Some(40));
        let mut wordcloud = cloud(config);

        let layout = wordcloud.generate("rust rust rust borrow borrow checker").unwrap();
        assert_eq!(layout.words[0].word, "rust");

        let frequencies = wordcloud.frequencies().unwrap();
        assert_eq!(frequencies.get("rust"), Some(3));

        let png = wordcloud.to_png_bytes().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_generate_empty_text_fails() {
        let mut wordcloud = cloud(Config::default());
        assert!(wordcloud.generate("از و به 12").is_err());
    }
}
