//! Draws a finished layout onto a pixmap

use crate::config::{ColorMode, Config};
use crate::error::{Result, WordCloudError};
use crate::render::color::{parse_color, Rgba};
use crate::render::font::Shaper;
use crate::render::layout::Layout;
use log::debug;
use std::path::Path;
use tiny_skia::{FillRule, Paint, Pixmap};

pub struct Rasterizer {
    background: Rgba,
    scale: f32,
}

impl Rasterizer {
    pub fn new(background: Rgba, mode: ColorMode, scale: f32) -> Self {
        let background = match mode {
            ColorMode::Rgb => background.opaque(),
            ColorMode::Rgba => background,
        };
        Self { background, scale }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            parse_color(&config.canvas.background_color)?,
            config.canvas.mode,
            config.canvas.scale,
        ))
    }

    /// Render every placed word at `scale` times its layout size
    pub fn render(&self, layout: &Layout, shaper: &dyn Shaper) -> Result<Pixmap> {
        let width = (layout.width as f32 * self.scale).round() as u32;
        let height = (layout.height as f32 * self.scale).round() as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            WordCloudError::Render(format!("Cannot allocate a {}x{} image", width, height))
        })?;
        pixmap.fill(self.background.to_skia());

        let mut paint = Paint::default();
        paint.anti_alias = true;
        for word in &layout.words {
            let shaped = shaper.shape(&word.word, word.font_size as f32 * self.scale)?;
            let Some(path) = &shaped.path else {
                debug!("Nothing to draw for {}", word.word);
                continue;
            };
            let transform = shaped.placement(
                word.orientation,
                word.x as f32 * self.scale,
                word.y as f32 * self.scale,
            );
            paint.set_color(word.color.to_skia());
            pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
        }

        Ok(pixmap)
    }
}

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| WordCloudError::Image(format!("PNG encoding failed: {}", e)))
}

pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, encode_png(pixmap)?)?;
    Ok(())
}
