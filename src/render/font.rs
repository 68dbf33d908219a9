//! Font loading and word outlines
//!
//! Words reach this module already reshaped and in visual order, so shaping
//! is always left to right.

use crate::error::{Result, WordCloudError};
use crate::render::Orientation;
use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};
use rustybuzz::UnicodeBuffer;
use std::path::Path;
use tiny_skia::{PathBuilder, Transform};

/// Outline of one word, positioned with its bounding box at the origin
#[derive(Debug, Clone)]
pub struct ShapedText {
    pub path: Option<tiny_skia::Path>,
    pub width: f32,
    pub height: f32,
}

impl ShapedText {
    /// Pixel box occupied by the word in the given orientation
    pub fn box_size(&self, orientation: Orientation) -> (u32, u32) {
        let width = self.width.ceil().max(1.0) as u32;
        let height = self.height.ceil().max(1.0) as u32;
        match orientation {
            Orientation::Horizontal => (width, height),
            Orientation::Vertical => (height, width),
        }
    }

    /// Transform placing the outline at `(x, y)`; vertical words read bottom to top.
    pub fn placement(&self, orientation: Orientation, x: f32, y: f32) -> Transform {
        match orientation {
            Orientation::Horizontal => Transform::from_translate(x, y),
            Orientation::Vertical => {
                Transform::from_row(0.0, -1.0, 1.0, 0.0, 0.0, self.width).post_translate(x, y)
            }
        }
    }
}

/// Turns a word into an outline at a given size
pub trait Shaper {
    fn shape(&self, text: &str, font_size: f32) -> Result<ShapedText>;
}

pub struct FontFace {
    data: Vec<u8>,
}

impl FontFace {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WordCloudError::Font(format!(
                "Font file does not exist: {}",
                path.display()
            )));
        }
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Self { data };
        font.face()?;
        Ok(font)
    }

    fn face(&self) -> Result<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, 0)
            .ok_or_else(|| WordCloudError::Font("Unable to parse font data".to_string()))
    }
}

impl Shaper for FontFace {
    fn shape(&self, text: &str, font_size: f32) -> Result<ShapedText> {
        let face = self.face()?;
        let scale = font_size / face.units_per_em() as f32;
        let ascender = face.ascender() as f32 * scale;
        let descender = face.descender() as f32 * scale;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        buffer.set_direction(rustybuzz::Direction::LeftToRight);
        let output = rustybuzz::shape(&face, &[], buffer);

        let mut path_builder = PathBuilder::new();
        let mut current_x = 0.0;
        for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
            let mut builder = GlyphPathBuilder::new();
            if face
                .outline_glyph(GlyphId(info.glyph_id as u16), &mut builder)
                .is_some()
            {
                if let Some(glyph) = builder.current.finish() {
                    let transform = Transform::from_scale(scale, -scale).post_translate(
                        current_x + pos.x_offset as f32 * scale,
                        ascender - pos.y_offset as f32 * scale,
                    );
                    if let Some(glyph) = glyph.transform(transform) {
                        path_builder.push_path(&glyph);
                    }
                }
            }
            current_x += pos.x_advance as f32 * scale;
        }

        Ok(ShapedText {
            path: path_builder.finish(),
            width: current_x,
            height: ascender - descender,
        })
    }
}

struct GlyphPathBuilder {
    current: PathBuilder,
}

impl GlyphPathBuilder {
    fn new() -> Self {
        Self {
            current: PathBuilder::new(),
        }
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.current.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.current.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.current.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.current.close();
    }
}
