//! Greedy word placement
//!
//! Words are placed from most to least frequent. Each word gets a font size
//! derived from the previous one, a random orientation and a random free spot
//! on the canvas; when no spot fits it is rotated once, then shrunk step by
//! step until it fits or drops below the minimum size, which ends the layout.

use crate::config::Config;
use crate::error::{Result, WordCloudError};
use crate::render::color::{ColorFunc, Colormap, ColormapColorFunc, Rgba};
use crate::render::font::Shaper;
use crate::render::mask::Mask;
use crate::render::occupancy::Occupancy;
use crate::render::Orientation;
use crate::text::frequency::{Frequencies, WordFrequency};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: u32,
    pub x: u32,
    pub y: u32,
    pub orientation: Orientation,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Fits frequencies onto a canvas
pub trait LayoutEngine {
    fn layout(
        &self,
        frequencies: &Frequencies,
        shaper: &dyn Shaper,
        mask: Option<&Mask>,
        config: &Config,
    ) -> Result<Layout>;
}

#[derive(Default)]
pub struct GreedyLayout {
    color_func: Option<Box<dyn ColorFunc>>,
}

/// Everything one placement pass needs besides the words
struct Canvas<'a> {
    width: u32,
    height: u32,
    mask: Option<&'a Mask>,
    shaper: &'a dyn Shaper,
    color_func: &'a dyn ColorFunc,
    config: &'a Config,
}

impl GreedyLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the colormap named in the config
    pub fn with_color_func(mut self, color_func: Box<dyn ColorFunc>) -> Self {
        self.color_func = Some(color_func);
        self
    }

    fn place_words(
        &self,
        canvas: &Canvas<'_>,
        words: &[WordFrequency],
        start_font_size: u32,
        rng: &mut StdRng,
    ) -> Result<Vec<PlacedWord>> {
        let layout = &canvas.config.layout;
        let margin = canvas.config.canvas.margin;
        let max_count = words.first().map(|entry| entry.count).unwrap_or(1) as f32;

        let base: Vec<bool> = match canvas.mask {
            Some(mask) => mask.blocked().to_vec(),
            None => vec![false; (canvas.width as usize) * (canvas.height as usize)],
        };
        let mut occupied = base.clone();
        let mut occupancy = Occupancy::new(canvas.width, canvas.height, &occupied);
        let mut drawn = Pixmap::new(canvas.width, canvas.height).ok_or_else(|| {
            WordCloudError::Render(format!(
                "Cannot allocate a {}x{} canvas",
                canvas.width, canvas.height
            ))
        })?;
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);

        let rs = layout.relative_scaling;
        let mut font_size = start_font_size;
        let mut last_freq = 1.0f32;
        let mut placed = Vec::new();

        for entry in words {
            let freq = entry.count as f32 / max_count;
            if rs != 0.0 {
                font_size =
                    ((rs * (freq / last_freq) + (1.0 - rs)) * font_size as f32).round() as u32;
            }
            let mut orientation = if rng.gen::<f32>() < layout.prefer_horizontal {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };

            let mut tried_other_orientation = false;
            let found = loop {
                if font_size < layout.min_font_size {
                    break None;
                }
                let shaped = canvas.shaper.shape(&entry.word, font_size as f32)?;
                let (box_w, box_h) = shaped.box_size(orientation);
                if let Some(position) =
                    occupancy.sample_position(box_w + margin, box_h + margin, rng)
                {
                    break Some((position, shaped));
                }
                if !tried_other_orientation && layout.prefer_horizontal < 1.0 {
                    orientation = orientation.flipped();
                    tried_other_orientation = true;
                } else {
                    font_size = font_size.saturating_sub(layout.font_step);
                    orientation = Orientation::Horizontal;
                }
            };

            let Some(((px, py), shaped)) = found else {
                debug!("No room left at minimum font size; stopping at {}", entry.word);
                break;
            };

            let x = px + margin / 2;
            let y = py + margin / 2;
            let transform = shaped.placement(orientation, x as f32, y as f32);
            match &shaped.path {
                Some(path) => drawn.fill_path(path, &paint, FillRule::Winding, transform, None),
                None => {
                    let (box_w, box_h) = shaped.box_size(orientation);
                    if let Some(rect) =
                        Rect::from_xywh(x as f32, y as f32, box_w as f32, box_h as f32)
                    {
                        let block = PathBuilder::from_rect(rect);
                        drawn.fill_path(
                            &block,
                            &paint,
                            FillRule::Winding,
                            tiny_skia::Transform::identity(),
                            None,
                        );
                    }
                }
            }
            for (idx, pixel) in drawn.pixels().iter().enumerate() {
                occupied[idx] = base[idx] || pixel.alpha() > 0;
            }
            occupancy.update(&occupied);

            placed.push(PlacedWord {
                word: entry.word.clone(),
                count: entry.count,
                font_size,
                x,
                y,
                orientation,
                color: canvas.color_func.color(&entry.word, font_size, rng),
            });
            last_freq = freq;
        }

        Ok(placed)
    }
}

impl GreedyLayout {
    /// `max_font_size`, or the harmonic mean of the sizes two words get on
    /// a trial run from the canvas height.
    fn start_font_size(
        &self,
        canvas: &Canvas<'_>,
        words: &[WordFrequency],
        rng: &mut StdRng,
    ) -> Result<u32> {
        if let Some(size) = canvas.config.layout.max_font_size {
            return Ok(size);
        }
        if words.len() == 1 {
            return Ok(canvas.height);
        }

        let trial = self.place_words(canvas, &words[..2], canvas.height, rng)?;
        match trial.as_slice() {
            [first, second, ..] => {
                let (a, b) = (first.font_size as f32, second.font_size as f32);
                Ok((2.0 * a * b / (a + b)) as u32)
            }
            [first] => Ok(first.font_size),
            [] => Err(WordCloudError::Render(
                "Couldn't find space to draw. Either the canvas is too small \
                 or too much of the mask is blocked."
                    .to_string(),
            )),
        }
    }
}

impl LayoutEngine for GreedyLayout {
    fn layout(
        &self,
        frequencies: &Frequencies,
        shaper: &dyn Shaper,
        mask: Option<&Mask>,
        config: &Config,
    ) -> Result<Layout> {
        if frequencies.is_empty() {
            return Err(WordCloudError::InvalidInput(
                "We need at least 1 word to plot a word cloud, got 0.".to_string(),
            ));
        }

        let (width, height) = match mask {
            Some(mask) => (mask.width(), mask.height()),
            None => (config.canvas.width, config.canvas.height),
        };
        let mut rng = match config.layout.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let default_color_func;
        let color_func: &dyn ColorFunc = match &self.color_func {
            Some(color_func) => color_func.as_ref(),
            None => {
                default_color_func =
                    ColormapColorFunc::new(Colormap::by_name(config.colormap_name())?);
                &default_color_func
            }
        };

        let canvas = Canvas {
            width,
            height,
            mask,
            shaper,
            color_func,
            config,
        };
        let words: Vec<WordFrequency> = frequencies
            .top(config.layout.max_words)
            .iter()
            .cloned()
            .collect();

        let start_font_size = self.start_font_size(&canvas, &words, &mut rng)?;
        debug!("Starting font size {}", start_font_size);

        let placed = self.place_words(&canvas, &words, start_font_size, &mut rng)?;
        info!("Placed {} of {} words", placed.len(), words.len());

        Ok(Layout {
            width,
            height,
            words: placed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::SingleColorFunc;
    use crate::render::testing::BlockShaper;

    fn config() -> Config {
        Config::default()
            .with_size(120, 80)
            .with_random_state(42)
            .with_font_sizes(4, Some(30))
    }

    fn freqs() -> Frequencies {
        Frequencies::from_pairs(vec![("alpha", 10), ("beta", 5), ("gamma", 2), ("delta", 1)])
    }

    fn overlaps(a: &PlacedWord, b: &PlacedWord, shaper: &BlockShaper) -> bool {
        let size = |word: &PlacedWord| {
            shaper
                .shape(&word.word, word.font_size as f32)
                .unwrap()
                .box_size(word.orientation)
        };
        let (aw, ah) = size(a);
        let (bw, bh) = size(b);
        a.x < b.x + bw && b.x < a.x + aw && a.y < b.y + bh && b.y < a.y + ah
    }

    #[test]
    fn test_layout_places_words_in_frequency_order() {
        let layout = GreedyLayout::new()
            .layout(&freqs(), &BlockShaper, None, &config())
            .unwrap();

        assert_eq!((layout.width, layout.height), (120, 80));
        assert!(!layout.is_empty());
        assert_eq!(layout.words[0].word, "alpha");
        assert_eq!(layout.words[0].font_size, 30);
        for pair in layout.words.windows(2) {
            assert!(pair[0].font_size >= pair[1].font_size);
        }
    }

    #[test]
    fn test_words_do_not_overlap_and_stay_inside() {
        let shaper = BlockShaper;
        let layout = GreedyLayout::new()
            .layout(&freqs(), &shaper, None, &config())
            .unwrap();

        for (i, a) in layout.words.iter().enumerate() {
            let (w, h) = shaper
                .shape(&a.word, a.font_size as f32)
                .unwrap()
                .box_size(a.orientation);
            assert!(a.x + w <= layout.width && a.y + h <= layout.height);
            for b in &layout.words[i + 1..] {
                assert!(!overlaps(a, b, &shaper), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let engine = GreedyLayout::new();
        let first = engine.layout(&freqs(), &BlockShaper, None, &config()).unwrap();
        let second = engine.layout(&freqs(), &BlockShaper, None, &config()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_relative_scaling_zero_keeps_size() {
        let config = config().with_relative_scaling(0.0).with_font_sizes(4, Some(10));
        let layout = GreedyLayout::new()
            .layout(&freqs(), &BlockShaper, None, &config)
            .unwrap();
        assert!(layout.words.iter().all(|word| word.font_size <= 10));
        assert_eq!(layout.words[0].font_size, 10);
    }

    #[test]
    fn test_max_words_limits_layout() {
        let config = config().with_max_words(2);
        let layout = GreedyLayout::new()
            .layout(&freqs(), &BlockShaper, None, &config)
            .unwrap();
        assert!(layout.len() <= 2);
    }

    #[test]
    fn test_empty_frequencies_rejected() {
        let result = GreedyLayout::new().layout(&Frequencies::default(), &BlockShaper, None, &config());
        assert!(matches!(result, Err(WordCloudError::InvalidInput(_))));
    }

    #[test]
    fn test_mask_confines_words() {
        // only the left half is drawable
        let (width, height) = (100u32, 60u32);
        let blocked: Vec<bool> = (0..width * height).map(|idx| idx % width >= width / 2).collect();
        let mask = Mask::from_grid(width, height, blocked).unwrap();
        let config = config().with_font_sizes(4, Some(12));

        let layout = GreedyLayout::new()
            .layout(&freqs(), &BlockShaper, Some(&mask), &config)
            .unwrap();
        assert_eq!((layout.width, layout.height), (width, height));
        for word in &layout.words {
            let (w, _) = BlockShaper
                .shape(&word.word, word.font_size as f32)
                .unwrap()
                .box_size(word.orientation);
            assert!(word.x + w <= width / 2, "{} crosses the mask", word.word);
        }
    }

    fn canvas<'a>(config: &'a Config, mask: Option<&'a Mask>, color: &'a SingleColorFunc) -> Canvas<'a> {
        Canvas {
            width: mask.map_or(config.canvas.width, Mask::width),
            height: mask.map_or(config.canvas.height, Mask::height),
            mask,
            shaper: &BlockShaper,
            color_func: color,
            config,
        }
    }

    #[test]
    fn test_trial_run_sets_font_size() {
        let config = Config::default().with_size(200, 100).with_random_state(1);
        let color = SingleColorFunc(Rgba::rgb(1, 2, 3));
        let engine = GreedyLayout::new();
        let words: Vec<WordFrequency> = freqs().iter().cloned().collect();

        let mut rng = StdRng::seed_from_u64(1);
        let trial = engine
            .place_words(&canvas(&config, None, &color), &words[..2], 100, &mut rng)
            .unwrap();
        assert_eq!(trial.len(), 2);
        let (a, b) = (trial[0].font_size as f32, trial[1].font_size as f32);
        let expected = (2.0 * a * b / (a + b)) as u32;

        let mut rng = StdRng::seed_from_u64(1);
        let start = engine
            .start_font_size(&canvas(&config, None, &color), &words, &mut rng)
            .unwrap();
        assert_eq!(start, expected);

        // relative scaling leaves the first word at the start size
        let layout = GreedyLayout::new()
            .with_color_func(Box::new(SingleColorFunc(Rgba::rgb(1, 2, 3))))
            .layout(&freqs(), &BlockShaper, None, &config)
            .unwrap();
        assert_eq!(layout.words[0].font_size, expected);
        assert!(layout.words.iter().all(|word| word.color == Rgba::rgb(1, 2, 3)));
    }

    #[test]
    fn test_single_word_starts_at_canvas_height() {
        let config = Config::default()
            .with_size(200, 100)
            .with_margin(0)
            .with_random_state(3);
        let single = Frequencies::from_pairs(vec![("ab", 4)]);
        let layout = GreedyLayout::new()
            .layout(&single, &BlockShaper, None, &config)
            .unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.words[0].font_size, 100);
        assert_eq!(layout.words[0].orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_fully_blocked_mask_has_no_space() {
        let mask = Mask::from_grid(40, 30, vec![true; 40 * 30]).unwrap();
        let config = Config::default().with_random_state(1);
        let result = GreedyLayout::new().layout(&freqs(), &BlockShaper, Some(&mask), &config);
        match result {
            Err(WordCloudError::Render(message)) => {
                assert!(message.contains("Couldn't find space to draw"));
            }
            other => panic!("expected a render error, got {:?}", other),
        }
    }
}
