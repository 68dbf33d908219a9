//! Colors, colormaps and word color functions

use crate::error::{Result, WordCloudError};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("black", Rgba::rgb(0, 0, 0)),
    ("white", Rgba::rgb(255, 255, 255)),
    ("red", Rgba::rgb(255, 0, 0)),
    ("green", Rgba::rgb(0, 128, 0)),
    ("lime", Rgba::rgb(0, 255, 0)),
    ("blue", Rgba::rgb(0, 0, 255)),
    ("yellow", Rgba::rgb(255, 255, 0)),
    ("cyan", Rgba::rgb(0, 255, 255)),
    ("magenta", Rgba::rgb(255, 0, 255)),
    ("gray", Rgba::rgb(128, 128, 128)),
    ("grey", Rgba::rgb(128, 128, 128)),
    ("silver", Rgba::rgb(192, 192, 192)),
    ("maroon", Rgba::rgb(128, 0, 0)),
    ("olive", Rgba::rgb(128, 128, 0)),
    ("navy", Rgba::rgb(0, 0, 128)),
    ("teal", Rgba::rgb(0, 128, 128)),
    ("purple", Rgba::rgb(128, 0, 128)),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("pink", Rgba::rgb(255, 192, 203)),
    ("brown", Rgba::rgb(165, 42, 42)),
    ("transparent", Rgba { r: 0, g: 0, b: 0, a: 0 }),
];

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or a common color name.
pub fn parse_color(value: &str) -> Result<Rgba> {
    let value = value.trim().to_lowercase();
    let invalid = || WordCloudError::Configuration(format!("Invalid color: {}", value));

    if let Some(hex) = value.strip_prefix('#') {
        let digit = |idx: usize, len: usize| {
            u8::from_str_radix(hex.get(idx..idx + len).ok_or_else(invalid)?, 16)
                .map_err(|_| invalid())
        };
        return match hex.len() {
            3 => Ok(Rgba::rgb(
                digit(0, 1)? * 17,
                digit(1, 1)? * 17,
                digit(2, 1)? * 17,
            )),
            6 => Ok(Rgba::rgb(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
            8 => Ok(Rgba {
                r: digit(0, 2)?,
                g: digit(2, 2)?,
                b: digit(4, 2)?,
                a: digit(6, 2)?,
            }),
            _ => Err(invalid()),
        };
    }

    if let Some(inner) = value
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let channels: Vec<u8> = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<_>>()?;
        return match channels.as_slice() {
            [r, g, b] => Ok(Rgba::rgb(*r, *g, *b)),
            _ => Err(invalid()),
        };
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, color)| *color)
        .ok_or_else(invalid)
}

/// A piecewise-linear colormap over `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: &'static str,
    stops: &'static [(f32, [u8; 3])],
}

const VIRIDIS: &[(f32, [u8; 3])] = &[
    (0.0, [68, 1, 84]),
    (0.25, [59, 82, 139]),
    (0.5, [33, 145, 140]),
    (0.75, [94, 201, 98]),
    (1.0, [253, 231, 37]),
];

const PLASMA: &[(f32, [u8; 3])] = &[
    (0.0, [13, 8, 135]),
    (0.25, [126, 3, 168]),
    (0.5, [204, 71, 120]),
    (0.75, [248, 149, 64]),
    (1.0, [240, 249, 33]),
];

const MAGMA: &[(f32, [u8; 3])] = &[
    (0.0, [0, 0, 4]),
    (0.25, [81, 18, 124]),
    (0.5, [183, 55, 121]),
    (0.75, [252, 137, 97]),
    (1.0, [252, 253, 191]),
];

const INFERNO: &[(f32, [u8; 3])] = &[
    (0.0, [0, 0, 4]),
    (0.25, [87, 16, 110]),
    (0.5, [188, 55, 84]),
    (0.75, [249, 142, 9]),
    (1.0, [252, 255, 164]),
];

const HSV: &[(f32, [u8; 3])] = &[
    (0.0, [255, 0, 0]),
    (1.0 / 6.0, [255, 255, 0]),
    (2.0 / 6.0, [0, 255, 0]),
    (3.0 / 6.0, [0, 255, 255]),
    (4.0 / 6.0, [0, 0, 255]),
    (5.0 / 6.0, [255, 0, 255]),
    (1.0, [255, 0, 0]),
];

const GRAY: &[(f32, [u8; 3])] = &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];

const COLORMAPS: &[(&str, &[(f32, [u8; 3])])] = &[
    ("viridis", VIRIDIS),
    ("plasma", PLASMA),
    ("magma", MAGMA),
    ("inferno", INFERNO),
    ("hsv", HSV),
    ("gray", GRAY),
];

impl Colormap {
    pub fn by_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        COLORMAPS
            .iter()
            .find(|(known, _)| *known == lower)
            .map(|&(known, stops)| Self { name: known, stops })
            .ok_or_else(|| {
                WordCloudError::Configuration(format!(
                    "Unknown colormap: {}. Supported: {}",
                    name,
                    Self::names().join(", ")
                ))
            })
    }

    pub fn names() -> Vec<&'static str> {
        COLORMAPS.iter().map(|(name, _)| *name).collect()
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Color at `t`, clamped to `[0, 1]`
    pub fn sample(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let frac = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * frac).round() as u8;
                return Rgba::rgb(lerp(c0[0], c1[0]), lerp(c0[1], c1[1]), lerp(c0[2], c1[2]));
            }
        }
        let [r, g, b] = self.stops[self.stops.len() - 1].1;
        Rgba::rgb(r, g, b)
    }
}

/// Chooses the color of each placed word
pub trait ColorFunc {
    fn color(&self, word: &str, font_size: u32, rng: &mut StdRng) -> Rgba;
}

/// Samples a colormap uniformly at random
pub struct ColormapColorFunc {
    colormap: Colormap,
}

impl ColormapColorFunc {
    pub fn new(colormap: Colormap) -> Self {
        Self { colormap }
    }
}

impl ColorFunc for ColormapColorFunc {
    fn color(&self, _word: &str, _font_size: u32, rng: &mut StdRng) -> Rgba {
        self.colormap.sample(rng.gen::<f32>())
    }
}

/// Same color for every word
pub struct SingleColorFunc(pub Rgba);

impl ColorFunc for SingleColorFunc {
    fn color(&self, _word: &str, _font_size: u32, _rng: &mut StdRng) -> Rgba {
        self.0
    }
}
