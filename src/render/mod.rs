//! Word placement and rasterization

pub mod color;
pub mod font;
pub mod layout;
pub mod mask;
pub mod occupancy;
pub mod raster;

use serde::{Deserialize, Serialize};

pub use color::{ColorFunc, Colormap, ColormapColorFunc, Rgba, SingleColorFunc};
pub use font::{FontFace, ShapedText, Shaper};
pub use layout::{GreedyLayout, Layout, LayoutEngine, PlacedWord};
pub use mask::Mask;
pub use raster::Rasterizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    /// Rotated 90 degrees counter-clockwise
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}
