//! Shape masks: pure white pixels are off limits, everything else is canvas

use crate::error::{Result, WordCloudError};
use image::RgbImage;
use log::info;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Mask {
    width: u32,
    height: u32,
    blocked: Vec<bool>,
}

impl Mask {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WordCloudError::InvalidInput(format!(
                "Mask image does not exist: {}",
                path.display()
            )));
        }
        let image = image::open(path)?;
        info!(
            "Loaded mask {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_rgb(&image.to_rgb8()))
    }

    pub fn from_rgb(image: &RgbImage) -> Self {
        let blocked = image
            .pixels()
            .map(|pixel| pixel.0 == [255, 255, 255])
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            blocked,
        }
    }

    /// Build from a row-major grid; `true` marks a blocked pixel
    pub fn from_grid(width: u32, height: u32, blocked: Vec<bool>) -> Result<Self> {
        if blocked.len() != (width as usize) * (height as usize) {
            return Err(WordCloudError::InvalidInput(format!(
                "Mask grid has {} cells, expected {}x{}",
                blocked.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            blocked,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_blocked(&self, x: u32, y: u32) -> bool {
        self.blocked[(y * self.width + x) as usize]
    }

    pub fn blocked(&self) -> &[bool] {
        &self.blocked
    }

    pub fn free_pixels(&self) -> usize {
        self.blocked.iter().filter(|blocked| !**blocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_only_pure_white_is_blocked() {
        let mut image = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        image.put_pixel(0, 0, Rgb([0, 0, 0]));
        image.put_pixel(1, 0, Rgb([254, 255, 255]));

        let mask = Mask::from_rgb(&image);
        assert_eq!((mask.width(), mask.height()), (3, 2));
        assert!(!mask.is_blocked(0, 0));
        assert!(!mask.is_blocked(1, 0));
        assert!(mask.is_blocked(2, 0));
        assert!(mask.is_blocked(2, 1));
        assert_eq!(mask.free_pixels(), 2);
    }

    #[test]
    fn test_load_from_png() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mask.png");
        let mut image = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        image.put_pixel(1, 1, Rgb([10, 10, 10]));
        image.save(&path).unwrap();

        let mask = Mask::from_path(&path).unwrap();
        assert_eq!(mask.free_pixels(), 1);
        assert!(!mask.is_blocked(1, 1));
    }

    #[test]
    fn test_grid_size_checked() {
        assert!(Mask::from_grid(2, 2, vec![false; 3]).is_err());
        assert!(Mask::from_grid(2, 2, vec![false; 4]).is_ok());
    }

    #[test]
    fn test_missing_mask() {
        assert!(Mask::from_path(Path::new("no/such/mask.png")).is_err());
    }
}
