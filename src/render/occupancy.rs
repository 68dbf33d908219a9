//! Occupancy grid backed by a summed-area table

use rand::rngs::StdRng;
use rand::Rng;

pub struct Occupancy {
    width: u32,
    height: u32,
    /// `(width + 1) * (height + 1)` prefix sums; row 0 and column 0 are zero
    integral: Vec<u32>,
}

impl Occupancy {
    /// Build from a row-major grid where `true` is occupied
    pub fn new(width: u32, height: u32, occupied: &[bool]) -> Self {
        let mut occupancy = Self {
            width,
            height,
            integral: vec![0; (width as usize + 1) * (height as usize + 1)],
        };
        occupancy.update(occupied);
        occupancy
    }

    pub fn update(&mut self, occupied: &[bool]) {
        let w = self.width as usize;
        let stride = w + 1;
        for y in 0..self.height as usize {
            let mut row_sum = 0;
            for x in 0..w {
                row_sum += occupied[y * w + x] as u32;
                self.integral[(y + 1) * stride + x + 1] = self.integral[y * stride + x + 1] + row_sum;
            }
        }
    }

    /// Number of occupied cells in the box at `(x, y)` of size `w` by `h`
    pub fn area_sum(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        let stride = self.width as usize + 1;
        let (x0, y0) = (x as usize, y as usize);
        let (x1, y1) = (x0 + w as usize, y0 + h as usize);
        self.integral[y1 * stride + x1] + self.integral[y0 * stride + x0]
            - self.integral[y0 * stride + x1]
            - self.integral[y1 * stride + x0]
    }

    pub fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        x + w <= self.width && y + h <= self.height && self.area_sum(x, y, w, h) == 0
    }

    /// Pick a free position for a `w` by `h` box uniformly at random
    pub fn sample_position(&self, w: u32, h: u32, rng: &mut StdRng) -> Option<(u32, u32)> {
        if w > self.width || h > self.height {
            return None;
        }
        let xs = 0..=self.width - w;
        let ys = 0..=self.height - h;

        let mut hits = 0usize;
        for y in ys.clone() {
            for x in xs.clone() {
                if self.area_sum(x, y, w, h) == 0 {
                    hits += 1;
                }
            }
        }
        if hits == 0 {
            return None;
        }

        let mut goal = rng.gen_range(0..hits);
        for y in ys {
            for x in xs.clone() {
                if self.area_sum(x, y, w, h) == 0 {
                    if goal == 0 {
                        return Some((x, y));
                    }
                    goal -= 1;
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn grid(width: u32, height: u32, occupied: &[(u32, u32)]) -> Vec<bool> {
        let mut cells = vec![false; (width * height) as usize];
        for &(x, y) in occupied {
            cells[(y * width + x) as usize] = true;
        }
        cells
    }

    #[test]
    fn test_area_sum() {
        let occupancy = Occupancy::new(4, 3, &grid(4, 3, &[(0, 0), (3, 2), (1, 1)]));
        assert_eq!(occupancy.area_sum(0, 0, 4, 3), 3);
        assert_eq!(occupancy.area_sum(0, 0, 1, 1), 1);
        assert_eq!(occupancy.area_sum(1, 0, 2, 1), 0);
        assert_eq!(occupancy.area_sum(1, 1, 3, 2), 2);
        assert!(occupancy.is_free(2, 0, 2, 2));
        assert!(!occupancy.is_free(3, 0, 2, 1));
    }

    #[test]
    fn test_sample_position_finds_only_gap() {
        let mut occupied = vec![true; 25];
        occupied[2 * 5 + 3] = false;
        let occupancy = Occupancy::new(5, 5, &occupied);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(occupancy.sample_position(1, 1, &mut rng), Some((3, 2)));
        assert_eq!(occupancy.sample_position(2, 1, &mut rng), None);
    }

    #[test]
    fn test_sample_position_too_large() {
        let occupancy = Occupancy::new(3, 3, &grid(3, 3, &[]));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(occupancy.sample_position(4, 1, &mut rng), None);
        assert_eq!(occupancy.sample_position(3, 3, &mut rng), Some((0, 0)));
    }

    #[test]
    fn test_update_reflects_new_cells() {
        let mut occupancy = Occupancy::new(2, 2, &grid(2, 2, &[]));
        assert!(occupancy.is_free(0, 0, 2, 2));
        occupancy.update(&grid(2, 2, &[(1, 1)]));
        assert!(!occupancy.is_free(0, 0, 2, 2));
        assert!(occupancy.is_free(0, 0, 1, 2));
    }
}
