//! Per-pixel collision masks
//!
//! A mask is a grid of solid/empty cells, one per sprite pixel. Sprites come
//! from the host's asset loader; [`Mask::from_alpha`] turns their alpha
//! channel into a mask. Shape constructors cover the defaults used when no
//! sprite data is supplied.

use glam::{IVec2, Vec2};

/// Alpha at or above this counts as solid
pub const ALPHA_THRESHOLD: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// Row-major
    bits: Vec<bool>,
}

impl Mask {
    /// Fully solid rectangle
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Solid ellipse inscribed in a `width` x `height` box
    pub fn ellipse(width: u32, height: u32) -> Self {
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }

    /// Mask from a row-major alpha channel
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Self {
        debug_assert_eq!(alpha.len(), (width * height) as usize);
        Self::from_fn(width, height, |x, y| {
            alpha
                .get((y * width + x) as usize)
                .is_some_and(|&a| a >= ALPHA_THRESHOLD)
        })
    }

    pub fn from_fn(width: u32, height: u32, solid: impl Fn(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(solid(x, y));
            }
        }
        Self { width, height, bits }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Solid test; out-of-bounds is empty
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True if any solid pixel of `self` overlaps a solid pixel of `other`
    /// placed at `offset` relative to `self`'s origin.
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}
