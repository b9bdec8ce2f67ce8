//! Rectangles and mask-accurate collision queries
//!
//! Boxes reject far pairs cheaply; masks decide the rest pixel by pixel.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::mask::Mask;

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x < self.right() && point.y >= self.top() && point.y < self.bottom()
    }
}

/// Pixel offset of `b` relative to `a`, snapped the way sprites are blitted
#[inline]
fn pixel_offset(a: Vec2, b: Vec2) -> IVec2 {
    b.floor().as_ivec2() - a.floor().as_ivec2()
}

/// Mask-accurate overlap of two placed sprites
pub fn masks_collide(a_pos: Vec2, a_mask: &Mask, b_pos: Vec2, b_mask: &Mask) -> bool {
    let a_rect = Rect::new(a_pos.floor(), a_mask.size());
    let b_rect = Rect::new(b_pos.floor(), b_mask.size());
    if !a_rect.intersects(&b_rect) {
        return false;
    }
    a_mask.overlaps(b_mask, pixel_offset(a_pos, b_pos))
}

/// Indices of every `others` position whose sprite touches `a`
pub fn colliding_indices<'a, I>(a_pos: Vec2, a_mask: &Mask, others: I, other_mask: &Mask) -> Vec<usize>
where
    I: IntoIterator<Item = &'a Vec2>,
{
    others
        .into_iter()
        .enumerate()
        .filter(|(_, pos)| masks_collide(a_pos, a_mask, **pos, other_mask))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 5.0));
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 25.0);
        assert_eq!(r.center(), Vec2::new(25.0, 22.5));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.intersects(&b));
        let c = Rect::new(Vec2::new(9.5, 9.5), Vec2::splat(10.0));
        assert!(a.intersects(&c));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        assert!(r.contains(Vec2::ZERO));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn stacked_sprites_collide_once_overlapping() {
        let jumper = Mask::filled(40, 40);
        let platform = Mask::filled(60, 12);
        // Jumper bottom exactly on platform top: no pixel shared
        assert!(!masks_collide(Vec2::new(100.0, 60.0), &jumper, Vec2::new(90.0, 100.0), &platform));
        // One pixel into the platform
        assert!(masks_collide(Vec2::new(100.0, 61.0), &jumper, Vec2::new(90.0, 100.0), &platform));
    }

    #[test]
    fn colliding_indices_reports_all_hits() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);
        let others = [Vec2::new(5.0, 5.0), Vec2::new(50.0, 50.0), Vec2::new(-5.0, 0.0)];
        assert_eq!(colliding_indices(Vec2::ZERO, &a, &others, &b), vec![0, 2]);
    }
}
