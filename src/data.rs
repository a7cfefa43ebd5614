// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

use crate::conv::u32_to_px;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// Horizontal alignment of lines
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Align {
    /// Align to the left edge
    #[default]
    Left,
    /// Align to centre
    Center,
    /// Align to the right edge
    Right,
}

/// 2D vector (or point) in pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vec2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Vec2(self.0 - rhs.0, self.1 - rhs.1)
    }
}

/// A rectangle within the atlas bitmap, in whole pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl AtlasRect {
    /// True if the rectangle covers no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// True if both rectangles share at least one pixel
    pub fn overlaps(&self, other: &AtlasRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// A rectangle in render-target space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Construct with the given `origin` and the size of an atlas rectangle
    #[inline]
    pub fn with_size_of(origin: Vec2, src: AtlasRect) -> Self {
        Rect {
            x: origin.0,
            y: origin.1,
            w: u32_to_px(src.w),
            h: u32_to_px(src.h),
        }
    }

    /// Top-left corner
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2(self.x, self.y)
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// An RGBA colour (non-premultiplied, 8 bits per channel)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgba(0xFF, 0xFF, 0xFF, 0xFF);
    /// Opaque black
    pub const BLACK: Color = Color::rgba(0, 0, 0, 0xFF);
    /// Fully transparent
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Construct from components
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Scale alpha by a coverage value (`0` = none, `255` = full)
    ///
    /// Colour channels are not premultiplied.
    #[inline]
    pub fn with_coverage(self, coverage: u8) -> [u8; 4] {
        let a = (u16::from(self.a) * u16::from(coverage) + 127) / 255;
        [self.r, self.g, self.b, a as u8]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coverage() {
        let c = Color::rgba(10, 20, 30, 255);
        assert_eq!(c.with_coverage(0), [10, 20, 30, 0]);
        assert_eq!(c.with_coverage(255), [10, 20, 30, 255]);
        assert_eq!(Color::rgba(1, 1, 1, 128).with_coverage(255)[3], 128);
    }

    #[test]
    fn overlap() {
        let a = AtlasRect { x: 0, y: 0, w: 4, h: 4 };
        let b = AtlasRect { x: 4, y: 0, w: 4, h: 4 };
        let c = AtlasRect { x: 3, y: 3, w: 1, h: 1 };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(!a.overlaps(&AtlasRect::default()));
    }
}
