// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph atlas: packing and metrics
//!
//! Sprites are packed into a single RGBA bitmap using shelf packing: sprites
//! are sorted by descending height, then placed left-to-right on "shelves"
//! (rows), opening a new shelf whenever the current one is full. The atlas
//! width is estimated from the total sprite area; the height is the sum of
//! shelf heights.

use crate::conv::{i32_to_px, to_usize};
use crate::raster::{Rasterizer, Sprite};
use crate::{AtlasRect, Color, Vec2};
use easy_cast::{Conv, ConvFloat};

/// Atlas packing configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Gap between sprites, in pixels
    ///
    /// A gap of at least one pixel avoids bleeding between neighbours when
    /// the atlas is sampled with linear filtering.
    pub padding: u32,
    /// Round both atlas dimensions up to a power of two
    pub power_of_two: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            padding: 1,
            power_of_two: false,
        }
    }
}

/// An RGBA8 bitmap
///
/// Pixels are stored row-major with the origin at the top-left, four bytes
/// per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct AtlasPixels {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for AtlasPixels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasPixels")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl AtlasPixels {
    fn new(width: u32, height: u32) -> Self {
        let data = vec![0; to_usize(width) * to_usize(height) * 4];
        AtlasPixels {
            width,
            height,
            data,
        }
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA data, length `width * height * 4`
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the pixel at `(x, y)`, if within bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (to_usize(y) * to_usize(self.width) + to_usize(x)) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(&self.data[i..i + 4]);
        Some(px)
    }

    /// Copy `sprite` to `rect`, tinted with `color`
    fn blit(&mut self, rect: AtlasRect, sprite: &Sprite, color: Color) {
        let w = to_usize(rect.w);
        let stride = to_usize(self.width);
        for (row, coverage) in sprite.data.chunks_exact(w).enumerate() {
            let start = ((to_usize(rect.y) + row) * stride + to_usize(rect.x)) * 4;
            let line = &mut self.data[start..start + w * 4];
            for (px, c) in line.chunks_exact_mut(4).zip(coverage) {
                px.copy_from_slice(&color.with_coverage(*c));
            }
        }
    }
}

/// Metrics and atlas coordinates for one glyph
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphInfo {
    /// Source codepoint
    pub codepoint: char,
    /// Rectangle inside the atlas
    ///
    /// Empty (zero-sized) for glyphs with nothing to draw.
    pub rect: AtlasRect,
    /// Horizontal advance after this glyph
    pub advance: f32,
    /// Offset from the pen position to the sprite's top-left corner, with
    /// `y` measured upwards from the baseline
    pub bearing: (i32, i32),
}

impl GlyphInfo {
    /// Offset to add to the pen position to get the target origin
    ///
    /// This is the bearing in screen coordinates (`y` down).
    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2(i32_to_px(self.bearing.0), -i32_to_px(self.bearing.1))
    }
}

/// Cooked glyph metrics, ordered by codepoint
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphTable {
    glyphs: Vec<GlyphInfo>,
}

impl GlyphTable {
    /// Look up the glyph for `c`
    pub fn get(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs
            .binary_search_by_key(&c, |g| g.codepoint)
            .ok()
            .map(|i| &self.glyphs[i])
    }

    /// Number of glyphs
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True if the table has no glyphs
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Iterate over glyphs in codepoint order
    pub fn iter(&self) -> impl Iterator<Item = &GlyphInfo> {
        self.glyphs.iter()
    }

    /// Height of the tallest sprite
    pub fn max_height(&self) -> u32 {
        self.glyphs.iter().map(|g| g.rect.h).max().unwrap_or(0)
    }
}

/// Raster `chars` and pack the results into an atlas
///
/// Input `chars` must be sorted and free of duplicates. Chars which the
/// rasterizer cannot produce are excluded silently.
pub(crate) fn pack(
    config: &Config,
    rasterizer: &dyn Rasterizer,
    chars: &[char],
    px_height: f32,
    color: Color,
) -> (AtlasPixels, GlyphTable) {
    let mut sprites = Vec::with_capacity(chars.len());
    for &c in chars {
        let Some(sprite) = rasterizer.rasterize(c, px_height) else {
            log::trace!("pack: no glyph for {c:?}");
            continue;
        };
        if sprite.data.len() != to_usize(sprite.size.0) * to_usize(sprite.size.1) {
            log::warn!(
                "pack: sprite for {c:?} has {} bytes, expected {}×{}",
                sprite.data.len(),
                sprite.size.0,
                sprite.size.1
            );
            continue;
        }
        sprites.push((c, sprite));
    }

    let pad = config.padding;
    let (width, rects, height) = place(sprites.iter().map(|(_, s)| s.size), pad);
    let (width, height) = if config.power_of_two {
        (width.next_power_of_two(), height.next_power_of_two())
    } else {
        (width, height)
    };

    let mut pixels = AtlasPixels::new(width, height);
    let mut glyphs = Vec::with_capacity(sprites.len());
    for ((codepoint, sprite), rect) in sprites.iter().zip(rects) {
        if !rect.is_empty() {
            pixels.blit(rect, sprite, color);
        }
        glyphs.push(GlyphInfo {
            codepoint: *codepoint,
            rect,
            advance: sprite.advance,
            bearing: sprite.bearing,
        });
    }

    log::debug!(
        "pack: {} glyphs of {} requested in {width}×{height} atlas",
        glyphs.len(),
        chars.len()
    );
    (pixels, GlyphTable { glyphs })
}

/// Assign a rectangle to each size
///
/// Returns `(width, rects, height)` where `rects` is in input order.
/// Zero-area sizes get an empty rectangle at the origin.
fn place(sizes: impl Iterator<Item = (u32, u32)>, pad: u32) -> (u32, Vec<AtlasRect>, u32) {
    let sizes: Vec<(u32, u32)> = sizes.collect();
    let is_empty = |(w, h): (u32, u32)| w == 0 || h == 0;

    let mut area = 0u64;
    let mut widest = 0;
    for &(w, h) in sizes.iter().filter(|s| !is_empty(**s)) {
        area += u64::from(w + pad) * u64::from(h + pad);
        widest = widest.max(w + pad);
    }
    let width = u32::conv_ceil(f64::conv(area).sqrt()).max(widest).max(1);

    // Tallest first; the sort is stable so equal heights keep input order.
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|a, b| sizes[*b].1.cmp(&sizes[*a].1));

    let mut rects = vec![AtlasRect::default(); sizes.len()];
    let (mut x, mut y, mut shelf) = (0, 0, 0);
    for i in order {
        let (w, h) = sizes[i];
        if is_empty((w, h)) {
            continue;
        }
        if x > 0 && x + w > width {
            y += shelf;
            x = 0;
            shelf = 0;
        }
        rects[i] = AtlasRect { x, y, w, h };
        x += w + pad;
        shelf = shelf.max(h + pad);
    }

    (width, rects, (y + shelf).max(1))
}
