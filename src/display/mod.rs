// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text prepared for display

use crate::fonts::{Font, NotReady};
use crate::{Align, AtlasRect, Rect, Vec2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod glyph_pos;
mod wrap_lines;
pub use wrap_lines::{wrap, WrapSummary};

/// Error returned when fixed-size output storage is too small
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("capacity {capacity} is too small for {required} glyphs")]
pub struct CapacityError {
    /// Number of glyphs to store
    pub required: usize,
    /// Size of the output storage
    pub capacity: usize,
}

/// Source and target rectangles for one glyph
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CharacterMapping {
    /// Rectangle within the atlas
    pub src: AtlasRect,
    /// Rectangle in render-target space
    pub dst: Rect,
    /// Source codepoint
    pub codepoint: char,
    /// Horizontal advance of the glyph
    pub advance: f32,
    /// Offset from the pen position to `dst`'s origin
    pub offset: Vec2,
}

impl Default for CharacterMapping {
    fn default() -> Self {
        CharacterMapping {
            src: AtlasRect::default(),
            dst: Rect::default(),
            codepoint: '\0',
            advance: 0.0,
            offset: Vec2::ZERO,
        }
    }
}

impl CharacterMapping {
    /// Pen position (on the baseline) at which the glyph was placed
    #[inline]
    pub fn pen(&self) -> Vec2 {
        self.dst.origin() - self.offset
    }

    /// True if this glyph is a word separator
    #[inline]
    pub fn is_space(&self) -> bool {
        self.codepoint == ' '
    }
}

/// Line height for wrapping
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineHeight {
    /// Line height in pixels
    Pixels(f32),
    /// Multiple of the font's natural line height
    /// ([`SpaceMetrics::line_height`](crate::fonts::SpaceMetrics::line_height))
    Multiplier(f32),
}

impl Default for LineHeight {
    fn default() -> Self {
        LineHeight::Multiplier(1.0)
    }
}

impl LineHeight {
    /// Resolve to pixels
    pub fn px(self, font: &Font) -> Result<f32, NotReady> {
        Ok(match self {
            LineHeight::Pixels(px) => px,
            LineHeight::Multiplier(m) => m * font.space_metrics()?.line_height,
        })
    }
}

/// Translate all target rectangles by `(dx, dy)`
///
/// Source rectangles are not affected. Repeated calls accumulate.
pub fn translate(mappings: &mut [CharacterMapping], dx: f32, dy: f32) {
    let d = Vec2(dx, dy);
    for m in mappings {
        let origin = m.dst.origin() + d;
        m.dst.x = origin.0;
        m.dst.y = origin.1;
    }
}

/// A sequence of [`CharacterMapping`]s, in reading order
///
/// ### Preparation
///
/// 1.  Call [`Self::render`] to map text to glyphs, positioned along a single
///     line with the baseline at `y = 0`.
/// 2.  Optionally, call [`Self::wrap`] to break the line and align the
///     resulting lines. This is *not* idempotent: wrapping reads the current
///     target positions, so calling it again double-applies line offsets. To
///     wrap differently, render again or use [`Self::render_wrapped`].
/// 3.  Optionally, call [`Self::translate`] to move the result.
///
/// Finally, draw each glyph with [`Self::draw`] or by iterating
/// [`Self::mappings`].
///
/// The result does not reference the [`Font`] it was rendered with; any
/// method requiring font metrics takes the font as a parameter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderResult {
    mappings: Vec<CharacterMapping>,
}

impl RenderResult {
    /// Construct an empty result
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct by rendering `text`
    pub fn from_text(font: &Font, text: &str) -> Result<Self, NotReady> {
        let mut result = RenderResult::new();
        result.render(font, text)?;
        Ok(result)
    }

    /// Access mappings
    #[inline]
    pub fn mappings(&self) -> &[CharacterMapping] {
        &self.mappings
    }

    /// Number of mappings
    #[inline]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// True if there are no mappings
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Iterate over mappings
    pub fn iter(&self) -> std::slice::Iter<'_, CharacterMapping> {
        self.mappings.iter()
    }

    /// Wrap and align lines
    ///
    /// The space width is taken from [`Font::space_metrics`].
    /// See [`wrap`] for details.
    pub fn wrap(
        &mut self,
        font: &Font,
        max_width: f32,
        line_height: LineHeight,
        align: Align,
    ) -> Result<WrapSummary, NotReady> {
        let space_width = font.space_metrics()?.space_width;
        let line_height = line_height.px(font)?;
        Ok(wrap(
            &mut self.mappings,
            max_width,
            line_height,
            space_width,
            align,
        ))
    }

    /// Render `text`, then wrap and align lines
    ///
    /// This is equivalent to [`Self::render`] followed by [`Self::wrap`].
    pub fn render_wrapped(
        &mut self,
        font: &Font,
        text: &str,
        max_width: f32,
        line_height: LineHeight,
        align: Align,
    ) -> Result<WrapSummary, NotReady> {
        self.render(font, text)?;
        self.wrap(font, max_width, line_height, align)
    }

    /// Translate all target rectangles by `(dx, dy)`
    pub fn translate(&mut self, dx: f32, dy: f32) -> &mut Self {
        translate(&mut self.mappings, dx, dy);
        self
    }

    /// Get the bounding box of all drawn glyphs
    ///
    /// Returns the top-left and bottom-right corners, or `None` if there is
    /// nothing to draw.
    pub fn bounding_box(&self) -> Option<(Vec2, Vec2)> {
        let mut iter = self.drawn();
        let first = iter.next()?;
        let init = (first.dst.origin(), Vec2(first.dst.right(), first.dst.bottom()));
        Some(iter.fold(init, |(tl, br), m| {
            (
                Vec2(tl.0.min(m.dst.x), tl.1.min(m.dst.y)),
                Vec2(br.0.max(m.dst.right()), br.1.max(m.dst.bottom())),
            )
        }))
    }

    /// Draw glyphs
    ///
    /// Calls `f(src, dst)` for each glyph with a non-empty sprite, in order.
    pub fn draw<F: FnMut(AtlasRect, Rect)>(&self, mut f: F) {
        for m in self.drawn() {
            f(m.src, m.dst);
        }
    }

    fn drawn(&self) -> impl Iterator<Item = &CharacterMapping> {
        self.mappings.iter().filter(|m| !m.src.is_empty())
    }
}

impl<'a> IntoIterator for &'a RenderResult {
    type Item = &'a CharacterMapping;
    type IntoIter = std::slice::Iter<'a, CharacterMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
