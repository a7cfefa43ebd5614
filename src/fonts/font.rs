// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font: configuration and cooking

use super::{CodepointRange, InvalidRange, Ranges};
use crate::atlas::{self, AtlasPixels, GlyphInfo, GlyphTable};
use crate::conv::{u32_to_px, DPP};
use crate::raster::{self, ParseError, Rasterizer};
use crate::{Color, Error};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error returned on operations if not ready
///
/// This error is returned if [`Font::cook`] must be called.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, thiserror::Error)]
#[error("not ready: font is not cooked")]
pub struct NotReady;

/// Font height
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Height {
    /// Height in pixels
    Pixels(f32),
    /// Height in points, at the standard DPI (see [`DPP`])
    Points(f32),
}

impl Height {
    /// Get the height in pixels
    #[inline]
    pub fn px(self) -> f32 {
        match self {
            Height::Pixels(px) => px,
            Height::Points(pt) => pt * DPP,
        }
    }
}

impl Default for Height {
    fn default() -> Self {
        Height::Pixels(16.0)
    }
}

impl From<f32> for Height {
    fn from(px: f32) -> Self {
        Height::Pixels(px)
    }
}

/// Default layout metrics of a font
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpaceMetrics {
    /// Distance between consecutive baselines
    pub line_height: f32,
    /// Advance of the space glyph
    pub space_width: f32,
}

#[derive(Debug)]
struct Cooked {
    pixels: AtlasPixels,
    glyphs: GlyphTable,
    ascent: f32,
}

#[derive(Debug)]
enum State {
    Configuring,
    Cooked(Cooked),
}

/// A font at a fixed size, cooked into a glyph atlas
///
/// ### Lifecycle
///
/// A new `Font` is *configuring*: add codepoint ranges with
/// [`Font::add_range`], then call [`Font::cook`] to raster and pack all
/// requested glyphs. Once *cooked*, the atlas ([`Font::pixels`]) and glyph
/// metrics ([`Font::glyphs`]) are available and the font may be used to
/// [render](crate::RenderResult::render) text.
///
/// Ranges may still be added to a cooked font, but have no effect until
/// [`Font::cook`] is called again. Re-cooking replaces the atlas entirely.
///
/// A cooked `Font` is immutable through `&Font` and may be shared between
/// threads.
#[derive(Debug)]
pub struct Font {
    rasterizer: Box<dyn Rasterizer>,
    height: Height,
    color: Color,
    config: atlas::Config,
    ranges: Ranges,
    state: State,
}

impl Font {
    /// Parse font `data` with the default rastering backend
    #[cfg(any(feature = "ab_glyph", feature = "fontdue"))]
    pub fn new(data: Vec<u8>, height: Height, color: Color) -> Result<Self, ParseError> {
        Self::with_config(&raster::Config::default(), data, height, color)
    }

    /// Parse font `data` with the backend selected by `config`
    pub fn with_config(
        config: &raster::Config,
        data: Vec<u8>,
        height: Height,
        color: Color,
    ) -> Result<Self, ParseError> {
        let rasterizer = raster::load(config, data)?;
        Ok(Self::with_rasterizer(rasterizer, height, color))
    }

    /// Construct over a custom rastering backend
    pub fn with_rasterizer(rasterizer: Box<dyn Rasterizer>, height: Height, color: Color) -> Self {
        Font {
            rasterizer,
            height,
            color,
            config: Default::default(),
            ranges: Default::default(),
            state: State::Configuring,
        }
    }

    /// Start building a font over a custom rastering backend
    ///
    /// ```
    /// # use atlas_text::fonts::{CodepointRange, Font, Height};
    /// # fn build(rasterizer: Box<dyn atlas_text::raster::Rasterizer>) -> Result<(), atlas_text::Error> {
    /// let font = Font::builder(rasterizer)
    ///     .height(Height::Pixels(18.0))
    ///     .block(CodepointRange::ASCII)
    ///     .range(0x2010, 0x2027)?
    ///     .cook()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(rasterizer: Box<dyn Rasterizer>) -> FontBuilder {
        FontBuilder {
            font: Font::with_rasterizer(rasterizer, Height::default(), Color::default()),
        }
    }

    /// Get the configured height
    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    /// Get the fill colour
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Get the atlas packing configuration
    #[inline]
    pub fn atlas_config(&self) -> &atlas::Config {
        &self.config
    }

    /// Set the atlas packing configuration
    ///
    /// Takes effect on the next [`Font::cook`].
    #[inline]
    pub fn set_atlas_config(&mut self, config: atlas::Config) {
        self.config = config;
    }

    /// Access requested ranges
    #[inline]
    pub fn ranges(&self) -> &Ranges {
        &self.ranges
    }

    /// Request glyphs for codepoints `first..=last`
    ///
    /// Overlapping and duplicate ranges are allowed.
    pub fn add_range(&mut self, first: u32, last: u32) -> Result<&mut Self, InvalidRange> {
        self.ranges.add(first, last)?;
        Ok(self)
    }

    /// Request glyphs for a [`CodepointRange`]
    pub fn add_block(&mut self, range: CodepointRange) -> &mut Self {
        self.ranges.push(range);
        self
    }

    /// True once [`Font::cook`] has succeeded
    #[inline]
    pub fn is_cooked(&self) -> bool {
        matches!(self.state, State::Cooked(_))
    }

    /// Raster and pack all requested glyphs
    ///
    /// Replaces any previously cooked atlas. Fails with [`Error::NoRanges`]
    /// (leaving the font unchanged) if the requested ranges contain no valid
    /// codepoint. Codepoints without a glyph in the font are skipped.
    pub fn cook(&mut self) -> Result<&mut Self, Error> {
        let chars = self.ranges.resolve();
        if chars.is_empty() {
            return Err(Error::NoRanges);
        }

        let px_height = self.height.px();
        let (pixels, glyphs) = atlas::pack(
            &self.config,
            &*self.rasterizer,
            &chars,
            px_height,
            self.color,
        );
        let ascent = self.rasterizer.ascent(px_height);
        self.state = State::Cooked(Cooked {
            pixels,
            glyphs,
            ascent,
        });
        Ok(self)
    }

    fn cooked(&self) -> Result<&Cooked, NotReady> {
        match &self.state {
            State::Cooked(cooked) => Ok(cooked),
            State::Configuring => Err(NotReady),
        }
    }

    /// Access the atlas bitmap
    pub fn pixels(&self) -> Result<&AtlasPixels, NotReady> {
        self.cooked().map(|c| &c.pixels)
    }

    /// Access glyph metrics
    pub fn glyphs(&self) -> Result<&GlyphTable, NotReady> {
        self.cooked().map(|c| &c.glyphs)
    }

    /// Look up a single glyph
    ///
    /// Returns `None` if not cooked or if `c` has no glyph.
    pub fn glyph(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs().ok()?.get(c)
    }

    /// Distance from the top of a line to the baseline
    ///
    /// Text is laid out with the first baseline at `y = 0`; translate by
    /// this value to place the top of the first line at `y = 0`.
    pub fn ascent(&self) -> Result<f32, NotReady> {
        self.cooked().map(|c| c.ascent)
    }

    /// Get default layout metrics
    ///
    /// If the space glyph was cooked, the line height is the rastering height
    /// and the space width is the advance of the space glyph. Otherwise the
    /// line height is the height of the tallest glyph and the space width is
    /// zero.
    pub fn space_metrics(&self) -> Result<SpaceMetrics, NotReady> {
        let glyphs = &self.cooked()?.glyphs;
        Ok(match glyphs.get(' ') {
            Some(space) => SpaceMetrics {
                line_height: self.height.px(),
                space_width: space.advance,
            },
            None => SpaceMetrics {
                line_height: u32_to_px(glyphs.max_height()),
                space_width: 0.0,
            },
        })
    }

    /// Kerning between two glyphs
    #[inline]
    pub(crate) fn kern(&self, left: char, right: char) -> f32 {
        self.rasterizer.kern(left, right, self.height.px())
    }
}

/// Builder for a cooked [`Font`]
///
/// Construct with [`Font::builder`]; finish with [`FontBuilder::cook`].
#[derive(Debug)]
pub struct FontBuilder {
    font: Font,
}

impl FontBuilder {
    /// Set the height
    pub fn height(mut self, height: Height) -> Self {
        self.font.height = height;
        self
    }

    /// Set the fill colour
    pub fn color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Set the atlas packing configuration
    pub fn atlas_config(mut self, config: atlas::Config) -> Self {
        self.font.config = config;
        self
    }

    /// Request codepoints `first..=last`
    pub fn range(mut self, first: u32, last: u32) -> Result<Self, InvalidRange> {
        self.font.add_range(first, last)?;
        Ok(self)
    }

    /// Request a [`CodepointRange`]
    pub fn block(mut self, range: CodepointRange) -> Self {
        self.font.add_block(range);
        self
    }

    /// Cook and return the font
    pub fn cook(mut self) -> Result<Font, Error> {
        self.font.cook()?;
        Ok(self.font)
    }
}
