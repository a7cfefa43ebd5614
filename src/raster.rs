// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Support for rastering glyphs
//!
//! Rastering is abstracted by the [`Rasterizer`] trait: given a `char` and a
//! pixel height, produce a coverage [`Sprite`] with metrics (or nothing).
//! Backends are available for `ab_glyph` and `fontdue` (see crate features);
//! [`load`] parses font data with the backend selected by [`Config`].
//!
//! Custom backends (e.g. a pre-rendered bitmap font) may implement
//! [`Rasterizer`] directly and be passed to
//! [`Font::with_rasterizer`](crate::fonts::Font::with_rasterizer).

#[allow(unused)]
use easy_cast::{CastFloat, Conv, ConvFloat};
use thiserror::Error;

/// Font parsing error
///
/// Returned when the rastering backend cannot interpret the font data.
#[derive(Error, Debug)]
pub enum ParseError {
    #[cfg(feature = "ab_glyph")]
    #[error("font parse error")]
    AbGlyph(#[from] ab_glyph::InvalidFont),
    #[cfg(feature = "fontdue")]
    #[error("font parse error: {0}")]
    Fontdue(&'static str),
    #[error("no rastering backend enabled")]
    NoBackend,
}

/// Raster configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    #[allow(unused)]
    fontdue: bool,
}

impl Config {
    /// Construct configuration
    ///
    /// The `mode` parameter selects the backend (though depending on crate
    /// features, not all options will be available):
    ///
    /// -   `mode == 0` (default): use `ab_glyph` for rastering
    /// -   `mode == 2`: use `fontdue` for rastering
    ///
    /// When only one backend is enabled it is used regardless of `mode`.
    pub fn new(mode: u8) -> Self {
        Config { fontdue: mode == 2 }
    }
}

/// A rastered sprite
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    /// Bearing: offset from the pen position to the top-left corner
    ///
    /// Unlike screen coordinates the `y` component is measured *upwards*
    /// from the baseline to the top edge of the sprite.
    pub bearing: (i32, i32),
    /// Size of the sprite in pixels
    ///
    /// This may be `(0, 0)` for glyphs with nothing to draw (e.g. space).
    pub size: (u32, u32),
    /// Horizontal advance after this glyph
    pub advance: f32,
    /// Coverage (alpha) image, row major order, length `size.0 * size.1`
    pub data: Vec<u8>,
}

/// A glyph rastering backend
///
/// Implementations must be deterministic: the same input always produces the
/// same sprite.
pub trait Rasterizer: Send + Sync {
    /// Raster `c` at `px_height` pixels
    ///
    /// Returns `None` where the font has no glyph for `c`.
    fn rasterize(&self, c: char, px_height: f32) -> Option<Sprite>;

    /// Kerning adjustment between `left` and `right`
    ///
    /// The default implementation returns zero.
    fn kern(&self, left: char, right: char, px_height: f32) -> f32 {
        let _ = (left, right, px_height);
        0.0
    }

    /// Distance from the top of a line to the baseline
    ///
    /// The default implementation returns `px_height`.
    fn ascent(&self, px_height: f32) -> f32 {
        px_height
    }
}

impl std::fmt::Debug for dyn Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Rasterizer")
    }
}

/// The `ab_glyph` rastering backend
#[cfg(feature = "ab_glyph")]
pub struct AbGlyph {
    font: ab_glyph::FontVec,
}

#[cfg(feature = "ab_glyph")]
impl AbGlyph {
    /// Parse font `data` (face index 0)
    pub fn new(data: Vec<u8>) -> Result<Self, ParseError> {
        let font = ab_glyph::FontVec::try_from_vec(data)?;
        Ok(AbGlyph { font })
    }
}

#[cfg(feature = "ab_glyph")]
impl Rasterizer for AbGlyph {
    fn rasterize(&self, c: char, px_height: f32) -> Option<Sprite> {
        use ab_glyph::{point, Font, ScaleFont};

        let id = self.font.glyph_id(c);
        // GlyphId 0 is the 'missing glyph' representation
        if id.0 == 0 {
            return None;
        }

        let scaled = self.font.as_scaled(px_height);
        let advance = scaled.h_advance(id);
        let glyph = id.with_scale_and_position(px_height, point(0.0, 0.0));
        let Some(outline) = self.font.outline_glyph(glyph) else {
            // e.g. whitespace: nothing to draw, but still has metrics
            return Some(Sprite {
                advance,
                ..Default::default()
            });
        };

        let bounds = outline.px_bounds();
        let bearing = (bounds.min.x.cast_trunc(), -i32::conv_trunc(bounds.min.y));
        let size = bounds.max - bounds.min;
        let size = (u32::conv_trunc(size.x), u32::conv_trunc(size.y));
        if size.0 == 0 || size.1 == 0 {
            return Some(Sprite {
                advance,
                ..Default::default()
            });
        }

        let mut data = vec![0; usize::conv(size.0 * size.1)];
        outline.draw(|x, y, c| {
            if x < size.0 && y < size.1 {
                // Convert to u8 with saturating conversion, rounding down:
                data[usize::conv((y * size.0) + x)] = (c * 256.0) as u8;
            }
        });

        Some(Sprite {
            bearing,
            size,
            advance,
            data,
        })
    }

    fn kern(&self, left: char, right: char, px_height: f32) -> f32 {
        use ab_glyph::{Font, ScaleFont};
        let scaled = self.font.as_scaled(px_height);
        scaled.kern(self.font.glyph_id(left), self.font.glyph_id(right))
    }

    fn ascent(&self, px_height: f32) -> f32 {
        use ab_glyph::{Font, ScaleFont};
        self.font.as_scaled(px_height).ascent()
    }
}

/// The `fontdue` rastering backend
#[cfg(feature = "fontdue")]
pub struct Fontdue {
    font: fontdue::Font,
}

#[cfg(feature = "fontdue")]
impl Fontdue {
    /// Parse font `data` (face index 0)
    pub fn new(data: Vec<u8>) -> Result<Self, ParseError> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(ParseError::Fontdue)?;
        Ok(Fontdue { font })
    }
}

#[cfg(feature = "fontdue")]
impl Rasterizer for Fontdue {
    fn rasterize(&self, c: char, px_height: f32) -> Option<Sprite> {
        if self.font.lookup_glyph_index(c) == 0 {
            return None;
        }

        let (metrics, data) = self.font.rasterize(c, px_height);
        let advance = metrics.advance_width;
        let size = (u32::conv(metrics.width), u32::conv(metrics.height));
        if size.0 == 0 || size.1 == 0 {
            return Some(Sprite {
                advance,
                ..Default::default()
            });
        }

        // fontdue's ymin is the offset of the bottom edge above the baseline
        let bearing = (metrics.xmin, metrics.ymin + i32::conv(metrics.height));
        Some(Sprite {
            bearing,
            size,
            advance,
            data,
        })
    }

    fn kern(&self, left: char, right: char, px_height: f32) -> f32 {
        self.font
            .horizontal_kern(left, right, px_height)
            .unwrap_or(0.0)
    }

    fn ascent(&self, px_height: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px_height)
            .map(|m| m.ascent)
            .unwrap_or(px_height)
    }
}

/// Parse font `data` with the backend selected by `config`
#[allow(unused)]
pub fn load(config: &Config, data: Vec<u8>) -> Result<Box<dyn Rasterizer>, ParseError> {
    cfg_if::cfg_if! {
        if #[cfg(all(feature = "fontdue", feature = "ab_glyph"))] {
            if config.fontdue {
                Ok(Box::new(Fontdue::new(data)?))
            } else {
                Ok(Box::new(AbGlyph::new(data)?))
            }
        } else if #[cfg(feature = "ab_glyph")] {
            Ok(Box::new(AbGlyph::new(data)?))
        } else if #[cfg(feature = "fontdue")] {
            Ok(Box::new(Fontdue::new(data)?))
        } else {
            Err(ParseError::NoBackend)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn garbage_is_parse_error() {
        let result = load(&Config::default(), vec![0, 1, 2, 3]);
        assert!(result.is_err());
    }

    #[cfg(feature = "ab_glyph")]
    #[test]
    fn ab_glyph_garbage() {
        let result = AbGlyph::new(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(ParseError::AbGlyph(_))));

        let config = Config::new(0);
        let result = crate::fonts::Font::with_config(
            &config,
            vec![0; 16],
            Default::default(),
            Default::default(),
        );
        assert!(result.is_err());
    }

    #[cfg(feature = "fontdue")]
    #[test]
    fn fontdue_garbage() {
        let result = Fontdue::new(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(ParseError::Fontdue(_))));
    }

    #[test]
    fn default_metrics() {
        struct Blank;
        impl Rasterizer for Blank {
            fn rasterize(&self, _: char, _: f32) -> Option<Sprite> {
                None
            }
        }
        assert_eq!(Blank.kern('A', 'V', 12.0), 0.0);
        assert_eq!(Blank.ascent(12.0), 12.0);
    }
}
