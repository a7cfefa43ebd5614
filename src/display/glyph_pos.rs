// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph positioning: mapping text to atlas and target rectangles

use super::{CapacityError, CharacterMapping, RenderResult};
use crate::fonts::{Font, NotReady};
use crate::{Error, Rect, Vec2};

/// Position glyphs for `text` along a single line
///
/// The pen starts at the origin, on the baseline. Chars without a glyph are
/// skipped and do not advance the pen. Kerning applies between consecutive
/// positioned glyphs.
fn position_glyphs<F: FnMut(CharacterMapping)>(
    font: &Font,
    text: &str,
    mut f: F,
) -> Result<(), NotReady> {
    let glyphs = font.glyphs()?;
    let mut caret = Vec2::ZERO;
    let mut prev = None;

    for c in text.chars() {
        let Some(glyph) = glyphs.get(c) else {
            continue;
        };

        if let Some(prev) = prev {
            caret.0 += font.kern(prev, c);
        }
        prev = Some(c);

        let offset = glyph.offset();
        f(CharacterMapping {
            src: glyph.rect,
            dst: Rect::with_size_of(caret + offset, glyph.rect),
            codepoint: c,
            advance: glyph.advance,
            offset,
        });
        caret.0 += glyph.advance;
    }

    Ok(())
}

impl RenderResult {
    /// Map `text` to glyphs
    ///
    /// Existing contents are replaced (storage is reused). Glyphs are placed
    /// along a single line with the baseline at `y = 0`, starting from
    /// `x = 0`. Chars without a glyph in the font are skipped.
    ///
    /// On error, existing contents are left unchanged.
    pub fn render(&mut self, font: &Font, text: &str) -> Result<&mut Self, NotReady> {
        font.glyphs()?;
        self.mappings.clear();
        let mappings = &mut self.mappings;
        position_glyphs(font, text, |m| mappings.push(m))?;
        Ok(self)
    }
}

impl Font {
    /// Map `text` to glyphs in fixed-size storage
    ///
    /// This is equivalent to [`RenderResult::render`] but writes to `out`,
    /// returning the number of mappings written. If `out` is too small,
    /// nothing is written and a [`CapacityError`] is returned.
    pub fn map_into(&self, text: &str, out: &mut [CharacterMapping]) -> Result<usize, Error> {
        let glyphs = self.glyphs()?;
        let required = text.chars().filter(|c| glyphs.get(*c).is_some()).count();
        if required > out.len() {
            return Err(CapacityError {
                required,
                capacity: out.len(),
            }
            .into());
        }

        let mut len = 0;
        position_glyphs(self, text, |m| {
            out[len] = m;
            len += 1;
        })?;
        debug_assert_eq!(len, required);
        Ok(len)
    }
}
