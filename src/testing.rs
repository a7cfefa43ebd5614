// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! A deterministic rasterizer for unit tests

use crate::raster::{Rasterizer, Sprite};

/// Rasters every glyph as a solid box
///
/// -   `' '`: no bitmap, advance 4
/// -   `'A'..='Z'`: 8×10, advance 9
/// -   `'a'..='z'`: 6×7, advance 7 (`'g'` descends 3px below the baseline)
/// -   `'0'..='9'`: 5×10, advance 6, bearing x 1
/// -   other printable ASCII except `'~'`: 4×4, advance 5
/// -   anything else: unavailable
///
/// The pair `('A', 'V')` kerns by `-1`.
pub(crate) struct Boxes;

impl Rasterizer for Boxes {
    fn rasterize(&self, c: char, _: f32) -> Option<Sprite> {
        let (bearing, size, advance) = match c {
            ' ' => {
                return Some(Sprite {
                    advance: 4.0,
                    ..Default::default()
                })
            }
            'A'..='Z' => ((0, 10), (8, 10), 9.0),
            'g' => ((0, 5), (6, 8), 7.0),
            'a'..='z' => ((0, 7), (6, 7), 7.0),
            '0'..='9' => ((1, 10), (5, 10), 6.0),
            '~' => return None,
            '!'..='}' => ((0, 6), (4, 4), 5.0),
            _ => return None,
        };
        let data = vec![0xFF; (size.0 * size.1) as usize];
        Some(Sprite {
            bearing,
            size,
            advance,
            data,
        })
    }

    fn kern(&self, left: char, right: char, _: f32) -> f32 {
        match (left, right) {
            ('A', 'V') => -1.0,
            _ => 0.0,
        }
    }

    fn ascent(&self, _: f32) -> f32 {
        10.0
    }
}
