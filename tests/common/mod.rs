// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

use atlas_text::fonts::{Font, Height};
use atlas_text::raster::{Rasterizer, Sprite};
use atlas_text::Color;

/// A monospace box font
///
/// Graphic ASCII chars are 5×8 boxes sitting on the baseline with advance 6.
/// Space has advance 6 and no bitmap. Lowercase letters are 2px shorter so
/// that sprites have varied heights.
pub struct Mono;

impl Rasterizer for Mono {
    fn rasterize(&self, c: char, _: f32) -> Option<Sprite> {
        let h = match c {
            ' ' => {
                return Some(Sprite {
                    advance: 6.0,
                    ..Default::default()
                })
            }
            'a'..='z' => 6,
            '!'..='~' => 8,
            _ => return None,
        };
        Some(Sprite {
            bearing: (0, h),
            size: (5, h as u32),
            advance: 6.0,
            data: vec![0x80; 5 * h as usize],
        })
    }
}

pub fn cooked_ascii() -> Font {
    Font::builder(Box::new(Mono))
        .height(Height::Pixels(10.0))
        .color(Color::WHITE)
        .range(0x20, 0x7E)
        .unwrap()
        .cook()
        .unwrap()
}
