// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Atlas coordinates are represented as `u32` while layout happens in `f32`
//! pixel space. Glyph bitmaps are never expected to approach `u32::MAX`
//! pixels in either dimension, so `u32` is always an appropriate type.

use easy_cast::{Cast, Conv};

/// Pixels per point at the standard DPI
///
/// ```none
/// dpp = dpi / 72 = 96 / 72
/// ```
pub const DPP: f32 = 96.0 / 72.0;

/// Convert `u32` → `usize`
///
/// This is a "safer" wrapper around `as` ensuring that the operation is
/// zero-extension.
#[inline]
pub fn to_usize(x: u32) -> usize {
    x.cast()
}

/// Convert `u32` → `f32`
#[inline]
pub(crate) fn u32_to_px(x: u32) -> f32 {
    f32::conv(x)
}

/// Convert `i32` → `f32`
#[inline]
pub(crate) fn i32_to_px(x: i32) -> f32 {
    f32::conv(x)
}
