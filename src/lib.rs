// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph-atlas text library
//!
//! This crate *cooks* a font at a fixed size into a single RGBA glyph atlas,
//! then maps strings to pairs of atlas and target rectangles ready for
//! drawing as textured quads.
//!
//! 1.  Construct a [`fonts::Font`] from font data (or a custom
//!     [`raster::Rasterizer`]), request codepoint ranges and call
//!     [`fonts::Font::cook`].
//! 2.  Upload [`fonts::Font::pixels`] to the GPU (or use it directly).
//! 3.  Prepare a [`RenderResult`] from text, optionally [wrap](RenderResult::wrap)
//!     and [translate](RenderResult::translate) it, then
//!     [draw](RenderResult::draw) each glyph.

pub mod atlas;
pub mod conv;
pub mod fonts;
pub mod raster;

mod data;
pub use data::*;

mod display;
pub use display::*;

#[cfg(test)]
mod testing;

/// Text library error
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A codepoint range was rejected
    #[error(transparent)]
    InvalidRange(#[from] fonts::InvalidRange),
    /// [`fonts::Font::cook`] was called without any valid codepoint
    #[error("no codepoint ranges requested")]
    NoRanges,
    /// Font data could not be parsed
    #[error(transparent)]
    Parse(#[from] raster::ParseError),
    /// Output storage too small
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    /// Font not cooked
    #[error(transparent)]
    NotReady(#[from] fonts::NotReady),
}
