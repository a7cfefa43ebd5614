// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Fonts and glyph atlases
//!
//! A [`Font`] is a font face at one fixed size together with a set of
//! requested codepoint [`Ranges`]. *Cooking* the font rasters each requested
//! glyph and packs the results into a single RGBA atlas (see
//! [`crate::atlas`]).
//!
//! ### Font sizes
//!
//! Font sizes may be given in pixels or in *points*: 1 pt = 1/72 inch. At
//! the standard 96 DPI, one point is [`crate::conv::DPP`] pixels. The pixel
//! height is passed directly to the rastering backend; for most backends this
//! is the distance from descender to ascender.

mod font;
mod ranges;

pub use font::{Font, FontBuilder, Height, NotReady, SpaceMetrics};
pub use ranges::{CodepointRange, InvalidRange, Ranges};
