// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Codepoint ranges

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Range with `first > last`
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("invalid codepoint range: {first:#x} > {last:#x}")]
pub struct InvalidRange {
    pub first: u32,
    pub last: u32,
}

/// An inclusive range of codepoints (a "unicode block")
///
/// Values which are not Unicode scalar values (surrogates and values above
/// `0x10FFFF`) may be included in the range but never resolve to a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRange"))]
pub struct CodepointRange {
    first: u32,
    last: u32,
}

impl CodepointRange {
    /// Printable ASCII: `' '` to `'~'`
    pub const ASCII: CodepointRange = CodepointRange {
        first: 0x20,
        last: 0x7E,
    };
    /// The printable Latin-1 supplement
    pub const LATIN_1: CodepointRange = CodepointRange {
        first: 0xA0,
        last: 0xFF,
    };

    /// Construct, failing if `first > last`
    pub fn new(first: u32, last: u32) -> Result<Self, InvalidRange> {
        if first > last {
            return Err(InvalidRange { first, last });
        }
        Ok(CodepointRange { first, last })
    }

    /// First codepoint
    #[inline]
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Last codepoint (inclusive)
    #[inline]
    pub fn last(&self) -> u32 {
        self.last
    }

    /// True if `c` lies within the range
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        (self.first..=self.last).contains(&u32::from(c))
    }

    /// Iterate over all valid `char` values in the range
    pub fn chars(&self) -> impl Iterator<Item = char> {
        (self.first..=self.last).filter_map(char::from_u32)
    }
}

impl TryFrom<RangeInclusive<char>> for CodepointRange {
    type Error = InvalidRange;

    /// Convert, failing on an empty range (`start > end`)
    fn try_from(range: RangeInclusive<char>) -> Result<Self, InvalidRange> {
        CodepointRange::new(u32::from(*range.start()), u32::from(*range.end()))
    }
}

/// Unvalidated form used for deserialization
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRange {
    first: u32,
    last: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRange> for CodepointRange {
    type Error = InvalidRange;

    fn try_from(raw: RawRange) -> Result<Self, InvalidRange> {
        CodepointRange::new(raw.first, raw.last)
    }
}

/// The set of ranges requested for a font
///
/// Ranges may duplicate or overlap; redundancy is resolved by
/// [`Ranges::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ranges {
    ranges: Vec<CodepointRange>,
}

impl Ranges {
    /// Append the range `first..=last`
    pub fn add(&mut self, first: u32, last: u32) -> Result<(), InvalidRange> {
        self.push(CodepointRange::new(first, last)?);
        Ok(())
    }

    /// Append a range
    #[inline]
    pub fn push(&mut self, range: CodepointRange) {
        self.ranges.push(range);
    }

    /// Number of ranges added
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if no ranges have been added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate over ranges in the order added
    pub fn iter(&self) -> impl Iterator<Item = &CodepointRange> {
        self.ranges.iter()
    }

    /// True if any range contains `c`
    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|r| r.contains(c))
    }

    /// Expand to the sorted, de-duplicated set of `char` values
    pub fn resolve(&self) -> Vec<char> {
        let set: BTreeSet<char> = self.ranges.iter().flat_map(|r| r.chars()).collect();
        set.into_iter().collect()
    }
}
