// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text preparation: wrapping

use super::CharacterMapping;
use crate::Align;
use smallvec::SmallVec;
use std::ops::Range;

/// Size of a wrapped block of text
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WrapSummary {
    /// Number of lines
    pub lines: usize,
    /// Right edge of the widest line, after alignment
    pub width: f32,
    /// Number of lines multiplied by the line height
    pub height: f32,
}

/// A run of non-space glyphs
#[derive(Clone, Debug)]
struct Word {
    range: Range<usize>,
    /// Pen position before the first glyph
    start: f32,
    len: f32,
}

impl Word {
    fn new(mappings: &[CharacterMapping], range: Range<usize>) -> Self {
        let start = mappings[range.start].pen().0;
        let last = &mappings[range.end - 1];
        let len = last.pen().0 + last.advance - start;
        Word { range, start, len }
    }
}

fn find_words(mappings: &[CharacterMapping]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, m) in mappings.iter().enumerate() {
        if m.is_space() {
            if let Some(s) = start.take() {
                words.push(Word::new(mappings, s..i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push(Word::new(mappings, s..mappings.len()));
    }
    words
}

/// Greedily assign words to lines
///
/// Returns ranges over `words`. A line is never empty: a word longer than
/// `max_width` occupies a line by itself.
fn break_lines(words: &[Word], max_width: f32, space_width: f32) -> SmallVec<[Range<usize>; 4]> {
    let mut lines = SmallVec::new();
    let mut start = 0;
    let mut line_len = 0.0;

    for (i, word) in words.iter().enumerate() {
        if i == start {
            line_len = word.len;
            continue;
        }

        let len = line_len + space_width + word.len;
        if len > max_width {
            lines.push(start..i);
            start = i;
            line_len = word.len;
        } else {
            line_len = len;
        }
    }
    if start < words.len() {
        lines.push(start..words.len());
    }
    lines
}

/// Wrap and align lines
///
/// Input `mappings` should be an unwrapped sequence, as produced by
/// [`RenderResult::render`](super::RenderResult::render). Words are runs of
/// glyphs separated by space glyphs (`' '`). Lines are filled greedily: a
/// word is appended to the current line while the line's length (the sum of
/// word lengths plus `space_width` per gap) does not exceed `max_width`.
/// Words are never broken; a word longer than `max_width` is placed on a line
/// of its own.
///
/// Line `i` is moved down by `i * line_height`. Within the line, words are
/// separated by `space_width` starting from `x = 0`, then the whole line is
/// shifted according to `align` such that its drawn extent is aligned within
/// `0..max_width`. Alignment is skipped if `max_width` is not finite.
///
/// Space glyphs are kept (the length of `mappings` does not change) and
/// placed after the preceding word on the same line.
///
/// Target rectangles are adjusted *in place*: calling this method on an
/// already wrapped sequence applies offsets a second time and will not yield
/// the expected layout.
pub fn wrap(
    mappings: &mut [CharacterMapping],
    max_width: f32,
    line_height: f32,
    space_width: f32,
    align: Align,
) -> WrapSummary {
    let words = find_words(mappings);
    let lines = break_lines(&words, max_width, space_width);
    let mut width = 0.0f32;

    for (index, line) in lines.iter().enumerate() {
        let dy = index as f32 * line_height;

        // Mappings belonging to this line, including leading spaces (first
        // line only) and trailing spaces
        let first = if index == 0 { 0 } else { words[line.start].range.start };
        let last = match words.get(line.end) {
            Some(next) => next.range.start,
            None => mappings.len(),
        };

        let mut caret = 0.0;
        let mut cursor = first;
        for (i, word) in words[line.clone()].iter().enumerate() {
            place_spaces(&mut mappings[cursor..word.range.start], caret, dy);
            if i > 0 {
                caret += space_width;
            }

            let dx = caret - word.start;
            for m in &mut mappings[word.range.clone()] {
                m.dst.x += dx;
                m.dst.y += dy;
            }
            caret += word.len;
            cursor = word.range.end;
        }
        place_spaces(&mut mappings[cursor..last], caret, dy);

        let (left, right) = words[line.clone()]
            .iter()
            .flat_map(|word| mappings[word.range.clone()].iter())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(l, r), m| {
                (l.min(m.dst.x), r.max(m.dst.right()))
            });

        let shift = match align {
            _ if !max_width.is_finite() => 0.0,
            Align::Left => 0.0,
            Align::Center => 0.5 * (max_width - (right - left)) - left,
            Align::Right => max_width - right,
        };
        if shift != 0.0 {
            for m in &mut mappings[first..last] {
                m.dst.x += shift;
            }
        }
        width = width.max(right + shift);
    }

    WrapSummary {
        lines: lines.len(),
        width,
        height: lines.len() as f32 * line_height,
    }
}

/// Place a run of space glyphs starting from pen position `caret`
fn place_spaces(spaces: &mut [CharacterMapping], mut caret: f32, dy: f32) {
    for m in spaces {
        m.dst.x += caret - m.pen().0;
        m.dst.y += dy;
        caret += m.advance;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{AtlasRect, Rect, Vec2};

    /// Lay out words of the given lengths as single glyphs separated by a
    /// space glyph of advance `space`
    fn words(lens: &[f32], space: f32) -> Vec<CharacterMapping> {
        let mut v = Vec::new();
        let mut x = 0.0;
        for (i, len) in lens.iter().enumerate() {
            if i > 0 {
                v.push(CharacterMapping {
                    dst: Rect { x, y: 0.0, w: 0.0, h: 0.0 },
                    codepoint: ' ',
                    advance: space,
                    ..Default::default()
                });
                x += space;
            }
            v.push(CharacterMapping {
                src: AtlasRect { x: 0, y: 0, w: 1, h: 1 },
                dst: Rect { x, y: -10.0, w: *len, h: 10.0 },
                codepoint: 'w',
                advance: *len,
                offset: Vec2(0.0, -10.0),
            });
            x += len;
        }
        v
    }

    fn line_of(m: &CharacterMapping, line_height: f32) -> usize {
        ((m.dst.y + 10.0) / line_height).round() as usize
    }

    fn lines(mappings: &[CharacterMapping], line_height: f32) -> Vec<Vec<f32>> {
        let mut out: Vec<Vec<f32>> = vec![];
        for m in mappings.iter().filter(|m| !m.is_space()) {
            let line = line_of(m, line_height);
            if out.len() <= line {
                out.resize(line + 1, vec![]);
            }
            out[line].push(m.dst.w);
        }
        out
    }

    #[test]
    fn break_boundary() {
        let cases: &[&[f32]] = &[
            &[10.0, 20.0, 30.0, 40.0, 50.0],
            &[50.0, 50.0, 1.0, 99.0, 100.0, 1.0],
            &[33.0, 33.0, 33.0, 33.0],
            &[1.0; 12],
            &[7.5, 80.0, 12.25, 0.5, 64.0, 36.0],
        ];
        let max_width = 100.0;
        for space in [0.0, 5.0] {
            for lens in cases {
                let mut v = words(lens, space);
                wrap(&mut v, max_width, 20.0, space, Align::Left);
                let got = lines(&v, 20.0);

                // Expected: greedy fill by prefix sums
                let mut expected: Vec<Vec<f32>> = vec![];
                let mut sum = 0.0;
                for len in lens.iter() {
                    match expected.last_mut() {
                        Some(line) if sum + space + len <= max_width => {
                            sum += space + len;
                            line.push(*len);
                        }
                        _ => {
                            sum = *len;
                            expected.push(vec![*len]);
                        }
                    }
                }
                assert_eq!(got, expected, "lens = {lens:?}, space = {space}");
            }
        }
    }

    #[test]
    fn exact_fit() {
        // S_2 = 100 ≤ 100 < S_3
        let mut v = words(&[40.0, 60.0, 1.0], 0.0);
        let summary = wrap(&mut v, 100.0, 12.0, 0.0, Align::Left);
        assert_eq!(summary.lines, 2);
        assert_eq!(line_of(&v[0], 12.0), 0);
        assert_eq!(line_of(&v[2], 12.0), 0);
        assert_eq!(line_of(&v[4], 12.0), 1);
        assert_eq!(v[4].dst.x, 0.0);
        assert_eq!(summary.height, 24.0);
    }

    #[test]
    fn word_spacing() {
        let mut v = words(&[10.0, 10.0, 10.0], 3.0);
        wrap(&mut v, f32::INFINITY, 12.0, 6.0, Align::Right);
        let x: Vec<f32> = v.iter().map(|m| m.dst.x).collect();
        // Words are separated by space_width (6), not the space advance (3);
        // Right alignment is skipped for unbounded width
        assert_eq!(x, vec![0.0, 10.0, 16.0, 26.0, 32.0]);
    }

    #[test]
    fn align_right() {
        let mut v = words(&[30.0, 30.0, 30.0, 45.0, 10.0], 0.0);
        let summary = wrap(&mut v, 100.0, 12.0, 4.0, Align::Right);
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.width, 100.0);
        for line in 0..2 {
            let right = v
                .iter()
                .filter(|m| !m.is_space() && line_of(m, 12.0) == line)
                .map(|m| m.dst.right())
                .fold(f32::NEG_INFINITY, f32::max);
            assert!((right - 100.0).abs() < 1e-4, "line {line}: {right}");
        }
    }

    #[test]
    fn align_center() {
        let mut v = words(&[20.0, 20.0], 0.0);
        wrap(&mut v, 100.0, 12.0, 10.0, Align::Center);
        // Line width 50 centred in 100
        assert_eq!(v[0].dst.x, 25.0);
        assert_eq!(v[2].dst.right(), 75.0);
    }

    #[test]
    fn degenerate_width() {
        let mut v = words(&[5.0, 6.0, 7.0], 1.0);
        let summary = wrap(&mut v, 0.5, 10.0, 1.0, Align::Left);
        assert_eq!(summary.lines, 3);
        assert_eq!(lines(&v, 10.0), vec![vec![5.0], vec![6.0], vec![7.0]]);
        for m in v.iter().filter(|m| !m.is_space()) {
            assert_eq!(m.dst.x, 0.0);
        }
    }

    #[test]
    fn spaces_only() {
        let mut v = words(&[], 0.0);
        assert_eq!(wrap(&mut v, 10.0, 10.0, 1.0, Align::Left), WrapSummary::default());

        let mut v = vec![CharacterMapping {
            codepoint: ' ',
            advance: 4.0,
            ..Default::default()
        }];
        let summary = wrap(&mut v, 10.0, 10.0, 4.0, Align::Right);
        assert_eq!(summary.lines, 0);
        assert_eq!(v[0].dst.x, 0.0);
    }

    #[test]
    fn rewrap_hazard() {
        let mut v = words(&[60.0, 60.0, 60.0], 0.0);
        wrap(&mut v, 100.0, 10.0, 0.0, Align::Left);
        let once = v.clone();
        assert_eq!(once[4].dst.y, -10.0 + 20.0);

        // Wrapping again re-applies the vertical offsets
        wrap(&mut v, 100.0, 10.0, 0.0, Align::Left);
        assert_eq!(v[4].dst.y, -10.0 + 20.0 + 20.0);
        assert_ne!(v, once);
    }
}
