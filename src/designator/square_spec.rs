/*
 *  Mirrors, geometric transforms for Chess Query Language filters.
 *  Copyright (C) 2024 ToTheAnd
 *
 *  Mirrors is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  Mirrors is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with Mirrors. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::general::squares::{
    Axis, Coord, RANGE_SEPARATOR, SQUARE_SEPARATOR, ShiftOffset, ShiftWindow, Span, Square, file_to_char,
    rank_to_char,
};
use crate::general::tables::Remap;
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;

/// One entry of a square list: a rectangle of squares.
///
/// The textual form is chosen from the shape, so after a transform a range can turn into a single square
/// (`d7-8` shifted up by one is `d8`) or change the axis it extends along (`a1-8` rotated is a rank range).
/// - `a1`: a single square
/// - `a1-8`: several ranks of one file
/// - `a-h1`: several files of one rank
/// - `a-h1-8`: several files and several ranks
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct SquareRange {
    pub files: Span,
    pub ranks: Span,
}

impl SquareRange {
    pub fn square(square: Square) -> Self {
        Self { files: Span::single(square.file), ranks: Span::single(square.rank) }
    }

    pub fn span(self, axis: Axis) -> Span {
        match axis {
            Axis::File => self.files,
            Axis::Rank => self.ranks,
        }
    }

    pub fn squares(self) -> impl Iterator<Item = Square> {
        self.ranks.iter().flat_map(move |rank| self.files.iter().map(move |file| Square::new(file, rank)))
    }

    /// Maps both endpoints of both spans through `remap`. If the remap exchanges the axes, the mapped file span
    /// becomes the rank span and vice versa; endpoints are re-sorted because reflections reverse their order.
    pub fn remapped(self, remap: &Remap) -> Self {
        let map_span = |span: Span, to_coord: fn(u8) -> Coord| {
            Span::sorted(remap.get(to_coord(span.lo())).idx, remap.get(to_coord(span.hi())).idx)
        };
        let files = map_span(self.files, Coord::file);
        let ranks = map_span(self.ranks, Coord::rank);
        if remap.swaps_axes() { Self { files: ranks, ranks: files } } else { Self { files, ranks } }
    }

    pub fn shifted(self, offset: ShiftOffset) -> Option<Self> {
        Some(Self { files: self.files.shifted(offset.files)?, ranks: self.ranks.shifted(offset.ranks)? })
    }
}

fn write_span(f: &mut Formatter<'_>, span: Span, to_char: fn(u8) -> char) -> fmt::Result {
    if span.is_single() {
        write!(f, "{}", to_char(span.lo()))
    } else {
        write!(f, "{}{RANGE_SEPARATOR}{}", to_char(span.lo()), to_char(span.hi()))
    }
}

impl fmt::Display for SquareRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_span(f, self.files, file_to_char)?;
        write_span(f, self.ranks, rank_to_char)
    }
}

/// The square part of a piece designator: one range, or a bracketed, comma separated list of ranges.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct SquareSpec {
    ranges: Vec<SquareRange>,
    compound: bool,
}

impl SquareSpec {
    pub fn single(range: SquareRange) -> Self {
        Self { ranges: vec![range], compound: false }
    }

    pub fn compound(ranges: Vec<SquareRange>) -> Self {
        debug_assert!(!ranges.is_empty());
        Self { ranges, compound: true }
    }

    pub fn ranges(&self) -> &[SquareRange] {
        &self.ranges
    }

    pub fn is_compound(&self) -> bool {
        self.compound
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.ranges.iter().flat_map(|r| r.squares()).unique()
    }

    /// The offsets along `axis` that keep at least one of the movable ranges on the board, or `None` if every range
    /// covers the whole axis and there is nothing to move.
    ///
    /// Ranges covering the whole axis stay in place and don't contribute, so `[a1-8,c3]` moves `c3` vertically
    /// within `[-2, 5]` while `a1-8` stays where it is.
    pub fn survival_window(&self, axis: Axis) -> Option<ShiftWindow> {
        self.ranges.iter().filter_map(|r| r.span(axis).survival_window()).reduce(ShiftWindow::hull)
    }

    /// Whether some range covers the whole axis, so no shift along `axis` can remove every square.
    pub fn survives_every_shift(&self, axis: Axis) -> bool {
        self.ranges.iter().any(|r| r.span(axis).is_full())
    }

    pub fn remapped(&self, remap: &Remap) -> Self {
        Self { ranges: self.ranges.iter().map(|r| r.remapped(remap)).collect(), compound: self.compound }
    }

    /// Ranges moved off the board are dropped. Returns `None` if nothing remains.
    pub fn shifted(&self, offset: ShiftOffset) -> Option<Self> {
        let ranges = self.ranges.iter().filter_map(|r| r.shifted(offset)).collect_vec();
        (!ranges.is_empty()).then_some(Self { ranges, compound: self.compound })
    }
}

impl fmt::Display for SquareSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ranges = self.ranges.iter().join(&SQUARE_SEPARATOR.to_string());
        if self.compound { write!(f, "[{ranges}]") } else { write!(f, "{ranges}") }
    }
}
