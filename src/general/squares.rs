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
use derive_more::Display;
use std::fmt;
use std::fmt::Formatter;
use std::ops::RangeInclusive;
use strum_macros::EnumIter;

pub type DimT = u8;

pub const NUM_FILES: usize = 8;
pub const NUM_RANKS: usize = 8;
pub const MAX_IDX: DimT = 7;

pub const FILE_NAMES: [char; NUM_FILES] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
pub const RANK_NAMES: [char; NUM_RANKS] = ['1', '2', '3', '4', '5', '6', '7', '8'];

pub const RANGE_SEPARATOR: char = '-';
pub const SQUARE_SEPARATOR: char = ',';

#[must_use]
pub fn file_to_char(file: DimT) -> char {
    debug_assert!(file <= MAX_IDX);
    (file + b'a') as char
}

#[must_use]
pub fn rank_to_char(rank: DimT) -> char {
    debug_assert!(rank <= MAX_IDX);
    (rank + b'1') as char
}

pub fn char_to_file(c: char) -> Option<DimT> {
    FILE_NAMES.iter().position(|&f| f == c).map(|idx| idx as DimT)
}

pub fn char_to_rank(c: char) -> Option<DimT> {
    RANK_NAMES.iter().position(|&r| r == c).map(|idx| idx as DimT)
}

/// The two coordinate axes of the board. Files and ranks use disjoint symbols, so a symbol always
/// identifies its axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, EnumIter)]
pub enum Axis {
    File,
    Rank,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::File => Axis::Rank,
            Axis::Rank => Axis::File,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Axis::File => write!(f, "file"),
            Axis::Rank => write!(f, "rank"),
        }
    }
}

/// One symbol of the combined 16 symbol coordinate alphabet `1..8` and `a..h`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct Coord {
    pub axis: Axis,
    pub idx: DimT,
}

impl Coord {
    pub const fn file(idx: DimT) -> Self {
        Self { axis: Axis::File, idx }
    }

    pub const fn rank(idx: DimT) -> Self {
        Self { axis: Axis::Rank, idx }
    }

    pub fn from_char(c: char) -> Option<Self> {
        char_to_file(c).map(Self::file).or_else(|| char_to_rank(c).map(Self::rank))
    }

    pub fn to_char(self) -> char {
        match self.axis {
            Axis::File => file_to_char(self.idx),
            Axis::Rank => rank_to_char(self.idx),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[must_use]
pub struct Square {
    // declared rank first so that the derived order is a1, b1, ..., h8
    pub rank: DimT,
    pub file: DimT,
}

impl Square {
    pub const fn new(file: DimT, rank: DimT) -> Self {
        debug_assert!(file <= MAX_IDX && rank <= MAX_IDX);
        Self { rank, file }
    }

    pub fn iter() -> impl Iterator<Item = Square> {
        (0..NUM_RANKS as DimT).flat_map(|rank| (0..NUM_FILES as DimT).map(move |file| Square::new(file, rank)))
    }

    pub fn coordinate(self, axis: Axis) -> DimT {
        match axis {
            Axis::File => self.file,
            Axis::Rank => self.rank,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", file_to_char(self.file), rank_to_char(self.rank))
    }
}

/// An inclusive range of coordinates on a single axis, always ordered from low to high.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct Span {
    lo: DimT,
    hi: DimT,
}

impl Span {
    pub const FULL: Span = Span { lo: 0, hi: MAX_IDX };

    pub fn new(lo: DimT, hi: DimT) -> Option<Self> {
        (lo <= hi && hi <= MAX_IDX).then_some(Self { lo, hi })
    }

    pub fn single(idx: DimT) -> Self {
        debug_assert!(idx <= MAX_IDX);
        Self { lo: idx, hi: idx }
    }

    pub fn sorted(a: DimT, b: DimT) -> Self {
        debug_assert!(a <= MAX_IDX && b <= MAX_IDX);
        Self { lo: a.min(b), hi: a.max(b) }
    }

    pub fn lo(self) -> DimT {
        self.lo
    }

    pub fn hi(self) -> DimT {
        self.hi
    }

    pub fn is_single(self) -> bool {
        self.lo == self.hi
    }

    /// Covers all 8 files or ranks.
    pub fn is_full(self) -> bool {
        self == Self::FULL
    }

    pub fn iter(self) -> RangeInclusive<DimT> {
        self.lo..=self.hi
    }

    /// Moves the span by `offset`, dropping coordinates that leave the board.
    /// A full span is left as it is: shifting never alters a complete file or rank in the direction of the shift.
    pub fn shifted(self, offset: i8) -> Option<Span> {
        if self.is_full() {
            return Some(self);
        }
        let lo = (self.lo as i8 + offset).max(0);
        let hi = (self.hi as i8 + offset).min(MAX_IDX as i8);
        (lo <= hi).then(|| Span { lo: lo as DimT, hi: hi as DimT })
    }

    /// The offsets for which [`Self::shifted`] keeps at least one coordinate, or `None` if every offset does.
    pub fn survival_window(self) -> Option<ShiftWindow> {
        if self.is_full() {
            None
        } else {
            Some(ShiftWindow { min: -(self.hi as i8), max: (MAX_IDX - self.lo) as i8 })
        }
    }
}

/// The inclusive range of offsets a shift transform may apply along one axis. Always contains 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
#[display("[{min}, {max}]")]
#[must_use]
pub struct ShiftWindow {
    pub min: i8,
    pub max: i8,
}

impl ShiftWindow {
    pub fn intersect(self, other: ShiftWindow) -> Self {
        Self { min: self.min.max(other.min), max: self.max.min(other.max) }
    }

    /// Union of two windows; used for the alternatives of a single piece designator.
    pub fn hull(self, other: ShiftWindow) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// All offsets in the window, starting with the identity, going up, then wrapping around to the lowest offset.
    pub fn offsets(self) -> impl Iterator<Item = i8> + Clone {
        (0..=self.max).chain(self.min..0)
    }

    pub fn len(self) -> usize {
        (self.max - self.min) as usize + 1
    }
}

/// The distance a shift transform moves every square, in files (to the right) and ranks (upwards).
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Display)]
#[display("({files}, {ranks})")]
#[must_use]
pub struct ShiftOffset {
    pub files: i8,
    pub ranks: i8,
}

impl ShiftOffset {
    pub fn along(self, axis: Axis) -> i8 {
        match axis {
            Axis::File => self.files,
            Axis::Rank => self.ranks,
        }
    }

    pub fn is_identity(self) -> bool {
        self.files == 0 && self.ranks == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn char_conversion_test() {
        for idx in 0..=MAX_IDX {
            assert_eq!(char_to_file(file_to_char(idx)), Some(idx));
            assert_eq!(char_to_rank(rank_to_char(idx)), Some(idx));
        }
        assert_eq!(char_to_file('i'), None);
        assert_eq!(char_to_rank('9'), None);
        assert_eq!(char_to_rank('0'), None);
        assert_eq!(Coord::from_char('c'), Some(Coord::file(2)));
        assert_eq!(Coord::from_char('3'), Some(Coord::rank(2)));
        assert_eq!(Coord::from_char('-'), None);
    }

    #[test]
    fn square_iter_test() {
        let squares = Square::iter().collect_vec();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_string(), "a1");
        assert_eq!(squares[7].to_string(), "h1");
        assert_eq!(squares[63].to_string(), "h8");
        assert!(squares.iter().tuple_windows().all(|(a, b)| a < b));
    }

    #[test]
    fn span_shift_test() {
        let span = Span::new(1, 7).unwrap();
        assert_eq!(span.shifted(1), Span::new(2, 7));
        assert_eq!(span.shifted(6), Some(Span::single(7)));
        assert_eq!(span.shifted(7), None);
        assert_eq!(span.shifted(-1), Span::new(0, 6));
        assert_eq!(span.shifted(-7), Some(Span::single(0)));
        assert_eq!(Span::FULL.shifted(3), Some(Span::FULL));
        assert_eq!(Span::single(0).shifted(-1), None);
        assert_eq!(Span::new(3, 2), None);
    }

    #[test]
    fn survival_window_test() {
        assert_eq!(Span::single(0).survival_window(), Some(ShiftWindow { min: 0, max: 7 }));
        assert_eq!(Span::new(1, 7).unwrap().survival_window(), Some(ShiftWindow { min: -7, max: 6 }));
        assert_eq!(Span::FULL.survival_window(), None);
        let window = ShiftWindow { min: -1, max: 6 };
        assert_eq!(window.offsets().collect_vec(), vec![0, 1, 2, 3, 4, 5, 6, -1]);
        assert_eq!(window.len(), 8);
        assert_eq!(window.to_string(), "[-1, 6]");
        let narrowed = window.intersect(ShiftWindow { min: -3, max: 2 });
        assert_eq!(narrowed, ShiftWindow { min: -1, max: 2 });
        assert_eq!(window.hull(ShiftWindow { min: -3, max: 2 }), ShiftWindow { min: -3, max: 6 });
    }
}
