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

//! The symmetries of the 8x8 board as permutations of the coordinate alphabet, and the color flipping tables.
//! Everything in here is computed at compile time.

use crate::designator::pieces::PieceSymbol;
use crate::designator::pieces::PieceSymbol::*;
use crate::filter::Token;
use crate::general::squares::{Axis, Coord, DimT, MAX_IDX};
use strum_macros::EnumIter;

const ALPHABET_SIZE: usize = 16;

const fn slot(c: Coord) -> usize {
    match c.axis {
        Axis::Rank => c.idx as usize,
        Axis::File => 8 + c.idx as usize,
    }
}

const fn coord_at(slot: usize) -> Coord {
    if slot < 8 { Coord::rank(slot as DimT) } else { Coord::file((slot - 8) as DimT) }
}

/// A permutation of the 16 coordinate symbols `1..8` and `a..h`.
///
/// A square `(file, rank)` is mapped by mapping both of its symbols. For rotations by 90 or 270 degrees, file
/// symbols become rank symbols and vice versa, so the mapped square has to be read with its axes swapped.
/// Every table in this module maps each axis as a whole onto one axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Remap {
    table: [Coord; ALPHABET_SIZE],
}

impl Remap {
    pub const IDENTITY: Remap = Remap::identity();

    const fn identity() -> Self {
        let mut table = [Coord::rank(0); ALPHABET_SIZE];
        let mut i = 0;
        while i < ALPHABET_SIZE {
            table[i] = coord_at(i);
            i += 1;
        }
        Self { table }
    }

    const fn rotate_90() -> Self {
        let mut res = Self::identity();
        let mut i = 0;
        while i <= MAX_IDX {
            // rank 1 becomes file h, ..., rank 8 becomes file a; file a becomes rank 1, ..., file h becomes rank 8
            res.table[slot(Coord::rank(i))] = Coord::file(MAX_IDX - i);
            res.table[slot(Coord::file(i))] = Coord::rank(i);
            i += 1;
        }
        res
    }

    const fn reflect(axis: Axis) -> Self {
        let mut res = Self::identity();
        let mut i = 0;
        while i <= MAX_IDX {
            let from = Coord { axis, idx: i };
            res.table[slot(from)] = Coord { axis, idx: MAX_IDX - i };
            i += 1;
        }
        res
    }

    pub const fn get(&self, c: Coord) -> Coord {
        self.table[slot(c)]
    }

    /// The remap that first applies `self`, then `next`.
    pub const fn then(&self, next: &Remap) -> Remap {
        let mut res = Self::identity();
        let mut i = 0;
        while i < ALPHABET_SIZE {
            res.table[i] = next.get(self.table[i]);
            i += 1;
        }
        res
    }

    pub const fn swaps_axes(&self) -> bool {
        matches!(self.get(Coord::file(0)).axis, Axis::Rank)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn map_char(&self, c: char) -> char {
        Coord::from_char(c).map_or(c, |coord| self.get(coord).to_char())
    }
}

pub const ROTATE_90: Remap = Remap::rotate_90();
pub const ROTATE_180: Remap = ROTATE_90.then(&ROTATE_90);
pub const ROTATE_270: Remap = ROTATE_180.then(&ROTATE_90);
/// Reflection about the horizontal bisector: ranks are reversed.
pub const REFLECT_HORIZONTAL: Remap = Remap::reflect(Axis::Rank);
/// Reflection about the vertical bisector: files are reversed.
pub const REFLECT_VERTICAL: Remap = Remap::reflect(Axis::File);
// Not transforms of their own, but needed for the two diagonal reflections of `flip`.
pub const ROTATE_90_REFLECT_HORIZONTAL: Remap = ROTATE_90.then(&REFLECT_HORIZONTAL);
pub const ROTATE_90_REFLECT_VERTICAL: Remap = ROTATE_90.then(&REFLECT_VERTICAL);

/// The non-identity elements of the symmetry group of the square.
#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumIter)]
pub enum Symmetry {
    Rotate90,
    Rotate180,
    Rotate270,
    ReflectVertical,
    ReflectHorizontal,
    Rotate90ReflectVertical,
    Rotate90ReflectHorizontal,
}

impl Symmetry {
    pub fn remap(self) -> &'static Remap {
        match self {
            Symmetry::Rotate90 => &ROTATE_90,
            Symmetry::Rotate180 => &ROTATE_180,
            Symmetry::Rotate270 => &ROTATE_270,
            Symmetry::ReflectVertical => &REFLECT_VERTICAL,
            Symmetry::ReflectHorizontal => &REFLECT_HORIZONTAL,
            Symmetry::Rotate90ReflectVertical => &ROTATE_90_REFLECT_VERTICAL,
            Symmetry::Rotate90ReflectHorizontal => &ROTATE_90_REFLECT_HORIZONTAL,
        }
    }
}

pub const ROTATIONS: [Symmetry; 3] = [Symmetry::Rotate90, Symmetry::Rotate180, Symmetry::Rotate270];

/// The order in which `flip` generates its transformed filters.
pub const FLIP_GROUP: [Symmetry; 7] = [
    Symmetry::Rotate90,
    Symmetry::Rotate180,
    Symmetry::Rotate270,
    Symmetry::ReflectVertical,
    Symmetry::ReflectHorizontal,
    Symmetry::Rotate90ReflectVertical,
    Symmetry::Rotate90ReflectHorizontal,
];

/// Indexed by `PieceSymbol as usize`.
pub const FLIP_COLOR_PIECE: [PieceSymbol; 15] = [
    BlackKing,
    BlackQueen,
    BlackRook,
    BlackBishop,
    BlackKnight,
    BlackPawn,
    WhiteKing,
    WhiteQueen,
    WhiteRook,
    WhiteBishop,
    WhiteKnight,
    WhitePawn,
    AnyBlack,
    AnyWhite,
    Empty,
];

pub const FLIP_COLOR_TOMOVE: [(&str, &str); 2] = [("wtm", "btm"), ("btm", "wtm")];

pub const FLIP_COLOR_FILTER: [(Token, Token); 2] = [(Token::White, Token::Black), (Token::Black, Token::White)];

pub const FLIP_COLOR_RESULT: [(&str, &str); 2] = [("1-0", "0-1"), ("0-1", "1-0")];

pub fn swapped<T: Copy + PartialEq>(table: &[(T, T)], key: T) -> Option<T> {
    table.iter().find(|(from, _)| *from == key).map(|&(_, to)| to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::general::squares::{FILE_NAMES, RANK_NAMES};
    use itertools::Itertools;
    use strum::IntoEnumIterator;

    fn mapped(remap: &Remap, alphabet: &[char]) -> String {
        alphabet.iter().map(|&c| remap.map_char(c)).collect()
    }

    #[test]
    fn rotate_90_table_test() {
        assert_eq!(mapped(&ROTATE_90, &RANK_NAMES), "hgfedcba");
        assert_eq!(mapped(&ROTATE_90, &FILE_NAMES), "12345678");
        assert_eq!(mapped(&ROTATE_180, &RANK_NAMES), "87654321");
        assert_eq!(mapped(&ROTATE_180, &FILE_NAMES), "hgfedcba");
        assert_eq!(mapped(&ROTATE_270, &RANK_NAMES), "abcdefgh");
        assert_eq!(mapped(&ROTATE_270, &FILE_NAMES), "87654321");
        assert!(ROTATE_90.swaps_axes());
        assert!(!ROTATE_180.swaps_axes());
        assert!(ROTATE_270.swaps_axes());
    }

    #[test]
    fn reflection_table_test() {
        assert_eq!(mapped(&REFLECT_HORIZONTAL, &RANK_NAMES), "87654321");
        assert_eq!(mapped(&REFLECT_HORIZONTAL, &FILE_NAMES), "abcdefgh");
        assert_eq!(mapped(&REFLECT_VERTICAL, &FILE_NAMES), "hgfedcba");
        assert_eq!(mapped(&REFLECT_VERTICAL, &RANK_NAMES), "12345678");
        assert_eq!(mapped(&ROTATE_90_REFLECT_HORIZONTAL, &FILE_NAMES), "87654321");
        assert_eq!(mapped(&ROTATE_90_REFLECT_HORIZONTAL, &RANK_NAMES), "hgfedcba");
        assert_eq!(mapped(&ROTATE_90_REFLECT_VERTICAL, &RANK_NAMES), "abcdefgh");
        assert_eq!(mapped(&ROTATE_90_REFLECT_VERTICAL, &FILE_NAMES), "12345678");
        assert_eq!(ROTATE_90.map_char('-'), '-');
    }

    #[test]
    fn group_law_test() {
        assert!(ROTATE_90.then(&ROTATE_270).is_identity());
        assert!(ROTATE_180.then(&ROTATE_180).is_identity());
        assert!(REFLECT_HORIZONTAL.then(&REFLECT_HORIZONTAL).is_identity());
        assert!(REFLECT_VERTICAL.then(&REFLECT_VERTICAL).is_identity());
        assert_eq!(REFLECT_HORIZONTAL.then(&REFLECT_VERTICAL), ROTATE_180);
        // the diagonal reflections are involutions as well
        assert!(ROTATE_90_REFLECT_HORIZONTAL.then(&ROTATE_90_REFLECT_HORIZONTAL).is_identity());
        assert!(ROTATE_90_REFLECT_VERTICAL.then(&ROTATE_90_REFLECT_VERTICAL).is_identity());
    }

    #[test]
    fn flip_group_is_closed_test() {
        let mut elements = FLIP_GROUP.iter().map(|s| *s.remap()).collect_vec();
        elements.push(Remap::IDENTITY);
        assert_eq!(elements.iter().unique_by(|r| format!("{r:?}")).count(), 8);
        for a in &elements {
            for b in &elements {
                assert!(elements.contains(&a.then(b)));
            }
        }
        assert_eq!(Symmetry::iter().collect_vec(), FLIP_GROUP.to_vec());
    }

    #[test]
    fn axis_uniformity_test() {
        for symmetry in Symmetry::iter() {
            let remap = symmetry.remap();
            for axis in Axis::iter() {
                let target = remap.get(Coord { axis, idx: 0 }).axis;
                for idx in 0..=MAX_IDX {
                    assert_eq!(remap.get(Coord { axis, idx }).axis, target, "{symmetry:?}");
                }
            }
        }
    }

    #[test]
    fn flip_color_test() {
        for piece in PieceSymbol::iter() {
            let flipped = FLIP_COLOR_PIECE[piece as usize];
            assert_eq!(FLIP_COLOR_PIECE[flipped as usize], piece);
            assert_eq!(flipped.to_char() == piece.to_char(), piece == Empty);
        }
        assert_eq!(FLIP_COLOR_PIECE[WhiteKing as usize], BlackKing);
        assert_eq!(FLIP_COLOR_PIECE[AnyWhite as usize], AnyBlack);
        assert_eq!(swapped(&FLIP_COLOR_TOMOVE, "wtm"), Some("btm"));
        assert_eq!(swapped(&FLIP_COLOR_TOMOVE, "check"), None);
        assert_eq!(swapped(&FLIP_COLOR_FILTER, Token::Black), Some(Token::White));
        assert_eq!(swapped(&FLIP_COLOR_RESULT, "1/2-1/2"), None);
    }
}
