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

//! Piece designators: the atoms of a CQL filter naming a set of pieces on a set of squares, like `Ra1-8`,
//! `[Aa]b2` or `k[a-h1,d4]`.

use crate::designator::pieces::{PieceSet, PieceSymbol};
use crate::designator::square_spec::{SquareRange, SquareSpec};
use crate::general::common::DesignatorErrorKind::*;
use crate::general::common::{DesignatorErrorKind, Res, Strictness, TransformError, describe_next};
use crate::general::squares::{
    Axis, DimT, RANGE_SEPARATOR, SQUARE_SEPARATOR, ShiftOffset, ShiftWindow, Span, Square, char_to_file,
    char_to_rank,
};
use crate::general::tables::{REFLECT_HORIZONTAL, Remap};
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Formatter;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

pub mod pieces;
pub mod square_spec;

/// The explicit `(piece, square)` pairs a piece designator matches.
pub type DesignatorSet = BTreeSet<(PieceSymbol, Square)>;

struct DesignatorParser<'a> {
    input: &'a str,
    byte_idx: usize,
    unread: Peekable<Chars<'a>>,
    strictness: Strictness,
}

impl<'a> DesignatorParser<'a> {
    fn new(input: &'a str, strictness: Strictness) -> Self {
        Self { input, byte_idx: 0, unread: input.chars().peekable(), strictness }
    }

    fn error(&self, reason: DesignatorErrorKind) -> TransformError {
        TransformError::InvalidDesignator { designator: self.input.to_string(), reason }
    }

    fn eat(&mut self) -> Option<char> {
        let res = self.unread.next();
        if let Some(c) = res {
            self.byte_idx += c.len_utf8();
        }
        res
    }

    fn eat_if(&mut self, expected: char) -> bool {
        if self.unread.peek() == Some(&expected) {
            self.eat();
            true
        } else {
            false
        }
    }

    fn unread(&self) -> &str {
        &self.input[self.byte_idx..]
    }

    fn parse_pieces(&mut self) -> Res<PieceSet> {
        match self.eat() {
            None => Err(self.error(Empty)),
            Some('[') => {
                let mut symbols = vec![];
                loop {
                    match self.eat() {
                        None => return Err(self.error(UnclosedBracket)),
                        Some(']') => break,
                        Some(c) => {
                            let symbol = PieceSymbol::from_char(c).ok_or_else(|| self.error(UnknownPiece(c)))?;
                            symbols.push(symbol);
                        }
                    }
                }
                if symbols.is_empty() {
                    return Err(self.error(EmptyList));
                }
                PieceSet::compound(symbols).map_err(|dup| self.error(DuplicatePiece(dup.to_char())))
            }
            Some(c) => match PieceSymbol::from_char(c) {
                Some(symbol) => Ok(PieceSet::single(symbol)),
                None => Err(self.error(ExpectedPiece(describe_next(Some(c))))),
            },
        }
    }

    fn parse_coordinate(&mut self, axis: Axis) -> Res<DimT> {
        let c = self.unread.peek().copied();
        let idx = match axis {
            Axis::File => c.and_then(char_to_file),
            Axis::Rank => c.and_then(char_to_rank),
        };
        match (idx, axis) {
            (Some(idx), _) => {
                self.eat();
                Ok(idx)
            }
            (None, Axis::File) => Err(self.error(ExpectedFile(describe_next(c)))),
            (None, Axis::Rank) => Err(self.error(ExpectedRank(describe_next(c)))),
        }
    }

    /// Parses `x` or `x-y` for one axis. Ranges must be ascending unless parsing is relaxed.
    fn parse_span(&mut self, axis: Axis, component_start: usize) -> Res<Span> {
        let lo = self.parse_coordinate(axis)?;
        if !self.eat_if(RANGE_SEPARATOR) {
            return Ok(Span::single(lo));
        }
        let hi = self.parse_coordinate(axis)?;
        if lo >= hi && self.strictness == Strictness::Strict {
            let text = self.input[component_start..self.byte_idx].to_string();
            return Err(self.error(UnorderedRange(text)));
        }
        Ok(Span::sorted(lo, hi))
    }

    fn parse_range(&mut self) -> Res<SquareRange> {
        let start = self.byte_idx;
        let files = self.parse_span(Axis::File, start)?;
        let ranks = self.parse_span(Axis::Rank, start)?;
        Ok(SquareRange { files, ranks })
    }

    fn parse_squares(&mut self) -> Res<Option<SquareSpec>> {
        if self.unread.peek().is_none() {
            return Ok(None);
        }
        if !self.eat_if('[') {
            return Ok(Some(SquareSpec::single(self.parse_range()?)));
        }
        let mut ranges = vec![self.parse_range()?];
        loop {
            match self.eat() {
                Some(SQUARE_SEPARATOR) => ranges.push(self.parse_range()?),
                Some(']') => return Ok(Some(SquareSpec::compound(ranges))),
                None => return Err(self.error(UnclosedBracket)),
                Some(c) => return Err(self.error(ExpectedSeparator(describe_next(Some(c))))),
            }
        }
    }

    fn parse(mut self) -> Res<PieceDesignator> {
        let pieces = self.parse_pieces()?;
        let squares = self.parse_squares()?;
        if !self.unread().is_empty() {
            return Err(self.error(TrailingInput(self.unread().to_string())));
        }
        Ok(PieceDesignator { pieces, squares })
    }
}

/// A parsed piece designator.
///
/// A designator without squares stands for its pieces anywhere on the board and is unaffected by geometric
/// transforms. Bracketed piece or square lists stay bracketed through every rewrite, even if they end up
/// containing a single element.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct PieceDesignator {
    pieces: PieceSet,
    squares: Option<SquareSpec>,
}

impl PieceDesignator {
    pub fn new(pieces: PieceSet, squares: Option<SquareSpec>) -> Self {
        Self { pieces, squares }
    }

    pub fn parse(text: &str, strictness: Strictness) -> Res<Self> {
        DesignatorParser::new(text, strictness).parse()
    }

    pub fn pieces(&self) -> &PieceSet {
        &self.pieces
    }

    pub fn squares(&self) -> Option<&SquareSpec> {
        self.squares.as_ref()
    }

    pub fn has_squares(&self) -> bool {
        self.squares.is_some()
    }

    pub fn is_compound_pieces(&self) -> bool {
        self.pieces.is_compound()
    }

    pub fn is_compound_squares(&self) -> bool {
        self.squares.as_ref().is_some_and(SquareSpec::is_compound)
    }

    /// Narrows `limits` to the shifts that leave this designator with at least one square. A designator keeping a
    /// whole file (rank) through every shift doesn't narrow anything, but still widens the offsets worth trying.
    pub fn shift_limits(&self, limits: &mut ShiftLimits) {
        let Some(squares) = &self.squares else {
            return;
        };
        limits.qualified = true;
        for axis in [Axis::File, Axis::Rank] {
            let Some(window) = squares.survival_window(axis) else {
                continue;
            };
            if squares.survives_every_shift(axis) {
                limits.anchor(axis, window);
            } else {
                limits.restrict(axis, window);
            }
        }
    }

    pub fn remapped(&self, remap: &Remap) -> Self {
        Self { pieces: self.pieces.clone(), squares: self.squares.as_ref().map(|s| s.remapped(remap)) }
    }

    /// Returns `None` if every square of this designator is moved off the board.
    pub fn shifted(&self, offset: ShiftOffset) -> Option<Self> {
        let squares = match &self.squares {
            None => None,
            Some(squares) => Some(squares.shifted(offset)?),
        };
        Some(Self { pieces: self.pieces.clone(), squares })
    }

    /// Swaps the colors of all pieces and mirrors the squares onto the other side of the board.
    pub fn color_flipped(&self) -> Self {
        Self {
            pieces: self.pieces.color_flipped(),
            squares: self.squares.as_ref().map(|s| s.remapped(&REFLECT_HORIZONTAL)),
        }
    }

    pub fn designator_set(&self) -> DesignatorSet {
        let squares: Vec<Square> = match &self.squares {
            None => Square::iter().collect(),
            Some(squares) => squares.squares().collect(),
        };
        self.pieces.concrete().flat_map(|piece| squares.iter().map(move |&square| (piece, square))).collect()
    }
}

impl fmt::Display for PieceDesignator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pieces)?;
        if let Some(squares) = &self.squares {
            write!(f, "{squares}")?;
        }
        Ok(())
    }
}

impl FromStr for PieceDesignator {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Strictness::Relaxed)
    }
}

/// The shifts along one axis that a filter subtree admits.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct AxisLimits {
    /// Intersection of the windows of the designators a shift can empty.
    pub required: Option<ShiftWindow>,
    /// Hull of the windows of the designators that keep a whole file (rank) but have other squares to move.
    pub anchored: Option<ShiftWindow>,
}

impl AxisLimits {
    /// The offsets to try, or `None` if there is nothing to move along this axis.
    pub fn window(self) -> Option<ShiftWindow> {
        self.required.or(self.anchored)
    }
}

/// The shifts a filter subtree can undergo, accumulated over all piece designators in it.
///
/// An axis has no window as long as no designator has squares that can move along it, which happens when every
/// designator lacks squares or only covers whole files (ranks) on that axis. Such an axis admits no shift.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct ShiftLimits {
    pub files: AxisLimits,
    pub ranks: AxisLimits,
    qualified: bool,
}

impl ShiftLimits {
    fn axis_mut(&mut self, axis: Axis) -> &mut AxisLimits {
        match axis {
            Axis::File => &mut self.files,
            Axis::Rank => &mut self.ranks,
        }
    }

    pub fn window(self, axis: Axis) -> Option<ShiftWindow> {
        match axis {
            Axis::File => self.files.window(),
            Axis::Rank => self.ranks.window(),
        }
    }

    /// Whether at least one designator names squares.
    pub fn has_qualified_squares(self) -> bool {
        self.qualified
    }

    /// Adds a designator that only survives the offsets in `window`.
    pub fn restrict(&mut self, axis: Axis, window: ShiftWindow) {
        let slot = &mut self.axis_mut(axis).required;
        *slot = Some(slot.map_or(window, |w| w.intersect(window)));
    }

    /// Adds a designator that survives every offset, but only moves squares for the offsets in `window`.
    pub fn anchor(&mut self, axis: Axis, window: ShiftWindow) {
        let slot = &mut self.axis_mut(axis).anchored;
        *slot = Some(slot.map_or(window, |w| w.hull(window)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::general::tables::Symmetry;
    use itertools::Itertools;
    use strum::IntoEnumIterator;

    fn reason(text: &str, strictness: Strictness) -> DesignatorErrorKind {
        match PieceDesignator::parse(text, strictness) {
            Err(TransformError::InvalidDesignator { designator, reason }) => {
                assert_eq!(designator, text);
                reason
            }
            res => panic!("'{text}' should not parse, got {res:?}"),
        }
    }

    #[test]
    fn roundtrip_test() {
        for text in [
            "K",
            "[Aa]",
            ".",
            "Ra1-8",
            "Ka-h1",
            "qc-f3-6",
            "[Aa]b2",
            "k[a-h1,d4]",
            "[KQ][a1,b2-7,c-d3-4]",
            "p[e4]",
        ] {
            let designator = PieceDesignator::parse(text, Strictness::Strict).unwrap();
            assert_eq!(designator.to_string(), text);
            assert_eq!(text.parse::<PieceDesignator>().unwrap(), designator);
        }
    }

    #[test]
    fn structure_test() {
        let designator: PieceDesignator = "[Aa][b2,b4]".parse().unwrap();
        assert!(designator.is_compound_pieces());
        assert!(designator.is_compound_squares());
        assert_eq!(designator.pieces().symbols(), &[PieceSymbol::AnyWhite, PieceSymbol::AnyBlack]);
        assert_eq!(designator.squares().unwrap().ranges().len(), 2);
        let designator: PieceDesignator = "K".parse().unwrap();
        assert!(!designator.is_compound_pieces());
        assert!(!designator.is_compound_squares());
        assert!(!designator.has_squares());
    }

    #[test]
    fn invalid_designator_test() {
        let strict = Strictness::Strict;
        assert_eq!(reason("", strict), Empty);
        assert_eq!(reason("x", strict), ExpectedPiece("'x'".to_string()));
        assert_eq!(reason("[Kx]", strict), UnknownPiece('x'));
        assert_eq!(reason("[]a1", strict), EmptyList);
        assert_eq!(reason("[KK]", strict), DuplicatePiece('K'));
        assert_eq!(reason("[Kq", strict), UnclosedBracket);
        assert_eq!(reason("Ki1", strict), ExpectedFile("'i'".to_string()));
        assert_eq!(reason("Ka9", strict), ExpectedRank("'9'".to_string()));
        assert_eq!(reason("Ka", strict), ExpectedRank("the end of the input".to_string()));
        assert_eq!(reason("Ka1-", strict), ExpectedRank("the end of the input".to_string()));
        assert_eq!(reason("K[a1;b2]", strict), ExpectedSeparator("';'".to_string()));
        assert_eq!(reason("K[a1,b2", strict), UnclosedBracket);
        assert_eq!(reason("Ka1b2", strict), TrailingInput("b2".to_string()));
        assert_eq!(reason("Ka1-h8", strict), ExpectedRank("'h'".to_string()));
        assert_eq!(reason("Ka8-1", strict), UnorderedRange("a8-1".to_string()));
        assert_eq!(reason("K[b2,h-a1]", strict), UnorderedRange("h-a".to_string()));
        assert_eq!(reason("Ka1-1", strict), UnorderedRange("a1-1".to_string()));
    }

    #[test]
    fn relaxed_test() {
        let relaxed = Strictness::Relaxed;
        assert_eq!(PieceDesignator::parse("Ka8-1", relaxed).unwrap().to_string(), "Ka1-8");
        assert_eq!(PieceDesignator::parse("K[b2,h-a1]", relaxed).unwrap().to_string(), "K[b2,a-h1]");
        assert_eq!(PieceDesignator::parse("Ka1-1", relaxed).unwrap().to_string(), "Ka1");
        assert_eq!(reason("Ka1-9", relaxed), ExpectedRank("'9'".to_string()));
    }

    #[test]
    fn error_message_test() {
        let err = PieceDesignator::parse("Ka8-1", Strictness::Strict).unwrap_err();
        assert_eq!(err.to_string(), "invalid piece designator 'Ka8-1': the range 'a8-1' must go from low to high");
    }

    /// Every component form under every symmetry, checked against mapping the squares one by one.
    #[test]
    fn normalization_test() {
        for text in ["Kb3", "Kb2-7", "Kc-f5", "Kb-c6-8", "K[a1,h1-8]", "Kd4-5"] {
            let designator: PieceDesignator = text.parse().unwrap();
            for symmetry in Symmetry::iter() {
                let remap = symmetry.remap();
                let remapped = designator.remapped(remap);
                let reparsed = PieceDesignator::parse(&remapped.to_string(), Strictness::Strict).unwrap();
                assert_eq!(reparsed, remapped, "{text} {symmetry:?}");
                let expected = designator
                    .designator_set()
                    .into_iter()
                    .map(|(piece, square)| (piece, map_square(remap, square)))
                    .collect::<DesignatorSet>();
                assert_eq!(remapped.designator_set(), expected, "{text} {symmetry:?}");
            }
        }
    }

    fn map_square(remap: &Remap, square: Square) -> Square {
        let file = remap.get(crate::general::squares::Coord::file(square.file));
        let rank = remap.get(crate::general::squares::Coord::rank(square.rank));
        if remap.swaps_axes() { Square::new(rank.idx, file.idx) } else { Square::new(file.idx, rank.idx) }
    }

    #[test]
    fn documented_normalization_test() {
        use crate::general::tables::*;
        let designator: PieceDesignator = "Ra1-8".parse().unwrap();
        assert_eq!(designator.remapped(&ROTATE_90).to_string(), "Ra-h1");
        assert_eq!(designator.remapped(&REFLECT_VERTICAL).to_string(), "Rh1-8");
        let designator: PieceDesignator = "Nb1".parse().unwrap();
        assert_eq!(designator.remapped(&ROTATE_90).to_string(), "Nh2");
        assert_eq!(designator.remapped(&ROTATE_90_REFLECT_VERTICAL).to_string(), "Na2");
    }

    #[test]
    fn shift_limits_test() {
        let mut limits = ShiftLimits::default();
        "K".parse::<PieceDesignator>().unwrap().shift_limits(&mut limits);
        assert_eq!(limits, ShiftLimits::default());
        assert!(!limits.has_qualified_squares());
        "Kd2-8".parse::<PieceDesignator>().unwrap().shift_limits(&mut limits);
        assert!(limits.has_qualified_squares());
        assert_eq!(limits.window(Axis::Rank), Some(ShiftWindow { min: -7, max: 6 }));
        assert_eq!(limits.window(Axis::File), Some(ShiftWindow { min: -3, max: 4 }));
        "Ba2".parse::<PieceDesignator>().unwrap().shift_limits(&mut limits);
        assert_eq!(limits.window(Axis::Rank), Some(ShiftWindow { min: -1, max: 6 }));
        assert_eq!(limits.window(Axis::File), Some(ShiftWindow { min: 0, max: 4 }));
        let mut limits = ShiftLimits::default();
        "Ka-h1-8".parse::<PieceDesignator>().unwrap().shift_limits(&mut limits);
        assert!(limits.has_qualified_squares());
        assert_eq!(limits.window(Axis::Rank), None);
        assert_eq!(limits.window(Axis::File), None);
    }

    #[test]
    fn full_file_in_list_test() {
        let mut limits = ShiftLimits::default();
        "R[a1-8,c3]".parse::<PieceDesignator>().unwrap().shift_limits(&mut limits);
        assert_eq!(limits.ranks, AxisLimits { required: None, anchored: Some(ShiftWindow { min: -2, max: 5 }) });
        assert_eq!(limits.window(Axis::Rank), Some(ShiftWindow { min: -2, max: 5 }));
        assert_eq!(limits.window(Axis::File), Some(ShiftWindow { min: -2, max: 7 }));
        // a designator that can be emptied takes precedence over one that can't
        "Kd4".parse::<PieceDesignator>().unwrap().shift_limits(&mut limits);
        assert_eq!(limits.window(Axis::Rank), Some(ShiftWindow { min: -3, max: 4 }));
        assert_eq!(limits.ranks.anchored, Some(ShiftWindow { min: -2, max: 5 }));
        let moved = "R[a1-8,c3]".parse::<PieceDesignator>().unwrap().shifted(ShiftOffset { files: 0, ranks: -2 });
        assert_eq!(moved.map(|d| d.to_string()), Some("R[a1-8,c1]".to_string()));
    }

    #[test]
    fn shifted_test() {
        let designator: PieceDesignator = "K[d1-8,a2]".parse().unwrap();
        let up = designator.shifted(ShiftOffset { files: 0, ranks: 2 }).unwrap();
        assert_eq!(up.to_string(), "K[d1-8,a4]");
        let left = designator.shifted(ShiftOffset { files: -1, ranks: 0 }).unwrap();
        assert_eq!(left.to_string(), "K[c1-8]");
        assert!(left.is_compound_squares());
        assert_eq!("Ka2".parse::<PieceDesignator>().unwrap().shifted(ShiftOffset { files: -1, ranks: 0 }), None);
        let unqualified: PieceDesignator = "[Qq]".parse().unwrap();
        assert_eq!(unqualified.shifted(ShiftOffset { files: 3, ranks: -2 }), Some(unqualified.clone()));
    }

    #[test]
    fn color_flipped_test() {
        let designator: PieceDesignator = "[Ka.]b1-3".parse().unwrap();
        let flipped = designator.color_flipped();
        assert_eq!(flipped.to_string(), "[kA.]b6-8");
        assert_eq!(flipped.color_flipped(), designator);
        assert_eq!("A".parse::<PieceDesignator>().unwrap().color_flipped().to_string(), "a");
    }

    #[test]
    fn designator_set_test() {
        let designator: PieceDesignator = "[Aa]b2".parse().unwrap();
        let set = designator.designator_set();
        assert_eq!(set.len(), 12);
        assert!(set.iter().all(|(_, square)| square.to_string() == "b2"));
        assert_eq!("K".parse::<PieceDesignator>().unwrap().designator_set().len(), 64);
        let set = "k[a1-2,a2-3]".parse::<PieceDesignator>().unwrap().designator_set();
        assert_eq!(set.iter().map(|(_, s)| s.to_string()).join(" "), "a1 a2 a3");
    }
}
