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
use crate::designator::pieces::PieceSymbol::*;
use crate::general::tables::FLIP_COLOR_PIECE;
use arrayvec::ArrayVec;
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub const NUM_PIECE_SYMBOLS: usize = 15;

/// A single character of the piece part of a piece designator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, EnumIter)]
#[must_use]
pub enum PieceSymbol {
    WhiteKing,
    WhiteQueen,
    WhiteRook,
    WhiteBishop,
    WhiteKnight,
    WhitePawn,
    BlackKing,
    BlackQueen,
    BlackRook,
    BlackBishop,
    BlackKnight,
    BlackPawn,
    /// `A`
    AnyWhite,
    /// `a`
    AnyBlack,
    /// `.`
    Empty,
}

impl PieceSymbol {
    pub fn from_char(c: char) -> Option<Self> {
        Self::iter().find(|p| p.to_char() == c)
    }

    pub fn to_char(self) -> char {
        match self {
            WhiteKing => 'K',
            WhiteQueen => 'Q',
            WhiteRook => 'R',
            WhiteBishop => 'B',
            WhiteKnight => 'N',
            WhitePawn => 'P',
            BlackKing => 'k',
            BlackQueen => 'q',
            BlackRook => 'r',
            BlackBishop => 'b',
            BlackKnight => 'n',
            BlackPawn => 'p',
            AnyWhite => 'A',
            AnyBlack => 'a',
            Empty => '.',
        }
    }

    pub fn color_flipped(self) -> Self {
        FLIP_COLOR_PIECE[self as usize]
    }

    /// The concrete pieces (or the empty square) this symbol stands for.
    pub fn concrete(self) -> impl Iterator<Item = PieceSymbol> {
        let range = match self {
            AnyWhite => WhiteKing as usize..=WhitePawn as usize,
            AnyBlack => BlackKing as usize..=BlackPawn as usize,
            _ => self as usize..=self as usize,
        };
        Self::iter().filter(move |p| range.contains(&(*p as usize)))
    }
}

impl fmt::Display for PieceSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The piece part of a piece designator: one symbol, or a bracketed list of distinct symbols.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct PieceSet {
    symbols: ArrayVec<PieceSymbol, NUM_PIECE_SYMBOLS>,
    compound: bool,
}

impl PieceSet {
    pub fn single(symbol: PieceSymbol) -> Self {
        let mut symbols = ArrayVec::new();
        symbols.push(symbol);
        Self { symbols, compound: false }
    }

    /// Returns `Err` with the offending symbol if `symbols` contains duplicates.
    pub fn compound(list: impl IntoIterator<Item = PieceSymbol>) -> Result<Self, PieceSymbol> {
        let mut symbols = ArrayVec::new();
        for symbol in list {
            if symbols.contains(&symbol) {
                return Err(symbol);
            }
            // can't overflow: there are only NUM_PIECE_SYMBOLS distinct symbols
            symbols.push(symbol);
        }
        Ok(Self { symbols, compound: true })
    }

    pub fn symbols(&self) -> &[PieceSymbol] {
        &self.symbols
    }

    pub fn is_compound(&self) -> bool {
        self.compound
    }

    pub fn color_flipped(&self) -> Self {
        Self { symbols: self.symbols.iter().map(|p| p.color_flipped()).collect(), compound: self.compound }
    }

    pub fn concrete(&self) -> impl Iterator<Item = PieceSymbol> + '_ {
        self.symbols.iter().flat_map(|p| p.concrete()).unique()
    }
}

impl fmt::Display for PieceSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbols = self.symbols.iter().join("");
        if self.compound { write!(f, "[{symbols}]") } else { write!(f, "{symbols}") }
    }
}
