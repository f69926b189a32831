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
use thiserror::Error;

pub type Res<T> = Result<T, TransformError>;

/// How forgiving parsing and expansion should be.
///
/// `Relaxed` accepts ranges written in descending order (`a8-1`) or with equal endpoints (`a1-1`) and sorts
/// them into canonical form, and treats `rotate45` over piece designators without squares as a no-op.
/// `Strict` rejects both.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Strictness {
    Strict,
    #[default]
    Relaxed,
}

/// Errors that abort the expansion of a filter tree.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TransformError {
    #[error("invalid piece designator '{designator}': {reason}")]
    InvalidDesignator { designator: String, reason: DesignatorErrorKind },
    #[error("piece designator node without designator text")]
    MissingDesignatorText,
    #[error("rotate45 on specific squares")]
    Rotate45OnSquares,
    #[error("rotate45 not implemented")]
    Rotate45NotImplemented,
}

/// The reason a piece designator could not be parsed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DesignatorErrorKind {
    #[error("empty input")]
    Empty,
    #[error("expected a piece symbol or '[', found {0}")]
    ExpectedPiece(String),
    #[error("'{0}' is not a piece symbol")]
    UnknownPiece(char),
    #[error("empty bracketed list")]
    EmptyList,
    #[error("the piece symbol '{0}' appears more than once")]
    DuplicatePiece(char),
    #[error("expected ',' or ']', found {0}")]
    ExpectedSeparator(String),
    #[error("missing closing ']'")]
    UnclosedBracket,
    #[error("expected a file between 'a' and 'h', found {0}")]
    ExpectedFile(String),
    #[error("expected a rank between '1' and '8', found {0}")]
    ExpectedRank(String),
    #[error("the range '{0}' must go from low to high")]
    UnorderedRange(String),
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// Describes the next char of some input for error messages.
pub fn describe_next(c: Option<char>) -> String {
    match c {
        None => "the end of the input".to_string(),
        Some(c) => format!("'{c}'"),
    }
}
