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

//! The filter tree produced by a CQL parser, reduced to what transforms need to know about it.

use crate::designator::{DesignatorSet, PieceDesignator, ShiftLimits};
use crate::general::common::{Res, Strictness, TransformError};
use crate::general::squares::ShiftOffset;
use crate::general::tables::{FLIP_COLOR_FILTER, FLIP_COLOR_RESULT, FLIP_COLOR_TOMOVE, Remap, swapped};
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The type of a filter node, spelled the way it appears in CQL.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "lowercase")]
#[must_use]
pub enum Token {
    #[strum(serialize = "piece_designator")]
    PieceDesignator,
    /// A filter without arguments, like `check` or `wtm`. The leaf holds its name.
    #[strum(serialize = "plain_filter")]
    PlainFilter,
    #[strum(serialize = "{")]
    Compound,
    Or,
    And,
    Not,
    Attack,
    Ray,
    Between,
    Result,
    Player,
    Elo,
    White,
    Black,
    Flip,
    FlipHorizontal,
    FlipVertical,
    Rotate90,
    Rotate45,
    FlipColor,
    Shift,
    ShiftHorizontal,
    ShiftVertical,
}

/// The filters that are expanded into a disjunction of transformed copies of their argument.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TransformKind {
    Flip,
    FlipHorizontal,
    FlipVertical,
    Rotate90,
    Rotate45,
    FlipColor,
    Shift,
    ShiftHorizontal,
    ShiftVertical,
}

impl Token {
    pub fn transform_kind(self) -> Option<TransformKind> {
        Some(match self {
            Token::Flip => TransformKind::Flip,
            Token::FlipHorizontal => TransformKind::FlipHorizontal,
            Token::FlipVertical => TransformKind::FlipVertical,
            Token::Rotate90 => TransformKind::Rotate90,
            Token::Rotate45 => TransformKind::Rotate45,
            Token::FlipColor => TransformKind::FlipColor,
            Token::Shift => TransformKind::Shift,
            Token::ShiftHorizontal => TransformKind::ShiftHorizontal,
            Token::ShiftVertical => TransformKind::ShiftVertical,
            Token::PieceDesignator
            | Token::PlainFilter
            | Token::Compound
            | Token::Or
            | Token::And
            | Token::Not
            | Token::Attack
            | Token::Ray
            | Token::Between
            | Token::Result
            | Token::Player
            | Token::Elo
            | Token::White
            | Token::Black => return None,
        })
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl TransformKind {
    pub fn token(self) -> Token {
        match self {
            TransformKind::Flip => Token::Flip,
            TransformKind::FlipHorizontal => Token::FlipHorizontal,
            TransformKind::FlipVertical => Token::FlipVertical,
            TransformKind::Rotate90 => Token::Rotate90,
            TransformKind::Rotate45 => Token::Rotate45,
            TransformKind::FlipColor => Token::FlipColor,
            TransformKind::Shift => Token::Shift,
            TransformKind::ShiftHorizontal => Token::ShiftHorizontal,
            TransformKind::ShiftVertical => Token::ShiftVertical,
        }
    }
}

/// A node of a filter tree.
///
/// Besides the structural fields, a node can hold the explicit designator set of its piece designator, which is
/// derived data. Cloning a node goes through [`FilterNode::new`], so a copy never carries a cached set over from
/// the node it was cloned from.
#[derive(Debug)]
pub struct FilterNode {
    token: Token,
    leaf: Option<String>,
    children: Vec<FilterNode>,
    designators: Option<DesignatorSet>,
}

impl FilterNode {
    pub fn new(token: Token, leaf: Option<String>, children: Vec<FilterNode>) -> Self {
        Self { token, leaf, children, designators: None }
    }

    pub fn designator(text: &str) -> Self {
        Self::new(Token::PieceDesignator, Some(text.to_string()), vec![])
    }

    pub fn plain(name: &str) -> Self {
        Self::new(Token::PlainFilter, Some(name.to_string()), vec![])
    }

    pub fn compound(children: Vec<FilterNode>) -> Self {
        Self::new(Token::Compound, None, children)
    }

    pub fn with_children(token: Token, children: Vec<FilterNode>) -> Self {
        Self::new(token, None, children)
    }

    pub fn with_leaf(token: Token, leaf: &str) -> Self {
        Self::new(token, Some(leaf.to_string()), vec![])
    }

    pub fn transform(kind: TransformKind, argument: FilterNode) -> Self {
        Self::new(kind.token(), None, vec![argument])
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn leaf(&self) -> Option<&str> {
        self.leaf.as_deref()
    }

    pub fn children(&self) -> &[FilterNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [FilterNode] {
        &mut self.children
    }

    pub(crate) fn append_children(&mut self, nodes: Vec<FilterNode>) {
        self.children.extend(nodes);
    }

    /// The explicit set filled in by [`Self::expand_piece_designators`], if this is a piece designator.
    pub fn designator_set(&self) -> Option<&DesignatorSet> {
        self.designators.as_ref()
    }

    /// Parses the leaf text of a piece designator node.
    pub fn piece_designator(&self, strictness: Strictness) -> Res<PieceDesignator> {
        debug_assert_eq!(self.token, Token::PieceDesignator);
        let text = self.leaf.as_deref().ok_or(TransformError::MissingDesignatorText)?;
        PieceDesignator::parse(text, strictness)
    }

    fn set_piece_designator(&mut self, designator: &PieceDesignator) {
        self.leaf = Some(designator.to_string());
        self.designators = None;
    }

    fn try_for_each_designator(
        &mut self,
        strictness: Strictness,
        f: &mut impl FnMut(PieceDesignator) -> Option<PieceDesignator>,
    ) -> Res<bool> {
        if self.token == Token::PieceDesignator {
            let Some(rewritten) = f(self.piece_designator(strictness)?) else {
                return Ok(false);
            };
            self.set_piece_designator(&rewritten);
        }
        for child in &mut self.children {
            if !child.try_for_each_designator(strictness, f)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Narrows `limits` to the shifts that keep every piece designator in this subtree non-empty.
    pub fn shift_limits(&self, limits: &mut ShiftLimits, strictness: Strictness) -> Res<()> {
        if self.token == Token::PieceDesignator {
            self.piece_designator(strictness)?.shift_limits(limits);
        }
        for child in &self.children {
            child.shift_limits(limits, strictness)?;
        }
        Ok(())
    }

    /// Rewrites the squares of every piece designator in this subtree.
    pub fn remap(&mut self, remap: &Remap, strictness: Strictness) -> Res<()> {
        self.try_for_each_designator(strictness, &mut |d| Some(d.remapped(remap)))?;
        Ok(())
    }

    /// Shifts every piece designator in this subtree. Returns `false` if some designator loses all of its squares,
    /// in which case the subtree is left partially shifted and should be discarded.
    pub fn shift(&mut self, offset: ShiftOffset, strictness: Strictness) -> Res<bool> {
        self.try_for_each_designator(strictness, &mut |d| d.shifted(offset))
    }

    /// Swaps the colors of everything in this subtree: pieces, the side to move, `white`/`black` filters and results.
    pub fn flip_color(&mut self, strictness: Strictness) -> Res<()> {
        match self.token {
            Token::PieceDesignator => {
                let flipped = self.piece_designator(strictness)?.color_flipped();
                self.set_piece_designator(&flipped);
            }
            Token::PlainFilter | Token::Result => {
                let table = if self.token == Token::Result { &FLIP_COLOR_RESULT } else { &FLIP_COLOR_TOMOVE };
                if let Some(flipped) = self.leaf.as_deref().and_then(|leaf| swapped(table, leaf)) {
                    self.leaf = Some(flipped.to_string());
                }
            }
            token => {
                if let Some(flipped) = swapped(&FLIP_COLOR_FILTER, token) {
                    self.token = flipped;
                }
            }
        }
        for child in &mut self.children {
            child.flip_color(strictness)?;
        }
        Ok(())
    }

    /// Computes and caches the explicit designator set of every piece designator in this subtree.
    pub fn expand_piece_designators(&mut self, strictness: Strictness) -> Res<()> {
        if self.token == Token::PieceDesignator && self.designators.is_none() {
            self.designators = Some(self.piece_designator(strictness)?.designator_set());
        }
        for child in &mut self.children {
            child.expand_piece_designators(strictness)?;
        }
        Ok(())
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(FilterNode::size).sum::<usize>()
    }
}

impl Clone for FilterNode {
    fn clone(&self) -> Self {
        Self::new(self.token, self.leaf.clone(), self.children.clone())
    }
}

impl PartialEq for FilterNode {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token && self.leaf == other.leaf && self.children == other.children
    }
}

impl Eq for FilterNode {}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.token {
            Token::PieceDesignator | Token::PlainFilter => write!(f, "{}", self.leaf.as_deref().unwrap_or_default()),
            Token::Compound => write!(f, "{{{}}}", self.children.iter().join(" ")),
            Token::Or | Token::And => {
                write!(f, "({})", self.children.iter().join(&format!(" {} ", self.token.name())))
            }
            token => {
                write!(f, "{}", token.name())?;
                if let Some(leaf) = &self.leaf {
                    write!(f, " {leaf}")?;
                }
                let separator = if token.transform_kind().is_some() { " or " } else { " " };
                match self.children.as_slice() {
                    [] => Ok(()),
                    [child] => write!(f, " {child}"),
                    children => write!(f, " ({})", children.iter().join(separator)),
                }
            }
        }
    }
}
