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

//! Expansion of transform filters.
//!
//! A transform filter like `flip {Kb1 kg6}` matches if its argument matches in any of the transformed
//! positions. Expanding it appends one transformed copy of the argument per non-identity transformation to the
//! children of the transform node, which is then read as the `or` of its children.

use crate::designator::ShiftLimits;
use crate::filter::{FilterNode, TransformKind};
use crate::general::common::{Res, Strictness, TransformError};
use crate::general::squares::{Axis, ShiftOffset};
use crate::general::tables::{FLIP_GROUP, ROTATIONS, Symmetry};
use crate::output::square_diagram;
use itertools::Itertools;
use log::{Level, debug, log_enabled, trace};


/// Expands every transform filter in the tree rooted at `root`, including `root` itself.
///
/// Nested transforms are expanded first, so the copies made for an outer transform contain the already expanded
/// inner ones. The first error aborts the expansion; transforms expanded up to that point are not undone.
pub fn expand_transforms(root: &mut FilterNode) -> Res<()> {
    expand_transforms_with(root, Strictness::Relaxed)
}

/// Like [`expand_transforms`], but `Strict` rejects unordered ranges in piece designators and `rotate45` over
/// piece designators without squares.
pub fn expand_transforms_with(root: &mut FilterNode, strictness: Strictness) -> Res<()> {
    for child in root.children_mut() {
        expand_transforms_with(child, strictness)?;
    }
    let Some(kind) = root.token().transform_kind() else {
        return Ok(());
    };
    let clones = Scaffold::new(root, kind, strictness)?.transformed_children()?;
    debug!("'{kind}' generated {} transformed filters", clones.len());
    root.append_children(clones);
    Ok(())
}

/// One labelled diagram per piece designator anywhere in the subtree whose designator set has been expanded.
fn designator_diagrams(node: &FilterNode) -> Vec<String> {
    let mut res = vec![];
    if let Some(set) = node.designator_set() {
        res.push(format!("{node}:\n{}", square_diagram(set.iter().map(|&(_, square)| square))));
    }
    res.extend(node.children().iter().flat_map(designator_diagrams));
    res
}

/// Read only view of one transform node while its transformed children are computed.
struct Scaffold<'a> {
    node: &'a FilterNode,
    kind: TransformKind,
    limits: ShiftLimits,
    strictness: Strictness,
}

impl<'a> Scaffold<'a> {
    fn new(node: &'a FilterNode, kind: TransformKind, strictness: Strictness) -> Res<Self> {
        let mut limits = ShiftLimits::default();
        for child in node.children() {
            child.shift_limits(&mut limits, strictness)?;
        }
        debug!(
            "expanding '{kind}': file shifts {:?}, rank shifts {:?}",
            limits.window(Axis::File),
            limits.window(Axis::Rank)
        );
        Ok(Self { node, kind, limits, strictness })
    }

    fn transformed_children(&self) -> Res<Vec<FilterNode>> {
        match self.kind {
            TransformKind::Flip => self.remapped(&FLIP_GROUP),
            TransformKind::FlipHorizontal => self.remapped(&[Symmetry::ReflectHorizontal]),
            TransformKind::FlipVertical => self.remapped(&[Symmetry::ReflectVertical]),
            TransformKind::Rotate90 => self.remapped(&ROTATIONS),
            TransformKind::Rotate45 => self.rotate_45(),
            TransformKind::FlipColor => self.color_flipped(),
            TransformKind::Shift => self.shifted(&[Axis::File, Axis::Rank]),
            TransformKind::ShiftHorizontal => self.shifted(&[Axis::File]),
            TransformKind::ShiftVertical => self.shifted(&[Axis::Rank]),
        }
    }

    fn trace_clone(&self, clone: &FilterNode, transformation: &dyn std::fmt::Display) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        trace!("'{}' {transformation}: {clone}", self.kind);
        let mut clone = clone.clone();
        if clone.expand_piece_designators(self.strictness).is_ok() {
            for diagram in designator_diagrams(&clone) {
                trace!("{diagram}");
            }
        }
    }

    /// One copy of every child per symmetry, grouped by symmetry.
    fn remapped(&self, symmetries: &[Symmetry]) -> Res<Vec<FilterNode>> {
        if !self.limits.has_qualified_squares() {
            return Ok(vec![]);
        }
        let mut res = Vec::with_capacity(symmetries.len() * self.node.children().len());
        for symmetry in symmetries {
            for child in self.node.children() {
                let mut clone = child.clone();
                clone.remap(symmetry.remap(), self.strictness)?;
                self.trace_clone(&clone, &format_args!("{symmetry:?}"));
                res.push(clone);
            }
        }
        Ok(res)
    }

    fn rotate_45(&self) -> Res<Vec<FilterNode>> {
        match (self.limits.has_qualified_squares(), self.strictness) {
            (true, _) => Err(TransformError::Rotate45OnSquares),
            (false, Strictness::Relaxed) => Ok(vec![]),
            (false, Strictness::Strict) => Err(TransformError::Rotate45NotImplemented),
        }
    }

    /// Colors change even if no designator names squares, so there is always one copy per child.
    fn color_flipped(&self) -> Res<Vec<FilterNode>> {
        self.node
            .children()
            .iter()
            .map(|child| {
                let mut clone = child.clone();
                clone.flip_color(self.strictness)?;
                self.trace_clone(&clone, &"flipped");
                Ok(clone)
            })
            .collect()
    }

    /// The offsets `shift` and its one-directional variants try, in order: ranks in the outer loop, files in the
    /// inner loop, each axis going `0, 1, .., max, min, .., -1`. Axes that are not shifted, or along which no
    /// designator has squares to move, only contribute 0.
    fn offsets(&self, axes: &[Axis]) -> Vec<ShiftOffset> {
        let along = |axis: Axis| match self.limits.window(axis) {
            Some(window) if axes.contains(&axis) => window.offsets().collect_vec(),
            _ => vec![0],
        };
        along(Axis::Rank)
            .into_iter()
            .cartesian_product(along(Axis::File))
            .map(|(ranks, files)| ShiftOffset { files, ranks })
            .filter(|offset| !offset.is_identity())
            .collect()
    }

    /// Every candidate copy is kept only if all of its piece designators still have at least one square left.
    fn shifted(&self, axes: &[Axis]) -> Res<Vec<FilterNode>> {
        let mut res = vec![];
        for offset in self.offsets(axes) {
            for child in self.node.children() {
                let mut clone = child.clone();
                if clone.shift(offset, self.strictness)? {
                    self.trace_clone(&clone, &offset);
                    res.push(clone);
                } else {
                    trace!("'{}' {offset}: a piece designator would leave the board", self.kind);
                }
            }
        }
        Ok(res)
    }
}
