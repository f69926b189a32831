//! [`mirrors`](crate) expands the geometric transform filters of the Chess Query Language (CQL).
//!
//! A transform filter such as `flip`, `rotate90`, `shift` or `flipcolor` matches a position if its argument matches
//! any transformed version of that position. [`expand_transforms`] rewrites a parsed filter tree so that every
//! transform node additionally holds the transformed copies of its argument as explicit children, which turns it
//! into a disjunction that can be evaluated without knowing about transforms at all.
//!
//! The crate is organized as follows:
//! - [`general`] contains the board coordinates and the tables describing the symmetries of the board
//! - [`designator`] parses and rewrites piece designators like `Ra1-8` or `[Aa][b2,b4]`
//! - [`filter`] is the filter tree
//! - [`transform`] expands the transform filters of a tree

pub use crate::designator::{AxisLimits, DesignatorSet, PieceDesignator, ShiftLimits};
pub use crate::filter::{FilterNode, Token, TransformKind};
pub use crate::general::common::{DesignatorErrorKind, Res, Strictness, TransformError};
pub use crate::transform::{expand_transforms, expand_transforms_with};
pub use colored;
pub use strum;

/// Piece designators: parsing, serialization and the geometric operations on them.
pub mod designator;
/// The filter tree that transforms operate on.
pub mod filter;
/// Board coordinates, symmetry tables and other low level helpers.
pub mod general;
/// Text rendering of square sets, mostly for debug output.
pub mod output;
/// Expansion of `flip`, `rotate90`, `shift` and the other transform filters.
pub mod transform;
