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
use crate::general::squares::{DimT, FILE_NAMES, NUM_FILES, NUM_RANKS, Square};
use colored::{Color, Colorize};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Draws the board with rank 8 at the top, marking the given squares with `x`.
pub fn square_diagram(squares: impl IntoIterator<Item = Square>) -> String {
    let squares: BTreeSet<Square> = squares.into_iter().collect();
    let mut res = String::default();
    for rank in (0..NUM_RANKS as DimT).rev() {
        let mut line = String::default();
        for file in 0..NUM_FILES as DimT {
            let cell = if squares.contains(&Square::new(file, rank)) {
                "x".color(Color::Red).bold()
            } else {
                ".".color(Color::BrightBlack)
            };
            _ = write!(line, "{cell} ");
        }
        _ = writeln!(res, "{line}{}", rank + 1);
    }
    res + &itertools::intersperse(FILE_NAMES.iter(), &' ').collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designator::PieceDesignator;
    use itertools::Itertools;

    #[test]
    fn diagram_test() {
        colored::control::set_override(false);
        let designator: PieceDesignator = "K[a1,c-d7-8]".parse().unwrap();
        let diagram = square_diagram(designator.designator_set().into_iter().map(|(_, square)| square));
        let lines = diagram.lines().collect_vec();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], ". . x x . . . . 8");
        assert_eq!(lines[1], ". . x x . . . . 7");
        assert_eq!(lines[2], ". . . . . . . . 6");
        assert_eq!(lines[7], "x . . . . . . . 1");
        assert_eq!(lines[8], "a b c d e f g h");
    }
}
