//! Board dimensions and text rendering of solutions.
//!
//! A rendered grid is a leading newline followed by one line per board row,
//! each terminated by a newline. Uncovered cells are blank.

use serde::{Deserialize, Serialize};

use crate::placement::Placement;

/// Character used for cells no placement covers.
pub const BLANK: char = ' ';

/// Width and height of the board, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    /// Number of cells, which is also the number of cell-coverage columns.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// Paints each placement's symbol onto a `height x width` character grid.
///
/// Later placements overwrite earlier ones on shared cells.
pub fn solution_to_grid(solution: &[Placement<'_>], grid: GridSize) -> Vec<Vec<char>> {
    let mut cells = vec![vec![BLANK; grid.width]; grid.height];

    for placement in solution {
        for (col, row) in placement.cells() {
            cells[row as usize][col as usize] = placement.piece.symbol;
        }
    }

    cells
}

/// Renders one solution as text.
///
/// ```text
/// "\n" + row 0 + "\n" + row 1 + "\n" + ...
/// ```
pub fn format_solution(solution: &[Placement<'_>], grid: GridSize) -> String {
    let mut output = String::with_capacity((grid.width + 1) * grid.height + 1);
    output.push('\n');
    for row in solution_to_grid(solution, grid) {
        output.extend(row);
        output.push('\n');
    }
    output
}

/// Renders a numbered listing of many solutions.
pub fn format_report(solutions: &[Vec<Placement<'_>>], grid: GridSize) -> String {
    let mut output = format!("Found {} solutions:\n\n", solutions.len());
    for (i, solution) in solutions.iter().enumerate() {
        output.push_str(&format!("Solution {}:\n", i + 1));
        output.push_str(&format_solution(solution, grid));
        output.push('\n');
    }
    output
}
