//! Puzzle solving entry points.
//!
//! Each call encodes the puzzle as exact-cover rows, builds a fresh matrix
//! and searches it. Nothing is shared between calls, so separate solves may
//! run on separate threads.

use log::info;

use crate::dlx::Matrix;
use crate::error::Result;
use crate::grid::format_solution;
use crate::pieces::Puzzle;
use crate::placement::{generate_rows, Pin, Placement};

impl Puzzle {
    fn matrix(&self, pins: &[Pin]) -> Matrix<Placement<'_>> {
        Matrix::new(generate_rows(self, pins), self.num_columns())
    }

    /// Finds one tiling, or `None` if the board cannot be tiled.
    ///
    /// The result holds one placement per piece. Identical input always
    /// yields the identical first solution.
    pub fn solve_first(&self, pins: &[Pin]) -> Result<Option<Vec<Placement<'_>>>> {
        let mut matrix = self.matrix(pins);
        let solution = matrix.solve_first()?;
        info!(
            "first-solution search {} after {} nodes",
            if solution.is_some() { "succeeded" } else { "failed" },
            matrix.nodes()
        );
        Ok(solution)
    }

    /// Finds every tiling.
    ///
    /// There is no cap on the number of solutions; callers must keep the
    /// puzzle small enough, for example by pinning pieces.
    pub fn solve_all(&self, pins: &[Pin]) -> Result<Vec<Vec<Placement<'_>>>> {
        let mut matrix = self.matrix(pins);
        let solutions = matrix.solve_all()?;
        info!(
            "found {} solutions after {} nodes",
            solutions.len(),
            matrix.nodes()
        );
        Ok(solutions)
    }

    /// Number of tilings.
    pub fn count_solutions(&self, pins: &[Pin]) -> Result<usize> {
        Ok(self.solve_all(pins)?.len())
    }

    /// Renders the first tiling, or `None` if there is none.
    pub fn solve_first_grid(&self, pins: &[Pin]) -> Result<Option<String>> {
        Ok(self
            .solve_first(pins)?
            .map(|solution| format_solution(&solution, self.grid)))
    }
}
