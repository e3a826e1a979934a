//! Dancing Links exact-cover search.
//!
//! The sparse matrix is an arena: column headers and cells live in flat
//! vectors and refer to each other by index. Header 0 is the root of the
//! header ring and every header owns a sentinel cell heading its vertical
//! ring. Rows are only reachable through the columns they occupy.
//!
//! Detaching a cell rewires its neighbours around it and leaves the cell's
//! own `up`/`down` untouched, so reattaching is done from those stale links.
//! Cover and uncover walk a column's ring in the same direction.

use log::debug;

use crate::error::{PuzzleError, Result};

/// Index of the root header.
const ROOT: usize = 0;

/// Row index stored in sentinel cells, which belong to no row.
const NO_ROW: usize = usize::MAX;

/// Payload of one exact-cover row: tells the matrix which columns it fills.
pub trait ExactCoverRow {
    fn is_column_occupied(&self, column: usize) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Header {
    left: usize,
    right: usize,
    /// Sentinel cell of the vertical ring.
    root: usize,
    /// Number of attached cells in the vertical ring.
    count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    up: usize,
    down: usize,
    /// Header index this cell belongs to.
    column: usize,
    row: usize,
    detached: bool,
}

#[derive(Clone, Debug)]
struct Row<T> {
    cells: Vec<usize>,
    info: T,
}

/// A toroidal sparse boolean matrix, built once per solve.
#[derive(Clone, Debug)]
pub struct Matrix<T> {
    headers: Vec<Header>,
    cells: Vec<Cell>,
    rows: Vec<Row<T>>,
    /// Search nodes entered so far.
    nodes: u64,
}

impl<T: ExactCoverRow> Matrix<T> {
    /// Builds the matrix for `num_columns` columns from the given rows.
    ///
    /// Columns are linked into the header ring in index order and each row's
    /// cells are appended at the tail of their column rings.
    pub fn new(rows: impl IntoIterator<Item = T>, num_columns: usize) -> Self {
        let mut matrix = Self {
            headers: Vec::with_capacity(num_columns + 1),
            cells: Vec::with_capacity(num_columns + 1),
            rows: Vec::new(),
            nodes: 0,
        };

        // root first, so the ring starts and ends at index 0
        for _ in 0..=num_columns {
            matrix.push_header();
        }
        for info in rows {
            matrix.push_row(info, num_columns);
        }

        debug!(
            "built exact-cover matrix: {} columns, {} rows, {} cells",
            num_columns,
            matrix.rows.len(),
            matrix.cells.len() - matrix.headers.len()
        );

        matrix
    }

    fn push_header(&mut self) {
        let index = self.headers.len();
        let sentinel = self.cells.len();
        self.cells.push(Cell {
            up: sentinel,
            down: sentinel,
            column: index,
            row: NO_ROW,
            detached: false,
        });

        let left = self.headers.get(ROOT).map_or(index, |root| root.left);
        self.headers.push(Header {
            left,
            right: ROOT,
            root: sentinel,
            count: 0,
        });
        self.headers[left].right = index;
        self.headers[ROOT].left = index;
    }

    fn push_row(&mut self, info: T, num_columns: usize) {
        let row = self.rows.len();
        let mut cells = Vec::new();

        for column in (0..num_columns).filter(|&c| info.is_column_occupied(c)) {
            let header = column + 1;
            let sentinel = self.headers[header].root;
            let tail = self.cells[sentinel].up;
            let cell = self.cells.len();

            self.cells.push(Cell {
                up: tail,
                down: sentinel,
                column: header,
                row,
                detached: false,
            });
            self.cells[tail].down = cell;
            self.cells[sentinel].up = cell;
            self.headers[header].count += 1;
            cells.push(cell);
        }

        self.rows.push(Row { cells, info });
    }
}

impl<T> Matrix<T> {
    /// Number of search nodes entered so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    fn is_solved(&self) -> bool {
        self.headers[ROOT].right == ROOT
    }

    /// Picks the active column with the fewest attached cells.
    ///
    /// Ties go to the first such column in ring order.
    fn select_column(&self) -> Option<usize> {
        let mut best = self.headers[ROOT].right;
        if best == ROOT {
            return None;
        }

        let mut column = self.headers[best].right;
        while column != ROOT {
            if self.headers[column].count < self.headers[best].count {
                best = column;
            }
            column = self.headers[column].right;
        }
        Some(best)
    }

    /// Removes `column` from the header ring after detaching every other
    /// cell of each row that passes through it.
    fn cover(&mut self, column: usize) -> Result<()> {
        let sentinel = self.headers[column].root;
        let mut cell = self.cells[sentinel].down;
        while cell != sentinel {
            let row = self.cells[cell].row;
            self.detach_row(row, column)?;
            cell = self.cells[cell].down;
        }

        let Header { left, right, .. } = self.headers[column];
        self.headers[left].right = right;
        self.headers[right].left = left;
        Ok(())
    }

    /// Relinks `column` into the header ring and reattaches the rows that
    /// `cover` detached.
    fn uncover(&mut self, column: usize) {
        let Header { left, right, .. } = self.headers[column];
        self.headers[left].right = column;
        self.headers[right].left = column;

        let sentinel = self.headers[column].root;
        let mut cell = self.cells[sentinel].down;
        while cell != sentinel {
            let row = self.cells[cell].row;
            self.reattach_row(row);
            cell = self.cells[cell].down;
        }
    }

    fn detach_row(&mut self, row: usize, skip_column: usize) -> Result<()> {
        for i in 0..self.rows[row].cells.len() {
            let cell = self.rows[row].cells[i];
            let Cell {
                up,
                down,
                column,
                detached,
                ..
            } = self.cells[cell];
            if column == skip_column || detached {
                continue;
            }

            let header = &mut self.headers[column];
            header.count = header
                .count
                .checked_sub(1)
                .ok_or(PuzzleError::CorruptedMatrix { column: column - 1 })?;

            self.cells[up].down = down;
            self.cells[down].up = up;
            self.cells[cell].detached = true;
        }
        Ok(())
    }

    fn reattach_row(&mut self, row: usize) {
        for i in 0..self.rows[row].cells.len() {
            let cell = self.rows[row].cells[i];
            let Cell {
                up,
                down,
                column,
                detached,
                ..
            } = self.cells[cell];
            if !detached {
                continue;
            }

            self.cells[up].down = cell;
            self.cells[down].up = cell;
            self.headers[column].count += 1;
            self.cells[cell].detached = false;
        }
    }

    /// Algorithm X over the current matrix.
    ///
    /// Returns the first complete row set found below this node. With an
    /// accumulator, every solution is pushed into it instead and the search
    /// runs to exhaustion, always returning `None` at the top.
    fn search(
        &mut self,
        partial: &mut Vec<usize>,
        mut all: Option<&mut Vec<Vec<usize>>>,
    ) -> Result<Option<Vec<usize>>> {
        self.nodes += 1;

        let Some(column) = self.select_column() else {
            return Ok(Some(partial.clone()));
        };

        let sentinel = self.headers[column].root;
        let mut candidate = self.cells[sentinel].down;
        while candidate != sentinel {
            let row = self.cells[candidate].row;
            partial.push(row);
            for i in 0..self.rows[row].cells.len() {
                let covered = self.cells[self.rows[row].cells[i]].column;
                self.cover(covered)?;
            }

            if let Some(solution) = self.search(partial, all.as_deref_mut())? {
                match all.as_deref_mut() {
                    Some(solutions) => solutions.push(solution),
                    None => return Ok(Some(solution)),
                }
            }

            for i in 0..self.rows[row].cells.len() {
                let covered = self.cells[self.rows[row].cells[i]].column;
                self.uncover(covered);
            }
            partial.pop();
            candidate = self.cells[candidate].down;
        }

        Ok(None)
    }
}

impl<T: Clone> Matrix<T> {
    fn infos(&self, rows: &[usize]) -> Vec<T> {
        rows.iter().map(|&row| self.rows[row].info.clone()).collect()
    }

    /// Searches for one exact cover.
    ///
    /// The matrix is left partially covered when a solution is found.
    pub fn solve_first(&mut self) -> Result<Option<Vec<T>>> {
        let solution = self.search(&mut Vec::new(), None)?;
        debug!("first-solution search visited {} nodes", self.nodes);
        Ok(solution.map(|rows| self.infos(&rows)))
    }

    /// Enumerates every exact cover.
    pub fn solve_all(&mut self) -> Result<Vec<Vec<T>>> {
        let mut found = Vec::new();
        if self.is_solved() {
            // nothing to cover: the empty selection is the only solution
            found.push(Vec::new());
        } else {
            self.search(&mut Vec::new(), Some(&mut found))?;
        }
        debug!(
            "all-solutions search visited {} nodes, found {}",
            self.nodes,
            found.len()
        );
        Ok(found.iter().map(|rows| self.infos(rows)).collect())
    }
}

/// Finds the first exact cover of `num_columns` columns by `rows`.
pub fn solve<T: ExactCoverRow + Clone>(rows: Vec<T>, num_columns: usize) -> Result<Option<Vec<T>>> {
    Matrix::new(rows, num_columns).solve_first()
}

/// Finds every exact cover of `num_columns` columns by `rows`.
pub fn solve_all<T: ExactCoverRow + Clone>(rows: Vec<T>, num_columns: usize) -> Result<Vec<Vec<T>>> {
    Matrix::new(rows, num_columns).solve_all()
}
