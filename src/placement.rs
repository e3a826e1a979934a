//! Exact-cover encoding of piece placements.
//!
//! Every legal (piece, rotation, flip, position) becomes one matrix row. The
//! first `width * height` columns are grid cells in row-major order; the
//! remaining columns, one per piece, force each piece to be used exactly once.

use std::str::FromStr;

use log::{debug, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::dlx::ExactCoverRow;
use crate::error::PuzzleError;
use crate::geometry::{Coord, Rotation, FLIPS, ROTATIONS};
use crate::grid::GridSize;
use crate::pieces::{Piece, Puzzle};

/// One oriented piece at a top-left grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement<'a> {
    pub piece: &'a Piece,
    pub rotation: Rotation,
    pub flipped: bool,
    pub col: usize,
    pub row: usize,
    pub grid: GridSize,
}

impl Placement<'_> {
    /// Whether this placement covers absolute grid cell `(col, row)`.
    pub fn covers(&self, col: usize, row: usize) -> bool {
        // cells left of or above the anchor are never part of the piece
        let (Some(local_col), Some(local_row)) =
            (local_offset(col, self.col), local_offset(row, self.row))
        else {
            return false;
        };
        self.piece
            .is_occupied(local_col, local_row, self.rotation, self.flipped)
    }

    /// Absolute grid cells covered by this placement.
    ///
    /// A pinned placement may hang over the board edge; only on-board cells
    /// are returned.
    pub fn cells(&self) -> Vec<Coord> {
        self.piece
            .tiles(self.rotation, self.flipped)
            .into_iter()
            .filter_map(|(col, row)| {
                let col = self.col.checked_add(col as usize)?;
                let row = self.row.checked_add(row as usize)?;
                if col >= self.grid.width || row >= self.grid.height {
                    return None;
                }
                Some((i32::try_from(col).ok()?, i32::try_from(row).ok()?))
            })
            .collect()
    }

    /// Signature of this placement's orientation.
    pub fn signature(&self) -> u64 {
        self.piece.signature(self.rotation, self.flipped)
    }

    /// Whether this placement is identical to `pin`.
    pub fn matches(&self, pin: &Pin) -> bool {
        self.piece.symbol == pin.symbol
            && self.rotation == pin.rotation
            && self.flipped == pin.flip
            && self.col == pin.col
            && self.row == pin.row
    }
}

/// Offset of `cell` from `origin`, if it is non-negative and fits local space.
fn local_offset(cell: usize, origin: usize) -> Option<i32> {
    cell.checked_sub(origin)
        .and_then(|offset| i32::try_from(offset).ok())
}

impl ExactCoverRow for Placement<'_> {
    fn is_column_occupied(&self, column: usize) -> bool {
        let cell_count = self.grid.cell_count();
        if column < cell_count {
            self.covers(column % self.grid.width, column / self.grid.width)
        } else {
            column - cell_count == self.piece.index
        }
    }
}

/// A placement fixed in advance by the caller.
///
/// Parses from `SYMBOL,ROTATION,FLIP,COL,ROW`, e.g. `A,90,true,3,0`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    pub symbol: char,
    pub rotation: Rotation,
    #[serde(default, alias = "flipState")]
    pub flip: bool,
    pub col: usize,
    pub row: usize,
}

impl From<&Placement<'_>> for Pin {
    fn from(placement: &Placement<'_>) -> Self {
        Self {
            symbol: placement.piece.symbol,
            rotation: placement.rotation,
            flip: placement.flipped,
            col: placement.col,
            row: placement.row,
        }
    }
}

impl FromStr for Pin {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| PuzzleError::InvalidPin {
            input: s.to_owned(),
            reason,
        };

        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let [symbol, rotation, flip, col, row] = fields[..] else {
            return Err(invalid(format!(
                "expected SYMBOL,ROTATION,FLIP,COL,ROW, got {} fields",
                fields.len()
            )));
        };

        let mut chars = symbol.chars();
        let (Some(symbol), None) = (chars.next(), chars.next()) else {
            return Err(invalid(format!("symbol '{symbol}' must be one character")));
        };
        let rotation: Rotation = rotation.parse().map_err(invalid)?;
        let flip: bool = flip
            .parse()
            .map_err(|_| invalid(format!("flip '{flip}' must be true or false")))?;
        let col: usize = col
            .parse()
            .map_err(|_| invalid(format!("column '{col}' is not a grid index")))?;
        let row: usize = row
            .parse()
            .map_err(|_| invalid(format!("row '{row}' is not a grid index")))?;

        Ok(Self {
            symbol,
            rotation,
            flip,
            col,
            row,
        })
    }
}

/// Enumerates every exact-cover row for the puzzle.
///
/// Pinned pieces contribute exactly their pinned placement. Every other piece
/// contributes each distinct orientation (by signature, per piece) at every
/// position where its bounding box fits the grid. A pin whose orientation
/// signature was already recorded for the same piece is dropped, so the first
/// pin for a given orientation wins.
pub fn generate_rows<'a>(puzzle: &'a Puzzle, pins: &[Pin]) -> Vec<Placement<'a>> {
    let grid = puzzle.grid;
    let mut rows = Vec::new();
    let mut seen: FxHashSet<(usize, u64)> = FxHashSet::default();

    for pin in pins {
        let Some(piece) = puzzle.piece_by_symbol(pin.symbol) else {
            warn!("ignoring pin for unknown piece '{}'", pin.symbol);
            continue;
        };

        let signature = piece.signature(pin.rotation, pin.flip);
        if !seen.insert((piece.index, signature)) {
            warn!(
                "dropping pin {},{},{},{},{}: orientation already pinned",
                pin.symbol, pin.rotation, pin.flip, pin.col, pin.row
            );
            continue;
        }

        let fits = |origin: usize, extent: usize, limit: usize| {
            origin.checked_add(extent).is_some_and(|end| end <= limit)
        };
        if !fits(pin.col, piece.width(pin.rotation), grid.width)
            || !fits(pin.row, piece.height(pin.rotation), grid.height)
        {
            warn!("pin for piece '{}' extends past the grid edge", pin.symbol);
        }

        rows.push(Placement {
            piece,
            rotation: pin.rotation,
            flipped: pin.flip,
            col: pin.col,
            row: pin.row,
            grid,
        });
    }

    let pinned_rows = rows.len();

    for piece in &puzzle.pieces {
        if pins.iter().any(|pin| pin.symbol == piece.symbol) {
            continue;
        }

        for rotation in ROTATIONS {
            for flipped in FLIPS {
                // symmetric orientations cover identical cells
                if !seen.insert((piece.index, piece.signature(rotation, flipped))) {
                    continue;
                }

                let (Some(max_col), Some(max_row)) = (
                    grid.width.checked_sub(piece.width(rotation)),
                    grid.height.checked_sub(piece.height(rotation)),
                ) else {
                    continue;
                };

                for row in 0..=max_row {
                    for col in 0..=max_col {
                        rows.push(Placement {
                            piece,
                            rotation,
                            flipped,
                            col,
                            row,
                            grid,
                        });
                    }
                }
            }
        }
    }

    debug!(
        "generated {} rows ({} pinned) for {} pieces on a {}x{} grid",
        rows.len(),
        pinned_rows,
        puzzle.pieces.len(),
        grid.width,
        grid.height
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceDescriptor;

    fn domino_puzzle(width: usize, height: usize) -> Puzzle {
        let domino = |symbol| PieceDescriptor {
            symbol,
            color: String::new(),
            width: 2,
            height: 1,
            tiles: vec![(0, 0), (1, 0)],
        };
        Puzzle::new(&[domino('A'), domino('B')], GridSize { width, height }).unwrap()
    }

    fn pin(symbol: char, rotation: Rotation, flip: bool, col: usize, row: usize) -> Pin {
        Pin {
            symbol,
            rotation,
            flip,
            col,
            row,
        }
    }

    fn summary(rows: &[Placement<'_>]) -> Vec<(char, u16, bool, usize, usize)> {
        rows.iter()
            .map(|p| (p.piece.symbol, p.rotation.degrees(), p.flipped, p.col, p.row))
            .collect()
    }

    #[test]
    fn test_rows_enumerate_distinct_orientations_at_every_position() {
        let puzzle = domino_puzzle(2, 2);
        let rows = generate_rows(&puzzle, &[]);
        assert_eq!(
            summary(&rows),
            vec![
                ('A', 0, false, 0, 0),
                ('A', 0, false, 0, 1),
                ('A', 90, false, 0, 0),
                ('A', 90, false, 1, 0),
                ('B', 0, false, 0, 0),
                ('B', 0, false, 0, 1),
                ('B', 90, false, 0, 0),
                ('B', 90, false, 1, 0),
            ]
        );
    }

    #[test]
    fn test_column_membership() {
        let puzzle = domino_puzzle(2, 2);
        let rows = generate_rows(&puzzle, &[]);
        let columns = |placement: &Placement<'_>| -> Vec<usize> {
            (0..puzzle.num_columns())
                .filter(|&c| placement.is_column_occupied(c))
                .collect()
        };
        // A horizontal on the bottom row: cells 2 and 3, then piece column 4
        assert_eq!(columns(&rows[1]), vec![2, 3, 4]);
        // B vertical in the right column: cells 1 and 3, then piece column 5
        assert_eq!(columns(&rows[7]), vec![1, 3, 5]);
    }

    #[test]
    fn test_piece_too_large_for_grid_yields_no_rows() {
        let puzzle = domino_puzzle(1, 1);
        assert!(generate_rows(&puzzle, &[]).is_empty());
    }

    #[test]
    fn test_pinned_piece_contributes_only_its_pin() {
        let puzzle = domino_puzzle(2, 2);
        let rows = generate_rows(&puzzle, &[pin('A', Rotation::Deg90, false, 1, 0)]);
        assert_eq!(
            summary(&rows),
            vec![
                ('A', 90, false, 1, 0),
                ('B', 0, false, 0, 0),
                ('B', 0, false, 0, 1),
                ('B', 90, false, 0, 0),
                ('B', 90, false, 1, 0),
            ]
        );
    }

    #[test]
    fn test_pin_with_duplicate_signature_is_silently_dropped() {
        let puzzle = domino_puzzle(2, 2);
        // 180 degrees of a domino has the same signature as 0 degrees
        let pins = [
            pin('A', Rotation::Deg0, false, 0, 0),
            pin('A', Rotation::Deg180, false, 0, 1),
            pin('A', Rotation::Deg90, false, 0, 0),
        ];
        let rows = generate_rows(&puzzle, &pins);
        let pinned: Vec<_> = summary(&rows)
            .into_iter()
            .filter(|&(symbol, ..)| symbol == 'A')
            .collect();
        assert_eq!(pinned, vec![('A', 0, false, 0, 0), ('A', 90, false, 0, 0)]);
    }

    #[test]
    fn test_pin_for_unknown_piece_is_ignored() {
        let puzzle = domino_puzzle(2, 2);
        let rows = generate_rows(&puzzle, &[pin('Q', Rotation::Deg0, false, 0, 0)]);
        assert_eq!(rows.len(), 8);
    }

    #[test]
    fn test_overhanging_pin_covers_only_on_board_cells() {
        let puzzle = domino_puzzle(2, 2);
        let rows = generate_rows(&puzzle, &[pin('A', Rotation::Deg0, false, 1, 1)]);
        assert_eq!(rows[0].cells(), vec![(1, 1)]);
        assert!(rows[0].is_column_occupied(3));
        assert!(!rows[0].is_column_occupied(2));
    }

    #[test]
    fn test_pin_far_off_the_board_covers_nothing() {
        let puzzle = domino_puzzle(2, 2);
        let rows = generate_rows(&puzzle, &[pin('A', Rotation::Deg0, false, usize::MAX, 0)]);
        assert_eq!(summary(&rows[..1]), vec![('A', 0, false, usize::MAX, 0)]);
        assert!(rows[0].cells().is_empty());
        assert!((0..4).all(|column| !rows[0].is_column_occupied(column)));
        assert!(rows[0].is_column_occupied(4));
    }

    #[test]
    fn test_pin_parsing() {
        let parsed: Pin = "K, 270, true, 8, 3".parse().unwrap();
        assert_eq!(parsed, pin('K', Rotation::Deg270, true, 8, 3));

        for bad in ["K,270,true,8", "KK,0,false,0,0", "K,45,false,0,0", "K,0,yes,0,0", "K,0,false,-1,0"] {
            assert!(
                matches!(bad.parse::<Pin>(), Err(PuzzleError::InvalidPin { .. })),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_pin_json_accepts_flip_state_alias() {
        let parsed: Pin =
            serde_json::from_str(r#"{"symbol":"C","rotation":180,"flipState":true,"col":4,"row":0}"#)
                .unwrap();
        assert_eq!(parsed, pin('C', Rotation::Deg180, true, 4, 0));
    }

    #[test]
    fn test_placement_roundtrips_to_pin() {
        let puzzle = domino_puzzle(2, 2);
        let rows = generate_rows(&puzzle, &[]);
        let as_pin = Pin::from(&rows[3]);
        assert!(rows[3].matches(&as_pin));
        assert!(!rows[2].matches(&as_pin));
    }
}
