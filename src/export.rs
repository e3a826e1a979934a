//! JSON solution reports.
//!
//! The report mirrors the shape returned by the puzzle service:
//! `{"count": N, "solutions": [[placement, ...], ...]}`. Orientation
//! signatures are 64-bit and are written as decimal strings so that
//! consumers limited to double-precision numbers read them intact.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};
use crate::geometry::Rotation;
use crate::placement::Placement;

/// One placement of a solution, detached from the puzzle it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub symbol: char,
    pub index: usize,
    pub color: String,
    pub rotation: Rotation,
    pub flip: bool,
    pub col: usize,
    pub row: usize,
    pub signature: String,
}

impl From<&Placement<'_>> for PlacementRecord {
    fn from(placement: &Placement<'_>) -> Self {
        Self {
            symbol: placement.piece.symbol,
            index: placement.piece.index,
            color: placement.piece.color.clone(),
            rotation: placement.rotation,
            flip: placement.flipped,
            col: placement.col,
            row: placement.row,
            signature: placement.signature().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub count: usize,
    pub solutions: Vec<Vec<PlacementRecord>>,
}

impl SolutionReport {
    pub fn new(solutions: &[Vec<Placement<'_>>]) -> Self {
        Self {
            count: solutions.len(),
            solutions: solutions
                .iter()
                .map(|solution| solution.iter().map(PlacementRecord::from).collect())
                .collect(),
        }
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).map_err(|source| PuzzleError::Export { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;
    use crate::pieces::{PieceDescriptor, Puzzle};

    fn wide_piece_puzzle() -> Puzzle {
        // an 8-wide bar, so its signature needs the full low byte
        let bar = PieceDescriptor {
            symbol: 'W',
            color: "#000000".to_owned(),
            width: 8,
            height: 1,
            tiles: (0..8).map(|col| (col, 0)).collect(),
        };
        Puzzle::new(&[bar], GridSize { width: 1, height: 8 }).unwrap()
    }

    #[test]
    fn test_report_counts_and_records_placements() {
        let puzzle = wide_piece_puzzle();
        let solutions = puzzle.solve_all(&[]).unwrap();
        let report = SolutionReport::new(&solutions);

        assert_eq!(report.count, 1);
        let record = &report.solutions[0][0];
        assert_eq!(record.symbol, 'W');
        assert_eq!(record.rotation, Rotation::Deg90);
        assert_eq!((record.col, record.row), (0, 0));
        // a vertical bar sets bit 0 of each of the eight local rows
        assert_eq!(record.signature, 0x0101_0101_0101_0101u64.to_string());
    }

    #[test]
    fn test_signature_is_written_as_string() {
        let puzzle = wide_piece_puzzle();
        let report = SolutionReport::new(&puzzle.solve_all(&[]).unwrap());

        let mut buffer = Vec::new();
        report.write_to(&mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["count"], 1);
        let placement = &value["solutions"][0][0];
        assert_eq!(placement["signature"], "72340172838076673");
        assert_eq!(placement["rotation"], 90);
        assert_eq!(placement["flip"], false);
        assert_eq!(placement["color"], "#000000");
    }

    #[test]
    fn test_empty_report() {
        let report = SolutionReport::new(&[]);
        let mut buffer = Vec::new();
        report.write_to(&mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["count"], 0);
        assert_eq!(value["solutions"], serde_json::json!([]));
    }
}
