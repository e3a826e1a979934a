//! Puzzle definition files.
//!
//! A definition is a JSON document:
//!
//! ```json
//! {
//!   "width": 4, "height": 1,
//!   "pieces": [{ "symbol": "I", "color": "#f3742b", "width": 4, "height": 1,
//!                "tiles": [[0, 0], [1, 0], [2, 0], [3, 0]] }],
//!   "pins": [{ "symbol": "I", "rotation": 0, "flip": false, "col": 0, "row": 0 }]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};
use crate::grid::GridSize;
use crate::pieces::{kanoodle_pieces, PieceDescriptor, Puzzle, KANOODLE_GRID};
use crate::placement::Pin;

/// Board, pieces and optional pinned placements of one puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub width: usize,
    pub height: usize,
    pub pieces: Vec<PieceDescriptor>,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl PuzzleConfig {
    /// The built-in 11x5 Kanoodle puzzle with no pins.
    pub fn kanoodle() -> Self {
        Self {
            width: KANOODLE_GRID.width,
            height: KANOODLE_GRID.height,
            pieces: kanoodle_pieces(),
            pins: Vec::new(),
        }
    }

    /// Reads a definition from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| PuzzleError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "loaded {}x{} puzzle with {} pieces and {} pins from '{}'",
            config.width,
            config.height,
            config.pieces.len(),
            config.pins.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn grid(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Constructs the pieces; rejects geometry that cannot be bit-packed.
    pub fn to_puzzle(&self) -> Result<Puzzle> {
        Puzzle::new(&self.pieces, self.grid())
    }
}
