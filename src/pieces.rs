//! Puzzle piece definitions and the per-piece geometry model.
//!
//! Each piece is stored once, in its canonical orientation, as a bitmask of
//! occupied cells inside an 8x8 local space. Rotated and mirrored
//! orientations are evaluated on demand through `geometry::to_canonical`.

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};
use crate::geometry::{bit_index, to_canonical, Coord, Rotation, LOCAL_SIZE};
use crate::grid::GridSize;

/// Declarative description of one piece, as read from a puzzle definition.
///
/// Tiles are `(col, row)` pairs inside the `width x height` bounding box.
/// Consistency between `tiles` and the declared box is the caller's concern;
/// only coordinates that cannot be bit-packed are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceDescriptor {
    pub symbol: char,
    #[serde(default)]
    pub color: String,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<(usize, usize)>,
}

/// An immutable piece ready for placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    /// Position of the piece in its puzzle; selects the "used once" column.
    pub index: usize,
    pub symbol: char,
    /// Display color, opaque to the solver.
    pub color: String,
    width: usize,
    height: usize,
    bitmask: u64,
}

impl Piece {
    /// Builds a piece from its descriptor.
    ///
    /// Fails if the bounding box or any tile lies outside the 8x8 local space.
    pub fn new(descriptor: &PieceDescriptor, index: usize) -> Result<Self> {
        let PieceDescriptor {
            symbol,
            width,
            height,
            ..
        } = *descriptor;

        if width > LOCAL_SIZE || height > LOCAL_SIZE {
            return Err(PuzzleError::UnsupportedGeometry {
                symbol,
                width,
                height,
            });
        }

        let mut bitmask = 0u64;
        for &(col, row) in &descriptor.tiles {
            if col >= LOCAL_SIZE || row >= LOCAL_SIZE {
                return Err(PuzzleError::TileOutOfRange { symbol, col, row });
            }
            bitmask |= 1 << bit_index(col, row);
        }

        Ok(Self {
            index,
            symbol,
            color: descriptor.color.clone(),
            width,
            height,
            bitmask,
        })
    }

    /// Bounding width under `rotation`.
    #[inline]
    pub fn width(&self, rotation: Rotation) -> usize {
        if rotation.swaps_axes() {
            self.height
        } else {
            self.width
        }
    }

    /// Bounding height under `rotation`.
    #[inline]
    pub fn height(&self, rotation: Rotation) -> usize {
        if rotation.swaps_axes() {
            self.width
        } else {
            self.height
        }
    }

    /// Number of tiles in the piece.
    pub fn tile_count(&self) -> u32 {
        self.bitmask.count_ones()
    }

    /// Whether the oriented piece covers local cell `(col, row)`.
    ///
    /// Coordinates outside the oriented bounding box are never occupied.
    pub fn is_occupied(&self, col: i32, row: i32, rotation: Rotation, flipped: bool) -> bool {
        let width = self.width as i32;
        let height = self.height as i32;
        let (local_col, local_row) = to_canonical((col, row), rotation, flipped, width, height);
        if !(0..width).contains(&local_col) || !(0..height).contains(&local_row) {
            return false;
        }
        (self.bitmask & (1 << bit_index(local_col as usize, local_row as usize))) != 0
    }

    /// Occupancy mask of the oriented piece, anchored at the local origin.
    ///
    /// Two orientations with equal signatures cover the same cells at every
    /// position, so only one of them needs to be searched.
    pub fn signature(&self, rotation: Rotation, flipped: bool) -> u64 {
        let mut signature = 0u64;
        for row in 0..LOCAL_SIZE {
            for col in 0..LOCAL_SIZE {
                if self.is_occupied(col as i32, row as i32, rotation, flipped) {
                    signature |= 1 << bit_index(col, row);
                }
            }
        }
        signature
    }

    /// Occupied local cells of the oriented piece, in row-major order.
    pub fn tiles(&self, rotation: Rotation, flipped: bool) -> Vec<Coord> {
        let mut tiles = Vec::with_capacity(self.tile_count() as usize);
        for row in 0..self.height(rotation) as i32 {
            for col in 0..self.width(rotation) as i32 {
                if self.is_occupied(col, row, rotation, flipped) {
                    tiles.push((col, row));
                }
            }
        }
        tiles
    }
}

/// A board together with the pieces that must tile it.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub grid: GridSize,
    pub pieces: Vec<Piece>,
}

impl Puzzle {
    /// Constructs every piece, indexing them in descriptor order.
    pub fn new(descriptors: &[PieceDescriptor], grid: GridSize) -> Result<Self> {
        let pieces = descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| Piece::new(descriptor, index))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { grid, pieces })
    }

    /// The classic 11x5 Kanoodle board with its twelve pieces.
    pub fn kanoodle() -> Result<Self> {
        Self::new(&kanoodle_pieces(), KANOODLE_GRID)
    }

    /// Exact-cover columns: one per grid cell, then one per piece.
    pub fn num_columns(&self) -> usize {
        self.grid.cell_count() + self.pieces.len()
    }

    /// Finds a piece by its display symbol.
    pub fn piece_by_symbol(&self, symbol: char) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.symbol == symbol)
    }
}

/// Static shape table entry for a built-in piece.
struct Shape {
    symbol: char,
    color: &'static str,
    width: usize,
    height: usize,
    tiles: &'static [(usize, usize)],
}

/// Board size of the classic Kanoodle puzzle.
pub const KANOODLE_GRID: GridSize = GridSize {
    width: 11,
    height: 5,
};

/// The twelve Kanoodle pieces, 55 tiles in total.
const KANOODLE_SHAPES: &[Shape] = &[
    Shape {
        symbol: 'A',
        color: "#e4240d",
        width: 3,
        height: 2,
        tiles: &[(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)],
    },
    Shape {
        symbol: 'B',
        color: "#ee69a3",
        width: 2,
        height: 4,
        tiles: &[(1, 0), (1, 1), (0, 2), (1, 2), (0, 3)],
    },
    Shape {
        symbol: 'C',
        color: "#f5a4c8",
        width: 3,
        height: 3,
        tiles: &[(1, 0), (0, 1), (1, 1), (1, 2), (2, 2)],
    },
    Shape {
        symbol: 'D',
        color: "#179ad9",
        width: 3,
        height: 2,
        tiles: &[(0, 0), (1, 0), (2, 0), (1, 1)],
    },
    Shape {
        symbol: 'E',
        color: "#fee83a",
        width: 2,
        height: 4,
        tiles: &[(1, 0), (1, 1), (0, 2), (1, 2), (1, 3)],
    },
    Shape {
        symbol: 'F',
        color: "#b96bae",
        width: 2,
        height: 3,
        tiles: &[(1, 0), (0, 1), (1, 1), (0, 2), (1, 2)],
    },
    Shape {
        symbol: 'G',
        color: "#8e58a5",
        width: 3,
        height: 2,
        tiles: &[(1, 0), (2, 0), (0, 1), (1, 1)],
    },
    Shape {
        symbol: 'H',
        color: "#65bc68",
        width: 2,
        height: 3,
        tiles: &[(1, 0), (1, 1), (0, 2), (1, 2)],
    },
    Shape {
        symbol: 'I',
        color: "#f3742b",
        width: 3,
        height: 3,
        tiles: &[(2, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Shape {
        symbol: 'J',
        color: "#1b8841",
        width: 2,
        height: 4,
        tiles: &[(1, 0), (1, 1), (1, 2), (0, 3), (1, 3)],
    },
    Shape {
        symbol: 'K',
        color: "#edb02e",
        width: 2,
        height: 2,
        tiles: &[(0, 0), (0, 1), (1, 1)],
    },
    Shape {
        symbol: 'L',
        color: "#89c8ec",
        width: 3,
        height: 3,
        tiles: &[(2, 0), (1, 1), (2, 1), (0, 2), (1, 2)],
    },
];

/// Descriptors for the built-in Kanoodle pieces.
pub fn kanoodle_pieces() -> Vec<PieceDescriptor> {
    KANOODLE_SHAPES
        .iter()
        .map(|shape| PieceDescriptor {
            symbol: shape.symbol,
            color: shape.color.to_owned(),
            width: shape.width,
            height: shape.height,
            tiles: shape.tiles.to_vec(),
        })
        .collect()
}
