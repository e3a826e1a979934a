//! Kanoodle Puzzle Solver Library
//!
//! Tiles a rectangular board with a fixed set of flat pieces, each used
//! exactly once in any rotation or mirror image. Placements are encoded as
//! exact-cover rows and searched with Dancing Links.

pub mod config;
pub mod dlx;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod pieces;
pub mod placement;
mod solver;

pub use error::{PuzzleError, Result};
pub use pieces::{Piece, PieceDescriptor, Puzzle};
pub use placement::{Pin, Placement};
