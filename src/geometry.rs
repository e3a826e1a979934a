//! 2D rotation and mirroring of piece-local coordinates.
//!
//! A flat piece has 8 possible orientations on the board: 4 quarter turns,
//! each optionally mirrored. Orientations are never materialized; instead a
//! query coordinate in the oriented frame is mapped back into the piece's
//! canonical frame and looked up in its bitmask.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A coordinate in a piece's local space, `(col, row)`.
///
/// Signed so that offsets from a placement origin can fall outside the piece.
pub type Coord = (i32, i32);

/// Side length of the local addressable space of a piece.
///
/// Occupancy is packed into a `u64` at bit `row * LOCAL_SIZE + col`.
pub const LOCAL_SIZE: usize = 8;

/// Clockwise quarter-turn applied to a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// All rotations in search order.
pub const ROTATIONS: [Rotation; 4] = [
    Rotation::Deg0,
    Rotation::Deg90,
    Rotation::Deg180,
    Rotation::Deg270,
];

/// Both mirror states in search order.
pub const FLIPS: [bool; 2] = [false, true];

impl Rotation {
    /// The rotation in degrees.
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Whether this rotation exchanges the width and height of a piece.
    #[inline]
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(format!("rotation must be 0, 90, 180 or 270, got {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: u16 = s
            .trim()
            .parse()
            .map_err(|_| format!("rotation '{s}' is not a number"))?;
        Self::try_from(degrees)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Maps a coordinate in the oriented frame back to the canonical frame.
///
/// `width` and `height` are the canonical (unrotated) bounding dimensions.
/// Each rotation mirrors along its own axis when `flipped`, so the eight
/// results are the eight distinct symmetries of the bounding box. The result
/// may lie outside `0..width` x `0..height`; callers bounds-check it.
#[inline]
pub fn to_canonical(
    (col, row): Coord,
    rotation: Rotation,
    flipped: bool,
    width: i32,
    height: i32,
) -> Coord {
    match rotation {
        Rotation::Deg0 => {
            if flipped {
                (width - 1 - col, row)
            } else {
                (col, row)
            }
        }
        Rotation::Deg90 => {
            let canonical_row = height - 1 - col;
            if flipped {
                (row, height - 1 - canonical_row)
            } else {
                (row, canonical_row)
            }
        }
        Rotation::Deg180 => {
            if flipped {
                (col, height - 1 - row)
            } else {
                (width - 1 - col, height - 1 - row)
            }
        }
        Rotation::Deg270 => {
            if flipped {
                (width - 1 - row, height - 1 - col)
            } else {
                (width - 1 - row, col)
            }
        }
    }
}

/// Bit position of a local coordinate in the packed occupancy mask.
#[inline(always)]
pub const fn bit_index(col: usize, row: usize) -> u32 {
    (row * LOCAL_SIZE + col) as u32
}
