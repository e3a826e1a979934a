//! Error types for puzzle construction, solving and I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building or solving a puzzle.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// A piece's bounding box does not fit the 8x8 local bitmask space.
    #[error("piece '{symbol}' has a {width}x{height} bounding box, larger than 8x8")]
    UnsupportedGeometry {
        symbol: char,
        width: usize,
        height: usize,
    },

    /// A tile coordinate cannot be packed into the 8x8 local bitmask space.
    #[error("piece '{symbol}' has a tile at ({col}, {row}) outside the local space")]
    TileOutOfRange { symbol: char, col: usize, row: usize },

    /// A column's active count would go below zero during cover.
    ///
    /// The matrix links are inconsistent; the solve is aborted.
    #[error("exact-cover column {column} count would drop below zero")]
    CorruptedMatrix { column: usize },

    /// A pinned placement given on the command line could not be parsed.
    #[error("invalid pin '{input}': {reason}")]
    InvalidPin { input: String, reason: String },

    #[error("failed to read puzzle definition '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse puzzle definition '{}'", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write solution report")]
    Export {
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for results carrying a [`PuzzleError`].
pub type Result<T> = std::result::Result<T, PuzzleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_message_names_piece_and_limit() {
        let err = PuzzleError::UnsupportedGeometry {
            symbol: 'Q',
            width: 9,
            height: 2,
        };
        assert_eq!(
            err.to_string(),
            "piece 'Q' has a 9x2 bounding box, larger than 8x8"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = PuzzleError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.json"));
    }
}
