//! Errors reported by grid edits and record loading.

use std::fmt;

/// Errors that can occur when sizing, editing or restoring a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A side was shorter than [`MIN_SIDE`](crate::grid::MIN_SIDE).
    InvalidDimensions { rows: i32, cols: i32 },
    /// Weight text that is not an integer ≥ 1.
    InvalidWeight(String),
    /// A persisted record that cannot be turned back into a grid.
    CorruptRecord(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "invalid grid dimensions {rows}x{cols}: both sides must be at least {}",
                crate::grid::MIN_SIDE
            ),
            Self::InvalidWeight(s) => {
                write!(f, "invalid weight \u{201c}{s}\u{201d}: expected an integer >= 1")
            }
            Self::CorruptRecord(why) => write!(f, "corrupt grid record: {why}"),
        }
    }
}

impl std::error::Error for GridError {}
