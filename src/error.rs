//! Errors reported by the engine.

use crate::Pos;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Invalid configuration: {0}.
    InvalidConfiguration(String),
    /// Position {pos} is outside of the {rows}x{cols} grid.
    OutOfBounds { pos: Pos, rows: usize, cols: usize },
    /// Grid is {grid:?} but neighbor counts are {counts:?}.
    DimensionMismatch {
        grid: (usize, usize),
        counts: (usize, usize),
    },
}

pub type Result<T> = std::result::Result<T, Error>;
