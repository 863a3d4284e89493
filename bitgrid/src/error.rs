use thiserror::Error;

use crate::pnm::PnmKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("{width}x{height} grid has more cells than fit in memory")]
    TooLarge { width: usize, height: usize },

    #[error("buffer of {len} cells does not match {width}x{height} grid")]
    LengthMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
}

#[derive(Debug, Error)]
pub enum PnmError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("not a Netpbm image (magic bytes {0:?})")]
    BadMagic([u8; 2]),

    #[error("malformed header: {0}")]
    BadHeader(String),

    #[error("expected a {expected} image, found a {found}")]
    WrongKind { expected: PnmKind, found: PnmKind },

    #[error("{width}x{height} image exceeds the {limit} sample limit")]
    TooLarge {
        width: usize,
        height: usize,
        limit: usize,
    },

    #[error("invalid sample at position {0}")]
    BadSample(usize),

    #[error("image data ended after {read} of {expected} samples")]
    Truncated { read: usize, expected: usize },

    #[error("all {0} samples have already been read")]
    TooManySamples(usize),

    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Error)]
pub enum SudokuError {
    #[error(transparent)]
    Pnm(#[from] PnmError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("sudoku board must be 9x9 with maxval 9, got {width}x{height} with maxval {maxval}")]
    WrongShape {
        width: usize,
        height: usize,
        maxval: u16,
    },

    #[error("cell ({col}, {row}) holds {value}, expected a digit 1-9")]
    CellOutOfRange { col: usize, row: usize, value: u16 },
}
