//! Dense 2D grids over flat storage, Netpbm I/O, and border-connected
//! black-edge removal for binary images.
//!
//! [`BitGrid`] packs one bit per cell; [`Grid2`] holds any element type. Both
//! map `(col, row)` to `row * width + col` and traverse in row-major or
//! column-major order.

pub mod bits;
pub mod error;
pub mod traverse;
pub mod grid;
pub mod bitgrid;
pub mod unblack;
pub mod pnm;
pub mod sudoku;

pub use bitgrid::BitGrid;
pub use grid::Grid2;
pub use unblack::{remove_black_edges, ClearStats, Pixel, PixelIndex};
