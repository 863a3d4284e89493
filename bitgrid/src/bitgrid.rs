use crate::bits::PackedBitStore;
use crate::error::GridError;
use crate::grid::check_dims;
use crate::traverse::{Coords, Order};

/// Two-dimensional grid of single bits backed by a [`PackedBitStore`].
///
/// Cell `(col, row)` maps to linear index `row * width + col`. Bits are
/// exchanged as `u8` values that must be `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: usize,
    height: usize,
    bits: PackedBitStore,
}

impl BitGrid {
    /// Create a `width x height` grid with every bit cleared.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let len = check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            bits: PackedBitStore::new(len),
        })
    }

    /// Build a grid from equal-length rows of 0/1 values.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut grid = Self::new(width, height)?;
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(GridError::LengthMismatch {
                    width,
                    height,
                    len: cells.len(),
                });
            }
            for (col, &bit) in cells.iter().enumerate() {
                grid.put(col, row, bit);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read the bit at `(col, row)`.
    #[track_caller]
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> u8 {
        self.bits.get(self.index(col, row)) as u8
    }

    /// Write `bit` at `(col, row)` and return the bit it replaced.
    #[track_caller]
    #[inline]
    pub fn put(&mut self, col: usize, row: usize, bit: u8) -> u8 {
        assert!(bit <= 1, "bit value must be 0 or 1, got {bit}");
        let i = self.index(col, row);
        self.bits.set(i, bit == 1) as u8
    }

    /// Number of cells holding 1.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Visit `(col, row, grid, bit)` for every cell in row-major order.
    pub fn map_row_major<F>(&self, visit: F)
    where
        F: FnMut(usize, usize, &BitGrid, u8),
    {
        self.map(Order::RowMajor, visit);
    }

    /// Visit `(col, row, grid, bit)` for every cell in column-major order.
    pub fn map_col_major<F>(&self, visit: F)
    where
        F: FnMut(usize, usize, &BitGrid, u8),
    {
        self.map(Order::ColMajor, visit);
    }

    /// `(col, row, bit)` triples in row-major order.
    pub fn iter_row_major(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.iter(Order::RowMajor)
    }

    /// `(col, row, bit)` triples in column-major order.
    pub fn iter_col_major(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.iter(Order::ColMajor)
    }

    fn map<F>(&self, order: Order, mut visit: F)
    where
        F: FnMut(usize, usize, &BitGrid, u8),
    {
        for (col, row, bit) in self.iter(order) {
            visit(col, row, self, bit);
        }
    }

    fn iter(&self, order: Order) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        Coords::new(self.width, self.height, order)
            .map(move |(col, row)| (col, row, self.get(col, row)))
    }

    #[track_caller]
    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.width && row < self.height,
            "({col}, {row}) out of bounds for {}x{} bit grid",
            self.width,
            self.height
        );
        row * self.width + col
    }
}
