use crate::error::GridError;
use crate::traverse::{Coords, Order};

/// Dense 2D array of `T` with row-major storage.
///
/// Cell `(col, row)` lives at index `row * width + col` of the flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid2<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid2<T> {
    /// Create a grid with every cell set to `T::default()`.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError>
    where
        T: Default + Clone,
    {
        let len = check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![T::default(); len],
        })
    }

    /// Wrap an existing row-major buffer of exactly `width * height` cells.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self, GridError> {
        if cells.len() != check_dims(width, height)? {
            return Err(GridError::LengthMismatch {
                width,
                height,
                len: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[track_caller]
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> &T {
        &self.cells[self.index(col, row)]
    }

    #[track_caller]
    #[inline]
    pub fn get_mut(&mut self, col: usize, row: usize) -> &mut T {
        let i = self.index(col, row);
        &mut self.cells[i]
    }

    /// Store `value` at `(col, row)` and return the value it replaced.
    #[track_caller]
    pub fn put(&mut self, col: usize, row: usize, value: T) -> T {
        std::mem::replace(self.get_mut(col, row), value)
    }

    /// Visit every cell in row-major order.
    pub fn map_row_major<F>(&self, visit: F)
    where
        F: FnMut(usize, usize, &T),
    {
        self.map(Order::RowMajor, visit);
    }

    /// Visit every cell in column-major order.
    pub fn map_col_major<F>(&self, visit: F)
    where
        F: FnMut(usize, usize, &T),
    {
        self.map(Order::ColMajor, visit);
    }

    /// Visit every cell mutably in row-major order.
    pub fn map_row_major_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(usize, usize, &mut T),
    {
        // Row-major order is storage order.
        let width = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            visit(i % width, i / width, cell);
        }
    }

    pub fn iter_row_major(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.iter(Order::RowMajor)
    }

    pub fn iter_col_major(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.iter(Order::ColMajor)
    }

    /// The flat row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    fn map<F>(&self, order: Order, mut visit: F)
    where
        F: FnMut(usize, usize, &T),
    {
        for (col, row, cell) in self.iter(order) {
            visit(col, row, cell);
        }
    }

    fn iter(&self, order: Order) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        Coords::new(self.width, self.height, order)
            .map(move |(col, row)| (col, row, &self.cells[row * self.width + col]))
    }

    #[track_caller]
    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.width && row < self.height,
            "({col}, {row}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        row * self.width + col
    }
}

/// Validate grid dimensions and return the cell count.
pub(crate) fn check_dims(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::ZeroDimension { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GridError::TooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_with_default() {
        let grid: Grid2<u32> = Grid2::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.as_slice().len(), 12);
        assert!(grid.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            Grid2::<u8>::new(0, 3),
            Err(GridError::ZeroDimension { width: 0, height: 3 })
        );
        assert!(Grid2::<u8>::new(3, 0).is_err());
    }

    #[test]
    fn overflowing_dimensions_rejected() {
        assert_eq!(
            Grid2::<u8>::new(usize::MAX, 2),
            Err(GridError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
        let half = 1 << (usize::BITS / 2);
        assert!(matches!(
            Grid2::from_vec(half, half, vec![0u8]),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn from_vec_checks_length() {
        let err = Grid2::from_vec(2, 2, vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::LengthMismatch {
                width: 2,
                height: 2,
                len: 3
            }
        );
    }

    #[test]
    fn put_then_get() {
        let mut grid: Grid2<String> = Grid2::new(3, 3).unwrap();
        let prev = grid.put(2, 1, "x".to_string());
        assert_eq!(prev, "");
        assert_eq!(grid.get(2, 1), "x");
        assert_eq!(grid.put(2, 1, "y".to_string()), "x");
        // (2, 1) is linear index 1 * 3 + 2
        assert_eq!(grid.as_slice()[5], "y");
    }

    #[test]
    fn from_vec_is_row_major() {
        #[rustfmt::skip]
        let grid = Grid2::from_vec(3, 2, vec![
            1, 2, 3,
            4, 5, 6,
        ]).unwrap();
        assert_eq!(*grid.get(0, 0), 1);
        assert_eq!(*grid.get(2, 0), 3);
        assert_eq!(*grid.get(0, 1), 4);
        assert_eq!(*grid.get(2, 1), 6);
    }

    #[test]
    fn map_orders() {
        let grid = Grid2::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();

        let mut seen = Vec::new();
        grid.map_row_major(|_, _, &v| seen.push(v));
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);

        seen.clear();
        grid.map_col_major(|_, _, &v| seen.push(v));
        assert_eq!(seen, vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn iterators_yield_coordinates() {
        let grid = Grid2::from_vec(2, 2, vec!['a', 'b', 'c', 'd']).unwrap();
        let rows: Vec<_> = grid.iter_row_major().map(|(c, r, &v)| (c, r, v)).collect();
        assert_eq!(rows, vec![(0, 0, 'a'), (1, 0, 'b'), (0, 1, 'c'), (1, 1, 'd')]);
        let cols: Vec<_> = grid.iter_col_major().map(|(c, r, &v)| (c, r, v)).collect();
        assert_eq!(cols, vec![(0, 0, 'a'), (0, 1, 'c'), (1, 0, 'b'), (1, 1, 'd')]);
    }

    #[test]
    fn map_row_major_mut_writes_cells() {
        let mut grid: Grid2<usize> = Grid2::new(3, 2).unwrap();
        grid.map_row_major_mut(|col, row, v| *v = row * 10 + col);
        assert_eq!(grid.as_slice(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn col_equal_to_width_panics() {
        let grid: Grid2<u8> = Grid2::new(3, 3).unwrap();
        grid.get(3, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn row_equal_to_height_panics() {
        let grid: Grid2<u8> = Grid2::new(3, 3).unwrap();
        grid.get(0, 3);
    }
}
