/// Traversal order over a `width x height` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// All columns of row 0, then all columns of row 1, ...
    RowMajor,
    /// All rows of column 0, then all rows of column 1, ...
    ColMajor,
}

/// Finite sequence of `(col, row)` coordinates in a fixed order.
#[derive(Debug, Clone)]
pub struct Coords {
    width: usize,
    height: usize,
    order: Order,
    next: usize,
}

impl Coords {
    pub fn new(width: usize, height: usize, order: Order) -> Self {
        Self {
            width,
            height,
            order,
            next: 0,
        }
    }

    fn total(&self) -> usize {
        self.width * self.height
    }
}

impl Iterator for Coords {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total() {
            return None;
        }
        let k = self.next;
        self.next += 1;
        Some(match self.order {
            Order::RowMajor => (k % self.width, k / self.width),
            Order::ColMajor => (k / self.height, k % self.height),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.total() - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Coords {}
