use std::collections::VecDeque;

use log::debug;

use crate::bitgrid::BitGrid;

/// State of a single pixel in a binary raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pixel {
    White = 0,
    Black = 1,
}

impl Pixel {
    #[inline]
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Pixel::White
        } else {
            Pixel::Black
        }
    }

    #[inline]
    pub fn bit(self) -> u8 {
        self as u8
    }
}

/// Worklist entry: a pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelIndex {
    pub col: usize,
    pub row: usize,
}

impl PixelIndex {
    #[inline]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Counters from one black-edge removal pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClearStats {
    /// Border coordinates pushed during seeding (corners may count twice).
    pub seeded: usize,
    /// Total coordinates pushed, seeds included.
    pub enqueued: usize,
    /// Pixels turned from black to white.
    pub cleared: usize,
}

/// Turn every black pixel 4-connected to the image border white.
///
/// Black regions that never touch the border are left as they are. Runs in
/// two phases: every black border pixel is queued, then the queue is drained
/// breadth-first, discovering interior black neighbors and clearing each
/// dequeued pixel that is still black.
pub fn remove_black_edges(grid: &mut BitGrid) -> ClearStats {
    let mut worklist = VecDeque::new();
    let mut stats = ClearStats::default();

    seed_border(grid, &mut worklist);
    stats.seeded = worklist.len();
    stats.enqueued = worklist.len();

    propagate(grid, &mut worklist, &mut stats);

    debug!(
        "black edges: {}x{} grid, {} seeds, {} enqueued, {} cleared",
        grid.width(),
        grid.height(),
        stats.seeded,
        stats.enqueued,
        stats.cleared
    );
    stats
}

/// Queue every black border pixel: top row, bottom row, left column, right column.
///
/// Pixels are not cleared here. A corner is queued once per border line it
/// lies on; the extra entry is discarded when dequeued.
fn seed_border(grid: &BitGrid, worklist: &mut VecDeque<PixelIndex>) {
    let w = grid.width();
    let h = grid.height();

    let top = (0..w).map(|col| PixelIndex::new(col, 0));
    let bottom = (0..w).map(|col| PixelIndex::new(col, h - 1));
    let left = (0..h).map(|row| PixelIndex::new(0, row));
    let right = (0..h).map(|row| PixelIndex::new(w - 1, row));

    for p in top.chain(bottom).chain(left).chain(right) {
        if is_black(grid, p) {
            worklist.push_back(p);
        }
    }
}

/// Drain the worklist, clearing border-connected black pixels.
fn propagate(grid: &mut BitGrid, worklist: &mut VecDeque<PixelIndex>, stats: &mut ClearStats) {
    while let Some(p) = worklist.pop_front() {
        // Already cleared through an earlier duplicate entry.
        if !is_black(grid, p) {
            continue;
        }

        for n in interior_neighbors(grid, p) {
            if is_black(grid, n) {
                worklist.push_back(n);
                stats.enqueued += 1;
            }
        }

        grid.put(p.col, p.row, Pixel::White.bit());
        stats.cleared += 1;
    }
}

/// The 4-neighbors of `p` (left, right, up, down) that are strictly inside the border.
///
/// Border pixels are excluded because seeding already queued all black ones.
fn interior_neighbors(grid: &BitGrid, p: PixelIndex) -> impl Iterator<Item = PixelIndex> {
    let w = grid.width();
    let h = grid.height();
    let PixelIndex { col, row } = p;

    let candidates = [
        col.checked_sub(1).map(|c| PixelIndex::new(c, row)),
        Some(PixelIndex::new(col + 1, row)),
        row.checked_sub(1).map(|r| PixelIndex::new(col, r)),
        Some(PixelIndex::new(col, row + 1)),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter(move |n| n.col > 0 && n.col + 1 < w && n.row > 0 && n.row + 1 < h)
}

#[inline]
fn is_black(grid: &BitGrid, p: PixelIndex) -> bool {
    Pixel::from_bit(grid.get(p.col, p.row)) == Pixel::Black
}
