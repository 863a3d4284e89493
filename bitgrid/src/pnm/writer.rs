use std::io::{self, Write};

use crate::bitgrid::BitGrid;

/// Output options for [`PbmWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbmWriterConfig {
    /// Text of the header comment line. Newlines are replaced by spaces.
    pub comment: String,
    /// Values per text line before a forced break; 0 breaks only at row ends.
    pub max_per_line: usize,
}

impl Default for PbmWriterConfig {
    fn default() -> Self {
        Self {
            comment: "Black Edges Removed".to_string(),
            max_per_line: 35,
        }
    }
}

/// Plain (`P1`) PBM encoder.
#[derive(Debug, Clone, Default)]
pub struct PbmWriter {
    config: PbmWriterConfig,
}

impl PbmWriter {
    pub fn new(config: PbmWriterConfig) -> Self {
        Self { config }
    }

    /// Write `grid` as plain PBM.
    ///
    /// Bits go out in row-major order separated by spaces. A line ends after
    /// the last pixel of every image row, or once `max_per_line` values are
    /// on the current line, whichever comes first.
    pub fn write<W: Write>(&self, grid: &BitGrid, mut out: W) -> io::Result<()> {
        writeln!(out, "P1")?;
        let comment = self.config.comment.replace(['\r', '\n'], " ");
        if comment.is_empty() {
            writeln!(out, "#")?;
        } else {
            writeln!(out, "# {comment}")?;
        }
        writeln!(out, "{} {}", grid.width(), grid.height())?;

        let last_col = grid.width() - 1;
        let mut on_line = 0;
        for (col, _, bit) in grid.iter_row_major() {
            write!(out, "{bit}")?;
            on_line += 1;
            if col == last_col || on_line == self.config.max_per_line {
                out.write_all(b"\n")?;
                on_line = 0;
            } else {
                out.write_all(b" ")?;
            }
        }
        out.flush()
    }

    /// Encode `grid` into an in-memory buffer.
    pub fn to_vec(&self, grid: &BitGrid) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(grid, &mut buf);
        buf
    }
}
