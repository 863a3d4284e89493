//! Netpbm image I/O.
//!
//! [`PnmReader`] is a pull-based sample source for PBM and PGM images in both
//! plain (ASCII) and raw (binary) encodings. [`PbmWriter`] emits plain PBM.
//! In bitmap samples, `1` is black and `0` is white.

mod reader;
mod writer;

use std::fmt;

pub use reader::{read_bit_grid, PnmReader};
pub use writer::{PbmWriter, PbmWriterConfig};

/// Largest sample count [`PnmReader`] accepts from a header.
pub const MAX_SAMPLES: usize = u32::MAX as usize;

/// Netpbm image family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PnmKind {
    /// PBM, one bit per pixel (`P1` / `P4`).
    Bitmap,
    /// PGM, one gray sample per pixel (`P2` / `P5`).
    Graymap,
    /// PPM, three samples per pixel (`P3` / `P6`).
    Pixmap,
}

impl fmt::Display for PnmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PnmKind::Bitmap => "PBM bitmap",
            PnmKind::Graymap => "PGM graymap",
            PnmKind::Pixmap => "PPM pixmap",
        })
    }
}

/// Parsed Netpbm header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PnmHeader {
    pub kind: PnmKind,
    /// ASCII sample encoding (`P1`-`P3`) rather than binary (`P4`-`P6`).
    pub plain: bool,
    pub width: usize,
    pub height: usize,
    /// Largest sample value; always 1 for bitmaps.
    pub maxval: u16,
}

impl PnmHeader {
    /// Number of samples in the image body, or `None` if it overflows `usize`.
    pub fn sample_count(&self) -> Option<usize> {
        let per_pixel = if self.kind == PnmKind::Pixmap { 3 } else { 1 };
        self.width.checked_mul(self.height)?.checked_mul(per_pixel)
    }

    /// Interpret a two-byte magic number such as `b"P4"`.
    pub(crate) fn kind_from_magic(magic: [u8; 2]) -> Option<(PnmKind, bool)> {
        match &magic {
            b"P1" => Some((PnmKind::Bitmap, true)),
            b"P2" => Some((PnmKind::Graymap, true)),
            b"P3" => Some((PnmKind::Pixmap, true)),
            b"P4" => Some((PnmKind::Bitmap, false)),
            b"P5" => Some((PnmKind::Graymap, false)),
            b"P6" => Some((PnmKind::Pixmap, false)),
            _ => None,
        }
    }
}
