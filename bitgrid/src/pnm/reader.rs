use std::io::{self, BufRead};

use log::debug;

use super::{PnmHeader, PnmKind, MAX_SAMPLES};
use crate::bitgrid::BitGrid;
use crate::error::PnmError;

/// Pull-based Netpbm decoder.
///
/// The header is parsed on construction; samples are then read one at a time
/// in row-major order with [`PnmReader::next_sample`] or by iterating.
pub struct PnmReader<R> {
    inner: R,
    header: PnmHeader,
    total: usize,
    read: usize,
    // Current byte of a raw bitmap row.
    bit_buf: u8,
}

impl<R: BufRead> PnmReader<R> {
    /// Parse the header from `inner`.
    ///
    /// Headers describing more than [`MAX_SAMPLES`] samples are rejected
    /// before any sample storage is allocated.
    pub fn new(mut inner: R) -> Result<Self, PnmError> {
        let mut magic = [0u8; 2];
        for slot in &mut magic {
            *slot = next_byte(&mut inner)?
                .ok_or_else(|| PnmError::BadHeader("missing magic number".into()))?;
        }
        let (kind, plain) = PnmHeader::kind_from_magic(magic).ok_or(PnmError::BadMagic(magic))?;

        let width = read_header_uint(&mut inner, "width")?;
        let height = read_header_uint(&mut inner, "height")?;
        let maxval = if kind == PnmKind::Bitmap {
            1
        } else {
            let v = read_header_uint(&mut inner, "maxval")?;
            match u16::try_from(v) {
                Ok(v) if v > 0 => v,
                _ => return Err(PnmError::BadHeader(format!("maxval {v} outside 1-65535"))),
            }
        };

        let header = PnmHeader {
            kind,
            plain,
            width,
            height,
            maxval,
        };
        let total = header
            .sample_count()
            .filter(|&n| n <= MAX_SAMPLES)
            .ok_or(PnmError::TooLarge {
                width,
                height,
                limit: MAX_SAMPLES,
            })?;
        debug!(
            "pnm header: {} {}x{} maxval {} ({})",
            kind,
            width,
            height,
            maxval,
            if plain { "plain" } else { "raw" }
        );

        Ok(Self {
            inner,
            header,
            total,
            read: 0,
            bit_buf: 0,
        })
    }

    pub fn header(&self) -> &PnmHeader {
        &self.header
    }

    /// Samples returned so far.
    pub fn samples_read(&self) -> usize {
        self.read
    }

    /// Read the next sample.
    ///
    /// Bitmap samples are 0 (white) or 1 (black); other kinds yield values in
    /// `0..=maxval`.
    pub fn next_sample(&mut self) -> Result<u16, PnmError> {
        if self.read >= self.total {
            return Err(PnmError::TooManySamples(self.total));
        }
        let sample = match (self.header.kind, self.header.plain) {
            (PnmKind::Bitmap, true) => self.plain_bit()?,
            (PnmKind::Bitmap, false) => self.raw_bit()?,
            (_, true) => self.plain_value()?,
            (_, false) => self.raw_value()?,
        };
        self.read += 1;
        Ok(sample)
    }

    fn truncated(&self) -> PnmError {
        PnmError::Truncated {
            read: self.read,
            expected: self.total,
        }
    }

    fn plain_bit(&mut self) -> Result<u16, PnmError> {
        // Plain PBM digits need no separator: "0101" is four samples.
        loop {
            match next_byte(&mut self.inner)? {
                None => return Err(self.truncated()),
                Some(b'0') => return Ok(0),
                Some(b'1') => return Ok(1),
                Some(b'#') => skip_line(&mut self.inner)?,
                Some(b) if b.is_ascii_whitespace() => {}
                Some(_) => return Err(PnmError::BadSample(self.read)),
            }
        }
    }

    fn raw_bit(&mut self) -> Result<u16, PnmError> {
        // Rows start on a byte boundary; bits are packed MSB first.
        let col = self.read % self.header.width;
        if col % 8 == 0 {
            self.bit_buf = match next_byte(&mut self.inner)? {
                Some(b) => b,
                None => return Err(self.truncated()),
            };
        }
        Ok(u16::from(self.bit_buf >> (7 - col % 8) & 1))
    }

    fn plain_value(&mut self) -> Result<u16, PnmError> {
        let first = loop {
            match next_byte(&mut self.inner)? {
                None => return Err(self.truncated()),
                Some(b'#') => skip_line(&mut self.inner)?,
                Some(b) if b.is_ascii_whitespace() => {}
                Some(b) if b.is_ascii_digit() => break b,
                Some(_) => return Err(PnmError::BadSample(self.read)),
            }
        };

        let mut value = u32::from(first - b'0');
        loop {
            match peek_byte(&mut self.inner)? {
                Some(b) if b.is_ascii_digit() => {
                    self.inner.consume(1);
                    value = value * 10 + u32::from(b - b'0');
                    if value > u32::from(self.header.maxval) {
                        return Err(PnmError::BadSample(self.read));
                    }
                }
                Some(b) if b.is_ascii_whitespace() || b == b'#' => break,
                None => break,
                Some(_) => return Err(PnmError::BadSample(self.read)),
            }
        }
        if value > u32::from(self.header.maxval) {
            return Err(PnmError::BadSample(self.read));
        }
        Ok(value as u16)
    }

    fn raw_value(&mut self) -> Result<u16, PnmError> {
        let hi = next_byte(&mut self.inner)?.ok_or_else(|| self.truncated())?;
        let value = if self.header.maxval < 256 {
            u16::from(hi)
        } else {
            let lo = next_byte(&mut self.inner)?.ok_or_else(|| self.truncated())?;
            u16::from_be_bytes([hi, lo])
        };
        if value > self.header.maxval {
            return Err(PnmError::BadSample(self.read));
        }
        Ok(value)
    }
}

impl<R: BufRead> Iterator for PnmReader<R> {
    type Item = Result<u16, PnmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.read >= self.total {
            return None;
        }
        Some(self.next_sample())
    }
}

/// Decode a PBM image into a [`BitGrid`].
///
/// Fails without returning a partial grid if the input is not a bitmap, has
/// a zero dimension, or ends early.
pub fn read_bit_grid<R: BufRead>(inner: R) -> Result<BitGrid, PnmError> {
    let mut reader = PnmReader::new(inner)?;
    let header = *reader.header();
    if header.kind != PnmKind::Bitmap {
        return Err(PnmError::WrongKind {
            expected: PnmKind::Bitmap,
            found: header.kind,
        });
    }

    let mut grid = BitGrid::new(header.width, header.height)?;
    for row in 0..header.height {
        for col in 0..header.width {
            let bit = reader.next_sample()?;
            grid.put(col, row, bit as u8);
        }
    }
    Ok(grid)
}

fn next_byte<R: BufRead>(r: &mut R) -> io::Result<Option<u8>> {
    let b = peek_byte(r)?;
    if b.is_some() {
        r.consume(1);
    }
    Ok(b)
}

fn peek_byte<R: BufRead>(r: &mut R) -> io::Result<Option<u8>> {
    Ok(r.fill_buf()?.first().copied())
}

fn skip_line<R: BufRead>(r: &mut R) -> io::Result<()> {
    let mut discard = Vec::new();
    r.read_until(b'\n', &mut discard)?;
    Ok(())
}

/// Read one unsigned header field, skipping leading whitespace and comments.
///
/// Consumes exactly one terminating byte, which for raw images is the single
/// whitespace byte that separates the header from the sample data.
fn read_header_uint<R: BufRead>(r: &mut R, field: &str) -> Result<usize, PnmError> {
    let first = loop {
        match next_byte(r)? {
            None => return Err(PnmError::BadHeader(format!("missing {field}"))),
            Some(b'#') => skip_line(r)?,
            Some(b) if b.is_ascii_whitespace() => {}
            Some(b) if b.is_ascii_digit() => break b,
            Some(b) => {
                return Err(PnmError::BadHeader(format!(
                    "unexpected byte 0x{b:02x} in {field}"
                )))
            }
        }
    };

    let mut value = usize::from(first - b'0');
    loop {
        match next_byte(r)? {
            Some(b) if b.is_ascii_digit() => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(usize::from(b - b'0')))
                    .ok_or_else(|| PnmError::BadHeader(format!("{field} too large")))?;
            }
            Some(b'#') => {
                skip_line(r)?;
                break;
            }
            Some(b) if b.is_ascii_whitespace() => break,
            None => break,
            Some(b) => {
                return Err(PnmError::BadHeader(format!(
                    "unexpected byte 0x{b:02x} in {field}"
                )))
            }
        }
    }
    Ok(value)
}
