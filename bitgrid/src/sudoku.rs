//! Sudoku solution checking on a [`Grid2`] board.

use std::fmt;
use std::io::BufRead;

use log::debug;

use crate::error::{PnmError, SudokuError};
use crate::grid::Grid2;
use crate::pnm::{PnmKind, PnmReader};

/// Side length of the board.
pub const SIZE: usize = 9;
/// Side length of one box.
const BOX: usize = 3;

/// A 9x9 board of digits.
pub type Board = Grid2<u8>;

/// First rule broken by a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The board is not 9x9.
    Shape { width: usize, height: usize },
    /// A cell holds something other than 1-9.
    InvalidDigit { col: usize, row: usize, digit: u8 },
    Row { row: usize, digit: u8 },
    Column { col: usize, digit: u8 },
    /// `box_col` and `box_row` count boxes, 0-2.
    Box {
        box_col: usize,
        box_row: usize,
        digit: u8,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Violation::Shape { width, height } => {
                write!(f, "board is {width}x{height}, expected {SIZE}x{SIZE}")
            }
            Violation::InvalidDigit { col, row, digit } => {
                write!(f, "cell ({col}, {row}) holds {digit}")
            }
            Violation::Row { row, digit } => write!(f, "digit {digit} repeats in row {row}"),
            Violation::Column { col, digit } => write!(f, "digit {digit} repeats in column {col}"),
            Violation::Box {
                box_col,
                box_row,
                digit,
            } => write!(f, "digit {digit} repeats in box ({box_col}, {box_row})"),
        }
    }
}

/// Set of digits 1-9 as a bitmask.
#[derive(Default)]
struct DigitSet(u16);

impl DigitSet {
    /// Add `digit`; false if it was already present.
    fn insert(&mut self, digit: u8) -> bool {
        let mask = 1u16 << digit;
        let fresh = self.0 & mask == 0;
        self.0 |= mask;
        fresh
    }

    fn clear(&mut self) {
        self.0 = 0;
    }
}

/// Load a board from a PGM image: 9x9 pixels, maxval 9, every sample 1-9.
pub fn read_board<R: BufRead>(inner: R) -> Result<Board, SudokuError> {
    let mut reader = PnmReader::new(inner)?;
    let header = *reader.header();
    if header.kind != PnmKind::Graymap {
        return Err(PnmError::WrongKind {
            expected: PnmKind::Graymap,
            found: header.kind,
        }
        .into());
    }
    if header.width != SIZE || header.height != SIZE || header.maxval != SIZE as u16 {
        return Err(SudokuError::WrongShape {
            width: header.width,
            height: header.height,
            maxval: header.maxval,
        });
    }

    let mut board = Board::new(SIZE, SIZE)?;
    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = reader.next_sample()?;
            if !(1..=9).contains(&value) {
                return Err(SudokuError::CellOutOfRange { col, row, value });
            }
            board.put(col, row, value as u8);
        }
    }
    Ok(board)
}

/// Check that every row, column and 3x3 box holds each digit exactly once.
///
/// Rows are checked first, then columns, then boxes left to right, top to
/// bottom; the first repeat found is returned. A board of any other size
/// fails with [`Violation::Shape`].
pub fn check_board(board: &Board) -> Result<(), Violation> {
    if board.width() != SIZE || board.height() != SIZE {
        return Err(Violation::Shape {
            width: board.width(),
            height: board.height(),
        });
    }

    let mut seen = DigitSet::default();
    for (col, row, &digit) in board.iter_row_major() {
        if !(1..=9).contains(&digit) {
            return Err(Violation::InvalidDigit { col, row, digit });
        }
        if col == 0 {
            seen.clear();
        }
        if !seen.insert(digit) {
            return Err(Violation::Row { row, digit });
        }
    }

    for (col, row, &digit) in board.iter_col_major() {
        if row == 0 {
            seen.clear();
        }
        if !seen.insert(digit) {
            return Err(Violation::Column { col, digit });
        }
    }

    for box_row in 0..BOX {
        for box_col in 0..BOX {
            seen.clear();
            for row in box_row * BOX..(box_row + 1) * BOX {
                for col in box_col * BOX..(box_col + 1) * BOX {
                    let digit = *board.get(col, row);
                    if !seen.insert(digit) {
                        return Err(Violation::Box {
                            box_col,
                            box_row,
                            digit,
                        });
                    }
                }
            }
        }
    }

    debug!("sudoku board is a valid solution");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const SOLVED: [u8; 81] = [
        5, 3, 4, 6, 7, 8, 9, 1, 2,
        6, 7, 2, 1, 9, 5, 3, 4, 8,
        1, 9, 8, 3, 4, 2, 5, 6, 7,
        8, 5, 9, 7, 6, 1, 4, 2, 3,
        4, 2, 6, 8, 5, 3, 7, 9, 1,
        7, 1, 3, 9, 2, 4, 8, 5, 6,
        9, 6, 1, 5, 3, 7, 2, 8, 4,
        2, 8, 7, 4, 1, 9, 6, 3, 5,
        3, 4, 5, 2, 8, 6, 1, 7, 9,
    ];

    fn solved() -> Board {
        Board::from_vec(SIZE, SIZE, SOLVED.to_vec()).unwrap()
    }

    fn to_pgm(cells: &[u8]) -> String {
        let mut s = String::from("P2\n9 9\n9\n");
        for row in cells.chunks(SIZE) {
            let line: Vec<String> = row.iter().map(|d| d.to_string()).collect();
            s.push_str(&line.join(" "));
            s.push('\n');
        }
        s
    }

    #[test]
    fn solved_board_passes() {
        assert_eq!(check_board(&solved()), Ok(()));
    }

    #[test]
    fn row_swap_breaks_columns() {
        // Swapping two cells within a row keeps the row valid but breaks both columns.
        let mut board = solved();
        let a = *board.get(0, 0);
        let b = board.put(1, 0, a);
        board.put(0, 0, b);
        assert_eq!(check_board(&board), Err(Violation::Column { col: 0, digit: 3 }));
    }

    #[test]
    fn duplicate_in_row() {
        let mut board = solved();
        board.put(8, 4, 4);
        assert_eq!(check_board(&board), Err(Violation::Row { row: 4, digit: 4 }));
    }

    #[test]
    fn box_violation_with_valid_rows_and_columns() {
        // Cyclic shifts by one: every row and column is a permutation, but
        // the first box holds 1, 2, 3 three times.
        let cells: Vec<u8> = (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| ((col + row) % SIZE) as u8 + 1))
            .collect();
        let board = Board::from_vec(SIZE, SIZE, cells).unwrap();
        assert_eq!(
            check_board(&board),
            Err(Violation::Box {
                box_col: 0,
                box_row: 0,
                digit: 2
            })
        );
    }

    #[test]
    fn wrong_shape_is_a_violation() {
        let board = Board::new(4, 9).unwrap();
        assert_eq!(
            check_board(&board),
            Err(Violation::Shape { width: 4, height: 9 })
        );
        assert_eq!(
            Violation::Shape { width: 4, height: 9 }.to_string(),
            "board is 4x9, expected 9x9"
        );
    }

    #[test]
    fn zero_is_invalid() {
        let mut board = solved();
        board.put(3, 2, 0);
        assert_eq!(
            check_board(&board),
            Err(Violation::InvalidDigit {
                col: 3,
                row: 2,
                digit: 0
            })
        );
    }

    #[test]
    fn read_board_from_pgm() {
        let pgm = to_pgm(&SOLVED);
        let board = read_board(pgm.as_bytes()).unwrap();
        assert_eq!(board, solved());
    }

    #[test]
    fn read_board_rejects_bitmap() {
        let err = read_board(&b"P1 9 9\n"[..]).unwrap_err();
        assert!(matches!(
            err,
            SudokuError::Pnm(PnmError::WrongKind {
                expected: PnmKind::Graymap,
                found: PnmKind::Bitmap
            })
        ));
    }

    #[test]
    fn read_board_rejects_wrong_maxval() {
        let err = read_board(&b"P2 9 9 255\n"[..]).unwrap_err();
        assert!(matches!(err, SudokuError::WrongShape { maxval: 255, .. }));
    }

    #[test]
    fn read_board_rejects_wrong_size() {
        let err = read_board(&b"P2 8 9 9\n"[..]).unwrap_err();
        assert!(matches!(err, SudokuError::WrongShape { width: 8, height: 9, .. }));
    }

    #[test]
    fn read_board_rejects_zero_cell() {
        let mut cells = SOLVED;
        cells[10] = 0;
        let err = read_board(to_pgm(&cells).as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SudokuError::CellOutOfRange {
                col: 1,
                row: 1,
                value: 0
            }
        ));
    }

    #[test]
    fn read_board_truncated() {
        let err = read_board(&b"P2 9 9 9\n1 2 3"[..]).unwrap_err();
        assert!(matches!(
            err,
            SudokuError::Pnm(PnmError::Truncated { read: 3, expected: 81 })
        ));
    }

    #[test]
    fn violation_messages() {
        assert_eq!(
            Violation::Box {
                box_col: 2,
                box_row: 1,
                digit: 7
            }
            .to_string(),
            "digit 7 repeats in box (2, 1)"
        );
        assert_eq!(
            Violation::Row { row: 0, digit: 5 }.to_string(),
            "digit 5 repeats in row 0"
        );
    }
}
