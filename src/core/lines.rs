//! Winning-line geometry of the 4×4×4 cube.
//!
//! A cell is addressed by `(board, row, col)` with each coordinate in `0..4`,
//! flattened as `board * 16 + row * 4 + col`. A winning line is any straight
//! run of four collinear cells. There are 76 of them:
//!
//! | kind            | count | description                                       |
//! |-----------------|-------|---------------------------------------------------|
//! | `InBoard`       | 40    | rows, columns and both diagonals of each board    |
//! | `Pillar`        | 16    | same (row, col) on every board                    |
//! | `ThroughBoard`  | 16    | diagonals of the vertical planes (fixed row/col)  |
//! | `Space`         | 4     | corner-to-corner diagonals of the whole cube      |
//!
//! The table is built at compile time.

use serde::{Deserialize, Serialize};

/// Side length of the cube.
pub const SIZE: usize = 4;

/// Cells on one board.
pub const BOARD_CELLS: usize = SIZE * SIZE;

/// Cells in the cube.
pub const CELL_COUNT: usize = SIZE * BOARD_CELLS;

/// Number of winning lines.
pub const LINE_COUNT: usize = 76;

/// Geometric family of a winning line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Row, column or diagonal within a single board.
    InBoard,
    /// Same in-board cell across all four boards.
    Pillar,
    /// Diagonal of a vertical plane: board changes along with one in-board axis.
    ThroughBoard,
    /// Diagonal through all three axes.
    Space,
}

/// Four collinear cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    pub kind: LineKind,
    /// Flattened indices, ordered along the line.
    pub cells: [u8; SIZE],
}

/// Flatten a `(board, row, col)` coordinate.
#[inline]
#[must_use]
pub const fn flat_index(board: usize, row: usize, col: usize) -> usize {
    board * BOARD_CELLS + row * SIZE + col
}

/// Split a flattened index into `(board, cell_in_board)`.
#[inline]
#[must_use]
pub const fn split_index(index: usize) -> (usize, usize) {
    (index / BOARD_CELLS, index % BOARD_CELLS)
}

/// Every winning line of the cube.
pub static WINNING_LINES: [WinningLine; LINE_COUNT] = build_lines();

/// Lines passing through each cell (at most 7 per cell).
pub static LINES_BY_CELL: [LinesThrough; CELL_COUNT] = build_lines_by_cell();

/// Line indices through a single cell.
#[derive(Clone, Copy, Debug)]
pub struct LinesThrough {
    len: u8,
    lines: [u8; 7],
}

impl LinesThrough {
    /// Indices into [`WINNING_LINES`].
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.lines[..self.len as usize]
    }
}

const fn line(kind: LineKind, cells: [usize; SIZE]) -> WinningLine {
    WinningLine {
        kind,
        cells: [cells[0] as u8, cells[1] as u8, cells[2] as u8, cells[3] as u8],
    }
}

const fn build_lines() -> [WinningLine; LINE_COUNT] {
    let placeholder = WinningLine { kind: LineKind::InBoard, cells: [0; SIZE] };
    let mut out = [placeholder; LINE_COUNT];
    let mut n = 0;

    let mut b = 0;
    while b < SIZE {
        let mut i = 0;
        while i < SIZE {
            out[n] = line(
                LineKind::InBoard,
                [flat_index(b, i, 0), flat_index(b, i, 1), flat_index(b, i, 2), flat_index(b, i, 3)],
            );
            out[n + 1] = line(
                LineKind::InBoard,
                [flat_index(b, 0, i), flat_index(b, 1, i), flat_index(b, 2, i), flat_index(b, 3, i)],
            );
            n += 2;
            i += 1;
        }
        out[n] = line(
            LineKind::InBoard,
            [flat_index(b, 0, 0), flat_index(b, 1, 1), flat_index(b, 2, 2), flat_index(b, 3, 3)],
        );
        out[n + 1] = line(
            LineKind::InBoard,
            [flat_index(b, 0, 3), flat_index(b, 1, 2), flat_index(b, 2, 1), flat_index(b, 3, 0)],
        );
        n += 2;
        b += 1;
    }

    let mut r = 0;
    while r < SIZE {
        let mut c = 0;
        while c < SIZE {
            out[n] = line(
                LineKind::Pillar,
                [flat_index(0, r, c), flat_index(1, r, c), flat_index(2, r, c), flat_index(3, r, c)],
            );
            n += 1;
            c += 1;
        }
        r += 1;
    }

    // Plane with fixed row j: board and column advance together, in either
    // column direction. Same again for fixed column j.
    let mut j = 0;
    while j < SIZE {
        out[n] = line(
            LineKind::ThroughBoard,
            [flat_index(0, j, 0), flat_index(1, j, 1), flat_index(2, j, 2), flat_index(3, j, 3)],
        );
        out[n + 1] = line(
            LineKind::ThroughBoard,
            [flat_index(0, j, 3), flat_index(1, j, 2), flat_index(2, j, 1), flat_index(3, j, 0)],
        );
        out[n + 2] = line(
            LineKind::ThroughBoard,
            [flat_index(0, 0, j), flat_index(1, 1, j), flat_index(2, 2, j), flat_index(3, 3, j)],
        );
        out[n + 3] = line(
            LineKind::ThroughBoard,
            [flat_index(0, 3, j), flat_index(1, 2, j), flat_index(2, 1, j), flat_index(3, 0, j)],
        );
        n += 4;
        j += 1;
    }

    out[n] = line(
        LineKind::Space,
        [flat_index(0, 0, 0), flat_index(1, 1, 1), flat_index(2, 2, 2), flat_index(3, 3, 3)],
    );
    out[n + 1] = line(
        LineKind::Space,
        [flat_index(0, 0, 3), flat_index(1, 1, 2), flat_index(2, 2, 1), flat_index(3, 3, 0)],
    );
    out[n + 2] = line(
        LineKind::Space,
        [flat_index(0, 3, 0), flat_index(1, 2, 1), flat_index(2, 1, 2), flat_index(3, 0, 3)],
    );
    out[n + 3] = line(
        LineKind::Space,
        [flat_index(0, 3, 3), flat_index(1, 2, 2), flat_index(2, 1, 1), flat_index(3, 0, 0)],
    );
    n += 4;

    assert!(n == LINE_COUNT);
    out
}

const fn build_lines_by_cell() -> [LinesThrough; CELL_COUNT] {
    let mut out = [LinesThrough { len: 0, lines: [0; 7] }; CELL_COUNT];
    let lines = build_lines();

    let mut l = 0;
    while l < LINE_COUNT {
        let mut k = 0;
        while k < SIZE {
            let cell = lines[l].cells[k] as usize;
            let len = out[cell].len as usize;
            out[cell].lines[len] = l as u8;
            out[cell].len += 1;
            k += 1;
        }
        l += 1;
    }
    out
}
