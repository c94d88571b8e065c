//! Immutable cube position.
//!
//! ## BoardState
//!
//! A snapshot of the 64 cells plus the player to move. Everything derived
//! from the cells is computed once at construction:
//! - the legal moves, in flattened-index order (board-major, then cell)
//! - the terminal utility
//! - a packed identity key
//!
//! States are never mutated. [`BoardState::traverse`] returns a successor.
//!
//! ## Identity
//!
//! Equality and hashing use only the packed cell contents ([`StateKey`]).
//! The player to move is not part of the identity, so two identical cubes
//! with different players to move compare equal.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::StateError;
use super::lines::{BOARD_CELLS, CELL_COUNT, LINES_BY_CELL, SIZE, WINNING_LINES};
use super::player::{Cell, Player};

/// Legal move list. Inline capacity covers the whole cube.
pub type MoveList = SmallVec<[u8; CELL_COUNT]>;

/// Terminal status of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utility {
    /// Game still open.
    Undetermined,
    /// Cube full with no winning line.
    Draw,
    /// The player owns a complete winning line.
    Win(Player),
}

impl Utility {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Utility::Undetermined)
    }

    #[must_use]
    pub fn winner(self) -> Option<Player> {
        match self {
            Utility::Win(player) => Some(player),
            _ => None,
        }
    }

    /// Raw value matching the snapshot encoding: `1`, `-1`, `0` for a draw.
    #[must_use]
    pub fn value(self) -> Option<i8> {
        match self {
            Utility::Undetermined => None,
            Utility::Draw => Some(0),
            Utility::Win(player) => Some(player.value()),
        }
    }
}

impl fmt::Display for Utility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utility::Undetermined => write!(f, "Undetermined"),
            Utility::Draw => write!(f, "Draw"),
            Utility::Win(player) => write!(f, "{} wins", player),
        }
    }
}

/// Packed cube contents, two bits per cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(pub u128);

impl StateKey {
    fn from_cells(cells: &[Cell; CELL_COUNT]) -> Self {
        let packed = cells
            .iter()
            .enumerate()
            .fold(0u128, |acc, (i, cell)| acc | (cell.bits() << (2 * i)));
        Self(packed)
    }

    #[inline]
    fn with_cell(self, index: usize, cell: Cell) -> Self {
        Self(self.0 | (cell.bits() << (2 * index)))
    }
}

/// Immutable position: cube contents and the player to move.
#[derive(Clone, Debug)]
pub struct BoardState {
    cells: [Cell; CELL_COUNT],
    player: Player,
    moves: MoveList,
    utility: Utility,
    key: StateKey,
}

impl BoardState {
    /// Empty cube with `Plus` to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            player: Player::Plus,
            moves: (0..CELL_COUNT as u8).collect(),
            utility: Utility::Undetermined,
            key: StateKey::default(),
        }
    }

    /// Build a state from typed cells.
    ///
    /// Fails with [`StateError::ConflictingWinners`] if both players own a
    /// winning line, which no legal game can reach.
    pub fn from_cells(cells: [Cell; CELL_COUNT], player: Player) -> Result<Self, StateError> {
        let moves = empty_cells(&cells);
        let utility = scan_utility(&cells, moves.is_empty())?;
        let key = StateKey::from_cells(&cells);
        Ok(Self { cells, player, moves, utility, key })
    }

    /// Build a state from a raw snapshot (`1` = Plus, `-1` = Minus, `0` = empty).
    pub fn from_values(values: &[i8], player: Player) -> Result<Self, StateError> {
        if values.len() != CELL_COUNT {
            return Err(StateError::WrongCellCount {
                expected: CELL_COUNT,
                actual: values.len(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (index, (&value, cell)) in values.iter().zip(cells.iter_mut()).enumerate() {
            *cell = Cell::from_value(value).ok_or(StateError::InvalidCellValue { index, value })?;
        }
        Self::from_cells(cells, player)
    }

    /// Player to move.
    #[inline]
    #[must_use]
    pub fn player(&self) -> Player {
        self.player
    }

    /// Legal moves as flattened indices, ascending.
    ///
    /// Search trees align their children with this order.
    #[inline]
    #[must_use]
    pub fn moves(&self) -> &[u8] {
        &self.moves
    }

    #[inline]
    #[must_use]
    pub fn utility(&self) -> Utility {
        self.utility
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.utility.is_terminal()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.utility.winner()
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> StateKey {
        self.key
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Content of `cell` on `board`.
    ///
    /// # Panics
    ///
    /// Panics if `board >= 4` or `cell >= 16`.
    #[must_use]
    pub fn cell(&self, board: usize, cell: usize) -> Cell {
        assert!(board < SIZE && cell < BOARD_CELLS, "cell ({board}, {cell}) is outside the cube");
        self.cells[board * BOARD_CELLS + cell]
    }

    /// Raw snapshot of the cube.
    #[must_use]
    pub fn values(&self) -> Vec<i8> {
        self.cells.iter().map(|c| c.value()).collect()
    }

    #[must_use]
    pub fn is_legal(&self, index: usize) -> bool {
        !self.is_terminal() && index < CELL_COUNT && self.cells[index].is_empty()
    }

    /// Successor after the player to move marks `index`.
    pub fn try_traverse(&self, index: usize) -> Result<Self, StateError> {
        if self.is_terminal() {
            return Err(StateError::GameOver);
        }
        if index >= CELL_COUNT || !self.cells[index].is_empty() {
            return Err(StateError::IllegalMove { index });
        }

        let mark = self.player.mark();
        let mut cells = self.cells;
        cells[index] = mark;

        let mut moves = self.moves.clone();
        if let Ok(pos) = moves.binary_search(&(index as u8)) {
            moves.remove(pos);
        }

        // The parent was open, so only lines through the new mark can have closed.
        let won = LINES_BY_CELL[index].as_slice().iter().any(|&l| {
            WINNING_LINES[l as usize].cells.iter().all(|&c| cells[c as usize] == mark)
        });
        let utility = if won {
            Utility::Win(self.player)
        } else if moves.is_empty() {
            Utility::Draw
        } else {
            Utility::Undetermined
        };

        Ok(Self {
            cells,
            player: self.player.opponent(),
            moves,
            utility,
            key: self.key.with_cell(index, mark),
        })
    }

    /// Successor after the player to move marks `index`.
    ///
    /// # Panics
    ///
    /// Panics if the game is over or `index` is not a legal move. Callers
    /// that take untrusted input should use [`BoardState::try_traverse`].
    #[must_use]
    pub fn traverse(&self, index: usize) -> Self {
        match self.try_traverse(index) {
            Ok(next) => next,
            Err(err) => panic!("traverse({index}) rejected: {err}"),
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for BoardState {}

impl Hash for BoardState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for BoardState {
    /// Four rows, each showing that row of all four boards side by side.
    /// Empty cells show their flattened index, marked cells show `X` or `O`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in 0..SIZE {
            for board in 0..SIZE {
                for col in 0..SIZE {
                    let index = board * BOARD_CELLS + row * SIZE + col;
                    match self.cells[index].owner() {
                        None => write!(f, "{:>4}", index)?,
                        Some(player) => write!(f, "{:>4}", player.symbol())?,
                    }
                }
                write!(f, "{:width$}", "", width = SIZE)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn empty_cells(cells: &[Cell; CELL_COUNT]) -> MoveList {
    cells
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_empty())
        .map(|(i, _)| i as u8)
        .collect()
}

fn scan_utility(cells: &[Cell; CELL_COUNT], full: bool) -> Result<Utility, StateError> {
    let mut winners = [false; 2];
    for line in WINNING_LINES.iter() {
        let first = cells[line.cells[0] as usize];
        if let Some(owner) = first.owner() {
            if line.cells[1..].iter().all(|&c| cells[c as usize] == first) {
                winners[owner as usize] = true;
            }
        }
    }

    match winners {
        [true, true] => Err(StateError::ConflictingWinners),
        [true, false] => Ok(Utility::Win(Player::Plus)),
        [false, true] => Ok(Utility::Win(Player::Minus)),
        [false, false] if full => Ok(Utility::Draw),
        [false, false] => Ok(Utility::Undetermined),
    }
}
