//! Players and cell contents.
//!
//! ## Player
//!
//! The two sides of the game. `Plus` always moves first from the empty cube
//! and is rendered as `X`; `Minus` is rendered as `O`.
//!
//! ## Cell
//!
//! The content of one cube cell: empty or carrying a player's mark.
//! The raw integer encoding (`1`, `-1`, `0`) is what external snapshots use.

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// First player, marks cells with `X`.
    Plus,
    /// Second player, marks cells with `O`.
    Minus,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::Plus, Player::Minus];

    /// The other side.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Plus => Player::Minus,
            Player::Minus => Player::Plus,
        }
    }

    /// The mark this player leaves in a cell.
    #[inline]
    #[must_use]
    pub const fn mark(self) -> Cell {
        match self {
            Player::Plus => Cell::Plus,
            Player::Minus => Cell::Minus,
        }
    }

    /// Raw snapshot value (`1` or `-1`).
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Player::Plus => 1,
            Player::Minus => -1,
        }
    }

    /// Parse a raw snapshot value.
    #[must_use]
    pub const fn from_value(value: i8) -> Option<Self> {
        match value {
            1 => Some(Player::Plus),
            -1 => Some(Player::Minus),
            _ => None,
        }
    }

    /// Single-character symbol used when rendering.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Player::Plus => 'X',
            Player::Minus => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Content of a single cube cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Plus,
    Minus,
}

impl Cell {
    /// The owner of this cell, if any.
    #[inline]
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Plus => Some(Player::Plus),
            Cell::Minus => Some(Player::Minus),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Raw snapshot value (`1`, `-1`, or `0`).
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Plus => 1,
            Cell::Minus => -1,
        }
    }

    /// Parse a raw snapshot value.
    #[must_use]
    pub const fn from_value(value: i8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Plus),
            -1 => Some(Cell::Minus),
            _ => None,
        }
    }

    /// Two-bit code used by the packed state key.
    #[inline]
    pub(crate) const fn bits(self) -> u128 {
        match self {
            Cell::Empty => 0b00,
            Cell::Plus => 0b01,
            Cell::Minus => 0b10,
        }
    }
}
