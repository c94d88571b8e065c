//! Game rules: cube geometry, players, immutable positions, RNG.
//!
//! Everything the search needs to know about the game lives here. The search
//! only ever sees [`BoardState`] values and flattened move indices.

pub mod error;
pub mod lines;
pub mod player;
pub mod rng;
pub mod state;

pub use error::StateError;
pub use lines::{
    flat_index, split_index, LineKind, WinningLine, BOARD_CELLS, CELL_COUNT, LINE_COUNT, SIZE,
    WINNING_LINES,
};
pub use player::{Cell, Player};
pub use rng::GameRng;
pub use state::{BoardState, MoveList, StateKey, Utility};
