//! # cube-ttt
//!
//! 4×4×4 tic-tac-toe with a Monte Carlo Tree Search opponent.
//!
//! ## Design Principles
//!
//! 1. **Immutable positions**: every move produces a new [`BoardState`]; a
//!    position never changes after it is built.
//!
//! 2. **Seeded randomness**: all search randomness flows through an injected
//!    [`GameRng`], so any decision can be replayed.
//!
//! 3. **Fresh search per decision**: the AI builds a new tree for every move
//!    and keeps nothing between turns.
//!
//! ## Modules
//!
//! - `core`: players, cells, winning lines, positions, RNG, errors
//! - `mcts`: Monte Carlo Tree Search for choosing moves
//! - `game`: turn loop for human and AI seats
//! - `python`: Python bindings (feature `python`)

pub mod core;
pub mod game;
pub mod mcts;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    BoardState, Cell, GameRng, LineKind, MoveList, Player, StateError, StateKey, Utility,
    WinningLine, CELL_COUNT, LINE_COUNT, WINNING_LINES,
};

pub use crate::game::{AiWorker, Match, MatchError, Seat, WorkerError};

pub use crate::mcts::{
    get_next_move, MCTSConfig, MCTSSearch, NodeId, RootChild, SearchNode, SearchStats,
    SearchTree, TreeStats, Ucb1, DEFAULT_ITERATIONS,
};
