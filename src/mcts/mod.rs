//! Monte Carlo Tree Search for the cube.
//!
//! ## Overview
//!
//! Plain UCB1 MCTS with uniformly random rollouts:
//!
//! - **Arena tree**: nodes in a flat vector, parent links by index
//! - **Fresh tree per decision**: nothing is carried between moves
//! - **Anytime answer**: the root's best move is refreshed after every iteration
//! - **Seeded**: all randomness comes from one injectable [`GameRng`](crate::core::GameRng)
//!
//! ## Usage
//!
//! ```rust
//! use cube_ttt::core::BoardState;
//! use cube_ttt::mcts::{MCTSConfig, MCTSSearch};
//!
//! let state = BoardState::new().traverse(0);
//! let mut search = MCTSSearch::new(MCTSConfig::default().with_iterations(200));
//!
//! let mv = search.search(&state);
//! assert!(state.moves().contains(&mv));
//!
//! for row in search.root_children().iter().take(3) {
//!     println!("{}: {} visits, {:.2}", row.mv, row.visits, row.win_ratio);
//! }
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::{MCTSConfig, DEFAULT_ITERATIONS};
pub use node::{NodeId, SearchNode};
pub use policy::{random_rollout, Rollout, Ucb1};
pub use search::{get_next_move, MCTSSearch, RootChild};
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
