//! Core MCTS search algorithm.
//!
//! Each decision builds a fresh tree from the given position and runs
//! select → expand → simulate → backpropagate cycles on it. After every
//! cycle the root records the child with the best win ratio, so the current
//! answer is valid even if the search is cut short.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::core::{BoardState, GameRng, Player};

use super::config::MCTSConfig;
use super::node::SearchNode;
use super::policy::{random_rollout, Ucb1};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Per-move summary of the root's children.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootChild {
    /// Flattened index of the move.
    pub mv: u8,
    pub visits: u32,
    pub win_ratio: f64,
}

/// Main MCTS search context.
///
/// Owns the configuration and the random source. The tree of the most
/// recent search is kept for inspection and replaced by the next search;
/// it is never reused as a starting point.
pub struct MCTSSearch {
    /// Search configuration.
    config: MCTSConfig,

    /// RNG for tie-breaks and rollouts.
    rng: GameRng,

    /// Selection policy.
    ucb: Ucb1,

    /// Tree built by the last search.
    tree: Option<SearchTree>,

    /// Search statistics.
    stats: SearchStats,
}

impl MCTSSearch {
    /// Create a new MCTS search context seeded from `config.seed`.
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create a search context drawing from `rng` instead of `config.seed`.
    pub fn with_rng(config: MCTSConfig, rng: GameRng) -> Self {
        Self {
            ucb: Ucb1::new(config.exploration_constant),
            config,
            rng,
            tree: None,
            stats: SearchStats::default(),
        }
    }

    /// Choose a move for the player to move in `state`, using the configured
    /// iteration budget.
    ///
    /// # Panics
    ///
    /// Panics if `state` is terminal.
    pub fn search(&mut self, state: &BoardState) -> u8 {
        self.search_iterations(state, self.config.iterations)
    }

    /// Choose a move after at most `iterations` search cycles.
    ///
    /// With zero completed cycles the answer is a uniformly random legal move.
    ///
    /// # Panics
    ///
    /// Panics if `state` is terminal.
    pub fn search_iterations(&mut self, state: &BoardState, iterations: u32) -> u8 {
        assert!(
            !state.is_terminal(),
            "search requested on a finished game ({})",
            state.utility()
        );

        let start = Instant::now();
        let time_limit = self.config.time_limit_ms.map(Duration::from_millis);
        self.stats.reset();

        let root_player = state.player();
        let mut tree = SearchTree::new(SearchNode::root(state.clone()));

        for _ in 0..iterations {
            if time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                self.stats.stopped_early = true;
                break;
            }
            self.iteration(&mut tree, root_player);
            self.stats.iterations += 1;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        let chosen = match tree.root_node().selection() {
            Some(mv) => mv,
            None => {
                warn!(
                    "no search data after {} iterations, playing a random move",
                    self.stats.iterations
                );
                match self.rng.choose(state.moves()) {
                    Some(&mv) => mv,
                    None => panic!("open position without legal moves"),
                }
            }
        };

        debug!(
            "{} to move: chose {} after {} iterations ({} nodes, {} rollouts, depth {}, {} us{})",
            root_player,
            chosen,
            self.stats.iterations,
            tree.len(),
            self.stats.simulations,
            self.stats.max_depth,
            self.stats.time_us,
            if self.stats.stopped_early { ", time limit" } else { "" },
        );

        self.tree = Some(tree);
        chosen
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, tree: &mut SearchTree, root_player: Player) {
        // === SELECTION ===
        let mut current = tree.root();
        while tree.get(current).is_expanded() {
            current = tree.select_best_child(current, &self.ucb, &mut self.rng);
        }

        // === EXPANSION / SIMULATION ===
        let (leaf, outcome) = if tree.get(current).is_terminal() {
            (current, tree.get(current).state().utility())
        } else {
            tree.expand(current);
            self.stats.nodes_expanded += 1;

            let child = tree.select_best_child(current, &self.ucb, &mut self.rng);
            let rollout = random_rollout(tree.get(child), &mut self.rng);
            self.stats.simulations += 1;
            self.stats.rollout_plies += u64::from(rollout.plies);
            self.stats.max_depth = self.stats.max_depth.max(rollout.depth);
            (child, rollout.outcome)
        };

        trace!(
            "iteration {}: leaf depth {}, outcome {}",
            self.stats.iterations,
            tree.get(leaf).depth(),
            outcome
        );

        // === BACKPROPAGATION ===
        tree.backpropagate(leaf, outcome, root_player);
        tree.refresh_selection(tree.root());
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the tree built by the last search.
    #[must_use]
    pub fn tree(&self) -> Option<&SearchTree> {
        self.tree.as_ref()
    }

    /// Move currently recorded on the root of the last search.
    #[must_use]
    pub fn best_move(&self) -> Option<u8> {
        self.tree.as_ref().and_then(|t| t.root_node().selection())
    }

    /// Visit counts and win ratios of the root's children, in move order.
    pub fn root_children(&self) -> Vec<RootChild> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        let root = tree.root_node();
        root.children()
            .iter()
            .zip(root.state().moves())
            .map(|(&id, &mv)| {
                let child = tree.get(id);
                RootChild {
                    mv,
                    visits: child.visits(),
                    win_ratio: child.win_ratio(),
                }
            })
            .collect()
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

/// Choose a move for the player to move in `state` with a one-off search.
///
/// Draws all randomness from a fork of `rng`, so a seeded `rng` gives a
/// reproducible answer. The search tree is dropped before returning.
///
/// # Panics
///
/// Panics if `state` is terminal.
pub fn get_next_move(state: &BoardState, iterations: u32, rng: &mut GameRng) -> u8 {
    let config = MCTSConfig::default().with_iterations(iterations);
    MCTSSearch::with_rng(config, rng.fork()).search(state)
}
