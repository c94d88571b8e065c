//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during MCTS search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed.
    pub iterations: u32,

    /// Nodes expanded (frontier nodes that received children).
    pub nodes_expanded: u32,

    /// Simulations (rollouts) performed.
    pub simulations: u32,

    /// Random moves played across all rollouts.
    pub rollout_plies: u64,

    /// Maximum depth reached during search, rollouts included.
    pub max_depth: u16,

    /// Whether the time limit cut the search short.
    pub stopped_early: bool,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate average rollout length.
    #[must_use]
    pub fn avg_rollout_plies(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollout_plies as f64 / self.simulations as f64
        }
    }
}
