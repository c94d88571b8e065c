//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// Iteration budget used by the automated opponent.
pub const DEFAULT_ITERATIONS: u32 = 5000;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCB1 exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Select/expand/simulate/backpropagate cycles per move decision.
    pub iterations: u32,

    /// Random seed for tie-breaking and rollouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Optional wall-clock budget per decision, checked between iterations.
    pub time_limit_ms: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            iterations: DEFAULT_ITERATIONS,
            seed: 42,
            time_limit_ms: None,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config that stops searching after `ms` milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MCTSConfig::default();
        assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 0.001);
        assert_eq!(config.iterations, 5000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.time_limit_ms, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MCTSConfig::default()
            .with_exploration(2.0)
            .with_seed(123)
            .with_iterations(50)
            .with_time_limit_ms(250);

        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.iterations, 50);
        assert_eq!(config.time_limit_ms, Some(250));
    }

    #[test]
    fn test_serialization() {
        let config = MCTSConfig::default().with_time_limit_ms(10);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
