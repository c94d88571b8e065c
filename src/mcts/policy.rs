//! Selection and simulation policies.
//!
//! - [`Ucb1`]: picks which child to descend into during selection.
//! - [`random_rollout`]: plays uniformly random moves to the end of the game.

use smallvec::SmallVec;

use crate::core::{GameRng, Utility};

use super::node::SearchNode;

// =============================================================================
// Selection Policy
// =============================================================================

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high win ratio) with exploration (low visits).
/// Formula: W(c) + C * sqrt(ln(N) / n(c))
#[derive(Clone, Copy, Debug)]
pub struct Ucb1 {
    pub exploration_constant: f64,
}

impl Default for Ucb1 {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
        }
    }
}

impl Ucb1 {
    #[must_use]
    pub fn new(exploration_constant: f64) -> Self {
        Self { exploration_constant }
    }

    /// UCB1 value of a visited child under a parent with `parent_visits > 0`.
    #[must_use]
    pub fn score(&self, child: &SearchNode, parent_visits: u32) -> f64 {
        let explore = ((parent_visits as f64).ln() / child.visits() as f64).sqrt();
        child.win_ratio() + self.exploration_constant * explore
    }

    /// Position of the child to descend into.
    ///
    /// - Unvisited parent: children are ranked by win ratio alone.
    /// - Otherwise the first unvisited child is taken at once.
    /// - Otherwise the highest UCB1 value wins.
    ///
    /// Ties are broken uniformly at random. Returns `None` if `children` is empty.
    pub fn select<'a, I>(&self, parent_visits: u32, children: I, rng: &mut GameRng) -> Option<usize>
    where
        I: IntoIterator<Item = &'a SearchNode>,
    {
        let mut best = f64::NEG_INFINITY;
        let mut tied: SmallVec<[usize; 8]> = SmallVec::new();

        for (i, child) in children.into_iter().enumerate() {
            let value = if parent_visits == 0 {
                child.win_ratio()
            } else if child.visits() == 0 {
                return Some(i);
            } else {
                self.score(child, parent_visits)
            };

            if value > best {
                best = value;
                tied.clear();
                tied.push(i);
            } else if value == best {
                tied.push(i);
            }
        }

        match tied.len() {
            0 => None,
            1 => Some(tied[0]),
            n => Some(tied[rng.gen_range_usize(0..n)]),
        }
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Result of one rollout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rollout {
    /// Terminal utility reached.
    pub outcome: Utility,
    /// Random moves played to get there.
    pub plies: u32,
    /// Depth of the terminal node, counting from the search root.
    pub depth: u16,
}

/// Play uniformly random moves from `start` until the game ends.
///
/// Every intermediate node is detached and dropped as soon as the next one
/// exists; nothing is added to the tree.
pub fn random_rollout(start: &SearchNode, rng: &mut GameRng) -> Rollout {
    if start.is_terminal() {
        return Rollout {
            outcome: start.state().utility(),
            plies: 0,
            depth: start.depth(),
        };
    }

    let mut node = start.play_random_move(rng);
    let mut plies = 1;
    while !node.is_terminal() {
        node = node.play_random_move(rng);
        plies += 1;
    }

    Rollout {
        outcome: node.state().utility(),
        plies,
        depth: node.depth(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardState, Player};
    use crate::mcts::node::NodeId;

    fn child(visits: u32, wins: u32) -> SearchNode {
        let mut node = SearchNode::new(BoardState::new(), NodeId::new(0), 1);
        for i in 0..visits {
            let outcome = if i < wins {
                Utility::Win(Player::Plus)
            } else {
                Utility::Win(Player::Minus)
            };
            node.record_outcome(outcome, Player::Plus);
        }
        node
    }

    #[test]
    fn test_ucb1_selects_first_unvisited() {
        let children = vec![child(10, 8), child(0, 0), child(5, 1), child(0, 0)];
        let ucb = Ucb1::default();

        for seed in 0..10 {
            let selected = ucb.select(15, &children, &mut GameRng::new(seed));
            assert_eq!(selected, Some(1));
        }
    }

    #[test]
    fn test_ucb1_all_visited() {
        // Equal exploration bonus, so the better win ratio wins.
        let children = vec![child(10, 2), child(10, 7), child(10, 5)];
        let ucb = Ucb1::default();

        let selected = ucb.select(30, &children, &mut GameRng::new(1));
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn test_ucb1_prefers_less_visited() {
        // Same win ratio; the rarely visited child has the larger bonus.
        let children = vec![child(100, 50), child(4, 2)];
        let ucb = Ucb1::default();

        assert!(ucb.score(&children[1], 104) > ucb.score(&children[0], 104));
        assert_eq!(ucb.select(104, &children, &mut GameRng::new(1)), Some(1));
    }

    #[test]
    fn test_ucb1_unvisited_parent_breaks_ties_randomly() {
        let children: Vec<_> = (0..4).map(|_| child(0, 0)).collect();
        let ucb = Ucb1::default();

        let mut seen = [false; 4];
        for seed in 0..64 {
            let idx = ucb.select(0, &children, &mut GameRng::new(seed)).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "tie-break should reach every child: {:?}", seen);
    }

    #[test]
    fn test_ucb1_empty() {
        let children: Vec<SearchNode> = Vec::new();
        assert_eq!(Ucb1::default().select(3, &children, &mut GameRng::new(0)), None);
    }

    #[test]
    fn test_random_rollout_reaches_terminal() {
        let start = SearchNode::root(BoardState::new());
        let mut rng = GameRng::new(99);

        for _ in 0..20 {
            let rollout = random_rollout(&start, &mut rng);
            assert!(rollout.outcome.is_terminal());
            assert!(rollout.plies >= 7 && rollout.plies <= 64);
            assert_eq!(rollout.depth as u32, rollout.plies);
        }
    }

    #[test]
    fn test_random_rollout_on_terminal() {
        let mut state = BoardState::new();
        for mv in [0, 16, 1, 17, 2, 18, 3] {
            state = state.traverse(mv);
        }
        let start = SearchNode::root(state);
        let rollout = random_rollout(&start, &mut GameRng::new(0));

        assert_eq!(rollout.outcome, Utility::Win(Player::Plus));
        assert_eq!(rollout.plies, 0);
    }
}
