//! MCTS node structure.
//!
//! Nodes live in the [`SearchTree`](super::SearchTree) arena and refer to each
//! other by [`NodeId`]. The parent link is a plain index, so it never owns
//! anything; the arena owns every node and frees them together.

use crate::core::{BoardState, GameRng, Player, Utility};

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the MCTS tree, wrapping one position.
#[derive(Clone, Debug)]
pub struct SearchNode {
    state: BoardState,

    /// Parent node (NONE for the root and for detached rollout nodes).
    pub(crate) parent: NodeId,

    /// Depth in tree (root = 0).
    pub(crate) depth: u16,

    /// Children, positionally aligned with `state.moves()` once expanded.
    pub(crate) children: Vec<NodeId>,

    visits: u32,
    score: f64,
    expanded: bool,

    /// Move judged best among the children, by win ratio.
    pub(crate) selection: Option<u8>,
}

impl SearchNode {
    /// Create a new node.
    pub fn new(state: BoardState, parent: NodeId, depth: u16) -> Self {
        Self {
            state,
            parent,
            depth,
            children: Vec::new(),
            visits: 0,
            score: 0.0,
            expanded: false,
            selection: None,
        }
    }

    /// Create a root node.
    pub fn root(state: BoardState) -> Self {
        Self::new(state, NodeId::NONE, 0)
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn visits(&self) -> u32 {
        self.visits
    }

    #[inline]
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Best move recorded by the last selection refresh.
    #[must_use]
    pub fn selection(&self) -> Option<u8> {
        self.selection
    }

    /// Mean score per visit, 0 when unvisited.
    #[must_use]
    pub fn win_ratio(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / self.visits as f64
        }
    }

    /// Count one visit that ended in `outcome`, scored for `root_player`.
    ///
    /// A win for the root player is worth 1, a draw 0.5, a loss nothing.
    pub fn record_outcome(&mut self, outcome: Utility, root_player: Player) {
        debug_assert!(outcome.is_terminal(), "recording an open position as an outcome");
        self.visits += 1;
        match outcome {
            Utility::Win(winner) if winner == root_player => self.score += 1.0,
            Utility::Draw => self.score += 0.5,
            _ => {}
        }
    }

    pub(crate) fn mark_expanded(&mut self) {
        self.expanded = true;
    }

    /// Successor after a uniformly random legal move, as a detached node.
    ///
    /// Used only by rollouts. The returned node has no parent and is never
    /// inserted into a tree.
    ///
    /// # Panics
    ///
    /// Panics if the wrapped position is terminal.
    #[must_use]
    pub fn play_random_move(&self, rng: &mut GameRng) -> SearchNode {
        assert!(!self.is_terminal(), "random move requested on a terminal position");
        let Some(&mv) = rng.choose(self.state.moves()) else {
            panic!("open position without legal moves");
        };
        SearchNode::new(self.state.traverse(mv as usize), NodeId::NONE, self.depth + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");

        assert!(NodeId::NONE.is_none());
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_node_root() {
        let node = SearchNode::root(BoardState::new());

        assert!(node.parent().is_none());
        assert_eq!(node.depth(), 0);
        assert_eq!(node.visits(), 0);
        assert!(!node.is_expanded());
        assert!(!node.is_terminal());
        assert!(node.children().is_empty());
        assert_eq!(node.selection(), None);
    }

    #[test]
    fn test_record_outcome() {
        let mut node = SearchNode::root(BoardState::new());
        assert_eq!(node.win_ratio(), 0.0);

        node.record_outcome(Utility::Win(Player::Plus), Player::Plus);
        node.record_outcome(Utility::Draw, Player::Plus);
        node.record_outcome(Utility::Win(Player::Minus), Player::Plus);
        node.record_outcome(Utility::Win(Player::Plus), Player::Plus);

        assert_eq!(node.visits(), 4);
        assert_eq!(node.score(), 2.5);
        assert_eq!(node.win_ratio(), 0.625);
    }

    #[test]
    fn test_record_outcome_for_minus() {
        let mut node = SearchNode::root(BoardState::new());
        node.record_outcome(Utility::Win(Player::Plus), Player::Minus);
        node.record_outcome(Utility::Win(Player::Minus), Player::Minus);

        assert_eq!(node.visits(), 2);
        assert_eq!(node.win_ratio(), 0.5);
    }

    #[test]
    fn test_play_random_move_is_detached() {
        let node = SearchNode::root(BoardState::new());
        let mut rng = GameRng::new(3);

        let next = node.play_random_move(&mut rng);
        assert!(next.parent().is_none());
        assert_eq!(next.depth(), 1);
        assert_eq!(next.state().moves().len(), 63);
        assert_eq!(next.state().player(), Player::Minus);
        assert_eq!(next.visits(), 0);
    }

    #[test]
    fn test_play_random_move_deterministic() {
        let node = SearchNode::root(BoardState::new());
        let a = node.play_random_move(&mut GameRng::new(11));
        let b = node.play_random_move(&mut GameRng::new(11));
        assert_eq!(a.state(), b.state());
    }
}
