//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references. Children are
//! owned top-down by the arena; parent links are plain indices used only to
//! walk back up during backpropagation.

use rustc_hash::FxHashSet;

use super::node::{NodeId, SearchNode};
use super::policy::Ucb1;
use crate::core::{GameRng, Player, Utility};

/// Arena-based MCTS tree for one move decision.
#[derive(Clone, Debug)]
pub struct SearchTree {
    /// All nodes in the tree.
    nodes: Vec<SearchNode>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl SearchTree {
    /// Create a tree holding only `root`.
    pub fn new(root: SearchNode) -> Self {
        let mut nodes = Vec::with_capacity(1024);
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode {
        self.get(self.root)
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Create one child per legal move, in move order.
    ///
    /// No-op on an already expanded node; a terminal node is marked expanded
    /// without children. Returns the number of children added.
    ///
    /// # Panics
    ///
    /// Panics if an open position reports no legal moves.
    pub fn expand(&mut self, id: NodeId) -> usize {
        if self.get(id).is_expanded() {
            return 0;
        }
        if self.get(id).is_terminal() {
            self.get_mut(id).mark_expanded();
            return 0;
        }

        let node = self.get(id);
        assert!(!node.state().moves().is_empty(), "open position without legal moves");
        let depth = node.depth() + 1;
        let successors: Vec<_> = node
            .state()
            .moves()
            .iter()
            .map(|&mv| node.state().traverse(mv as usize))
            .collect();

        let mut children = Vec::with_capacity(successors.len());
        for state in successors {
            let child = NodeId::new(self.nodes.len() as u32);
            self.nodes.push(SearchNode::new(state, id, depth));
            children.push(child);
        }

        let added = children.len();
        let node = self.get_mut(id);
        node.children = children;
        node.mark_expanded();
        added
    }

    /// Child of `id` chosen by the UCB1 policy.
    ///
    /// # Panics
    ///
    /// Panics if `id` has no children.
    pub fn select_best_child(&self, id: NodeId, ucb: &Ucb1, rng: &mut GameRng) -> NodeId {
        let node = self.get(id);
        let children = node.children.iter().map(|&c| self.get(c));
        match ucb.select(node.visits(), children, rng) {
            Some(pos) => node.children[pos],
            None => panic!("selection from {} which has no children", id),
        }
    }

    /// Record `outcome` on `from` and every ancestor up to the root.
    pub fn backpropagate(&mut self, from: NodeId, outcome: Utility, root_player: Player) {
        let mut current = from;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.record_outcome(outcome, root_player);
            current = node.parent;
        }
    }

    /// Record the move of the child with the highest win ratio on `id`.
    ///
    /// The first child wins ties. An unexpanded node records no selection.
    pub fn refresh_selection(&mut self, id: NodeId) {
        let node = self.get(id);
        let selection = if node.is_expanded() {
            let mut best: Option<(u8, f64)> = None;
            for (&child, &mv) in node.children.iter().zip(node.state().moves()) {
                let ratio = self.get(child).win_ratio();
                if best.map_or(true, |(_, b)| ratio > b) {
                    best = Some((mv, ratio));
                }
            }
            best.map(|(mv, _)| mv)
        } else {
            None
        };
        self.get_mut(id).selection = selection;
    }

    /// Check that no node's children were visited more often than the node.
    #[must_use]
    pub fn check_visit_invariant(&self) -> bool {
        self.nodes.iter().all(|node| {
            let child_visits: u64 = node
                .children
                .iter()
                .map(|&c| u64::from(self.get(c).visits()))
                .sum();
            child_visits <= u64::from(node.visits())
        })
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth()).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal()).count();
        let expanded_count = self.nodes.iter().filter(|n| n.is_expanded()).count();
        let unique_positions = self
            .nodes
            .iter()
            .map(|n| n.state().key())
            .collect::<FxHashSet<_>>()
            .len();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            expanded_count,
            unique_positions,
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Number of expanded nodes.
    pub expanded_count: usize,

    /// Distinct cube contents among all nodes.
    pub unique_positions: usize,
}

impl TreeStats {
    /// Get the branching factor (children per expanded node).
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / self.expanded_count as f64
        }
    }
}
