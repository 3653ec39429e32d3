//! UCB1 child selection.
//!
//! ```text
//! score(n) = wins(n) / playouts(n) + C * sqrt(ln(playouts(parent)) / playouts(n))
//! ```
//!
//! An unvisited node scores +inf, so every child is tried once before any
//! sibling is revisited. `wins` is in fixed-point units, so the exploitation
//! term ranges over `[0, 2]`.

use crate::node::NodeId;
use crate::search::SearchError;
use crate::tree::Tree;
use playout_core::GameState;

/// UCB1 selection policy with an injectable exploration constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ucb1 {
    exploration: f64,
}

impl Ucb1 {
    pub fn new(exploration: f64) -> Self {
        Self { exploration }
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    /// Score of node `id` as seen from its parent.
    ///
    /// The root has no parent and is scored against its own playouts.
    /// `ln` is taken of at least 1 so a child seeded as terminal under a
    /// parent that was never visited scores its exploitation term.
    pub fn score<S: GameState>(&self, tree: &Tree<S>, id: NodeId) -> f64 {
        let node = tree.get(id);
        if node.playouts() == 0 {
            return f64::INFINITY;
        }

        let parent_playouts = node
            .parent()
            .map_or(node.playouts(), |parent| tree.get(parent).playouts())
            .max(1) as f64;
        let playouts = node.playouts() as f64;

        let exploitation = node.wins() as f64 / playouts;
        let exploration = self.exploration * (parent_playouts.ln() / playouts).sqrt();
        exploitation + exploration
    }

    /// Child of `id` with the highest score. Ties go to the earliest child.
    pub fn best_child<S: GameState>(
        &self,
        tree: &Tree<S>,
        id: NodeId,
    ) -> Result<NodeId, SearchError> {
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;

        for &child in tree.get(id).children() {
            let score = self.score(tree, child);
            if best.is_none() || score > best_score {
                best_score = score;
                best = Some(child);
            }
        }

        best.ok_or(SearchError::NoChildren(id))
    }
}

impl Default for Ucb1 {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}
