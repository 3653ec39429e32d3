//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>. The arena owns every
//! node; a node's children are a list of indices and its parent is an index
//! used only for upward traversal.

use crate::node::{Node, NodeId};
use crate::search::SearchError;
use playout_core::{GameState, Outcome};
use std::collections::VecDeque;

/// Arena-allocated MCTS tree.
///
/// Nodes are stored in a contiguous vector and referenced by index.
/// The root is always at [`NodeId::ROOT`].
#[derive(Clone, Debug)]
pub struct Tree<S: GameState> {
    nodes: Vec<Node<S>>,
}

impl<S: GameState> Tree<S> {
    /// Create a new tree whose root wraps `state`.
    pub fn new(state: S) -> Self {
        Self {
            nodes: vec![Node::root(state)],
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    /// Get a node by ID, if it exists.
    pub fn try_get(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    /// Get the root node.
    pub fn root_node(&self) -> &Node<S> {
        self.get(NodeId::ROOT)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true, the root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn add(&mut self, node: Node<S>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Expand a node by adding one child per legal move of its mover.
    ///
    /// All successor states are computed before the arena is touched, so a
    /// failing game call leaves the tree unchanged. Expanding a terminal or
    /// already expanded node is a no-op.
    pub fn expand(&mut self, id: NodeId) -> Result<(), SearchError> {
        let node = self.get(id);
        if node.is_leaf() || node.is_expanded() {
            return Ok(());
        }

        let state = node.state();
        let successors = state
            .legal_moves(state.player())?
            .into_iter()
            .map(|mv| {
                let next = state.apply_move(&mv)?;
                Ok((mv, next))
            })
            .collect::<Result<Vec<_>, SearchError>>()?;

        let children: Vec<NodeId> = successors
            .into_iter()
            .map(|(mv, next)| self.add(Node::new(next, Some(mv), Some(id))))
            .collect();
        self.get_mut(id).set_children(children);
        Ok(())
    }

    /// Undo the most recent [`Tree::expand`] of `id`.
    ///
    /// Its children must be the last nodes in the arena, which holds until
    /// anything else is added.
    pub(crate) fn collapse(&mut self, id: NodeId) {
        if let Some(&first) = self.get(id).children().first() {
            debug_assert!(self.get(id).children().iter().all(|c| c.0 >= first.0));
            self.nodes.truncate(first.0);
        }
        self.get_mut(id).set_children(Vec::new());
    }

    /// Backpropagate a rollout outcome from `start` up to the root.
    ///
    /// Every node on the path gets one more playout. Its score is credited
    /// from the point of view of the player to move at its parent, i.e. the
    /// player whose choice led into it. The root has no parent and is
    /// credited for its own mover, who owns the decision being searched.
    pub fn backpropagate(&mut self, start: NodeId, outcome: Outcome) {
        let mut current = Some(start);

        while let Some(id) = current {
            let parent = self.get(id).parent();
            let credited = match parent {
                Some(parent_id) => self.get(parent_id).state().player(),
                None => self.get(id).state().player(),
            };

            self.get_mut(id).record(outcome.points_for(credited));
            current = parent;
        }
    }

    /// Build a new tree rooted at `new_root`, keeping only its subtree.
    ///
    /// Descendants keep their statistics. The new root's score is flipped to
    /// its own mover, matching what backpropagation credits a root with.
    /// Siblings and ancestors are dropped and the kept nodes are compacted
    /// into a fresh arena.
    pub fn reroot(&self, new_root: NodeId) -> Self {
        let mut root = self.get(new_root).clone();
        root.detach();

        let mut nodes = vec![root];
        let mut queue = VecDeque::from([(new_root, NodeId::ROOT)]);

        while let Some((old_id, new_id)) = queue.pop_front() {
            let mut remapped = Vec::with_capacity(self.get(old_id).children().len());
            for &old_child in self.get(old_id).children() {
                let child_id = NodeId(nodes.len());
                let mut child = self.get(old_child).clone();
                child.set_parent(Some(new_id));
                nodes.push(child);
                remapped.push(child_id);
                queue.push_back((old_child, child_id));
            }
            nodes[new_id.0].set_children(remapped);
        }

        Self { nodes }
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.nodes.len(),
            root_playouts: self.root_node().playouts(),
            max_depth: self.max_depth(),
        }
    }

    fn max_depth(&self) -> u32 {
        let mut deepest = 0;
        let mut stack = vec![(NodeId::ROOT, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(self.get(id).children().iter().map(|&c| (c, depth + 1)));
        }
        deepest
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_playouts: u32,
    pub max_depth: u32,
}
