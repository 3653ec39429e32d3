//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler memory
//! management. The parent link is a plain index used only to walk upward
//! during backpropagation; ownership of children lives in the arena.

use playout_core::{GameState, Outcome, DRAW_POINTS, WIN_POINTS};
use std::fmt;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead and
/// parent/child reference cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the MCTS tree.
///
/// Wraps exactly one game state together with its playout statistics.
/// `wins` is kept in fixed-point units (2 per win, 1 per draw), credited to
/// the player who made the move leading into this node. The root has no such
/// move and is credited for its own mover instead.
#[derive(Clone, Debug)]
pub struct Node<S: GameState> {
    state: S,

    /// Move that produced this state (None for root).
    last_move: Option<S::Move>,

    parent: Option<NodeId>,

    /// Children in legal-move order. Empty until the node is expanded.
    children: Vec<NodeId>,

    playouts: u32,

    wins: u32,
}

impl<S: GameState> Node<S> {
    /// Create a node wrapping `state`.
    ///
    /// A terminal state is scored on the spot: one playout, worth a full win
    /// if the game was decided and a draw otherwise. These seeded values are
    /// never recomputed.
    pub(crate) fn new(state: S, last_move: Option<S::Move>, parent: Option<NodeId>) -> Self {
        let (playouts, wins) = if state.is_terminal() {
            // A decided terminal position was won by the player who just moved.
            match state.winner() {
                Some(_) => (1, WIN_POINTS),
                None => (1, DRAW_POINTS),
            }
        } else {
            (0, 0)
        };

        Self {
            state,
            last_move,
            parent,
            children: Vec::new(),
            playouts,
            wins,
        }
    }

    /// Create a root node.
    ///
    /// A terminal root is scored for the player to move there.
    pub(crate) fn root(state: S) -> Self {
        let mut node = Self::new(state, None, None);
        if node.state.is_terminal() {
            let outcome = Outcome::from_winner(node.state.winner());
            node.wins = outcome.points_for(node.state.player());
        }
        node
    }

    /// The wrapped game state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The move that led here from the parent.
    pub fn last_move(&self) -> Option<&S::Move> {
        self.last_move.as_ref()
    }

    /// Parent node, absent for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of playouts recorded through this node.
    pub fn playouts(&self) -> u32 {
        self.playouts
    }

    /// Accumulated score in fixed-point units.
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// A leaf is a terminal state, whether or not anything was expanded.
    pub fn is_leaf(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether children have been materialized.
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Fraction of available points won, in `[0, 1]`.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn win_rate(&self) -> f64 {
        if self.playouts == 0 {
            0.0
        } else {
            self.wins as f64 / (WIN_POINTS as f64 * self.playouts as f64)
        }
    }

    /// Turn a former child into a root.
    ///
    /// Every playout splits `WIN_POINTS` between the two players, so the
    /// complement of the parent mover's score is the score of this node's
    /// own mover.
    pub(crate) fn detach(&mut self) {
        self.parent = None;
        self.wins = WIN_POINTS * self.playouts - self.wins;
    }

    pub(crate) fn set_children(&mut self, children: Vec<NodeId>) {
        self.children = children;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Record one playout worth `points`.
    pub(crate) fn record(&mut self, points: u32) {
        self.playouts += 1;
        self.wins += points;
    }
}
