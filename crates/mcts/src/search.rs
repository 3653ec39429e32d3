//! Monte Carlo Tree Search implementation.
//!
//! Each iteration runs select, expand, simulate and backpropagate to
//! completion before the next one starts. Selection uses UCB1; the move
//! finally recommended is the robust child (most playouts) of the root.

use crate::{
    config::{MctsConfig, RootPolicy},
    evaluator::Evaluator,
    node::{Node, NodeId},
    selection::Ucb1,
    tree::{Tree, TreeStats},
};
use playout_core::{GameError, GameState};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by the search engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("node {0} has no children")]
    NoChildren(NodeId),

    #[error("iteration budget must be positive")]
    InvalidIterations,

    #[error("node {0} is not part of the tree")]
    UnknownNode(NodeId),
}

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult<M> {
    /// Robust child: the root move with the most playouts.
    pub best_move: M,

    /// Playouts of each root move, in legal-move order.
    pub visit_counts: Vec<(M, u32)>,

    pub root_playouts: u32,

    /// Share of points won at the root, for the player to move there.
    pub root_win_rate: f64,

    /// Iterations run by this search.
    pub iterations: usize,
}

/// Whole milliseconds in `budget`, saturating at `u64::MAX`.
fn budget_millis(budget: Duration) -> u64 {
    u64::try_from(budget.as_millis()).unwrap_or(u64::MAX)
}

/// Monte Carlo Tree Search with UCB1 selection.
///
/// Generic over:
/// - `S`: The game state being searched
/// - `E`: The simulation strategy (random rollouts by default)
///
/// The engine owns its tree and root; independent engines never share state.
pub struct Mcts<S: GameState, E: Evaluator<S>> {
    config: MctsConfig,
    selection: Ucb1,
    evaluator: E,
    tree: Tree<S>,
}

impl<S, E> Mcts<S, E>
where
    S: GameState,
    E: Evaluator<S>,
{
    /// Create an engine bound to a fresh root wrapping `root_state`.
    pub fn new(root_state: S, config: MctsConfig, evaluator: E) -> Self {
        Self {
            selection: Ucb1::new(config.exploration),
            config,
            evaluator,
            tree: Tree::new(root_state),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree<S> {
        &self.tree
    }

    /// The current root node.
    pub fn root(&self) -> &Node<S> {
        self.tree.root_node()
    }

    /// Look up a node for read-only inspection.
    pub fn node(&self, id: NodeId) -> Result<&Node<S>, SearchError> {
        self.tree.try_get(id).ok_or(SearchError::UnknownNode(id))
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }

    /// Run exactly `iterations` complete iterations.
    ///
    /// # Errors
    /// [`SearchError::InvalidIterations`] for a zero budget; game errors from
    /// expansion or simulation are passed through.
    pub fn run(&mut self, iterations: usize) -> Result<(), SearchError> {
        if iterations == 0 {
            return Err(SearchError::InvalidIterations);
        }

        for iteration in 0..iterations {
            self.iterate(iteration)?;
        }

        debug!(
            iterations,
            nodes = self.tree.len(),
            root_playouts = self.root().playouts(),
            "search finished"
        );
        Ok(())
    }

    /// Run whole iterations until `budget` has elapsed.
    ///
    /// The clock is only read between iterations. Returns the number of
    /// iterations completed.
    pub fn run_for(&mut self, budget: Duration) -> Result<usize, SearchError> {
        let deadline = Instant::now() + budget;
        let mut completed = 0;

        while Instant::now() < deadline {
            self.iterate(completed)?;
            completed += 1;
        }

        debug!(
            iterations = completed,
            budget_ms = budget_millis(budget),
            root_playouts = self.root().playouts(),
            "timed search finished"
        );
        Ok(completed)
    }

    /// Run the configured budget and summarize the root.
    pub fn search(&mut self) -> Result<SearchResult<S::Move>, SearchError> {
        let iterations = self.config.iterations;
        self.run(iterations)?;

        let root = self.root();
        let visit_counts = root
            .children()
            .iter()
            .map(|&id| {
                let child = self.tree.get(id);
                Ok((self.move_into(id)?, child.playouts()))
            })
            .collect::<Result<Vec<_>, SearchError>>()?;

        Ok(SearchResult {
            best_move: self.recommended_move()?,
            visit_counts,
            root_playouts: root.playouts(),
            root_win_rate: root.win_rate(),
            iterations,
        })
    }

    /// Root child with the most playouts, ties broken by win rate, then by
    /// legal-move order.
    pub fn recommended_child(&self) -> Result<NodeId, SearchError> {
        let mut best: Option<&Node<S>> = None;
        let mut best_id = None;

        for &id in self.root().children() {
            let child = self.tree.get(id);
            let better = match best {
                None => true,
                Some(current) => {
                    child.playouts() > current.playouts()
                        || (child.playouts() == current.playouts()
                            && child.win_rate() > current.win_rate())
                }
            };
            if better {
                best = Some(child);
                best_id = Some(id);
            }
        }

        best_id.ok_or(SearchError::NoChildren(NodeId::ROOT))
    }

    /// The move leading to the robust child.
    ///
    /// # Errors
    /// [`SearchError::NoChildren`] if the root was never expanded, either
    /// because no iteration ran or because it is terminal.
    pub fn recommended_move(&self) -> Result<S::Move, SearchError> {
        let child = self.recommended_child()?;
        self.move_into(child)
    }

    /// Play `mv` from the root and move the engine onto the resulting state.
    ///
    /// The move is validated first; on error the tree is untouched. With
    /// [`RootPolicy::Reuse`] the matching child's subtree becomes the new
    /// tree, otherwise the search restarts from a fresh root.
    pub fn advance(&mut self, mv: &S::Move) -> Result<(), SearchError> {
        let next = self.root().state().apply_move(mv)?;

        let reused = match self.config.root_policy {
            RootPolicy::Reuse => self
                .root()
                .children()
                .iter()
                .copied()
                .find(|&id| self.tree.get(id).last_move() == Some(mv)),
            RootPolicy::Discard => None,
        };

        self.tree = match reused {
            Some(child) => self.tree.reroot(child),
            None => Tree::new(next),
        };

        debug!(
            policy = ?self.config.root_policy,
            reused = reused.is_some(),
            root_playouts = self.root().playouts(),
            "advanced root"
        );
        Ok(())
    }

    fn move_into(&self, id: NodeId) -> Result<S::Move, SearchError> {
        self.tree
            .get(id)
            .last_move()
            .cloned()
            .ok_or(SearchError::UnknownNode(id))
    }

    /// One full iteration: select, expand, simulate, backpropagate.
    ///
    /// A failing iteration leaves the tree as it found it.
    fn iterate(&mut self, iteration: usize) -> Result<(), SearchError> {
        let (selected, depth) = self.select()?;

        let start = if self.tree.get(selected).is_leaf() {
            selected
        } else {
            self.tree.expand(selected)?;
            match self.selection.best_child(&self.tree, selected) {
                Ok(child) => child,
                Err(err) => {
                    self.tree.collapse(selected);
                    return Err(err);
                }
            }
        };

        let outcome = match self.evaluator.evaluate(self.tree.get(start).state()) {
            Ok(outcome) => outcome,
            Err(err) => {
                if start != selected {
                    self.tree.collapse(selected);
                }
                return Err(err.into());
            }
        };
        self.tree.backpropagate(start, outcome);

        trace!(iteration, leaf = %start, depth, %outcome, "iteration");
        Ok(())
    }

    /// Descend via UCB1 until reaching a terminal node or one with no
    /// children yet.
    fn select(&self) -> Result<(NodeId, u32), SearchError> {
        let mut current = NodeId::ROOT;
        let mut depth = 0;

        loop {
            let node = self.tree.get(current);
            if node.is_leaf() || !node.is_expanded() {
                return Ok((current, depth));
            }
            current = self.selection.best_child(&self.tree, current)?;
            depth += 1;
        }
    }
}
