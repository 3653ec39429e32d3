//! MCTS configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search
//! algorithm. The struct deserializes from the `[mcts]` table of a TOML
//! config file.

use serde::{Deserialize, Serialize};

/// What the engine does with its tree once a real move is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    /// Throw the tree away and start from a fresh root.
    #[default]
    Discard,

    /// Keep the played child's subtree and its statistics; drop the siblings.
    Reuse,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Iterations (select, expand, simulate, backpropagate) per search.
    pub iterations: usize,

    /// UCB1 exploration constant C.
    /// Higher values favor under-visited children, lower values favor
    /// children with a high observed score.
    pub exploration: f64,

    /// Tree handling when the game advances.
    pub root_policy: RootPolicy,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: std::f64::consts::SQRT_2,
            root_policy: RootPolicy::Discard,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Create a small, fixed config for tests.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            exploration: 1.44,
            root_policy: RootPolicy::Discard,
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the root policy.
    pub fn with_root_policy(mut self, policy: RootPolicy) -> Self {
        self.root_policy = policy;
        self
    }
}
