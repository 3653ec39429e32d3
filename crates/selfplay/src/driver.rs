//! Games between the MCTS engine and a uniform random player.
//!
//! The engine keeps one search tree per game and follows every move with
//! `Mcts::advance`, so the configured root policy decides whether statistics
//! survive between turns.

use anyhow::{bail, Context, Result};
use playout_core::{GameState, Outcome, Player};
use playout_mcts::{Mcts, MctsConfig, RolloutEvaluator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

/// A complete game, as written to the JSON output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub seed: u64,

    /// Side the engine played.
    pub engine_plays: Player,

    /// Moves in play order, rendered with their `Display` impl.
    pub moves: Vec<String>,

    pub outcome: Outcome,
}

impl GameRecord {
    /// Points the engine took from this game (2 win, 1 draw, 0 loss).
    pub fn engine_points(&self) -> u32 {
        self.outcome.points_for(self.engine_plays)
    }
}

/// Evaluation results.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub engine_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
    pub games: usize,
}

impl Tally {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut tally = Self::default();
        for record in records {
            match record.outcome.winner() {
                Some(winner) if winner == record.engine_plays => tally.engine_wins += 1,
                Some(_) => tally.random_wins += 1,
                None => tally.draws += 1,
            }
            tally.games += 1;
        }
        tally
    }

    /// Engine score in [0, 1], counting a draw as half a win.
    pub fn engine_score(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        (self.engine_wins as f64 + 0.5 * self.draws as f64) / self.games as f64
    }
}

/// Pick a legal move uniformly at random.
fn random_move<S: GameState>(state: &S, rng: &mut ChaCha8Rng) -> Result<S::Move> {
    let mut moves = state.legal_moves(state.player())?;
    if moves.is_empty() {
        bail!("no legal moves in a non-terminal state");
    }
    let idx = rng.gen_range(0..moves.len());
    Ok(moves.swap_remove(idx))
}

/// Play one game from `initial` to the end.
///
/// `on_move` is called after every move with the new state and the move
/// that produced it.
pub fn play_game<S, F>(
    initial: S,
    engine_plays: Player,
    config: &MctsConfig,
    seed: u64,
    mut on_move: F,
) -> Result<GameRecord>
where
    S: GameState,
    S::Move: Display,
    F: FnMut(&S, &S::Move),
{
    let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed));
    let mut mcts = Mcts::new(initial.clone(), config.clone(), evaluator);
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));

    let mut state = initial;
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let mv = if state.player() == engine_plays {
            let result = mcts.search().context("Engine search failed")?;
            debug!(
                ply = moves.len(),
                mv = %result.best_move,
                root_playouts = result.root_playouts,
                win_rate = result.root_win_rate,
                "engine move"
            );
            result.best_move
        } else {
            random_move(&state, &mut rng)?
        };

        state = state.apply_move(&mv)?;
        mcts.advance(&mv)?;
        moves.push(mv.to_string());
        on_move(&state, &mv);
    }

    let outcome = Outcome::from_winner(state.winner());
    debug!(seed, plies = moves.len(), %outcome, "game finished");

    Ok(GameRecord {
        seed,
        engine_plays,
        moves,
        outcome,
    })
}

/// Play `games` seeded games in parallel, alternating the engine's side.
///
/// Game `i` uses seed `seed + 1000 * i`; the engine opens in even games.
/// Records come back in game order regardless of scheduling.
pub fn evaluate<S, G>(
    new_game: G,
    games: usize,
    config: &MctsConfig,
    seed: u64,
) -> Result<(Tally, Vec<GameRecord>)>
where
    S: GameState,
    S::Move: Display,
    G: Fn() -> S + Sync,
{
    let records = (0..games)
        .into_par_iter()
        .map(|i| {
            let engine_plays = if i % 2 == 0 { Player::X } else { Player::O };
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            play_game(new_game(), engine_plays, config, game_seed, |_, _| {})
                .with_context(|| format!("Game {} (seed {}) failed", i, game_seed))
        })
        .collect::<Result<Vec<_>>>()?;

    let tally = Tally::from_records(&records);
    info!(
        games = tally.games,
        engine_wins = tally.engine_wins,
        random_wins = tally.random_wins,
        draws = tally.draws,
        "evaluation finished"
    );
    Ok((tally, records))
}

/// Write game records as a pretty-printed JSON array.
pub fn write_records(path: &Path, records: &[GameRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, records)
        .with_context(|| format!("Failed to write records to {}", path.display()))?;

    info!(path = %path.display(), count = records.len(), "wrote game records");
    Ok(())
}
