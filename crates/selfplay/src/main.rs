//! Play and evaluate the MCTS engine against a uniform random player.
//!
//! `play` prints every board of a single game; `evaluate` runs many seeded
//! games in parallel and reports a tally, optionally saving JSON records.

mod config;
mod driver;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use config::SelfplayConfig;
use playout_connect4::ConnectFourState;
use playout_core::{GameMove, GameState, Outcome, Player};
use playout_mcts::{games::TicTacToeState, MctsConfig, RootPolicy};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// MCTS selfplay and evaluation tool.
#[derive(Parser)]
#[command(name = "selfplay")]
#[command(about = "Play the MCTS engine against a uniform random player")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true, env = "PLAYOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (overrides the config file).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game and print every board.
    Play {
        #[command(flatten)]
        search: SearchArgs,

        /// Side the engine plays.
        #[arg(long, value_enum, default_value = "x")]
        engine: Side,
    },

    /// Play many games with the engine alternating sides.
    Evaluate {
        #[command(flatten)]
        search: SearchArgs,

        /// Number of games to play.
        #[arg(short = 'n', long, default_value = "20")]
        games: usize,

        /// Write game records to this JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Options shared by both commands. Unset values come from the config file.
#[derive(Args)]
struct SearchArgs {
    /// Game to play.
    #[arg(short, long, value_enum, default_value = "connect4")]
    game: GameKind,

    /// MCTS iterations per engine move.
    #[arg(short, long)]
    iterations: Option<usize>,

    /// UCB1 exploration constant.
    #[arg(long)]
    exploration: Option<f64>,

    /// Random seed for reproducibility.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the played subtree between moves instead of starting fresh.
    #[arg(long)]
    reuse_tree: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameKind {
    #[value(name = "connect4")]
    ConnectFour,
    #[value(name = "tictactoe")]
    TicTacToe,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    X,
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

impl SearchArgs {
    /// Merge command-line overrides into the file configuration.
    fn resolve(&self, config: &SelfplayConfig) -> (MctsConfig, u64) {
        let mut mcts = config.mcts.clone();
        if let Some(iterations) = self.iterations {
            mcts.iterations = iterations;
        }
        if let Some(exploration) = self.exploration {
            mcts.exploration = exploration;
        }
        if self.reuse_tree {
            mcts.root_policy = RootPolicy::Reuse;
        }
        (mcts, self.seed.unwrap_or(config.seed))
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Run the play command for one concrete game.
fn play<S>(initial: S, engine: Player, mcts: &MctsConfig, seed: u64) -> Result<()>
where
    S: GameState + Display,
    S::Move: Display,
{
    println!("Engine plays {} ({} iterations/move, seed {})", engine, mcts.iterations, seed);
    println!("{}", initial);

    let record = driver::play_game(initial, engine, mcts, seed, |state, mv| {
        let who = if mv.player() == engine { "engine" } else { "random" };
        println!("{} ({}) plays {}", mv.player(), who, mv);
        println!("{}", state);
    })?;

    match record.outcome {
        Outcome::Win(winner) if winner == engine => println!("Engine wins"),
        Outcome::Win(_) => println!("Random player wins"),
        Outcome::Draw => println!("Draw"),
    }
    Ok(())
}

/// Run the evaluate command for one concrete game.
fn evaluate<S, G>(
    new_game: G,
    games: usize,
    mcts: &MctsConfig,
    seed: u64,
    output: Option<PathBuf>,
) -> Result<()>
where
    S: GameState,
    S::Move: Display,
    G: Fn() -> S + Sync,
{
    println!(
        "Playing {} games: MCTS ({} iterations, C = {}) vs random",
        games, mcts.iterations, mcts.exploration
    );
    println!("================================================");

    let start = Instant::now();
    let (tally, records) = driver::evaluate(new_game, games, mcts, seed)?;

    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());
    println!(
        "Engine {} - {} Random ({} draws)",
        tally.engine_wins, tally.random_wins, tally.draws
    );
    println!("Engine score: {:.1}%", tally.engine_score() * 100.0);

    if let Some(path) = output {
        driver::write_records(&path, &records)?;
        println!("Records saved to: {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_tracing(&config.log_level)?;
    info!(?config, "starting selfplay");

    match cli.command {
        Commands::Play { search, engine } => {
            let (mcts, seed) = search.resolve(&config);
            match search.game {
                GameKind::ConnectFour => play(ConnectFourState::new(), engine.into(), &mcts, seed),
                GameKind::TicTacToe => play(TicTacToeState::new(), engine.into(), &mcts, seed),
            }
        }
        Commands::Evaluate {
            search,
            games,
            output,
        } => {
            let (mcts, seed) = search.resolve(&config);
            match search.game {
                GameKind::ConnectFour => evaluate(ConnectFourState::new, games, &mcts, seed, output),
                GameKind::TicTacToe => evaluate(TicTacToeState::new, games, &mcts, seed, output),
            }
        }
    }
}
