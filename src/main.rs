//! neurochess: command-line front end for the chess_engine search
//!
//! Every subcommand prints one JSON object on stdout; logs go to stderr and
//! are filtered with `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chess_engine::constants::STARTPOS_FEN;
use chess_engine::{engine_from_config, game_status, EngineConfig, Game, GameStatus};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neurochess")]
#[command(about = "Time-bounded negamax search over a learned evaluator")]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a position and print the best move
    Bestmove {
        #[arg(long, default_value = STARTPOS_FEN)]
        fen: String,

        /// Time budget in milliseconds (default: from config)
        #[arg(short, long)]
        time_ms: Option<u64>,
    },
    /// Apply a move for the side to move, then let the engine reply
    Play {
        #[arg(long)]
        fen: String,

        /// Move in UCI notation, e.g. e2e4
        #[arg(short, long = "move")]
        mv: String,

        #[arg(short, long)]
        time_ms: Option<u64>,
    },
    /// Static evaluation for the side to move
    Eval {
        #[arg(long, default_value = STARTPOS_FEN)]
        fen: String,
    },
    /// Report whether the game is over
    Status {
        #[arg(long)]
        fen: String,
    },
}

#[derive(Serialize)]
struct BestMoveReport {
    fen: String,
    best_move: Option<String>,
    score: Option<f32>,
    depth: u32,
    nodes: u64,
    quiescence_nodes: u64,
    tt_hits: u64,
    elapsed_ms: u128,
}

#[derive(Serialize)]
struct EvalReport {
    fen: String,
    model: String,
    score: f32,
}

#[derive(Serialize)]
struct StatusReport {
    fen: String,
    status: GameStatus,
    legal_moves: usize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    debug!("[CLI] Engine config: {:?}", config);
    let budget = |time_ms: Option<u64>| {
        time_ms.map_or_else(|| config.default_time_budget(), Duration::from_millis)
    };

    match &cli.command {
        Command::Bestmove { fen, time_ms } => {
            let engine = engine_from_config(config.clone())?;
            let game = Game::from_fen(fen)?;
            let outcome = engine
                .search(&game, budget(*time_ms))
                .context("search failed")?;
            print_json(&BestMoveReport {
                fen: game.to_fen(),
                best_move: outcome.best_move_uci(),
                score: outcome.score,
                depth: outcome.depth,
                nodes: outcome.stats.nodes,
                quiescence_nodes: outcome.stats.quiescence_nodes,
                tt_hits: outcome.stats.tt_hits,
                elapsed_ms: outcome.elapsed.as_millis(),
            })
        }
        Command::Play { fen, mv, time_ms } => {
            let engine = engine_from_config(config.clone())?;
            let outcome = engine
                .play_move(fen, mv, budget(*time_ms))
                .with_context(|| format!("playing {mv}"))?;
            info!(
                "[CLI] {} answered with {}",
                outcome.human_move,
                outcome.reply.as_deref().unwrap_or("(none)")
            );
            print_json(&outcome)
        }
        Command::Eval { fen } => {
            let engine = engine_from_config(config.clone())?;
            let game = Game::from_fen(fen)?;
            let score = engine.evaluate(&game)?;
            print_json(&EvalReport {
                fen: game.to_fen(),
                model: engine.evaluator().model_name(),
                score,
            })
        }
        Command::Status { fen } => {
            let game = Game::from_fen(fen)?;
            print_json(&StatusReport {
                fen: game.to_fen(),
                status: game_status(&game),
                legal_moves: game.legal_moves().len(),
            })
        }
    }
}
