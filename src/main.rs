//! Tictactoe-Minimax: an exhaustive tic-tac-toe solver.
//!
//! ## Usage
//!
//! - `tictactoe-minimax` - Show a demo (optimal self-play)
//! - `tictactoe-minimax solve <board>` - Value of every legal action on a board
//! - `tictactoe-minimax arena` - Optimal engine against a random player
//! - `tictactoe-minimax protocol` - Start the text protocol on stdin/stdout

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tictactoe_minimax::board::{Board, Player, active_player, apply, initial_state};
use tictactoe_minimax::constants::{ARENA_GAMES, ARENA_SEED};
use tictactoe_minimax::outcome::outcome;
use tictactoe_minimax::playout::{OptimalPolicy, RandomPolicy, play_game};
use tictactoe_minimax::protocol::ProtocolEngine;
use tictactoe_minimax::search::{RootWindow, Searcher};

/// Tictactoe-Minimax: an exhaustive tic-tac-toe solver
#[derive(Parser)]
#[command(name = "tictactoe-minimax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Carry the best root value into later top-level actions (fewer nodes, same move)
    #[arg(long, global = true)]
    threaded: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one optimal game against itself and print every position
    Demo,
    /// Print the minimax value of each legal action, e.g. `solve XX./O../...`
    Solve {
        /// Nine cells: X, O, and . for empty; '/' and spaces are ignored
        board: Vec<String>,
    },
    /// Play the optimal engine against a random player and tally results
    Arena {
        /// Number of games to play
        #[arg(short, long, default_value_t = ARENA_GAMES)]
        games: usize,
        /// Seed for the random player
        #[arg(short, long, default_value_t = ARENA_SEED)]
        seed: u64,
    },
    /// Start the text protocol server for use by a front end
    Protocol,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let window = if cli.threaded {
        RootWindow::Threaded
    } else {
        RootWindow::Reset
    };

    match cli.command {
        Some(Commands::Protocol) => {
            info!(?window, "starting text protocol");
            ProtocolEngine::with_window(window)
                .run()
                .context("text protocol I/O failed")?;
        }
        Some(Commands::Solve { board }) => run_solve(&board.concat(), window)?,
        Some(Commands::Arena { games, seed }) => run_arena(games, seed, window)?,
        Some(Commands::Demo) | None => run_demo(window)?,
    }
    Ok(())
}

/// Logs go to stderr so stdout stays clean for the protocol.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_demo(window: RootWindow) -> Result<()> {
    println!("Tictactoe-Minimax: optimal self-play\n");

    let mut x = OptimalPolicy::new(window);
    let mut o = OptimalPolicy::new(window);
    let game = play_game(&initial_state(), &mut x, &mut o).context("self-play failed")?;

    let mut board = initial_state();
    println!("{board}");
    for action in &game.moves {
        let player = active_player(&board).context("move recorded after game end")?;
        board = apply(&board, *action)?;
        println!("{player} plays {action}");
        println!("{board}");
    }
    println!("Result: {}", game.outcome);

    let nodes = x.stats().nodes + o.stats().nodes;
    info!(nodes, ?window, "demo finished");
    Ok(())
}

fn run_solve(text: &str, window: RootWindow) -> Result<()> {
    let board: Board = text
        .parse()
        .with_context(|| format!("cannot parse board '{text}'"))?;
    println!("{board}");

    let mut searcher = Searcher::with_window(window);
    let Some(player) = active_player(&board) else {
        println!("Game over: {}", outcome(&board));
        return Ok(());
    };

    println!("{player} to move");
    for (action, value) in searcher.evaluate_actions(&board) {
        println!("  {action}  value {value:+}");
    }
    searcher.reset_stats();
    let best = searcher
        .best_action(&board)
        .context("no action on a live board")?;
    println!("Best action: {best}");
    info!(nodes = searcher.stats().nodes, "solve finished");
    Ok(())
}

fn run_arena(games: usize, seed: u64, window: RootWindow) -> Result<()> {
    if games == 0 {
        bail!("--games must be at least 1");
    }

    let mut engine = OptimalPolicy::new(window);
    let mut random = RandomPolicy::with_seed(seed);
    let (mut wins, mut draws, mut losses) = (0usize, 0usize, 0usize);

    for i in 0..games {
        // Alternate who opens.
        let engine_side = if i % 2 == 0 { Player::X } else { Player::O };
        let game = match engine_side {
            Player::X => play_game(&initial_state(), &mut engine, &mut random),
            Player::O => play_game(&initial_state(), &mut random, &mut engine),
        }
        .with_context(|| format!("game {i} failed"))?;

        match game.winner() {
            Some(p) if p == engine_side => wins += 1,
            Some(_) => {
                losses += 1;
                warn!(game = i, moves = ?game.moves, "engine lost");
            }
            None => draws += 1,
        }
    }

    println!("Games: {games}  engine wins: {wins}  draws: {draws}  losses: {losses}");
    info!(nodes = engine.stats().nodes, seed, ?window, "arena finished");
    Ok(())
}
