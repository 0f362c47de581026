//! Command-line driver for the engine.
//!
//! ## Usage
//!
//! - `tengen` - Run the demo
//! - `tengen demo` - Place a few stones and search for the best reply
//! - `tengen selfplay` - Let the engine play both sides of a game

use anyhow::Result;
use clap::{Parser, Subcommand};

use tengen::constants::{DEFAULT_BOARD_SIZE, DEFAULT_SIMULATIONS};
use tengen::coord::Coord;
use tengen::game::GameStatus;
use tengen::mcts::{Mcts, MctsConfig};
use tengen::state::{GoMove, GoState};

/// Tengen: a Go decision core with Monte Carlo tree search
#[derive(Parser)]
#[command(name = "tengen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Place a few stones and search for the best reply
    Demo {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: u8,
        #[arg(long, default_value_t = 400)]
        sims: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Let the engine play both sides of a full game
    Selfplay {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: u8,
        #[arg(long, default_value_t = DEFAULT_SIMULATIONS)]
        sims: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Stop after this many moves even if the game is still going
        #[arg(long, default_value_t = 120)]
        max_moves: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Demo {
        size: DEFAULT_BOARD_SIZE,
        sims: 400,
        seed: 1,
    }) {
        Commands::Demo { size, sims, seed } => run_demo(size, sims, seed),
        Commands::Selfplay {
            size,
            sims,
            seed,
            max_moves,
        } => run_selfplay(size, sims, seed, max_moves),
    }
}

fn run_demo(size: u8, sims: usize, seed: u64) -> Result<()> {
    let mut game = GameStatus::new(size);
    for (x, y) in [(2, 2), (6, 6), (4, 4)] {
        let c = Coord::new(x, y);
        if game.board().is_legal(c, game.current_turn()) {
            game.play_turn(c)?;
        }
    }
    println!("{}", game.board());

    let state = GoState::from_board(game.board().clone(), game.current_turn());
    let config = MctsConfig {
        simulations: sims,
        ..MctsConfig::default()
    };
    let mut search = Mcts::new(state, config, seed);
    match search.search() {
        Some(best) => println!("best reply: {best}"),
        None => println!("the position is already decided"),
    }
    Ok(())
}

fn run_selfplay(size: u8, sims: usize, seed: u64, max_moves: u32) -> Result<()> {
    let config = MctsConfig {
        simulations: sims,
        ..MctsConfig::default()
    };
    let mut game = GameStatus::new(size);
    let mut passes = 0u8;

    for turn in 0..max_moves {
        let side = game.current_turn();
        let state = GoState::from_board(game.board().clone(), side);
        if state.is_terminal() {
            break;
        }

        let mut search = Mcts::new(state, config, seed.wrapping_add(turn as u64));
        match search.search() {
            Some(GoMove::Place { at, .. }) if game.board().is_legal(at, side) => {
                let captures = game.play_turn(at)?;
                passes = 0;
                println!(
                    "move {turn}: {side} plays {at} (captures: black {} white {})",
                    captures.black, captures.white
                );
            }
            _ => {
                game.pass_turn();
                passes += 1;
                println!("move {turn}: {side} passes");
                if passes >= 2 {
                    break;
                }
            }
        }
    }
    game.finish();

    println!("\n{}", game.board());
    let score = game.board().score_area();
    println!("territory: black {} white {}", score.black, score.white);
    Ok(())
}
