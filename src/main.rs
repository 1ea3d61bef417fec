//! Othello-MCTS command-line demo.
//!
//! ## Usage
//!
//! - `othello-mcts` - Show a demo
//! - `othello-mcts selfplay --sims 500 --seed 1` - Let the engine play itself
//! - `othello-mcts moves --player light` - List legal opening moves
//!
//! Log output is controlled with `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use othello_mcts::constants::N_SIMS;
use othello_mcts::mcts::{Search, SearchConfig, dump_children};
use othello_mcts::position::{Player, Position, square_name};

/// Othello-MCTS: a bitboard Othello engine with Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "othello-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search from the opening position
    Demo {
        /// Simulations for the search
        #[arg(long, default_value_t = N_SIMS)]
        sims: usize,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let the engine play both sides until the side to move is stuck
    Selfplay {
        /// Simulations per move
        #[arg(long, default_value_t = N_SIMS)]
        sims: usize,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the legal squares in the opening position
    Moves {
        #[arg(long, value_enum, default_value_t = Side::Dark)]
        player: Side,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    Dark,
    Light,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Dark => Player::Dark,
            Side::Light => Player::Light,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Selfplay { sims, seed }) => run_selfplay(SearchConfig {
            simulations: sims,
            seed,
        }),
        Some(Commands::Moves { player }) => {
            let player = Player::from(player);
            let names: Vec<String> = Position::opening()
                .legal_squares(player)
                .into_iter()
                .map(square_name)
                .collect();
            println!("{player}: {}", names.join(" "));
            Ok(())
        }
        Some(Commands::Demo { sims, seed }) => run_demo(SearchConfig {
            simulations: sims,
            seed,
        }),
        None => run_demo(SearchConfig::default()),
    }
}

fn run_demo(config: SearchConfig) -> Result<()> {
    println!("Othello-MCTS: bitboard Othello with Monte Carlo Tree Search\n");
    let pos = Position::opening();
    println!("{pos}");

    let mut search = Search::new(pos, Player::Dark, &config).context("invalid search settings")?;
    println!("Running {} MCTS simulations...", config.simulations);
    let best = search.think().context("search failed")?;
    dump_children(search.root());

    match best {
        Some(sq) => println!("Best move: {}", square_name(sq)),
        None => println!("No legal move"),
    }
    println!("Root winrate: {:.1}%", search.root().winrate() * 100.0);
    Ok(())
}

fn run_selfplay(config: SearchConfig) -> Result<()> {
    let mut search = Search::new(Position::opening(), Player::Dark, &config)
        .context("invalid search settings")?;

    let mut ply = 0;
    loop {
        let mover = search.root().player;
        let Some(sq) = search
            .play_best()
            .with_context(|| format!("search failed at ply {ply}"))?
        else {
            break;
        };
        ply += 1;
        let pos = search.root().pos;
        info!(
            "{ply:>2}. {mover} {} (dark {} / light {})",
            square_name(sq),
            pos.score(Player::Dark),
            pos.score(Player::Light)
        );
    }

    let pos = search.root().pos;
    println!("{pos}");
    let (dark, light) = (pos.score(Player::Dark), pos.score(Player::Light));
    if pos.is_winner(Player::Dark) {
        println!("Dark wins {dark}-{light} after {ply} moves");
    } else if pos.is_winner(Player::Light) {
        println!("Light wins {light}-{dark} after {ply} moves");
    } else {
        println!("Draw {dark}-{light} after {ply} moves");
    }
    Ok(())
}
