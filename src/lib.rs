//! Othello-MCTS: a bitboard Othello engine with Monte Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, opening position, and search parameters
//! - [`bitboard`] - 64-square sets
//! - [`flood`] - Directional flood fills used for move generation and captures
//! - [`position`] - Core game logic (disks, legal moves, placement)
//! - [`playout`] - Random game simulation for position evaluation
//! - [`mcts`] - Monte Carlo Tree Search with UCT
//! - [`error`] - Contract violations
//!
//! ## Example
//!
//! ```
//! use othello_mcts::mcts::{Search, SearchConfig};
//! use othello_mcts::position::{Player, Position, square_name};
//!
//! let config = SearchConfig { simulations: 100, seed: Some(7) };
//! let mut search = Search::new(Position::opening(), Player::Dark, &config).unwrap();
//! if let Some(sq) = search.play_best().unwrap() {
//!     println!("Dark plays {}", square_name(sq));
//! }
//! ```

pub mod bitboard;
pub mod constants;
pub mod error;
pub mod flood;
pub mod mcts;
pub mod playout;
pub mod position;
