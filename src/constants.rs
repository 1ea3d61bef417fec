//! Constants for board geometry, the opening position, and search parameters.
//!
//! Squares are numbered `rank * 8 + file`, so square 0 is the least
//! significant bit of a [`BitBoard`](crate::bitboard::BitBoard) and square 63
//! the most significant one.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board width and height.
pub const N: usize = 8;

/// Number of squares on the board.
pub const BOARDSIZE: usize = N * N;

/// Every square except those on file 0.
pub const NOT_FILE_0: u64 = 0xfefe_fefe_fefe_fefe;

/// Every square except those on file 7.
pub const NOT_FILE_7: u64 = 0x7f7f_7f7f_7f7f_7f7f;

/// Every square.
pub const ALL_SQUARES: u64 = u64::MAX;

// =============================================================================
// Opening Position
// =============================================================================

/// Dark disks at the start of a game (squares 28 and 35).
pub const DARK_INIT: u64 = 0x0000_0008_1000_0000;

/// Light disks at the start of a game (squares 27 and 36).
pub const LIGHT_INIT: u64 = 0x0000_0010_0800_0000;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default number of simulations per move.
pub const N_SIMS: usize = 1000;

/// Keeps the UCT formula finite for unvisited children.
pub const EPSILON: f64 = 1e-7;

/// UCT exploration constant (sqrt 2).
pub const EXPLORATION: f64 = std::f64::consts::SQRT_2;
