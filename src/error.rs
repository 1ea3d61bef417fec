//! Contract violations reported by the engine.
//!
//! None of these describe a game outcome; a drawn game is a normal result.

use thiserror::Error;

use crate::position::Player;

/// Errors raised when a caller breaks an engine precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Square index outside `0..64`.
    #[error("square {0} is off the board")]
    SquareOutOfRange(usize),
    /// Placement on a square that is not in the legal-move set.
    #[error("illegal move: {player} cannot play at square {square}")]
    IllegalMove { player: Player, square: usize },
    /// A search was asked to run zero simulations.
    #[error("simulation budget must be at least one")]
    ZeroBudget,
    /// Dark and light bitboards claim the same square.
    #[error("dark and light disks overlap on {0:#018x}")]
    OverlappingDisks(u64),
    /// A square name that is not `a1`..`h8`.
    #[error("cannot parse square name {0:?}")]
    InvalidSquareName(String),
    /// Re-rooting at a child that does not exist.
    #[error("child {index} does not exist (node has {children} children)")]
    NoSuchChild { index: usize, children: usize },
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
