//! Directional flood fills in the "dumb7fill" style, one step per iteration.
//!
//! Each of the eight compass directions is a signed index step plus a guard
//! mask. The guard removes squares that a horizontal or diagonal step would
//! wrap onto the opposite edge of the board; vertical steps fall off the ends
//! of the `u64` instead and need no guard.

use crate::bitboard::BitBoard;
use crate::constants::{ALL_SQUARES, NOT_FILE_0, NOT_FILE_7};

/// A compass direction on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    SouthWest,
    NorthWest,
    East,
    NorthEast,
    SouthEast,
}

impl Direction {
    /// All eight directions.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::West,
        Direction::NorthWest,
        Direction::SouthWest,
    ];

    /// Index offset of one step in this direction.
    #[inline]
    pub const fn step(self) -> i32 {
        match self {
            Direction::North => -8,
            Direction::South => 8,
            Direction::West => 1,
            Direction::SouthWest => 9,
            Direction::NorthWest => -7,
            Direction::East => -1,
            Direction::NorthEast => -9,
            Direction::SouthEast => 7,
        }
    }

    /// Squares a step in this direction may legally land on.
    #[inline]
    pub const fn guard(self) -> u64 {
        match self {
            Direction::North | Direction::South => ALL_SQUARES,
            Direction::West | Direction::SouthWest | Direction::NorthWest => NOT_FILE_0,
            Direction::East | Direction::NorthEast | Direction::SouthEast => NOT_FILE_7,
        }
    }

    /// One guarded step of every square in `set`.
    #[inline]
    pub fn advance(self, set: BitBoard) -> BitBoard {
        set.shift(self.step()) & self.guard()
    }

    /// Flood `seeds` through `pro` in this direction.
    ///
    /// Returns `seeds` together with every propagator square reachable from it
    /// by repeated single steps that stay inside `pro`. On an 8-wide board the
    /// loop adds squares at most six times.
    pub fn fill(self, mut seeds: BitBoard, pro: BitBoard) -> BitBoard {
        let mut flood = seeds;
        loop {
            seeds = self.advance(seeds) & pro;
            if seeds.is_empty() {
                return flood;
            }
            flood |= seeds;
        }
    }

    /// Squares one step beyond a run of `pro` squares that starts next to `seeds`.
    ///
    /// These are the candidate landing squares for a move in this direction;
    /// seeds with no adjacent propagator contribute nothing.
    pub fn moves(self, seeds: BitBoard, pro: BitBoard) -> BitBoard {
        self.advance(self.fill(seeds, pro) & pro)
    }
}

/// Union of [`Direction::moves`] over all eight directions, restricted to `empty`.
pub fn move_bits(seeds: BitBoard, pro: BitBoard, empty: BitBoard) -> BitBoard {
    let mut moves = BitBoard::EMPTY;
    for dir in Direction::ALL {
        moves |= dir.moves(seeds, pro);
    }
    moves & empty
}
