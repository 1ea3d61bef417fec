//! Othello position representation and move execution.
//!
//! This module provides the core game logic:
//! - Two bitboards, one per player, that never share a square
//! - Legal move generation through the directional flood fills
//! - Disk placement with bracketing capture resolution
//! - Square naming (`a1`..`h8`) for logs and the command line
//!
//! Positions are small `Copy` values. Every transform returns a new position
//! and leaves its input untouched.

use std::fmt;

use crate::bitboard::BitBoard;
use crate::constants::{BOARDSIZE, DARK_INIT, LIGHT_INIT, N};
use crate::error::{EngineError, Result};
use crate::flood::{Direction, move_bits};

/// A square on the board, `rank * 8 + file`.
pub type Square = usize;

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Dark = 0,
    Light = 1,
}

impl Player {
    /// The other side.
    #[inline]
    pub const fn opponent(self) -> Player {
        match self {
            Player::Dark => Player::Light,
            Player::Light => Player::Dark,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Dark => write!(f, "dark"),
            Player::Light => write!(f, "light"),
        }
    }
}

/// An Othello position: the disks each player owns.
///
/// The side to move is not part of the position; search nodes carry it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    disks: [BitBoard; 2],
}

impl Default for Position {
    fn default() -> Self {
        Self::opening()
    }
}

impl Position {
    /// The standard starting position.
    pub const fn opening() -> Self {
        Position {
            disks: [BitBoard(DARK_INIT), BitBoard(LIGHT_INIT)],
        }
    }

    /// Build a position from raw dark and light bitboards.
    ///
    /// # Errors
    /// - [`EngineError::OverlappingDisks`] if a square is claimed by both sides
    pub fn from_bits(dark: u64, light: u64) -> Result<Self> {
        if dark & light != 0 {
            return Err(EngineError::OverlappingDisks(dark & light));
        }
        Ok(Position {
            disks: [BitBoard(dark), BitBoard(light)],
        })
    }

    /// Disks owned by `player`.
    #[inline]
    pub const fn disks(&self, player: Player) -> BitBoard {
        self.disks[player.index()]
    }

    /// Squares holding a disk of either color.
    #[inline]
    pub fn occupied(&self) -> BitBoard {
        self.disks(Player::Dark) | self.disks(Player::Light)
    }

    /// Squares holding no disk.
    #[inline]
    pub fn empty(&self) -> BitBoard {
        !self.occupied()
    }

    /// Whether every square is taken.
    pub fn is_full(&self) -> bool {
        self.occupied() == BitBoard::FULL
    }

    /// Number of disks `player` owns.
    #[inline]
    pub fn score(&self, player: Player) -> u32 {
        self.disks(player).count()
    }

    /// Whether `player` has strictly more disks than the opponent.
    ///
    /// Only meaningful once the game is over, but safe to ask at any time.
    pub fn is_winner(&self, player: Player) -> bool {
        self.score(player) > self.score(player.opponent())
    }

    /// Who owns `square`, if anyone.
    ///
    /// # Errors
    /// - [`EngineError::SquareOutOfRange`] if `square >= 64`
    pub fn occupant(&self, square: Square) -> Result<Option<Player>> {
        check_square(square)?;
        Ok(if self.disks(Player::Dark).contains(square) {
            Some(Player::Dark)
        } else if self.disks(Player::Light).contains(square) {
            Some(Player::Light)
        } else {
            None
        })
    }

    /// Every empty square where `player` may place a disk.
    pub fn legal_moves(&self, player: Player) -> BitBoard {
        move_bits(
            self.disks(player),
            self.disks(player.opponent()),
            self.empty(),
        )
    }

    /// The legal squares for `player`, lowest index first.
    pub fn legal_squares(&self, player: Player) -> Vec<Square> {
        self.legal_moves(player).squares().collect()
    }

    /// The position after each legal move of `player`, lowest square first.
    ///
    /// Search relies on this ordering for its deterministic tie-breaks.
    pub fn find_moves(&self, player: Player) -> Vec<Position> {
        self.successors(player).map(|(_, child)| child).collect()
    }

    /// Like [`find_moves`](Self::find_moves) but paired with the square played.
    pub fn successors(&self, player: Player) -> impl Iterator<Item = (Square, Position)> + '_ {
        self.legal_moves(player)
            .squares()
            .map(move |sq| (sq, self.place_unchecked(player, sq)))
    }

    /// Place a disk for `player` on `square` and resolve captures.
    ///
    /// # Errors
    /// - [`EngineError::SquareOutOfRange`] if `square >= 64`
    /// - [`EngineError::IllegalMove`] if `square` is not a legal move for `player`
    pub fn place(&self, player: Player, square: Square) -> Result<Position> {
        check_square(square)?;
        if !self.legal_moves(player).contains(square) {
            return Err(EngineError::IllegalMove { player, square });
        }
        Ok(self.place_unchecked(player, square))
    }

    /// The opponent disks a placement on `square` would turn over.
    ///
    /// A run in one direction only counts when `player` owns the square just
    /// past it; otherwise that direction flips nothing.
    ///
    /// # Errors
    /// - [`EngineError::SquareOutOfRange`] if `square >= 64`
    pub fn flips(&self, player: Player, square: Square) -> Result<BitBoard> {
        check_square(square)?;
        Ok(self.flip_set(player, square))
    }

    fn flip_set(&self, player: Player, square: Square) -> BitBoard {
        let placed = BitBoard::from_square(square);
        let own = self.disks(player);
        let theirs = self.disks(player.opponent());

        let mut flipped = BitBoard::EMPTY;
        for dir in Direction::ALL {
            let run = dir.fill(placed, theirs);
            // Every stepped square but the last lies inside the run, and run
            // squares belong to the opponent, so this only tests the square past it.
            if !(dir.advance(run) & own).is_empty() {
                flipped |= run.without(placed);
            }
        }
        flipped
    }

    /// Placement without the legality check. `square` must come from
    /// [`legal_moves`](Self::legal_moves).
    fn place_unchecked(&self, player: Player, square: Square) -> Position {
        let flipped = self.flip_set(player, square);
        let mut next = *self;
        next.disks[player.index()] |= flipped | BitBoard::from_square(square);
        next.disks[player.opponent().index()] = self.disks(player.opponent()).without(flipped);
        debug_assert!((next.disks[0] & next.disks[1]).is_empty());
        next
    }
}

/// Eight rows of `D` (dark), `L` (light) and `_` (empty), rank 0 first.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..N {
            for file in 0..N {
                let sq = rank * N + file;
                let c = if self.disks(Player::Dark).contains(sq) {
                    'D'
                } else if self.disks(Player::Light).contains(sq) {
                    'L'
                } else {
                    '_'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_square(square: Square) -> Result<()> {
    if square >= BOARDSIZE {
        return Err(EngineError::SquareOutOfRange(square));
    }
    Ok(())
}

/// Parse a square name such as `"d3"` (file letter, then rank 1-8).
///
/// # Errors
/// - [`EngineError::InvalidSquareName`] for anything other than `a1`..`h8`
pub fn parse_square(s: &str) -> Result<Square> {
    let invalid = || EngineError::InvalidSquareName(s.to_string());
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a') as usize;
    let rank = bytes[1].wrapping_sub(b'1') as usize;
    if file >= N || rank >= N {
        return Err(invalid());
    }
    Ok(rank * N + file)
}

/// Name of a square (e.g., square 19 is `"d3"`).
pub fn square_name(square: Square) -> String {
    let file = (b'a' + (square % N) as u8) as char;
    format!("{file}{}", square / N + 1)
}
