//! A 64-square set backed by a single `u64`.
//!
//! Bit `i` stands for square `i` (`rank * 8 + file`). Everything here is a
//! pure function of its inputs; `BitBoard` is `Copy` and never mutated in
//! place by other modules.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::constants::{BOARDSIZE, N};

/// A set of board squares.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitBoard(pub u64);

impl BitBoard {
    /// No squares.
    pub const EMPTY: BitBoard = BitBoard(0);
    /// All 64 squares.
    pub const FULL: BitBoard = BitBoard(u64::MAX);

    /// The singleton set `{square}`.
    ///
    /// Callers guarantee `square < 64`.
    #[inline]
    pub const fn from_square(square: usize) -> Self {
        debug_assert!(square < BOARDSIZE);
        BitBoard(1u64 << square)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `square` is in the set. Squares past 63 are never members.
    #[inline]
    pub const fn contains(self, square: usize) -> bool {
        square < BOARDSIZE && (self.0 >> square) & 1 == 1
    }

    /// Number of squares in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Squares in `self` but not in `other`.
    #[inline]
    pub const fn without(self, other: BitBoard) -> BitBoard {
        BitBoard(self.0 & !other.0)
    }

    /// Shift every square by `amount` indices.
    ///
    /// Positive amounts move toward square 63, negative toward square 0.
    /// Squares pushed off either end are dropped; file wraparound is the
    /// caller's business.
    #[inline]
    pub const fn shift(self, amount: i32) -> BitBoard {
        if amount >= 0 {
            BitBoard(self.0 << amount)
        } else {
            BitBoard(self.0 >> -amount)
        }
    }

    /// Remove the lowest square from the set and return its index.
    #[inline]
    pub fn pop_lowest(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let square = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(square)
    }

    /// Iterate over member squares in ascending order.
    pub fn squares(self) -> Squares {
        Squares(self)
    }
}

/// Ascending iterator over the squares of a [`BitBoard`].
pub struct Squares(BitBoard);

impl Iterator for Squares {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.0.pop_lowest()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Squares {}

impl From<u64> for BitBoard {
    fn from(bits: u64) -> Self {
        BitBoard(bits)
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitor(self, rhs: BitBoard) -> BitBoard {
        BitBoard(self.0 | rhs.0)
    }
}

impl BitOrAssign for BitBoard {
    #[inline]
    fn bitor_assign(&mut self, rhs: BitBoard) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitand(self, rhs: BitBoard) -> BitBoard {
        BitBoard(self.0 & rhs.0)
    }
}

impl BitAnd<u64> for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn bitand(self, rhs: u64) -> BitBoard {
        BitBoard(self.0 & rhs)
    }
}

impl BitAndAssign for BitBoard {
    #[inline]
    fn bitand_assign(&mut self, rhs: BitBoard) {
        self.0 &= rhs.0;
    }
}

impl Not for BitBoard {
    type Output = BitBoard;
    #[inline]
    fn not(self) -> BitBoard {
        BitBoard(!self.0)
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBoard({:#018x})", self.0)
    }
}

/// One row per rank, square 0 first, `1` for members.
impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..N {
            for file in 0..N {
                let c = if self.contains(rank * N + file) { '1' } else { '0' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
