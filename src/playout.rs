//! Monte Carlo playouts (random game simulation).
//!
//! A playout picks uniformly among the legal successors until the side to
//! move has none, then scores the final position by disk count.
//!
//! A side without moves ends the game here; there is no pass. Every ply adds
//! a disk, so a playout lasts at most 60 plies from the opening.

use fastrand::Rng;

use crate::position::{Player, Position};

/// Winner of a finished game. Equal disk counts are split by a coin flip.
pub fn resolve_winner(pos: &Position, rng: &mut Rng) -> Player {
    if pos.is_winner(Player::Light) {
        Player::Light
    } else if pos.is_winner(Player::Dark) {
        Player::Dark
    } else if rng.bool() {
        Player::Dark
    } else {
        Player::Light
    }
}

/// Play random moves from `pos` with `mover` to play, and return the winner.
pub fn playout(mut pos: Position, mut mover: Player, rng: &mut Rng) -> Player {
    loop {
        let moves = pos.find_moves(mover);
        if moves.is_empty() {
            return resolve_winner(&pos, rng);
        }

        pos = moves[rng.usize(..moves.len())];
        mover = mover.opponent();
    }
}
