//! Board context snapshot.
//!
//! The search hands its controllers a cheap copy of the facts they need about
//! the root position. This is not a Go board representation; rules, groups
//! and liberties live with the search's own position code.

use crate::stone::Stone;

/// Minimum per-side estimate of remaining moves. Late-game progress
/// estimates get noisy; this keeps them bounded away from "the game is over".
const MIN_MOVES_LEFT: u32 = 30;

/// Snapshot of the search-root position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Board {
    /// Playing side length (9, 13, 19, ...).
    pub size: u32,
    /// Moves played so far in the game.
    pub moves: u32,
    /// Handicap stones placed before the game started.
    pub handicap: u32,
    /// Static komi already on the board.
    pub komi: f32,
    /// Number of currently legal placements (free points).
    pub legal_moves: u32,
    /// Side to move.
    pub to_move: Stone,
}

impl Board {
    /// Fresh even game on a `size`-line board.
    pub fn new(size: u32) -> Board {
        Board {
            size,
            moves: 0,
            handicap: 0,
            komi: 0.0,
            legal_moves: size * size,
            to_move: Stone::Black,
        }
    }

    /// Number of points on the board.
    #[inline]
    pub fn area(&self) -> u32 {
        self.size * self.size
    }

    /// Large-board defaults (move budgets, lead moves) apply from 19x19 up.
    #[inline]
    pub fn is_large(&self) -> bool {
        self.size >= 19
    }

    /// Handicap advantage in points, net of the static komi.
    ///
    /// Each handicap stone is worth `stone_value` points; an even game still
    /// carries the first-move advantage, counted as one stone. The komi
    /// already granted on the board is subtracted since it compensates the
    /// same imbalance.
    pub fn effective_handicap(&self, stone_value: f32) -> f32 {
        let stones = self.handicap.max(1);
        stones as f32 * stone_value - self.komi
    }

    /// Estimated number of moves one side still has to play.
    ///
    /// A game runs about two thirds of the board area in total; half of what
    /// remains belongs to each side, floored at [`MIN_MOVES_LEFT`].
    pub fn estimated_moves_left(&self) -> u32 {
        let expected_total = self.area() * 2 / 3;
        (expected_total.saturating_sub(self.moves) / 2).max(MIN_MOVES_LEFT)
    }
}
