//! Stone colors.

use serde::{Deserialize, Serialize};

/// A player's stone color. Black moves first in an even game and is the
/// canonical point of view for komi and statistics storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// The opposing color.
    #[inline]
    pub const fn other(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Stone::White)
    }

    /// Array index (Black = 0, White = 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Stone::Black => 0,
            Stone::White => 1,
        }
    }
}

impl std::ops::Not for Stone {
    type Output = Stone;

    #[inline]
    fn not(self) -> Stone {
        self.other()
    }
}
