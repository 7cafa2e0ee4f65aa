//! Views of the search tree state the controller reads.
//!
//! The tree itself (nodes, reuse, promotion) belongs to the search; the
//! controller only sees the cached extra komi and the root's side to move.

use gz_core::Stone;

/// Tree-wide state shared between the search and the komi controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    /// Currently applied extra komi, canonical (Black POV) frame. The search
    /// stores each `permove` result here; `persim` reads it back.
    pub extra_komi: f32,
    /// Color that played the move leading to the root position; its
    /// opponent is the side to move, the one the controller adapts for.
    pub root_color: Stone,
}

impl Tree {
    pub fn new(root_color: Stone) -> Tree {
        Tree {
            extra_komi: 0.0,
            root_color,
        }
    }
}

/// Per-simulation node view: all the controller needs is how deep below the
/// current root the simulation sits, so depth-dependent strategies survive
/// subtree promotion on tree reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Node {
    pub depth: u32,
}

impl Node {
    pub const ROOT: Node = Node { depth: 0 };

    pub fn at_depth(depth: u32) -> Node {
        Node { depth }
    }
}
