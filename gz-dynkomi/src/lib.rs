//! gz-dynkomi: dynamic komi control for the MCTS search.
//!
//! In handicap (or otherwise lopsided) games the raw win/loss signal
//! saturates: one side wins nearly every playout and the search stops
//! discriminating between moves. A dynamic-komi controller injects an extra,
//! search-time-varying komi into the simulation outcomes so the search
//! explores as if the game were close, without letting the correction itself
//! tip the game the other way.
//!
//! Three strategies share one contract:
//! - `none`: never touch komi
//! - `linear`: decay the handicap compensation to zero over a move budget
//! - `adaptive`: a closed-loop controller fed by playout statistics
//!
//! The search calls [`Dynkomi::permove`] before (and, if it re-adapts
//! continuously, during) each move's search, and [`Dynkomi::persim`] once per
//! playout; `persim` is O(1) and side-effect-free.

pub mod adaptive;
pub mod dynkomi;
pub mod options;
pub mod stats;
pub mod tree;

pub use adaptive::{Adapter, AdaptiveConfig, AdaptiveDynkomi, Indicator};
pub use dynkomi::{Dynkomi, LinearConfig, LinearDynkomi};
pub use options::ConfigError;
pub use stats::{MoveStats, TRUSTWORTHY_PLAYOUTS};
pub use tree::{Node, Tree};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
