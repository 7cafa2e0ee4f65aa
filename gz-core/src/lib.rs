//! gz-core: Shared game-domain vocabulary for the gz engine crates.
//!
//! This crate holds the small, copyable snapshot types the search and its
//! controllers exchange: stone colors, the board context at the search root,
//! and the komi color-frame helpers.

pub mod board;
pub mod komi;
pub mod stone;

pub use board::Board;
pub use komi::komi_in_pov;
pub use stone::Stone;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
