//! Komi color-frame helpers.
//!
//! Extra komi is stored canonically from Black's point of view everywhere in
//! the engine. Controllers that compare a komi value against a side-relative
//! threshold (a floor, a zone boundary) first map it into that side's frame,
//! do the arithmetic there, and map the result back before storing it.

use crate::stone::Stone;

/// Convert a canonical (Black-POV) komi value into `pov`'s frame, or back.
///
/// The mapping is its own inverse: Black is the identity, White negates.
#[inline]
pub fn komi_in_pov(komi: f32, pov: Stone) -> f32 {
    match pov {
        Stone::Black => komi,
        Stone::White => -komi,
    }
}
