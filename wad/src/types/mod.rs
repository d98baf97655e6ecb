//! Decoded forms of the lumps the compositor consumes

mod palette;
mod patch;

pub use palette::*;
pub use patch::*;
