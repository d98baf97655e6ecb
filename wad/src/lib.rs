//! This crate contains the structures and tools for opening WAD archives,
//! looking up lumps by name, and decoding the pictures and palettes the
//! compositor draws with.
//!
//! The structure of a WAD is this:
//!
//! ```text,ignore
//!                        <───── 32 bits ──────>
//!                        ┌────────────────────┐
//!             ┌──── 0x00 |  ASCII WAD Type    | 0x03
//!             |          | ────────────────── |
//!     Header ─┤     0x04 | # of directories   | 0x07
//!             |          | ────────────────── |
//!             └──── 0x08 | offset to listing ───0x0B ──┐
//!             ┌───────── | ────────────────── |        |
//!             |     0x0C | ┌────────────────┐ |        |
//!             |          | |   Lump Bytes   |<─────┐   |
//!     Lumps ──┤          | |       .        | |    |   |
//!             |          | └────────────────┘ |    |   |
//!             |          |         .          |    |   |
//!             └───────── |         .          |    |   |
//!             ┌───────── | ┌────────────────┐<─────────┘
//!             |          | |   Lump Offset  |──────┘
//!             |          | |----------------| |
//!  Directory ─┤          | |   Lump Size    | |
//!     List    |          | |----------------| |
//!             |          | |   Lump Name    | |
//!             |          | └────────────────┘ |
//!             |          |         .          |
//!             |          |         .          |
//!             |          |         .          |
//!             └───────── └────────────────────┘
//! ```

pub use crate::cache::PatchCache;
pub use crate::error::{Result, WadError};
pub use crate::game_mode::*;
pub use crate::types::*;
/// Bring only the WAD structs down to root level
pub use crate::wad::*;

/// Builds WAD files in memory for tests
#[cfg(any(test, feature = "test-util"))]
pub mod builder;
mod cache;
mod error;
/// IWAD identification from the names of the opened files
pub mod game_mode;
/// Decoded lump types
pub mod types;
/// The WAD structure and parser
pub mod wad;
