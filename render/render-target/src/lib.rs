//! The software compositor. `DrawScreen` owns a palette-indexed framebuffer
//! and the primitives that write to it, `WipeEffect` tracks the screen melt,
//! and `SoftFramebuffer` is the RGBA buffer a finished frame is converted
//! into for presentation.

mod buffers;
mod draw_screen;
mod font;
mod line;
mod wipe;

pub use buffers::*;
pub use draw_screen::*;
pub use font::{FONT_END, FONT_START, GLYPH_COUNT};
pub use line::OutCode;
pub use wipe::*;

/// Width of the classic 320x200 screen everything is laid out against
pub const BASE_WIDTH: usize = 320;
/// Height of the classic 320x200 screen
pub const BASE_HEIGHT: usize = 200;
