use crate::DrawScreen;
use log::{debug, warn};
use std::rc::Rc;
use wad::{WadData, WadPatch};

/// Glyph slots, one per 7-bit ASCII code
pub const GLYPH_COUNT: usize = 128;
/// First printable glyph the stock font ships
pub const FONT_START: u8 = b'!';
/// Last printable glyph the stock font ships
pub const FONT_END: u8 = b'_';

/// Advance for a space, before scaling
const SPACE_WIDTH: i32 = 4;
/// Distance from the text baseline up to the top of a glyph, before scaling
const BASELINE: i32 = 7;

/// Load `STCFN000` to `STCFN127`. Only the printable range is expected, so a
/// gap there is a warning and anything else is just noted.
pub(crate) fn load_glyphs(wad: &WadData) -> Vec<Option<Rc<WadPatch>>> {
    let mut chars = Vec::with_capacity(GLYPH_COUNT);
    for i in 0..GLYPH_COUNT {
        let name = format!("STCFN{i:0>3}");
        let glyph = wad
            .read_lump_by_name(&name)
            .and_then(|bytes| WadPatch::from_bytes(&name, &bytes));
        match glyph {
            Ok(patch) => chars.push(Some(Rc::new(patch))),
            Err(e) => {
                if (FONT_START..=FONT_END).contains(&(i as u8)) {
                    warn!("Missing {name}: {e}");
                } else {
                    debug!("No {name}");
                }
                chars.push(None);
            }
        }
    }
    chars
}

/// The glyph for `ch`, or why there isn't one
enum Glyph {
    Space,
    Patch(Rc<WadPatch>),
    Skip,
}

impl DrawScreen {
    fn glyph(&self, ch: char) -> Glyph {
        if ch as u32 >= GLYPH_COUNT as u32 {
            return Glyph::Skip;
        }
        if ch == ' ' {
            return Glyph::Space;
        }
        let index = ch.to_ascii_uppercase() as usize;
        match self.chars.get(index).and_then(|c| c.clone()) {
            Some(p) => Glyph::Patch(p),
            None => Glyph::Skip,
        }
    }

    /// Draw `text` starting at `x` with `y` as the baseline. Returns the X
    /// after the last character.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32) -> i32 {
        let mut draw_x = x;
        for ch in text.chars() {
            draw_x = self.draw_char(ch, draw_x, y, scale);
        }
        draw_x
    }

    /// Draw a single character, returns the X to draw the next one at
    pub fn draw_char(&mut self, ch: char, x: i32, y: i32, scale: i32) -> i32 {
        match self.glyph(ch) {
            Glyph::Space => x.saturating_add(SPACE_WIDTH.saturating_mul(scale)),
            Glyph::Skip => x,
            Glyph::Patch(patch) => {
                let top = y.saturating_sub(BASELINE.saturating_mul(scale));
                self.draw_patch(&patch, x, top, scale);
                x.saturating_add(scale.saturating_mul(patch.width))
            }
        }
    }

    /// Width `draw_text` would advance by for `text`
    pub fn measure_text(&self, text: &str, scale: i32) -> i32 {
        text.chars()
            .fold(0, |w, ch| w.saturating_add(self.measure_char(ch, scale)))
    }

    pub fn measure_char(&self, ch: char, scale: i32) -> i32 {
        match self.glyph(ch) {
            Glyph::Space => SPACE_WIDTH.saturating_mul(scale),
            Glyph::Patch(p) => scale.saturating_mul(p.width),
            Glyph::Skip => 0,
        }
    }
}
