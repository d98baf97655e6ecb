use crate::font;
use log::debug;
use math::FixedPoint;
use std::rc::Rc;
use wad::{WadData, WadPatch, WadPatchPost};

/// The palette-indexed framebuffer and everything that draws into it.
///
/// Pixels are stored column-major, `height * x + y`, because pictures are
/// stored as columns and a column blit is then a contiguous write.
///
/// No primitive here fails. Anything partly off-screen is clipped, anything
/// fully off-screen is skipped.
#[derive(Debug, Clone)]
pub struct DrawScreen {
    width: usize,
    height: usize,
    data: Vec<u8>,
    pub(crate) chars: Vec<Option<Rc<WadPatch>>>,
}

impl DrawScreen {
    /// Create a blank screen and load the small font from `wad`. Missing
    /// glyphs are fine, they are skipped when drawing.
    pub fn new(wad: &WadData, width: usize, height: usize) -> Self {
        Self::with_glyphs(width, height, font::load_glyphs(wad))
    }

    /// Create a blank screen with an explicit glyph set, indexed by ASCII
    /// code. Anything past `GLYPH_COUNT` is ignored.
    pub fn with_glyphs(width: usize, height: usize, mut chars: Vec<Option<Rc<WadPatch>>>) -> Self {
        chars.resize(font::GLYPH_COUNT, None);
        debug!("New {width}x{height} screen");
        Self {
            width,
            height,
            data: vec![0; width * height],
            chars,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Column-major palette indices
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Palette index at X|Y, `None` off-screen
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.data[self.height * x as usize + y as usize])
    }

    pub fn clear(&mut self, colour: u8) {
        self.data.iter_mut().for_each(|p| *p = colour);
    }

    /// Draw `patch` with its origin at `x`,`y`, each texel becoming a
    /// `scale` x `scale` block.
    pub fn draw_patch(&mut self, patch: &WadPatch, x: i32, y: i32, scale: i32) {
        self.blit_patch(patch, x, y, scale, false);
    }

    /// As `draw_patch` but mirrored horizontally within the same footprint
    pub fn draw_patch_flip(&mut self, patch: &WadPatch, x: i32, y: i32, scale: i32) {
        self.blit_patch(patch, x, y, scale, true);
    }

    fn blit_patch(&mut self, patch: &WadPatch, x: i32, y: i32, scale: i32, flip: bool) {
        if scale <= 0 || patch.width <= 0 {
            return;
        }
        let step = FixedPoint::ONE / scale;
        let draw_x = x.saturating_sub(scale.saturating_mul(patch.left_offset));
        let draw_y = y.saturating_sub(scale.saturating_mul(patch.top_offset));
        let mut draw_width = scale.saturating_mul(patch.width);

        let mut i = 0;
        let mut frac = step - FixedPoint::EPSILON;
        if draw_x < 0 {
            let exceed = draw_x.saturating_neg();
            frac += step * exceed;
            i += exceed;
        }
        let screen_width = self.width as i32;
        if draw_x.saturating_add(draw_width) > screen_width {
            draw_width = screen_width.saturating_sub(draw_x);
        }

        while i < draw_width {
            let col = frac.floor_int();
            let col = if flip { patch.width - col - 1 } else { col };
            if let Some(column) = usize::try_from(col).ok().and_then(|c| patch.columns.get(c)) {
                self.draw_column(column, draw_x + i, draw_y, scale);
            }
            frac += step;
            i += 1;
        }
    }

    /// Draw the posts of one picture column at screen column `x`, with `y`
    /// being where row zero of the picture lands.
    pub fn draw_column(&mut self, posts: &[WadPatchPost], x: i32, y: i32, scale: i32) {
        if scale <= 0 || x < 0 || x as usize >= self.width {
            return;
        }
        let step = FixedPoint::ONE / scale;
        let base = self.height * x as usize;
        let screen_height = self.height as i32;

        for post in posts {
            let draw_y = y.saturating_add(scale.saturating_mul(post.top_delta));
            let mut draw_len = scale.saturating_mul(post.len() as i32);

            let mut i = 0;
            let mut frac = step - FixedPoint::EPSILON;
            if draw_y < 0 {
                let exceed = draw_y.saturating_neg();
                frac += step * exceed;
                i += exceed;
            }
            if draw_y.saturating_add(draw_len) > screen_height {
                draw_len = screen_height.saturating_sub(draw_y);
            }

            while i < draw_len {
                let texel = frac.floor_int() as usize;
                if let Some(&px) = post.pixels.get(texel) {
                    self.data[base + (draw_y + i) as usize] = px;
                }
                frac += step;
                i += 1;
            }
        }
    }

    /// Solid fill, clipped to the screen
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: u8) {
        let x1 = x.max(0);
        let y1 = y.max(0);
        let x2 = x.saturating_add(w).min(self.width as i32);
        let y2 = y.saturating_add(h).min(self.height as i32);
        if x1 >= x2 || y1 >= y2 {
            return;
        }
        for x in x1 as usize..x2 as usize {
            let start = self.height * x + y1 as usize;
            let end = self.height * x + y2 as usize;
            self.data[start..end].iter_mut().for_each(|p| *p = colour);
        }
    }
}
