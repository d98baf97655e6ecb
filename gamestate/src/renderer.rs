//! Puts a frame together: the active state's content, the menu over it, the
//! screen melt between states, then the palette lookup into the presentation
//! buffer.
//!
//! Doom function name `D_Display`

use crate::machination::Machinations;
use crate::palette::{NORMALPAL, palette_row};
use gamestate_traits::{
    DrawScreen, GameState, GameTraits, MachinationTrait, MenuTrait, SoftFramebuffer, WadData,
};
use log::{debug, warn};
use render_target::{BASE_WIDTH, UpdateResult, WipeEffect};
use std::rc::Rc;
use wad::{PaletteSet, PatchCache, WadPatch};

/// Title page shown while `GameState::Opening`
pub const DEFAULT_PAGE: &str = "TITLEPIC";

pub struct Renderer {
    screen: DrawScreen,
    /// The last frame of the previous state, column-major like the screen
    wipe_buffer: Vec<u8>,
    wipe: WipeEffect,
    wiping: bool,
    /// `None` until the first tic
    wipe_game_state: Option<GameState>,
    force_wipe: bool,
    palettes: PaletteSet,
    palette: usize,
    patches: PatchCache,
    page: Option<Rc<WadPatch>>,
    /// Integer upscale of the 320 wide layout
    scale: i32,
}

impl Renderer {
    /// Fails if the `PLAYPAL` lump is missing or short, there is nothing to
    /// show a frame with otherwise.
    pub fn new(
        wad: &WadData,
        width: usize,
        height: usize,
        gamma: u8,
        wipe_seed: u32,
    ) -> wad::Result<Self> {
        let palettes = PaletteSet::from_playpal(&wad.read_lump_by_name("PLAYPAL")?, gamma)?;
        debug!("Loaded {} palettes, gamma {}", palettes.len(), palettes.gamma_level());

        let scale = (width / BASE_WIDTH).max(1);
        let band_count = width / scale + 1;
        let wipe = WipeEffect::new(band_count, (height / scale) as i32, wipe_seed);

        let mut renderer = Self {
            screen: DrawScreen::new(wad, width, height),
            wipe_buffer: vec![0; width * height],
            wipe,
            wiping: false,
            wipe_game_state: None,
            force_wipe: false,
            palettes,
            palette: NORMALPAL,
            patches: PatchCache::new(),
            page: None,
            scale: scale as i32,
        };
        renderer.set_page(wad, DEFAULT_PAGE);
        Ok(renderer)
    }

    /// Picture for the title pages. A missing picture leaves a blank page.
    pub fn set_page(&mut self, wad: &WadData, name: &str) -> bool {
        self.page = self.patches.try_load(wad, name);
        self.page.is_some()
    }

    pub fn screen(&self) -> &DrawScreen {
        &self.screen
    }

    pub fn is_wiping(&self) -> bool {
        self.wiping
    }

    /// Palette row used for the last frame
    pub fn palette(&self) -> usize {
        self.palette
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Melt into whatever state is showing next tic, even if it is the same
    pub fn force_wipe(&mut self) {
        self.force_wipe = true;
    }

    /// Once per game tic. A change of state grabs the last drawn frame and
    /// starts melting it away; an active melt moves on by one step.
    pub fn ticker(&mut self, state: GameState) {
        let changed = match self.wipe_game_state {
            Some(last) => last != state,
            None => false,
        };
        if changed || std::mem::take(&mut self.force_wipe) {
            self.wipe_buffer.copy_from_slice(self.screen.data());
            self.wipe.start();
            self.wiping = true;
            debug!("Wipe from {:?} to {state:?}", self.wipe_game_state);
        } else if self.wiping && self.wipe.update() == UpdateResult::Completed {
            self.wiping = false;
        }
        self.wipe_game_state = Some(state);
    }

    /// Draw the frame for `game` and convert it into `output`
    pub fn render<H, M, I, F>(
        &mut self,
        game: &impl GameTraits,
        machinations: &mut Machinations<H, M, I, F>,
        output: &mut SoftFramebuffer,
    ) where
        H: MachinationTrait,
        M: MenuTrait,
        I: MachinationTrait,
        F: MachinationTrait,
    {
        let state = game.game_state();
        self.draw_content(state, machinations);

        if self.wiping {
            self.draw_wipe();
            machinations.draw_menu(&mut self.screen);
            self.present(NORMALPAL, output);
            return;
        }

        machinations.draw_menu(&mut self.screen);
        let palette = if state.shows_player_view() {
            palette_row(&game.player_status())
        } else {
            NORMALPAL
        };
        self.present(palette, output);
    }

    fn draw_content<H, M, I, F>(
        &mut self,
        state: GameState,
        machinations: &mut Machinations<H, M, I, F>,
    ) where
        H: MachinationTrait,
        M: MenuTrait,
        I: MachinationTrait,
        F: MachinationTrait,
    {
        self.screen.clear(0);
        match state {
            GameState::Opening => {
                if let Some(page) = &self.page {
                    self.screen.draw_patch(page, 0, 0, self.scale);
                }
            }
            GameState::Level
            | GameState::DemoPlayback
            | GameState::Intermission
            | GameState::Finale => {}
        }
        machinations.draw_state(state, &mut self.screen);
    }

    /// Copy each band of the old frame over the new one, shifted down by the
    /// band's melt offset. Offsets are interpolated across a band two columns
    /// at a time. The last band takes whatever columns are left when the
    /// width isn't a multiple of the scale.
    fn draw_wipe(&mut self) {
        let width = self.screen.width();
        let height = self.screen.height();
        let band_width = self.scale as usize;
        let y = self.wipe.y();
        let data = self.screen.data_mut();

        for (i, &band_y) in y.iter().enumerate() {
            let x1 = band_width * i;
            if x1 >= width {
                break;
            }
            let x2 = (band_width * (i + 1)).min(width);
            let next_y = y.get(i + 1).copied().unwrap_or(band_y);
            let y1 = (self.scale * band_y).max(0);
            let y2 = (self.scale * next_y).max(0);
            for x in x1..x2 {
                let t = ((x - x1) / 2 * 2) as i32;
                let dy = y1 + (y2 - y1) * t / band_width as i32;
                let dy = (dy as usize).min(height);
                let copy_len = height - dy;
                if copy_len > 0 {
                    let src = height * x;
                    let dst = height * x + dy;
                    data[dst..dst + copy_len]
                        .copy_from_slice(&self.wipe_buffer[src..src + copy_len]);
                }
            }
        }
    }

    fn present(&mut self, palette: usize, output: &mut SoftFramebuffer) {
        if palette != self.palette {
            debug!("Palette {} -> {palette}", self.palette);
            self.palette = palette;
        }
        if palette >= self.palettes.len() {
            warn!("PLAYPAL has no palette {palette}, using the last");
        }
        output.write_indexed(
            self.screen.data(),
            self.screen.height(),
            self.palettes.get(palette),
        );
    }
}
