//! The small set of machinations the headless driver composites: a HUD line
//! with a crosshair over the player view, a boxed menu, the level tally and
//! the typewriter finale text.

use gamestate_traits::{DrawScreen, GameState, GameTraits, MachinationTrait, MenuTrait, TICRATE};
use log::debug;
use render_target::BASE_WIDTH;

/// Space between lines of text, before scaling
const LINE_HEIGHT: i32 = 10;
/// How long a HUD message stays up
const COUNT_DOWN: i32 = 2 * TICRATE;

/// Integer upscale of the 320 wide layout for this screen
fn layout_scale(screen: &DrawScreen) -> i32 {
    (screen.width() / BASE_WIDTH).max(1) as i32
}

/// A line of text that can be revealed a character at a time and wraps on
/// word boundaries.
#[derive(Debug, Clone, Default)]
pub struct HudString {
    data: String,
    /// Characters revealed so far
    current_char: usize,
    char_count: usize,
}

impl HudString {
    pub fn new(text: &str) -> Self {
        let mut s = Self::default();
        s.replace(text);
        s
    }

    pub fn line(&self) -> &str {
        &self.data
    }

    /// Swap the text, starting the reveal over
    pub fn replace(&mut self, text: &str) {
        self.data = text.to_string();
        self.char_count = self.data.chars().count();
        self.current_char = 0;
    }

    pub fn clear(&mut self) {
        self.replace("");
    }

    pub fn inc_current_char(&mut self) {
        if self.current_char < self.char_count {
            self.current_char += 1;
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.current_char == self.char_count
    }

    pub fn set_draw_all(&mut self) {
        self.current_char = self.char_count;
    }

    /// Draw the revealed part with `y` as the first baseline, wrapping before
    /// any word that would cross the right edge. Returns the number of lines
    /// used.
    pub fn draw(&self, x: i32, y: i32, scale: i32, screen: &mut DrawScreen) -> i32 {
        let width = screen.width() as i32;
        let height = screen.height() as i32;
        let mut draw_x = x;
        let mut baseline = y;
        let mut lines = 1;

        for (n, (i, ch)) in self.data.char_indices().enumerate() {
            if n >= self.current_char || baseline - LINE_HEIGHT * scale >= height {
                break;
            }
            match ch {
                '\n' => {
                    draw_x = x;
                    baseline += LINE_HEIGHT * scale;
                    lines += 1;
                }
                ' ' => {
                    let word: i32 = self.data[i + 1..]
                        .chars()
                        .take_while(|c| *c != ' ' && *c != '\n')
                        .map(|c| screen.measure_char(c, scale))
                        .sum();
                    let space = screen.measure_char(' ', scale);
                    if draw_x + space + word > width {
                        draw_x = x;
                        baseline += LINE_HEIGHT * scale;
                        lines += 1;
                    } else {
                        draw_x += space;
                    }
                }
                _ => draw_x = screen.draw_char(ch, draw_x, baseline, scale),
            }
        }
        lines
    }
}

/// Player view overlay: the last message in the top left and a crosshair.
pub struct Messages {
    line: HudString,
    count_down: i32,
    /// The level start message goes up once per visit
    greeted: bool,
    crosshair: u8,
}

impl Messages {
    pub fn new(crosshair: u8) -> Self {
        Self {
            line: HudString::default(),
            count_down: 0,
            greeted: false,
            crosshair,
        }
    }

    pub fn add_line(&mut self, line: &str) {
        self.line.replace(&line.to_ascii_uppercase());
        self.line.set_draw_all();
        self.count_down = COUNT_DOWN;
    }

    pub fn line(&self) -> Option<&str> {
        (self.count_down > 0).then(|| self.line.line())
    }
}

impl MachinationTrait for Messages {
    fn ticker(&mut self, game: &impl GameTraits) -> bool {
        if !self.greeted {
            let description = game.get_wad_data().classification().description();
            self.add_line(description);
            self.greeted = true;
            return true;
        }
        if self.count_down > 0 {
            self.count_down -= 1;
            if self.count_down == 0 {
                self.line.clear();
                return true;
            }
        }
        false
    }

    fn draw(&mut self, screen: &mut DrawScreen) {
        let f = layout_scale(screen);
        if self.count_down > 0 {
            self.line.draw(2 * f, 9 * f, f, screen);
        }

        let cx = screen.width() as f32 / 2.0;
        let cy = screen.height() as f32 / 2.0;
        let arm = (2 * f) as f32;
        screen.draw_line(cx - arm, cy, cx + arm, cy, self.crosshair);
        screen.draw_line(cx, cy - arm, cx, cy + arm, self.crosshair);
    }
}

/// A titled box in the middle of the screen
pub struct MenuOverlay {
    active: bool,
    title: String,
    background: u8,
    border: u8,
    open_tics: u32,
}

impl MenuOverlay {
    pub fn new(title: &str, background: u8, border: u8) -> Self {
        Self {
            active: false,
            title: title.to_ascii_uppercase(),
            background,
            border,
            open_tics: 0,
        }
    }

    pub fn open(&mut self) {
        if !self.active {
            debug!("Menu opened");
        }
        self.active = true;
    }

    pub fn close(&mut self) {
        if self.active {
            debug!("Menu closed after {} tics", self.open_tics);
        }
        self.active = false;
        self.open_tics = 0;
    }

    pub fn open_tics(&self) -> u32 {
        self.open_tics
    }
}

impl MachinationTrait for MenuOverlay {
    fn ticker(&mut self, _game: &impl GameTraits) -> bool {
        if self.active {
            self.open_tics += 1;
        }
        self.active
    }

    fn draw(&mut self, screen: &mut DrawScreen) {
        let f = layout_scale(screen);
        let text_w = screen.measure_text(&self.title, f);
        let w = text_w.max(64 * f) + 16 * f;
        let h = 24 * f;
        let x = (screen.width() as i32 - w) / 2;
        let y = (screen.height() as i32 - h) / 2;

        screen.fill_rect(x, y, w, h, self.border);
        screen.fill_rect(x + f, y + f, w - 2 * f, h - 2 * f, self.background);
        screen.draw_text(&self.title, x + (w - text_w) / 2, y + 15 * f, f);
    }
}

impl MenuTrait for MenuOverlay {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Percentage step per tic while the tally counts up
const TALLY_STEP: i32 = 2;

/// End of level tally counting up to its targets
pub struct Intermission {
    kills: i32,
    items: i32,
    kills_target: i32,
    items_target: i32,
    background: u8,
}

impl Intermission {
    pub fn new(kills_target: i32, items_target: i32, background: u8) -> Self {
        Self {
            kills: 0,
            items: 0,
            kills_target,
            items_target,
            background,
        }
    }

    pub fn is_done(&self) -> bool {
        self.kills == self.kills_target && self.items == self.items_target
    }

    pub fn counts(&self) -> (i32, i32) {
        (self.kills, self.items)
    }
}

impl MachinationTrait for Intermission {
    fn ticker(&mut self, game: &impl GameTraits) -> bool {
        if game.game_state() != GameState::Intermission || self.is_done() {
            return false;
        }
        self.kills = (self.kills + TALLY_STEP).min(self.kills_target);
        self.items = (self.items + TALLY_STEP).min(self.items_target);
        true
    }

    fn draw(&mut self, screen: &mut DrawScreen) {
        let f = layout_scale(screen);
        screen.clear(self.background);
        screen.draw_text("FINISHED", 104 * f, 40 * f, f);
        screen.draw_text(&format!("KILLS {}%", self.kills), 50 * f, 70 * f, f);
        screen.draw_text(&format!("ITEMS {}%", self.items), 50 * f, 90 * f, f);
    }
}

/// Story text typed out over a plain background
pub struct Finale {
    text: HudString,
    background: u8,
}

impl Finale {
    pub fn new(text: &str, background: u8) -> Self {
        Self {
            text: HudString::new(&text.to_ascii_uppercase()),
            background,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.text.is_at_end()
    }
}

impl MachinationTrait for Finale {
    fn ticker(&mut self, _game: &impl GameTraits) -> bool {
        self.text.inc_current_char();
        false
    }

    fn draw(&mut self, screen: &mut DrawScreen) {
        let f = layout_scale(screen);
        screen.clear(self.background);
        self.text.draw(10 * f, 17 * f, f, screen);
    }
}
