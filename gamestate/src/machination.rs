//! A `Machination` is defined as something that can be a self-contained entity.
//! These implement the `MachinationTrait` which allows them to tick (update
//! self) and draw. The methods on this trait provide access to `GameTraits`
//! methods, and the `DrawScreen`.

use gamestate_traits::{DrawScreen, GameState, GameTraits, MachinationTrait, MenuTrait};

/// Blob of various tickers required during gameplay, this exists mostly to pass things
/// around as some functions can end up with quite a few args
pub struct Machinations<H, M, I, F>
where
    H: MachinationTrait,
    M: MenuTrait,
    I: MachinationTrait,
    F: MachinationTrait,
{
    /// Overlay on the player view: status, messages
    pub hud: H,
    /// Drawn on top of everything while open
    pub menu: M,
    /// Level end tally
    pub intermission: I,
    /// Show the finale screen
    pub finale: F,
}

impl<H, M, I, F> Machinations<H, M, I, F>
where
    H: MachinationTrait,
    M: MenuTrait,
    I: MachinationTrait,
    F: MachinationTrait,
{
    pub fn new(hud: H, menu: M, intermission: I, finale: F) -> Self {
        Self {
            hud,
            menu,
            intermission,
            finale,
        }
    }

    /// Tick whatever the current state shows. The menu always ticks so it
    /// can open over any state.
    pub fn ticker(&mut self, game: &impl GameTraits) {
        self.menu.ticker(game);
        match game.game_state() {
            GameState::Level | GameState::DemoPlayback => {
                self.hud.ticker(game);
            }
            GameState::Intermission => {
                self.intermission.ticker(game);
            }
            GameState::Finale => {
                self.finale.ticker(game);
            }
            GameState::Opening => {}
        }
    }

    /// Draw the machination owning `state`. Opening has none, its page is
    /// drawn by the renderer.
    pub fn draw_state(&mut self, state: GameState, screen: &mut DrawScreen) {
        match state {
            GameState::Level | GameState::DemoPlayback => self.hud.draw(screen),
            GameState::Intermission => self.intermission.draw(screen),
            GameState::Finale => self.finale.draw(screen),
            GameState::Opening => {}
        }
    }

    /// Menus go directly on top of whatever is on screen
    pub fn draw_menu(&mut self, screen: &mut DrawScreen) {
        if self.menu.is_active() {
            self.menu.draw(screen);
        }
    }
}
