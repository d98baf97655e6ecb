//! Game state, fairly self-descriptive but bares expanding on in a little more
//! detail.
//!
//! The state of the game can be a few states only:
//!
//! - title pages
//! - level playing, or demo playing
//! - intermission/finale
//!
//! and on top of those, the menu and the screen wipe between states.
//!
//! The active game state determines which `Machinations` are run and drawn,
//! what the `Renderer` puts on screen, and whether the player's damage and
//! pickup flashes tint the frame.

pub mod machination;
pub mod palette;
pub mod renderer;

pub use machination::Machinations;
pub use renderer::Renderer;

use gamestate_traits::{
    GameMode, GameState, GameTraits, INFRATICS, INVISTICS, INVULNTICS, IRONTICS, PlayerStatus,
    PowerType, WadData,
};
use log::{debug, info};

/// Pickup flash added per item
pub const BONUSADD: i32 = 6;
/// Strongest red flash, also caps a single large hit
pub const MAX_DAMAGECOUNT: i32 = 100;

/// The game as far as the compositor is concerned: which state is active and
/// the player counters that tint the screen. Map simulation feeds the
/// counters through `damage`, `bonus` and `give_power`.
pub struct Game {
    wad: WadData,
    gamestate: GameState,
    status: PlayerStatus,
    game_tic: u32,
    paused: bool,
}

impl Game {
    pub fn new(wad: WadData) -> Self {
        info!("Game: {}", wad.classification().description());
        Self {
            wad,
            gamestate: GameState::default(),
            status: PlayerStatus::default(),
            game_tic: 0,
            paused: false,
        }
    }

    pub fn game_tic(&self) -> u32 {
        self.game_tic
    }

    pub fn set_game_state(&mut self, state: GameState) {
        if state != self.gamestate {
            info!("Game state changed: {:?} -> {state:?}", self.gamestate);
            self.gamestate = state;
        }
    }

    pub fn toggle_pause_game(&mut self) {
        self.paused = !self.paused;
    }

    pub fn damage(&mut self, amount: i32) {
        self.status.damagecount = (self.status.damagecount + amount).min(MAX_DAMAGECOUNT);
    }

    pub fn bonus(&mut self) {
        self.status.bonuscount += BONUSADD;
    }

    /// Returns false if the power can't be given
    pub fn give_power(&mut self, power: PowerType) -> bool {
        let tics = match power {
            PowerType::Invulnerability => INVULNTICS,
            PowerType::Invisibility => INVISTICS,
            PowerType::IronFeet => IRONTICS,
            PowerType::Infrared => INFRATICS,
            // counts up from pickup
            PowerType::Strength => 1,
            PowerType::Allmap => {
                if self.status.power(power) != 0 {
                    return false; // Already got it
                }
                1
            }
            PowerType::NumPowers => return false,
        };
        self.status.powers[power as usize] = tics;
        debug!("Gave {power:?} for {tics}");
        true
    }

    /// Advance one tic. Counters only run while the player view is up.
    pub fn ticker(&mut self) {
        if self.paused {
            return;
        }
        self.game_tic += 1;
        if self.gamestate.shows_player_view() {
            self.player_think();
        }
    }

    /// The power and flash countdown part of `P_PlayerThink`
    fn player_think(&mut self) {
        let status = &mut self.status;
        let strength = &mut status.powers[PowerType::Strength as usize];
        if *strength != 0 {
            // Strength counts up to diminish fade.
            *strength += 1;
        }
        for power in [
            PowerType::Invulnerability,
            PowerType::Invisibility,
            PowerType::Infrared,
            PowerType::IronFeet,
        ] {
            let p = &mut status.powers[power as usize];
            if *p > 0 {
                *p -= 1;
            }
        }
        if status.damagecount > 0 {
            status.damagecount -= 1;
        }
        if status.bonuscount > 0 {
            status.bonuscount -= 1;
        }
    }
}

impl GameTraits for Game {
    fn game_state(&self) -> GameState {
        self.gamestate
    }

    fn player_status(&self) -> PlayerStatus {
        self.status
    }

    fn get_mode(&self) -> GameMode {
        self.wad.game_mode()
    }

    fn get_wad_data(&self) -> &WadData {
        &self.wad
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use wad::builder::WadBuilder;

    pub(crate) fn test_wad(dir: &TempDir, name: &str, extra: &[(&str, Vec<u8>)]) -> PathBuf {
        let mut builder = WadBuilder::iwad();
        for (lump, data) in extra {
            builder = builder.lump(lump, data);
        }
        builder.write_to(dir.path().join(name)).unwrap()
    }

    fn game() -> (TempDir, Game) {
        let dir = TempDir::new().unwrap();
        let path = test_wad(&dir, "doom2.wad", &[]);
        let game = Game::new(WadData::open(&[path]).unwrap());
        (dir, game)
    }

    #[test]
    fn flash_counts_down_in_level_only() {
        let (_dir, mut game) = game();
        assert_eq!(game.get_mode(), GameMode::Commercial);
        game.damage(500);
        game.bonus();
        assert_eq!(game.player_status().damagecount, MAX_DAMAGECOUNT);

        game.ticker();
        assert_eq!(game.player_status().damagecount, MAX_DAMAGECOUNT);

        game.set_game_state(GameState::Level);
        game.ticker();
        assert_eq!(game.player_status().damagecount, MAX_DAMAGECOUNT - 1);
        assert_eq!(game.player_status().bonuscount, BONUSADD - 1);
        for _ in 0..200 {
            game.ticker();
        }
        assert_eq!(game.player_status().damagecount, 0);
        assert_eq!(game.player_status().bonuscount, 0);
        assert_eq!(game.game_tic(), 202);
    }

    #[test]
    fn powers() {
        let (_dir, mut game) = game();
        game.set_game_state(GameState::Level);
        assert!(game.give_power(PowerType::Strength));
        assert!(game.give_power(PowerType::IronFeet));
        assert!(game.give_power(PowerType::Invisibility));
        assert!(game.give_power(PowerType::Allmap));
        assert!(!game.give_power(PowerType::Allmap));
        assert!(!game.give_power(PowerType::NumPowers));
        for _ in 0..10 {
            game.ticker();
        }
        let status = game.player_status();
        assert_eq!(status.power(PowerType::Strength), 11);
        assert_eq!(status.power(PowerType::IronFeet), IRONTICS - 10);
        assert_eq!(status.power(PowerType::Invisibility), INVISTICS - 10);
        assert_eq!(status.power(PowerType::Allmap), 1);
    }

    #[test]
    fn pause_stops_tics() {
        let (_dir, mut game) = game();
        game.toggle_pause_game();
        game.ticker();
        assert_eq!(game.game_tic(), 0);
        game.toggle_pause_game();
        game.ticker();
        assert_eq!(game.game_tic(), 1);
    }
}
