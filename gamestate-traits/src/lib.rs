//! Exposes an API of sorts that allows crates for things like the HUD, menus
//! and intermission screens to find out what they need about the game and
//! draw themselves with the compositor.

pub use render_target::{DrawScreen, PixelBuffer, SoftFramebuffer};
pub use wad::{GameMode, WadData, WadPatch};

/// Game tics per second
pub const TICRATE: i32 = 35;

/// The current state of the game-exe: whether we are playing, gazing at the
/// intermission screen, the game-exe final animation, or a demo.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    /// Title pages before anything is played
    #[default]
    Opening,
    /// Plays back recorded demos and is the default after the title pages
    DemoPlayback,
    /// The state the game will spend most of its time in is `GameState::Level`
    /// as this is where all of the actual gameplay happens.
    Level,
    Intermission,
    Finale,
}

impl GameState {
    /// States where the player view is on screen, and with it the damage,
    /// bonus and radiation suit tints
    pub fn shows_player_view(self) -> bool {
        matches!(self, GameState::Level | GameState::DemoPlayback)
    }
}

/// Index into `PlayerStatus::powers`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PowerType {
    Invulnerability,
    Strength,
    Invisibility,
    IronFeet,
    Allmap,
    Infrared,
    NumPowers,
}

/// Power up durations: how many tics till expiration
pub const INVULNTICS: i32 = 30 * TICRATE;
pub const INVISTICS: i32 = 60 * TICRATE;
pub const INFRATICS: i32 = 120 * TICRATE;
pub const IRONTICS: i32 = 60 * TICRATE;

/// The parts of the player the frame tint depends on
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStatus {
    /// Red flash strength, set when hurt and counted down each tic
    pub damagecount: i32,
    /// Gold flash strength, set on item pickup and counted down each tic
    pub bonuscount: i32,
    /// Tics remaining for each power. Strength counts *up* from pickup, the
    /// berserk tint fading as it grows.
    pub powers: [i32; PowerType::NumPowers as usize],
}

impl PlayerStatus {
    #[inline]
    pub fn power(&self, power: PowerType) -> i32 {
        self.powers.get(power as usize).copied().unwrap_or(0)
    }
}

/// What the frame renderer asks of the game each frame
pub trait GameTraits {
    fn game_state(&self) -> GameState;

    /// Fetch the basic player statistics (player 1)
    fn player_status(&self) -> PlayerStatus;

    /// A lot of things in Doom are dependant on knowing which of the game
    /// releases is currently being played.
    fn get_mode(&self) -> GameMode;

    fn get_wad_data(&self) -> &WadData;
}

/// To be implemented by machination type things (HUD, menus, intermission,
/// finale)
pub trait MachinationTrait {
    /// Responds to changes in the game. Returns true if something changed.
    fn ticker(&mut self, game: &impl GameTraits) -> bool;

    /// Draw this Machination to the screen
    fn draw(&mut self, screen: &mut DrawScreen);
}

/// A machination drawn on top of everything else while it is open
pub trait MenuTrait: MachinationTrait {
    fn is_active(&self) -> bool;
}
