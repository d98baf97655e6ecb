//! The main loop driver. Each tic runs the game, then the machinations, then
//! lets the renderer catch any state change before a frame is drawn. With no
//! window the frame ends up in a `SoftFramebuffer` and is reported by
//! checksum.

use gamestate::{Game, MAX_DAMAGECOUNT, Machinations, Renderer};
use gamestate_traits::{GameState, GameTraits, PowerType, SoftFramebuffer};
use log::{debug, info};

use crate::machines::{Finale, Intermission, MenuOverlay, Messages};

pub type Machines = Machinations<Messages, MenuOverlay, Intermission, Finale>;

/// States shown in turn, each entered with a melt from the one before
const PHASES: [GameState; 4] = [
    GameState::Opening,
    GameState::Level,
    GameState::Intermission,
    GameState::Finale,
];

const CROSSHAIR: u8 = 176;
const MENU_BACKGROUND: u8 = 0;
const MENU_BORDER: u8 = 4;
const INTERMISSION_BACKGROUND: u8 = 100;
const FINALE_BACKGROUND: u8 = 240;

const FINALE_TEXT: &str = "Once you beat the big badasses and\n\
clean out the moon base you're supposed\n\
to win, aren't you? Aren't you? Where's\n\
your fat reward and ticket home?";

pub fn new_machines() -> Machines {
    Machinations::new(
        Messages::new(CROSSHAIR),
        MenuOverlay::new("paused", MENU_BACKGROUND, MENU_BORDER),
        Intermission::new(100, 50, INTERMISSION_BACKGROUND),
        Finale::new(FINALE_TEXT, FINALE_BACKGROUND),
    )
}

/// What was on screen when a state was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseReport {
    pub state: GameState,
    pub tics: u32,
    pub palette: usize,
    pub checksum: u64,
}

/// Run every state for at least `tics` tics and until the melt into it has
/// finished. The level is entered hurt, with a pickup and the menu open for
/// its second half, so the palette flashes and the overlay are exercised.
pub fn d_doom_loop(
    game: &mut Game,
    renderer: &mut Renderer,
    machines: &mut Machines,
    output: &mut SoftFramebuffer,
    tics: u32,
) -> Vec<PhaseReport> {
    let mut reports = Vec::with_capacity(PHASES.len());

    for state in PHASES {
        game.set_game_state(state);
        if state == GameState::Level {
            game.damage(MAX_DAMAGECOUNT);
            game.give_power(PowerType::Strength);
        }

        let mut ran = 0;
        while ran < tics || renderer.is_wiping() {
            if state == GameState::Level && ran == tics / 2 {
                game.bonus();
                machines.menu.open();
            }
            run_tic(game, renderer, machines, output);
            ran += 1;
        }
        match state {
            GameState::Level => debug!(
                "HUD line {:?}, menu open {} tics",
                machines.hud.line(),
                machines.menu.open_tics()
            ),
            GameState::Intermission => debug!("Tally {:?}", machines.intermission.counts()),
            GameState::Finale => debug!("Finale text complete: {}", machines.finale.is_at_end()),
            GameState::Opening | GameState::DemoPlayback => {}
        }
        machines.menu.close();

        let report = PhaseReport {
            state,
            tics: ran,
            palette: renderer.palette(),
            checksum: output.checksum(),
        };
        info!(
            "{:?}: {} tics, palette {}, checksum {:016x}",
            report.state, report.tics, report.palette, report.checksum
        );
        reports.push(report);
    }
    reports
}

fn run_tic(
    game: &mut Game,
    renderer: &mut Renderer,
    machines: &mut Machines,
    output: &mut SoftFramebuffer,
) {
    game.ticker();
    machines.ticker(game);
    renderer.ticker(game.game_state());
    renderer.render(game, machines, output);
    if renderer.is_wiping() {
        debug!("Tic {}: wiping", game.game_tic());
    }
}
