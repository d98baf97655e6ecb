//! Opens the game archives, composites each game state into an offscreen
//! buffer with screen melts between them, and logs what was drawn.

mod cli;
mod config;
mod d_main;
mod machines;

use cli::*;
use d_main::{d_doom_loop, new_machines};
use gamestate::{Game, Renderer};
use log::{LevelFilter, info, warn};
use simplelog::TermLogger;
use std::error::Error;
use wad::WadData;

use crate::config::UserConfig;

/// The main `game-exe` crate should take care of initialising a few things
fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    let paths = options.wad_paths();
    if paths.is_empty() {
        return Err("No IWAD given, use --iwad or set one in the user config".into());
    }
    let wad = WadData::open(&paths)?;
    let class = wad.classification();
    info!(
        "Opened {:?}: {} lumps, {:?} {:?} {:?}",
        wad.file_names(),
        wad.lump_count(),
        class.mode,
        class.version,
        class.mission
    );

    if options.list_lumps {
        for (i, lump) in wad.lumps().iter().enumerate() {
            info!("{i:>5} {:<8} {:>8} bytes", lump.name, lump.size);
        }
        return Ok(());
    }

    let width = options.width as usize;
    let height = options.height as usize;
    let mut renderer = Renderer::new(
        &wad,
        width,
        height,
        options.gamma.unwrap_or_default(),
        options.wipe_seed.unwrap_or_default(),
    )?;
    if let Some(page) = &options.page {
        if !renderer.set_page(&wad, page) {
            warn!("No picture named {page}, the title page will be blank");
        }
    }

    let mut game = Game::new(wad);
    let mut machines = new_machines();
    let mut output = gamestate_traits::SoftFramebuffer::new(width, height);
    let reports = d_doom_loop(&mut game, &mut renderer, &mut machines, &mut output, options.tics);
    info!(
        "Finished after {} tics, final checksum {:016x}",
        game.game_tic(),
        reports.last().map(|r| r.checksum).unwrap_or_default()
    );
    Ok(())
}
