use argh::FromArgs;
use log::LevelFilter;

/// Open WAD archives and composite title, level, intermission and finale
/// frames without a window, melting between each.
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<LevelFilter>,
    /// path to game WAD
    #[argh(option, default = "Default::default()")]
    pub iwad: String,
    /// path to patch WAD, may be repeated. Later ones override earlier ones
    #[argh(option)]
    pub pwad: Vec<String>,
    /// resolution width in pixels
    #[argh(option, default = "0")]
    pub width: u32,
    /// resolution height in pixels
    #[argh(option, default = "0")]
    pub height: u32,
    /// gamma correction level, 0-4
    #[argh(option)]
    pub gamma: Option<u8>,
    /// title page picture to show, TITLEPIC if not given
    #[argh(option)]
    pub page: Option<String>,
    /// tics to spend in each game state
    #[argh(option, default = "70")]
    pub tics: u32,
    /// seed for the screen melt
    #[argh(option)]
    pub wipe_seed: Option<u32>,
    /// list every lump in the directory and exit
    #[argh(switch)]
    pub list_lumps: bool,
}

impl CLIOptions {
    /// Every archive in the order it should be opened
    pub fn wad_paths(&self) -> Vec<&str> {
        std::iter::once(self.iwad.as_str())
            .chain(self.pwad.iter().map(String::as_str))
            .filter(|p| !p.is_empty())
            .collect()
    }
}
