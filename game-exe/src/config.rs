//! User configuration options.

use crate::CLIOptions;
use dirs::config_dir;
use log::{error, info, warn};
use nanoserde::{DeRon, SerRon};
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

const LOG_TAG: &str = "UserConfig";
const BASE_DIR: &str = "room4doom/";
const CONFIG_FILE: &str = "compositor.ron";

fn get_cfg_file() -> Option<PathBuf> {
    let Some(mut dir) = config_dir() else {
        warn!(target: LOG_TAG, "No user config dir, settings won't be kept");
        return None;
    };
    dir.push(BASE_DIR);
    if !dir.exists() {
        if let Err(e) = create_dir_all(&dir) {
            warn!(target: LOG_TAG, "Couldn't create {dir:?}: {e}");
            return None;
        }
    }
    dir.push(CONFIG_FILE);
    Some(dir)
}

#[derive(Debug, Clone, PartialEq, DeRon, SerRon)]
pub struct UserConfig {
    pub iwad: String,
    pub width: u32,
    pub height: u32,
    pub gamma: u8,
    pub wipe_seed: u32,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            iwad: String::new(),
            width: 640,
            height: 400,
            gamma: 0,
            wipe_seed: 0,
        }
    }
}

impl UserConfig {
    /// Read the user's config, falling back to defaults (and writing them
    /// out) if it is missing or unreadable
    pub fn load() -> Self {
        match get_cfg_file() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(buf) if !buf.trim().is_empty() => match UserConfig::deserialize_ron(&buf) {
                Ok(data) => {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                Err(e) => {
                    warn!(target: LOG_TAG, "Could not deserialise {path:?}: {e}");
                    warn!(target: LOG_TAG, "Recreating config");
                }
            },
            Ok(_) => {}
            Err(e) => info!(target: LOG_TAG, "No config at {path:?}: {e}"),
        }
        Self::create_default(path)
    }

    fn create_default(path: &Path) -> Self {
        let config = UserConfig::default();
        info!(target: LOG_TAG, "Created default user config file");
        config.write_to(path);
        config
    }

    pub fn write(&self) {
        if let Some(path) = get_cfg_file() {
            self.write_to(&path);
        }
    }

    pub fn write_to(&self, path: &Path) {
        match fs::write(path, self.serialize_ron()) {
            Ok(_) => info!(target: LOG_TAG, "Saved user config to {path:?}"),
            Err(err) => error!(target: LOG_TAG, "Could not write config: {err}"),
        }
    }

    /// Sync the CLI options and UserOptions with each other. Anything given on
    /// the command line wins and is remembered, anything missing is filled in
    /// from the config.
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!(target: LOG_TAG, "Checking CLI options");

        if !cli.iwad.is_empty() && cli.iwad != self.iwad {
            cli.iwad.clone_into(&mut self.iwad);
            info!(target: LOG_TAG, "IWAD changed to: {}", &cli.iwad);
        } else {
            self.iwad.clone_into(&mut cli.iwad);
        }

        if cli.width != 0 && cli.width != self.width {
            self.width = cli.width;
        } else {
            cli.width = self.width;
        }

        if cli.height != 0 && cli.height != self.height {
            self.height = cli.height;
        } else {
            cli.height = self.height;
        }

        if let Some(g) = cli.gamma {
            self.gamma = g;
        } else {
            cli.gamma = Some(self.gamma);
        }

        if let Some(s) = cli.wipe_seed {
            self.wipe_seed = s;
        } else {
            cli.wipe_seed = Some(self.wipe_seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> CLIOptions {
        CLIOptions::from_args(&["room4doom-compositor"], args).unwrap()
    }

    #[test]
    fn missing_file_writes_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = UserConfig::load_from(&path);
        assert_eq!(config, UserConfig::default());
        assert!(path.exists());
        assert_eq!(UserConfig::load_from(&path), config);
    }

    #[test]
    fn round_trip_and_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = UserConfig {
            iwad: "/games/doom2.wad".to_string(),
            width: 960,
            height: 600,
            gamma: 2,
            wipe_seed: 42,
        };
        config.write_to(&path);
        assert_eq!(UserConfig::load_from(&path), config);

        fs::write(&path, "this is not ron").unwrap();
        assert_eq!(UserConfig::load_from(&path), UserConfig::default());
    }

    #[test]
    fn cli_wins_and_gaps_are_filled() {
        let mut config = UserConfig {
            iwad: "doom.wad".to_string(),
            ..UserConfig::default()
        };
        let mut opts = cli(&["--width", "1280", "--gamma", "3"]);
        config.sync_cli(&mut opts);
        assert_eq!(opts.iwad, "doom.wad");
        assert_eq!((opts.width, opts.height), (1280, 400));
        assert_eq!(config.width, 1280);
        assert_eq!(config.gamma, 3);
        assert_eq!(opts.wipe_seed, Some(0));

        let mut opts = cli(&["--iwad", "tnt.wad"]);
        config.sync_cli(&mut opts);
        assert_eq!(config.iwad, "tnt.wad");
        assert_eq!(opts.gamma, Some(3));
    }
}
