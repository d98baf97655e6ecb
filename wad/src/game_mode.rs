//! Identify which release of the game a set of archives belongs to.
//!
//! Classification only looks at the base file names (lower-cased, no
//! extension) in the order the files were opened. Each attribute is resolved
//! independently and the first name that carries a value for it wins. Note
//! that this is the opposite of lump lookup, where the last file opened wins.

use std::fmt;

/// Game mode handling - identify IWAD version to handle IWAD dependant
/// animations etc.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum GameMode {
    /// DOOM 1 shareware, E1, M9
    Shareware,
    /// DOOM 1 registered, E3, M27
    Registered,
    /// DOOM 2 retail, E1 M34
    Commercial,
    /// DOOM 1 retail, E4, M36
    Retail,
    /// Well, no IWAD found.
    #[default]
    Indetermined,
}

/// Executable version the archive set expects. Affects a handful of
/// compatibility behaviours in collaborators.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum GameVersion {
    #[default]
    Version109,
    Ultimate,
    Final,
}

/// Mission packs. `Base` is the plain game with no pack loaded.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum MissionPack {
    #[default]
    Base,
    Plutonia,
    Tnt,
}

/// One row of the keyword table. `None` means the name says nothing about
/// that attribute and the scan continues with the next file.
#[derive(Debug, Clone, Copy)]
pub struct IwadKeyword {
    pub name: &'static str,
    pub mode: Option<GameMode>,
    pub version: Option<GameVersion>,
    pub mission: Option<MissionPack>,
}

impl IwadKeyword {
    const fn new(
        name: &'static str,
        mode: GameMode,
        version: GameVersion,
        mission: Option<MissionPack>,
    ) -> Self {
        Self {
            name,
            mode: Some(mode),
            version: Some(version),
            mission,
        }
    }
}

/// The stock table of known base names
pub const IWAD_KEYWORDS: &[IwadKeyword] = &[
    IwadKeyword::new("doom2", GameMode::Commercial, GameVersion::Version109, None),
    IwadKeyword::new("freedoom2", GameMode::Commercial, GameVersion::Version109, None),
    IwadKeyword::new("doom", GameMode::Retail, GameVersion::Ultimate, None),
    IwadKeyword::new("freedoom1", GameMode::Retail, GameVersion::Ultimate, None),
    IwadKeyword::new("doom1", GameMode::Shareware, GameVersion::Version109, None),
    IwadKeyword::new(
        "plutonia",
        GameMode::Commercial,
        GameVersion::Final,
        Some(MissionPack::Plutonia),
    ),
    IwadKeyword::new(
        "tnt",
        GameMode::Commercial,
        GameVersion::Final,
        Some(MissionPack::Tnt),
    ),
];

/// Derived once when the archives are opened, never changed afterwards
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub mode: GameMode,
    pub version: GameVersion,
    pub mission: MissionPack,
}

impl Classification {
    pub fn from_names<S: AsRef<str>>(names: &[S], table: &[IwadKeyword]) -> Self {
        let rows: Vec<&IwadKeyword> = names
            .iter()
            .filter_map(|n| {
                let n = n.as_ref().to_ascii_lowercase();
                table.iter().find(|k| k.name == n)
            })
            .collect();

        Self {
            mode: rows.iter().find_map(|k| k.mode).unwrap_or_default(),
            version: rows.iter().find_map(|k| k.version).unwrap_or_default(),
            mission: rows.iter().find_map(|k| k.mission).unwrap_or_default(),
        }
    }

    pub fn description(&self) -> &'static str {
        match (self.mode, self.mission) {
            (GameMode::Commercial, MissionPack::Plutonia) => "The Plutonia Experiment",
            (GameMode::Commercial, MissionPack::Tnt) => "TNT: Evilution",
            (GameMode::Commercial, _) => "DOOM 2: Hell on Earth",
            (GameMode::Retail, _) => "The Ultimate DOOM",
            (GameMode::Registered, _) => "DOOM Registered",
            (GameMode::Shareware, _) => "DOOM Shareware",
            (GameMode::Indetermined, _) => "Unknown game",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?}, {:?}, {:?})",
            self.description(),
            self.mode,
            self.version,
            self.mission
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_name_wins() {
        let c = Classification::from_names(&["doom2", "doom"], IWAD_KEYWORDS);
        assert_eq!(c.mode, GameMode::Commercial);
        assert_eq!(c.version, GameVersion::Version109);

        let c = Classification::from_names(&["doom", "doom2"], IWAD_KEYWORDS);
        assert_eq!(c.mode, GameMode::Retail);
        assert_eq!(c.version, GameVersion::Ultimate);
    }

    #[test]
    fn mission_pack_found_after_base() {
        let c = Classification::from_names(&["doom2", "plutonia"], IWAD_KEYWORDS);
        assert_eq!(c.mode, GameMode::Commercial);
        assert_eq!(c.version, GameVersion::Version109);
        assert_eq!(c.mission, MissionPack::Plutonia);

        let c = Classification::from_names(&["TNT"], IWAD_KEYWORDS);
        assert_eq!(c.mission, MissionPack::Tnt);
        assert_eq!(c.version, GameVersion::Final);
    }

    #[test]
    fn unknown_names_fall_back() {
        let c = Classification::from_names(&["mymod", "textures"], IWAD_KEYWORDS);
        assert_eq!(c, Classification::default());
        assert_eq!(c.mode, GameMode::Indetermined);
        assert_eq!(c.mission, MissionPack::Base);
    }

    #[test]
    fn custom_table() {
        let table = [IwadKeyword {
            name: "chex",
            mode: Some(GameMode::Retail),
            version: None,
            mission: None,
        }];
        let c = Classification::from_names(&["chex"], &table);
        assert_eq!(c.mode, GameMode::Retail);
        assert_eq!(c.version, GameVersion::Version109);
        // The stock table knows nothing of it
        let c = Classification::from_names(&["chex"], IWAD_KEYWORDS);
        assert_eq!(c.mode, GameMode::Indetermined);
    }
}
