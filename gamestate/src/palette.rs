//! Which of the PLAYPAL palettes tints the frame

use gamestate_traits::{PlayerStatus, PowerType};

/// The untinted palette
pub const NORMALPAL: usize = 0;
pub const STARTREDPALS: usize = 1;
pub const NUMREDPALS: usize = 8;
pub const STARTBONUSPALS: usize = 9;
pub const NUMBONUSPALS: usize = 4;
pub const RADIATIONPAL: usize = 13;

/// Radiation suit tint stays solid until this many tics remain, then flickers
const IRONFEET_FADE: i32 = 4 * 32;

/// Pick the palette for the player's current flash counters. Damage wins
/// over pickups, pickups win over the radiation suit.
///
/// Doom function name `ST_doPaletteStuff`
pub fn palette_row(status: &PlayerStatus) -> usize {
    let mut cnt = status.damagecount;

    let strength = status.power(PowerType::Strength);
    if strength != 0 {
        // slowly fade the berzerk out
        let bzc = 12 - (strength >> 6);
        cnt = cnt.max(bzc);
    }

    if cnt != 0 {
        let row = ((cnt + 7) >> 3).clamp(0, NUMREDPALS as i32 - 1) as usize;
        STARTREDPALS + row
    } else if status.bonuscount != 0 {
        let row = ((status.bonuscount + 7) >> 3).clamp(0, NUMBONUSPALS as i32 - 1) as usize;
        STARTBONUSPALS + row
    } else {
        let ironfeet = status.power(PowerType::IronFeet);
        if ironfeet > IRONFEET_FADE || ironfeet & 8 != 0 {
            RADIATIONPAL
        } else {
            NORMALPAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(damage: i32, bonus: i32, strength: i32, ironfeet: i32) -> PlayerStatus {
        let mut s = PlayerStatus {
            damagecount: damage,
            bonuscount: bonus,
            ..Default::default()
        };
        s.powers[PowerType::Strength as usize] = strength;
        s.powers[PowerType::IronFeet as usize] = ironfeet;
        s
    }

    #[test]
    fn nothing_happening() {
        assert_eq!(palette_row(&status(0, 0, 0, 0)), NORMALPAL);
    }

    #[test]
    fn damage_band() {
        assert_eq!(palette_row(&status(1, 0, 0, 0)), 2);
        assert_eq!(palette_row(&status(8, 0, 0, 0)), 2);
        assert_eq!(palette_row(&status(9, 0, 0, 0)), 3);
        assert_eq!(palette_row(&status(49, 0, 0, 0)), 8);
        assert_eq!(palette_row(&status(100, 0, 0, 0)), 8);
        // damage beats everything else
        assert_eq!(palette_row(&status(20, 6, 0, 2000)), 4);
    }

    #[test]
    fn berserk_fades() {
        // fresh pickup, 12 - 0
        assert_eq!(palette_row(&status(0, 0, 1, 0)), STARTREDPALS + 2);
        // 12 - 8 = 4
        assert_eq!(palette_row(&status(0, 0, 8 * 64, 0)), STARTREDPALS + 1);
        // long held, bzc is negative and bonus shows through
        assert_eq!(palette_row(&status(0, 3, 2000, 0)), STARTBONUSPALS + 1);
        // damage above the berserk floor
        assert_eq!(palette_row(&status(40, 0, 1, 0)), STARTREDPALS + 5);
    }

    #[test]
    fn bonus_band() {
        assert_eq!(palette_row(&status(0, 1, 0, 0)), 10);
        assert_eq!(palette_row(&status(0, 6, 0, 0)), 10);
        assert_eq!(palette_row(&status(0, 17, 0, 0)), 12);
        assert_eq!(palette_row(&status(0, 200, 0, 0)), 12);
    }

    #[test]
    fn radiation_suit() {
        assert_eq!(palette_row(&status(0, 0, 0, 129)), RADIATIONPAL);
        assert_eq!(palette_row(&status(0, 0, 0, 128)), NORMALPAL);
        // flicker when running out
        assert_eq!(palette_row(&status(0, 0, 0, 8)), RADIATIONPAL);
        assert_eq!(palette_row(&status(0, 0, 0, 7)), NORMALPAL);
        assert_eq!(palette_row(&status(0, 0, 0, 24)), RADIATIONPAL);
    }
}
