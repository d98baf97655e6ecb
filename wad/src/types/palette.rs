use crate::error::{Result, WadError};

/// Bytes in one PLAYPAL entry, 256 RGB triplets
pub const PALETTE_BYTES: usize = 256 * 3;
/// Gamma correction levels, 0 is the raw palette
pub const GAMMA_LEVELS: u8 = 5;

/// A single palette as RGBA, ready to index with a framebuffer byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadPalette(pub [[u8; 4]; 256]);

impl WadPalette {
    fn from_rgb(bytes: &[u8], gamma: &[u8; 256]) -> Self {
        let mut colours = [[0, 0, 0, 255]; 256];
        for (c, rgb) in colours.iter_mut().zip(bytes.chunks_exact(3)) {
            *c = [
                gamma[rgb[0] as usize],
                gamma[rgb[1] as usize],
                gamma[rgb[2] as usize],
                255,
            ];
        }
        Self(colours)
    }

    #[inline]
    pub fn colour(&self, index: u8) -> [u8; 4] {
        self.0[index as usize]
    }
}

/// All palettes from a PLAYPAL lump. The stock lump holds 14: normal, 8
/// damage reds, 4 bonus golds and the radiation suit green.
#[derive(Debug, Clone)]
pub struct PaletteSet {
    palettes: Vec<WadPalette>,
    gamma_level: u8,
}

impl PaletteSet {
    pub fn from_playpal(bytes: &[u8], gamma_level: u8) -> Result<Self> {
        if bytes.len() < PALETTE_BYTES {
            return Err(WadError::format(
                "PLAYPAL",
                format!(
                    "{} bytes is too short for one palette of {PALETTE_BYTES}",
                    bytes.len()
                ),
            ));
        }
        let gamma_level = gamma_level.min(GAMMA_LEVELS - 1);
        let gamma = gamma_table(gamma_level);
        let palettes = bytes
            .chunks_exact(PALETTE_BYTES)
            .map(|p| WadPalette::from_rgb(p, &gamma))
            .collect();
        Ok(Self {
            palettes,
            gamma_level,
        })
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn gamma_level(&self) -> u8 {
        self.gamma_level
    }

    /// Out of range is clamped to the last palette, a short PLAYPAL from a
    /// PWAD shouldn't take the game down
    #[inline]
    pub fn get(&self, index: usize) -> &WadPalette {
        let index = index.min(self.palettes.len().saturating_sub(1));
        &self.palettes[index]
    }
}

/// Brightening curve, `out = 255 * (in / 255) ^ (1 - level / 8)`. Built once
/// when the palettes are loaded so the per-frame path stays integer only.
pub fn gamma_table(level: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    let exponent = 1.0 - 0.125 * level as f64;
    for (i, v) in table.iter_mut().enumerate() {
        *v = (255.0 * (i as f64 / 255.0).powf(exponent)).round() as u8;
    }
    table
}
