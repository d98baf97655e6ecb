use crate::error::{Result, WadError};
use crate::types::WadPatch;
use crate::wad::WadData;
use log::warn;
use std::collections::HashMap;
use std::rc::Rc;

/// Decoded pictures shared by name. Filling it is up to the caller, typically
/// once at startup or the first time a screen needs a picture.
#[derive(Debug, Default)]
pub struct PatchCache {
    patches: HashMap<String, Rc<WadPatch>>,
}

impl PatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Rc<WadPatch>> {
        self.patches.get(&name.to_ascii_uppercase()).cloned()
    }

    /// Decode and cache `name` unless it is already cached
    pub fn load(&mut self, wad: &WadData, name: &str) -> Result<Rc<WadPatch>> {
        let key = name.to_ascii_uppercase();
        if let Some(p) = self.patches.get(&key) {
            return Ok(p.clone());
        }
        let index = wad
            .lump_index(&key)
            .ok_or_else(|| WadError::NotFound(key.clone()))?;
        let patch = Rc::new(WadPatch::from_bytes(&key, &wad.read_lump(index)?)?);
        self.patches.insert(key, patch.clone());
        Ok(patch)
    }

    /// As `load`, but a missing or broken picture is logged and skipped
    pub fn try_load(&mut self, wad: &WadData, name: &str) -> Option<Rc<WadPatch>> {
        match self.load(wad, name) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("Skipping picture {name}: {e}");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}
