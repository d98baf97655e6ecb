//! Assemble small archives in memory. Used by tests throughout the workspace
//! so they don't depend on a copyrighted IWAD being present.

use crate::wad::{IWAD_MAGIC, PWAD_MAGIC};
use std::fs;
use std::path::PathBuf;

enum Entry {
    Data { name: [u8; 8], data: Vec<u8> },
    /// A directory record pointing wherever it likes, no data written
    Dangling { name: [u8; 8], offset: i32, size: i32 },
}

pub struct WadBuilder {
    magic: [u8; 4],
    entries: Vec<Entry>,
}

impl WadBuilder {
    pub fn iwad() -> Self {
        Self {
            magic: IWAD_MAGIC,
            entries: Vec::new(),
        }
    }

    pub fn pwad() -> Self {
        Self {
            magic: PWAD_MAGIC,
            entries: Vec::new(),
        }
    }

    pub fn lump(self, name: &str, data: &[u8]) -> Self {
        self.raw_entry(pad_name(name), data)
    }

    pub fn raw_entry(mut self, name: [u8; 8], data: &[u8]) -> Self {
        self.entries.push(Entry::Data {
            name,
            data: data.to_vec(),
        });
        self
    }

    pub fn entry_at(mut self, name: &str, offset: i32, size: i32) -> Self {
        self.entries.push(Entry::Dangling {
            name: pad_name(name),
            offset,
            size,
        });
        self
    }

    /// Header, then lump data in order, then the directory
    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![0u8; 12];
        let mut dir = Vec::with_capacity(self.entries.len() * 16);

        for entry in &self.entries {
            let (name, offset, size) = match entry {
                Entry::Data { name, data } => {
                    let offset = out.len() as i32;
                    out.extend_from_slice(data);
                    (name, offset, data.len() as i32)
                }
                Entry::Dangling { name, offset, size } => (name, *offset, *size),
            };
            dir.extend_from_slice(&offset.to_le_bytes());
            dir.extend_from_slice(&size.to_le_bytes());
            dir.extend_from_slice(name);
        }

        let dir_offset = out.len() as i32;
        out.extend_from_slice(&dir);
        out[0..4].copy_from_slice(&self.magic);
        out[4..8].copy_from_slice(&(self.entries.len() as i32).to_le_bytes());
        out[8..12].copy_from_slice(&dir_offset.to_le_bytes());
        out
    }

    pub fn write_to(&self, path: impl Into<PathBuf>) -> std::io::Result<PathBuf> {
        let path = path.into();
        fs::write(&path, self.build())?;
        Ok(path)
    }
}

fn pad_name(name: &str) -> [u8; 8] {
    let mut n = [0u8; 8];
    for (d, s) in n.iter_mut().zip(name.bytes()) {
        *d = s;
    }
    n
}
