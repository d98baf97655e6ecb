use crate::error::{Result, WadError};
use crate::game_mode::{
    Classification, GameMode, GameVersion, IWAD_KEYWORDS, IwadKeyword, MissionPack,
};
use log::{debug, info, trace};
use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub const IWAD_MAGIC: [u8; 4] = *b"IWAD";
pub const PWAD_MAGIC: [u8; 4] = *b"PWAD";
const HEADER_SIZE: usize = 12;
const DIR_ENTRY_SIZE: usize = 16;

/// Header which tells us the WAD type and where the data is
///
/// The header structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                              |
/// |------------|--------------|------------------------------------------------------|
/// | 0x00-0x03  | 4 ASCII char | *Must* be an ASCII string (either "IWAD" or "PWAD")  |
/// | 0x04-0x07  | signed int   | The number entries in the directory                  |
/// | 0x08-0x0b  | signed int   | Offset in bytes to the directory in the WAD file     |
struct WadHeader {
    /// Will be either `IWAD` for game, or `PWAD` for patch
    wad_type: [u8; 4],
    /// The count of "lumps" of data
    dir_count: i32,
    /// Offset in bytes that the lump data starts at
    dir_offset: i32,
}

impl WadHeader {
    fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            wad_type: [bytes[0], bytes[1], bytes[2], bytes[3]],
            dir_count: read_i32(bytes, 4),
            dir_offset: read_i32(bytes, 8),
        }
    }
}

impl fmt::Debug for WadHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nWadHeader {{\n  wad_type: {},\n  dir_count: {},\n  dir_offset: {},\n}}",
            String::from_utf8_lossy(&self.wad_type),
            self.dir_count,
            self.dir_offset
        )
    }
}

/// Contains the details for a lump of data: where it starts, the size of it,
/// and the name
///
/// The directory structure in the WAD is as follows:
///
/// | Field Size | Data Type    | Content                                                    |
/// |------------|--------------|------------------------------------------------------------|
/// | 0x00-0x03  | signed int   | Offset value to the start of the lump data in the WAD file |
/// | 0x04-0x07  | signed int   | The size of the lump in bytes                              |
/// | 0x08-0x0f  | 8 ASCII char | ASCII holding the name of the lump                         |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumpInfo {
    /// Upper-cased, padding stripped
    pub name: String,
    /// Index of the opened file which holds the lump
    pub file_handle: usize,
    /// The offset in bytes where the lump data starts
    pub offset: usize,
    /// The size in bytes of the lump referenced
    pub size: usize,
}

impl LumpInfo {
    fn from_bytes(bytes: &[u8], file_handle: usize, path: &Path) -> Result<Self> {
        let offset = read_i32(bytes, 0);
        let size = read_i32(bytes, 4);
        let name = lump_name(&bytes[8..16]);
        if offset < 0 || size < 0 {
            return Err(WadError::format(
                path.display(),
                format!("lump {name} has negative offset {offset} or size {size}"),
            ));
        }
        Ok(Self {
            name,
            file_handle,
            offset: offset as usize,
            size: size as usize,
        })
    }

    /// Case-insensitive name match
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An open file and the name it was opened with
struct WadFile {
    path: PathBuf,
    file: File,
}

impl fmt::Debug for WadFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WadFile {{ path: {:?} }}", self.path)
    }
}

/// "Where's All (the) Data": the set of opened archives plus a single directory
/// telling us where each data lump starts.
///
/// Files are kept open and lumps are read on request. Entries from files
/// opened later are appended after earlier ones, and name lookups scan from
/// the back so a PWAD replaces same-named lumps of the IWAD.
#[derive(Debug)]
pub struct WadData {
    files: Vec<WadFile>,
    lumps: Vec<LumpInfo>,
    /// Lower-cased file stems in open order
    file_names: Vec<String>,
    classification: Classification,
    closed: bool,
}

impl WadData {
    /// Open every path in order using the stock game keyword table
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        Self::open_with_keywords(paths, IWAD_KEYWORDS)
    }

    /// Open every path in order. The first error aborts the whole open and
    /// every file opened up to that point is dropped.
    pub fn open_with_keywords<P: AsRef<Path>>(
        paths: &[P],
        keywords: &[IwadKeyword],
    ) -> Result<Self> {
        let mut wad = Self {
            files: Vec::with_capacity(paths.len()),
            lumps: Vec::new(),
            file_names: Vec::with_capacity(paths.len()),
            classification: Classification::default(),
            closed: false,
        };

        for path in paths {
            wad.add_file(path.as_ref())?;
        }

        wad.classification = Classification::from_names(&wad.file_names, keywords);
        info!("Identified {}", wad.classification);
        Ok(wad)
    }

    fn add_file(&mut self, path: &Path) -> Result<()> {
        let mut file = File::open(path).map_err(|e| WadError::io(path, e))?;

        let mut header_bytes = [0u8; HEADER_SIZE];
        let read = read_fully(&mut file, &mut header_bytes).map_err(|e| WadError::io(path, e))?;
        if read < HEADER_SIZE {
            return Err(WadError::format(
                path.display(),
                format!("header truncated, {read} of {HEADER_SIZE} bytes"),
            ));
        }
        let header = WadHeader::from_bytes(&header_bytes);
        trace!("{path:?}: {header:?}");

        if header.wad_type != IWAD_MAGIC && header.wad_type != PWAD_MAGIC {
            return Err(WadError::format(
                path.display(),
                format!(
                    "invalid magic {:?}, expected IWAD or PWAD",
                    String::from_utf8_lossy(&header.wad_type)
                ),
            ));
        }
        if header.dir_count < 0 || header.dir_offset < 0 {
            return Err(WadError::format(
                path.display(),
                format!(
                    "negative directory count {} or offset {}",
                    header.dir_count, header.dir_offset
                ),
            ));
        }

        let dir_len = header.dir_count as usize * DIR_ENTRY_SIZE;
        let file_len = file.metadata().map_err(|e| WadError::io(path, e))?.len();
        if header.dir_offset as u64 + dir_len as u64 > file_len {
            return Err(WadError::format(
                path.display(),
                format!(
                    "directory of {} entries at {} runs past end of file ({file_len} bytes)",
                    header.dir_count, header.dir_offset
                ),
            ));
        }

        let mut dir_bytes = vec![0u8; dir_len];
        file.seek(SeekFrom::Start(header.dir_offset as u64))
            .map_err(|e| WadError::io(path, e))?;
        let read = read_fully(&mut file, &mut dir_bytes).map_err(|e| WadError::io(path, e))?;
        if read < dir_len {
            return Err(WadError::format(
                path.display(),
                format!("directory truncated, {read} of {dir_len} bytes"),
            ));
        }

        let handle = self.files.len();
        let lumps = dir_bytes
            .chunks_exact(DIR_ENTRY_SIZE)
            .map(|entry| LumpInfo::from_bytes(entry, handle, path))
            .collect::<Result<Vec<LumpInfo>>>()?;

        info!(
            "Opened {} {path:?} with {} lumps",
            String::from_utf8_lossy(&header.wad_type),
            lumps.len()
        );

        self.lumps.extend(lumps);
        self.file_names.push(
            path.file_stem()
                .map(|s| s.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default(),
        );
        self.files.push(WadFile {
            path: path.to_path_buf(),
            file,
        });
        Ok(())
    }

    /// Release every file handle. Calling this more than once is fine.
    pub fn close(&mut self) {
        if !self.closed {
            debug!("Closing {} archive files", self.files.len());
        }
        self.files.clear();
        self.closed = true;
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Scan the directory from the end. A miss is `None`, never an error.
    pub fn lump_index(&self, name: &str) -> Option<usize> {
        self.lumps.iter().rposition(|l| l.is_named(name))
    }

    #[inline]
    pub fn lump_exists(&self, name: &str) -> bool {
        self.lump_index(name).is_some()
    }

    #[inline]
    pub fn lump_count(&self) -> usize {
        self.lumps.len()
    }

    #[inline]
    pub fn lump_info(&self, index: usize) -> Option<&LumpInfo> {
        self.lumps.get(index)
    }

    pub fn lumps(&self) -> &[LumpInfo] {
        &self.lumps
    }

    /// Every directory name in directory order, duplicates included
    pub fn lump_names(&self) -> impl Iterator<Item = &str> {
        self.lumps.iter().map(|l| l.name.as_str())
    }

    /// Base names (lower-cased, no extension) in the order they were opened
    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn game_mode(&self) -> GameMode {
        self.classification.mode
    }

    pub fn game_version(&self) -> GameVersion {
        self.classification.version
    }

    pub fn mission_pack(&self) -> MissionPack {
        self.classification.mission
    }

    /// Read the full lump at `index`
    pub fn read_lump(&self, index: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_lump_into(index, &mut buf)?;
        Ok(buf)
    }

    /// Read the lump at `index` into `dest`, which is resized to the lump size.
    /// Lets a caller reuse one scratch buffer across many reads.
    pub fn read_lump_into(&self, index: usize, dest: &mut Vec<u8>) -> Result<()> {
        if self.closed {
            return Err(WadError::Closed);
        }
        let info = self.lumps.get(index).ok_or(WadError::Index {
            index,
            count: self.lumps.len(),
        })?;
        let wad_file = &self.files[info.file_handle];
        trace!(
            "Reading {} ({} bytes at {}) from {:?}",
            info.name, info.size, info.offset, wad_file.path
        );

        dest.clear();
        dest.resize(info.size, 0);
        if info.size == 0 {
            return Ok(());
        }

        let mut file = &wad_file.file;
        file.seek(SeekFrom::Start(info.offset as u64))
            .map_err(|e| WadError::io(&wad_file.path, e))?;
        let read = read_fully(&mut file, dest).map_err(|e| WadError::io(&wad_file.path, e))?;
        if read < info.size {
            return Err(WadError::ShortRead {
                name: info.name.clone(),
                expected: info.size,
                read,
            });
        }
        Ok(())
    }

    /// Lookup and read in one. A miss is `WadError::NotFound`, use
    /// `lump_index` where a missing lump is expected.
    pub fn read_lump_by_name(&self, name: &str) -> Result<Vec<u8>> {
        let index = self
            .lump_index(name)
            .ok_or_else(|| WadError::NotFound(name.to_string()))?;
        self.read_lump(index)
    }
}

impl Drop for WadData {
    fn drop(&mut self) {
        self.close();
    }
}

#[inline]
fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Names are up to 8 bytes, padded with NUL or spaces. Anything after the
/// first NUL is garbage left by the editor that wrote the file.
fn lump_name(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end])
        .trim_end_matches(' ')
        .to_ascii_uppercase()
}

/// Like `read_exact` but reports how many bytes arrived instead of failing
fn read_fully(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::WadBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn base_and_patch(dir: &TempDir) -> (PathBuf, PathBuf) {
        let base = WadBuilder::iwad()
            .lump("PLAYPAL", &[1, 2, 3])
            .lump("FOO", b"base")
            .lump("BAR", &[9; 10])
            .write_to(dir.path().join("base.wad"))
            .unwrap();
        let patch = WadBuilder::pwad()
            .lump("FOO", b"patched")
            .write_to(dir.path().join("patch.wad"))
            .unwrap();
        (base, patch)
    }

    #[test]
    fn later_file_overrides() {
        let dir = TempDir::new().unwrap();
        let (base, patch) = base_and_patch(&dir);

        let wad = WadData::open(&[&base, &patch]).unwrap();
        assert_eq!(wad.lump_count(), 4);
        let i = wad.lump_index("FOO").unwrap();
        assert_eq!(i, 3);
        assert_eq!(wad.lump_info(i).unwrap().file_handle, 1);
        assert_eq!(wad.read_lump_by_name("foo").unwrap(), b"patched");

        let wad = WadData::open(&[&patch, &base]).unwrap();
        let i = wad.lump_index("FOO").unwrap();
        assert_eq!(i, 2);
        assert_eq!(wad.lump_info(i).unwrap().file_handle, 1);
        assert_eq!(wad.read_lump_by_name("FOO").unwrap(), b"base");
    }

    #[test]
    fn directory_round_trip() {
        let dir = TempDir::new().unwrap();
        let lumps: Vec<(String, Vec<u8>)> = (0..20)
            .map(|i| (format!("LUMP{}", i % 7), (0..i * 3).map(|b| b as u8).collect()))
            .collect();
        let mut builder = WadBuilder::iwad();
        for (name, data) in &lumps {
            builder = builder.lump(name, data);
        }
        let path = builder.write_to(dir.path().join("many.wad")).unwrap();

        let wad = WadData::open(&[path]).unwrap();
        assert_eq!(wad.lump_count(), lumps.len());
        for (i, (name, data)) in lumps.iter().enumerate() {
            let read = wad.read_lump(i).unwrap();
            assert_eq!(read.len(), data.len());
            assert_eq!(&read, data);

            let last = lumps.iter().rposition(|(n, _)| n == name).unwrap();
            assert_eq!(wad.lump_index(name), Some(last));
        }
        assert_eq!(wad.lump_names().filter(|n| *n == "LUMP0").count(), 3);
    }

    #[test]
    fn names_are_padded_and_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = WadBuilder::pwad()
            .raw_entry(*b"abc\0junk", b"one")
            .raw_entry(*b"SPACED  ", b"two")
            .raw_entry(*b"EIGHTCHR", b"three")
            .write_to(dir.path().join("names.wad"))
            .unwrap();

        let wad = WadData::open(&[path]).unwrap();
        assert_eq!(wad.lump_info(0).unwrap().name, "ABC");
        assert_eq!(wad.lump_index("Abc"), Some(0));
        assert_eq!(wad.lump_index("spaced"), Some(1));
        assert_eq!(wad.lump_index("eightchr"), Some(2));
        assert_eq!(wad.lump_index("EIGHTCHRS"), None);
    }

    #[test]
    fn missing_lump() {
        let dir = TempDir::new().unwrap();
        let (base, _) = base_and_patch(&dir);
        let wad = WadData::open(&[base]).unwrap();

        assert_eq!(wad.lump_index("NOPE"), None);
        assert!(!wad.lump_exists("NOPE"));
        assert!(matches!(
            wad.read_lump_by_name("NOPE"),
            Err(WadError::NotFound(n)) if n == "NOPE"
        ));
        assert!(matches!(
            wad.read_lump(99),
            Err(WadError::Index { index: 99, count: 3 })
        ));
    }

    #[test]
    fn bad_magic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.wad");
        let mut bytes = WadBuilder::iwad().lump("FOO", b"x").build();
        bytes[..4].copy_from_slice(b"ZWAD");
        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            WadData::open(&[path]),
            Err(WadError::Format { .. })
        ));
    }

    #[test]
    fn truncated_header_and_directory() {
        let dir = TempDir::new().unwrap();
        let short = dir.path().join("short.wad");
        fs::write(&short, b"IWAD\x01\0").unwrap();
        assert!(matches!(
            WadData::open(&[&short]),
            Err(WadError::Format { .. })
        ));

        let cut = dir.path().join("cut.wad");
        let bytes = WadBuilder::iwad().lump("A", b"a").lump("B", b"b").build();
        fs::write(&cut, &bytes[..bytes.len() - 8]).unwrap();
        assert!(matches!(
            WadData::open(&[&cut]),
            Err(WadError::Format { .. })
        ));
    }

    #[test]
    fn failure_in_second_file_fails_open() {
        let dir = TempDir::new().unwrap();
        let (base, _) = base_and_patch(&dir);
        let missing = dir.path().join("missing.wad");
        assert!(matches!(
            WadData::open(&[&base, &missing]),
            Err(WadError::Io { .. })
        ));
    }

    #[test]
    fn lump_past_end_of_file_is_short_read() {
        let dir = TempDir::new().unwrap();
        let path = WadBuilder::pwad()
            .entry_at("GHOST", 12, 4096)
            .write_to(dir.path().join("ghost.wad"))
            .unwrap();
        let wad = WadData::open(&[path]).unwrap();
        assert!(matches!(
            wad.read_lump(0),
            Err(WadError::ShortRead { expected: 4096, .. })
        ));
    }

    #[test]
    fn read_into_reuses_buffer() {
        let dir = TempDir::new().unwrap();
        let (base, _) = base_and_patch(&dir);
        let wad = WadData::open(&[base]).unwrap();

        let mut scratch = Vec::with_capacity(64);
        wad.read_lump_into(2, &mut scratch).unwrap();
        assert_eq!(scratch, [9; 10]);
        wad.read_lump_into(0, &mut scratch).unwrap();
        assert_eq!(scratch, [1, 2, 3]);
    }

    #[test]
    fn close_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let (base, _) = base_and_patch(&dir);
        let mut wad = WadData::open(&[base]).unwrap();
        wad.close();
        wad.close();
        assert!(wad.is_closed());
        assert!(matches!(wad.read_lump(0), Err(WadError::Closed)));
        // The directory stays queryable
        assert!(wad.lump_exists("FOO"));
    }

    #[test]
    fn classification_uses_open_order() {
        let dir = TempDir::new().unwrap();
        let doom2 = WadBuilder::iwad()
            .lump("MAP01", &[])
            .write_to(dir.path().join("doom2.wad"))
            .unwrap();
        let doom = WadBuilder::iwad()
            .lump("MAP01", &[])
            .write_to(dir.path().join("DOOM.WAD"))
            .unwrap();

        let wad = WadData::open(&[&doom2, &doom]).unwrap();
        assert_eq!(wad.file_names(), ["doom2", "doom"]);
        assert_eq!(wad.game_mode(), GameMode::Commercial);
        // while lump lookup prefers the last file
        assert_eq!(wad.lump_info(wad.lump_index("MAP01").unwrap()).unwrap().file_handle, 1);

        let wad = WadData::open(&[&doom, &doom2]).unwrap();
        assert_eq!(wad.game_mode(), GameMode::Retail);
        assert_eq!(wad.mission_pack(), MissionPack::Base);
    }
}
