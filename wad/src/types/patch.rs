use crate::error::{Result, WadError};

/// Marks the end of a column's post list
pub const POST_TERMINATOR: u8 = 0xFF;

/// One vertical run of opaque pixels in a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadPatchPost {
    /// Absolute row the run starts on
    pub top_delta: i32,
    /// Palette indices, top to bottom
    pub pixels: Vec<u8>,
}

impl WadPatchPost {
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// A picture in the column/post format used for sprites, menu graphics, fonts
/// and wall patches.
///
/// | Field Size | Data Type  | Content                                      |
/// |------------|------------|----------------------------------------------|
/// | 0x00-0x01  | i16        | Width                                        |
/// | 0x02-0x03  | i16        | Height                                       |
/// | 0x04-0x05  | i16        | Left offset (pixels left of the origin)      |
/// | 0x06-0x07  | i16        | Top offset (pixels above the origin)         |
/// | 0x08-...   | i32[width] | Offset of each column from start of the lump |
///
/// Each column is a list of posts, `top_delta:u8, length:u8, pad:u8,
/// pixels[length], pad:u8`, ended by a `top_delta` of `0xFF`.
///
/// Pictures taller than 254 pixels can't express their lower posts with a
/// byte. When a post's `top_delta` is not below the previous post it is taken
/// as relative to that post, so `top_delta` on `WadPatchPost` is always the
/// absolute row and always increasing within a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadPatch {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub left_offset: i32,
    pub top_offset: i32,
    pub columns: Vec<Vec<WadPatchPost>>,
}

impl WadPatch {
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let width = read_i16(name, bytes, 0)? as i32;
        let height = read_i16(name, bytes, 2)? as i32;
        let left_offset = read_i16(name, bytes, 4)? as i32;
        let top_offset = read_i16(name, bytes, 6)? as i32;

        if width < 0 || height < 0 {
            return Err(WadError::format(
                name,
                format!("picture has negative size {width}x{height}"),
            ));
        }

        let mut columns = Vec::with_capacity(width as usize);
        for x in 0..width as usize {
            let offset = read_i32(name, bytes, 8 + x * 4)?;
            if offset < 0 {
                return Err(WadError::format(
                    name,
                    format!("column {x} has negative offset {offset}"),
                ));
            }
            columns.push(read_column(name, bytes, offset as usize)?);
        }

        Ok(Self {
            name: name.to_ascii_uppercase(),
            width,
            height,
            left_offset,
            top_offset,
            columns,
        })
    }
}

fn read_column(name: &str, bytes: &[u8], mut pos: usize) -> Result<Vec<WadPatchPost>> {
    let mut posts = Vec::new();
    let mut top = -1;

    loop {
        let delta = read_u8(name, bytes, pos)?;
        if delta == POST_TERMINATOR {
            break;
        }
        let delta = delta as i32;
        top = if delta <= top { top + delta } else { delta };

        let len = read_u8(name, bytes, pos + 1)? as usize;
        // skip length and the leading pad byte
        let start = pos + 3;
        let end = start + len;
        if end > bytes.len() {
            return Err(WadError::format(
                name,
                format!("post at {pos} wants {len} pixels, lump ends at {}", bytes.len()),
            ));
        }
        posts.push(WadPatchPost {
            top_delta: top,
            pixels: bytes[start..end].to_vec(),
        });
        // trailing pad byte
        pos = end + 1;
    }
    Ok(posts)
}

fn truncated(name: &str, pos: usize, len: usize) -> WadError {
    WadError::format(name, format!("picture truncated, read at {pos} of {len} bytes"))
}

#[inline]
fn read_u8(name: &str, bytes: &[u8], pos: usize) -> Result<u8> {
    bytes
        .get(pos)
        .copied()
        .ok_or_else(|| truncated(name, pos, bytes.len()))
}

#[inline]
fn read_i16(name: &str, bytes: &[u8], pos: usize) -> Result<i16> {
    match bytes.get(pos..pos + 2) {
        Some(b) => Ok(i16::from_le_bytes([b[0], b[1]])),
        None => Err(truncated(name, pos, bytes.len())),
    }
}

#[inline]
fn read_i32(name: &str, bytes: &[u8], pos: usize) -> Result<i32> {
    match bytes.get(pos..pos + 4) {
        Some(b) => Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        None => Err(truncated(name, pos, bytes.len())),
    }
}

/// Encode a picture from columns of `(top_delta, pixels)` posts. Tops are
/// written as given so tests can exercise the relative encoding.
#[cfg(any(test, feature = "test-util"))]
pub fn encode_patch(
    width: i16,
    height: i16,
    left_offset: i16,
    top_offset: i16,
    columns: &[Vec<(u8, Vec<u8>)>],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&left_offset.to_le_bytes());
    out.extend_from_slice(&top_offset.to_le_bytes());
    let table = out.len();
    out.resize(table + columns.len() * 4, 0);

    for (x, column) in columns.iter().enumerate() {
        let offset = out.len() as i32;
        out[table + x * 4..table + x * 4 + 4].copy_from_slice(&offset.to_le_bytes());
        for (top, pixels) in column {
            out.push(*top);
            out.push(pixels.len() as u8);
            out.push(0);
            out.extend_from_slice(pixels);
            out.push(0);
        }
        out.push(POST_TERMINATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_simple_patch() {
        let bytes = encode_patch(
            2,
            6,
            1,
            5,
            &[
                vec![(0, vec![1, 2]), (4, vec![3])],
                vec![(1, vec![4, 5, 6])],
            ],
        );
        let patch = WadPatch::from_bytes("stcfn065", &bytes).unwrap();
        assert_eq!(patch.name, "STCFN065");
        assert_eq!((patch.width, patch.height), (2, 6));
        assert_eq!((patch.left_offset, patch.top_offset), (1, 5));
        assert_eq!(patch.columns.len(), 2);
        assert_eq!(
            patch.columns[0],
            vec![
                WadPatchPost {
                    top_delta: 0,
                    pixels: vec![1, 2]
                },
                WadPatchPost {
                    top_delta: 4,
                    pixels: vec![3]
                },
            ]
        );
        assert_eq!(patch.columns[1][0].top_delta, 1);
        assert_eq!(patch.columns[1][0].len(), 3);
    }

    #[test]
    fn negative_offsets_allowed() {
        let bytes = encode_patch(1, 1, -3, -7, &[vec![(0, vec![9])]]);
        let patch = WadPatch::from_bytes("P", &bytes).unwrap();
        assert_eq!((patch.left_offset, patch.top_offset), (-3, -7));
    }

    #[test]
    fn empty_columns() {
        let bytes = encode_patch(3, 10, 0, 0, &[vec![], vec![(2, vec![7])], vec![]]);
        let patch = WadPatch::from_bytes("P", &bytes).unwrap();
        assert!(patch.columns[0].is_empty());
        assert_eq!(patch.columns[1].len(), 1);
        assert!(patch.columns[2].is_empty());
    }

    #[test]
    fn tall_patch_relative_tops() {
        // Second post at 200, third at 200 + 100
        let bytes = encode_patch(
            1,
            320,
            0,
            0,
            &[vec![(200, vec![1]), (100, vec![2]), (250, vec![3])]],
        );
        let patch = WadPatch::from_bytes("TALL", &bytes).unwrap();
        let tops: Vec<i32> = patch.columns[0].iter().map(|p| p.top_delta).collect();
        assert_eq!(tops, [200, 300, 550]);
    }

    #[test]
    fn truncated_input() {
        assert!(matches!(
            WadPatch::from_bytes("P", &[1, 0, 1]),
            Err(WadError::Format { .. })
        ));

        let bytes = encode_patch(2, 4, 0, 0, &[vec![(0, vec![1, 2, 3])], vec![(0, vec![4])]]);
        // Column table intact, column data cut
        for cut in [10, 14, 18, bytes.len() - 1] {
            assert!(
                matches!(
                    WadPatch::from_bytes("P", &bytes[..cut]),
                    Err(WadError::Format { .. })
                ),
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn negative_size_rejected() {
        let mut bytes = encode_patch(1, 1, 0, 0, &[vec![]]);
        bytes[2..4].copy_from_slice(&(-1i16).to_le_bytes());
        assert!(WadPatch::from_bytes("P", &bytes).is_err());
    }
}
