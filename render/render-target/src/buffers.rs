use wad::WadPalette;

pub const SOFT_PIXEL_CHANNELS: usize = 4;

/// A presentation side buffer of RGBA pixels. Whatever uploads the frame to a
/// window or texture only needs this.
pub trait PixelBuffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn clear(&mut self);
    fn set_pixel(&mut self, x: usize, y: usize, rgba: &[u8; SOFT_PIXEL_CHANNELS]);
    fn read_pixel(&self, x: usize, y: usize) -> [u8; SOFT_PIXEL_CHANNELS];
    fn pitch(&self) -> usize {
        self.width() * SOFT_PIXEL_CHANNELS
    }
}

/// RGBA8, row-major
#[derive(Debug, Clone)]
pub struct SoftFramebuffer {
    width: usize,
    height: usize,
    /// Total length is width * height * CHANNELS
    buffer: Vec<u8>,
}

impl SoftFramebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; width * height * SOFT_PIXEL_CHANNELS],
        }
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Convert a column-major indexed frame through `palette`. The source is
    /// expected to be the same size, any excess on either side is ignored.
    pub fn write_indexed(&mut self, indexed: &[u8], height: usize, palette: &WadPalette) {
        if height == 0 {
            return;
        }
        let rows = height.min(self.height);
        for (x, column) in indexed.chunks_exact(height).take(self.width).enumerate() {
            for (y, &index) in column[..rows].iter().enumerate() {
                let pos = y * self.width * SOFT_PIXEL_CHANNELS + x * SOFT_PIXEL_CHANNELS;
                self.buffer[pos..pos + SOFT_PIXEL_CHANNELS]
                    .copy_from_slice(&palette.0[index as usize]);
            }
        }
    }

    /// FNV-1a over the pixels, used to compare frames in logs and tests
    pub fn checksum(&self) -> u64 {
        self.buffer.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
            (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
        })
    }
}

impl PixelBuffer for SoftFramebuffer {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn clear(&mut self) {
        self.buffer.iter_mut().for_each(|n| *n = 0);
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, rgba: &[u8; SOFT_PIXEL_CHANNELS]) {
        #[cfg(feature = "safety_check")]
        if x >= self.width || y >= self.height {
            log::error!("set_pixel {x},{y} outside {}x{}", self.width, self.height);
            return;
        }
        let pos = y * self.pitch() + x * SOFT_PIXEL_CHANNELS;
        if let Some(px) = self.buffer.get_mut(pos..pos + SOFT_PIXEL_CHANNELS) {
            px.copy_from_slice(rgba);
        }
    }

    /// Read the colour of a single pixel at X|Y, off-screen reads are black
    #[inline]
    fn read_pixel(&self, x: usize, y: usize) -> [u8; SOFT_PIXEL_CHANNELS] {
        let pos = y * self.pitch() + x * SOFT_PIXEL_CHANNELS;
        let mut slice = [0u8; SOFT_PIXEL_CHANNELS];
        if x < self.width {
            if let Some(px) = self.buffer.get(pos..pos + SOFT_PIXEL_CHANNELS) {
                slice.copy_from_slice(px);
            }
        }
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_palette() -> WadPalette {
        let mut p = [[0u8; 4]; 256];
        for (i, c) in p.iter_mut().enumerate() {
            *c = [i as u8, i as u8, i as u8, 255];
        }
        WadPalette(p)
    }

    #[test]
    fn write_read_pixel() {
        let mut pixels = SoftFramebuffer::new(320, 200);

        pixels.set_pixel(10, 10, &[255, 10, 3, 255]);
        pixels.set_pixel(319, 199, &[25, 10, 3, 255]);
        // silently dropped
        pixels.set_pixel(320, 199, &[1, 1, 1, 1]);

        assert_eq!(pixels.read_pixel(10, 10), [255, 10, 3, 255]);
        assert_eq!(pixels.read_pixel(319, 199), [25, 10, 3, 255]);
        assert_eq!(pixels.read_pixel(400, 400), [0, 0, 0, 0]);

        pixels.clear();
        assert_eq!(pixels.read_pixel(10, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn indexed_is_transposed() {
        // 3 wide, 2 high, column-major
        let indexed = [1, 2, 3, 4, 5, 6];
        let mut fb = SoftFramebuffer::new(3, 2);
        fb.write_indexed(&indexed, 2, &grey_palette());
        assert_eq!(fb.read_pixel(0, 0)[0], 1);
        assert_eq!(fb.read_pixel(0, 1)[0], 2);
        assert_eq!(fb.read_pixel(1, 0)[0], 3);
        assert_eq!(fb.read_pixel(2, 1)[0], 6);
        assert_eq!(fb.pitch(), 12);
    }

    #[test]
    fn checksum_tracks_content() {
        let mut a = SoftFramebuffer::new(4, 4);
        let b = SoftFramebuffer::new(4, 4);
        assert_eq!(a.checksum(), b.checksum());
        a.set_pixel(1, 1, &[9, 9, 9, 255]);
        assert_ne!(a.checksum(), b.checksum());
    }
}
