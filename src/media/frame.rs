use crate::foundation::core::FrameSize;
use crate::foundation::error::{BeeswarmError, BeeswarmResult};

/// One decoded video frame: straight-alpha RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Wrap decoded bytes, checking their length.
    pub fn from_raw(size: FrameSize, data: Vec<u8>) -> BeeswarmResult<Self> {
        if data.len() != size.rgba_len() {
            return Err(BeeswarmError::media(format!(
                "frame byte length {} does not match {}x{} rgba",
                data.len(),
                size.width,
                size.height
            )));
        }
        Ok(Self {
            width: size.width,
            height: size.height,
            data,
        })
    }

    /// Opaque frame filled with one color.
    pub fn solid(size: FrameSize, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(size.rgba_len());
        for _ in 0..(size.width as usize * size.height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width: size.width,
            height: size.height,
            data,
        }
    }

    /// Frame dimensions.
    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(off..off + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
