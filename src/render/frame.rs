use crate::foundation::core::Rgba;
use crate::foundation::error::{BackdropError, BackdropResult};
use std::path::Path;

/// A rendered frame as RGBA8 pixels.
///
/// Surfaces produce **premultiplied alpha**; the `premultiplied` flag makes this explicit at
/// API boundaries. Use [`FrameRGBA::flatten_onto`] or [`FrameRGBA::to_straight`] before
/// handing pixels to encoders that expect straight alpha.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Composite over an opaque page color, yielding an opaque straight-alpha frame.
    pub fn flatten_onto(&self, background: Rgba) -> FrameRGBA {
        let src = if self.premultiplied {
            self.clone()
        } else {
            self.to_premultiplied()
        };
        let bg = [background.r, background.g, background.b];
        let mut data = src.data;
        for px in data.chunks_exact_mut(4) {
            let inv = 255 - u16::from(px[3]);
            for c in 0..3 {
                let v = u16::from(px[c]) + (u16::from(bg[c]) * inv + 127) / 255;
                px[c] = v.min(255) as u8;
            }
            px[3] = 255;
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    /// Convert to straight alpha.
    pub fn to_straight(&self) -> FrameRGBA {
        let mut data = self.data.clone();
        if self.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                if a == 0 {
                    px[0] = 0;
                    px[1] = 0;
                    px[2] = 0;
                    continue;
                }
                for c in 0..3 {
                    px[c] = ((u16::from(px[c]) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    fn to_premultiplied(&self) -> FrameRGBA {
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            for c in 0..3 {
                px[c] = ((u16::from(px[c]) * a + 127) / 255) as u8;
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: true,
        }
    }

    /// Write the frame as a PNG, converting to straight alpha if needed.
    pub fn save_png(&self, path: &Path) -> BackdropResult<()> {
        let straight;
        let frame = if self.premultiplied {
            straight = self.to_straight();
            &straight
        } else {
            self
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                BackdropError::Other(anyhow::anyhow!(
                    "create output dir '{}': {e}",
                    parent.display()
                ))
            })?;
        }
        image::save_buffer_with_format(
            path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| {
            BackdropError::Other(anyhow::anyhow!("write png '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
