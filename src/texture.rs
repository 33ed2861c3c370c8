//! CPU-side textures, uploaded to the GPU on first use.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// The sampling filter for minification and magnification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterMethod {
    /// Nearest texel.
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
}

/// How to deal with texture coordinates outside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Tile the texture.
    #[default]
    Repeat,
    /// Stretch the edge texels.
    Clamp,
}

/// How a texture is sampled on the GPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sampler {
    pub filter: FilterMethod,
    pub wrap_u: WrapMode,
    pub wrap_v: WrapMode,
}

/// An image to be mapped onto mesh surfaces or the viewport background.
///
/// Pixel data is shared: cloning a `Texture` is cheap, and two clones
/// compare equal. Textures with identical but separately allocated pixels
/// compare unequal, which is what the renderer's upload cache keys on.
#[derive(Clone)]
pub struct Texture {
    pixels: Arc<[u8]>,
    width: u32,
    height: u32,
    /// Sampling parameters.
    pub sampler: Sampler,
}

impl Texture {
    /// Wraps tightly packed RGBA8 pixel data, row-major from the top-left.
    ///
    /// Fails with [`Error::TextureSize`] if `pixels` is not exactly
    /// `width * height * 4` bytes.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::TextureSize(expected, pixels.len()));
        }
        Ok(Texture {
            pixels: pixels.into(),
            width,
            height,
            sampler: Sampler::default(),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixel data, 4 bytes per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Identity of the shared pixel allocation, stable across clones.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.pixels) as *const u8 as usize
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Texture) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels) && self.sampler == other.sampler
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("sampler", &self.sampler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_pixel_length() {
        let result = Texture::new(vec![0; 10], 2, 2);
        assert!(matches!(result, Err(Error::TextureSize(16, 10))));
    }

    #[test]
    fn clones_share_identity() {
        let a = Texture::new(vec![0xFF; 16], 2, 2).unwrap();
        let b = a.clone();
        let c = Texture::new(vec![0xFF; 16], 2, 2).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
        assert_ne!(a, c);
        assert_ne!(a.id(), c.id());
    }
}
