// Font loading

use super::AssetError;
use ab_glyph::{Font as _, FontArc, PxScale};
use std::fmt;
use std::path::Path;

/// A parsed font bound to a point size
#[derive(Clone)]
pub struct Font {
    font: FontArc,
    size: u32,
}

impl Font {
    /// Parse a font file from disk at the given point size
    pub fn load<P: AsRef<Path>>(path: P, size: u32) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(path, bytes, size)
    }

    /// Parse font data that was already read; `path` is only used for errors
    pub fn from_bytes(path: &Path, bytes: Vec<u8>, size: u32) -> Result<Self, AssetError> {
        if size == 0 {
            return Err(AssetError::InvalidDescriptor {
                path: path.to_path_buf(),
                reason: "font size must be at least 1".to_string(),
            });
        }

        let font = FontArc::try_from_vec(bytes).map_err(|source| AssetError::Font {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { font, size })
    }

    /// Point size this font was loaded at
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Glyph scale for layout at this font's size
    pub fn scale(&self) -> PxScale {
        let scale = self.font.pt_to_px_scale(self.size as f32);
        scale.unwrap_or_else(|| PxScale::from(self.size as f32))
    }

    /// The underlying parsed font
    pub fn inner(&self) -> &FontArc {
        &self.font
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("size", &self.size)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}
