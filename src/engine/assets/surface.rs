// Decoded image handles with shared pixel storage

use super::AssetError;
use crate::core::Rect;
use image::{DynamicImage, GenericImageView, Rgba};
use std::path::Path;
use std::sync::Arc;

/// A CPU-resident decoded image, or a rectangular view into one
///
/// Cloning a surface and taking sub-surfaces never copies pixels: every view
/// shares the parent's storage and only remembers which region it covers.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: Arc<DynamicImage>,
    region: Rect,
}

impl Surface {
    /// Wrap a decoded image; the surface covers the whole image
    pub fn from_image(image: DynamicImage) -> Self {
        let region = Rect::new(0, 0, image.width(), image.height());
        Self {
            pixels: Arc::new(image),
            region,
        }
    }

    /// Decode an image file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(image))
    }

    pub fn width(&self) -> u32 {
        self.region.width
    }

    pub fn height(&self) -> u32 {
        self.region.height
    }

    /// Region of the backing image this surface covers
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Whether the pixel format carries an alpha channel
    pub fn has_alpha(&self) -> bool {
        self.pixels.color().has_alpha()
    }

    /// Check whether two surfaces read from the same pixel storage
    pub fn shares_pixels_with(&self, other: &Surface) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Read a pixel in surface-local coordinates
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x >= self.region.width || y >= self.region.height {
            return None;
        }
        Some(self.pixels.get_pixel(self.region.x + x, self.region.y + y))
    }

    /// Copy the covered pixels out into a standalone image
    pub fn to_image(&self) -> DynamicImage {
        let full = Rect::new(0, 0, self.pixels.width(), self.pixels.height());
        if self.region == full {
            return (*self.pixels).clone();
        }
        self.pixels.crop_imm(
            self.region.x,
            self.region.y,
            self.region.width,
            self.region.height,
        )
    }

    /// Convert to a per-pixel alpha format
    pub fn convert_alpha(&self) -> Surface {
        Surface::from_image(DynamicImage::ImageRgba8(self.to_image().to_rgba8()))
    }

    /// Convert to an opaque format, dropping any alpha channel
    pub fn convert_opaque(&self) -> Surface {
        Surface::from_image(DynamicImage::ImageRgb8(self.to_image().to_rgb8()))
    }

    /// Apply the alpha/opaque conversion selected by an asset descriptor
    pub fn converted(&self, alpha: bool) -> Surface {
        if alpha {
            self.convert_alpha()
        } else {
            self.convert_opaque()
        }
    }

    /// Create a view of `rect` (surface-local) sharing this surface's pixels
    pub fn sub_surface(&self, rect: Rect) -> Result<Surface, AssetError> {
        if !rect.fits_within(self.region.width, self.region.height) {
            return Err(AssetError::InvalidRegion {
                rect,
                width: self.region.width,
                height: self.region.height,
            });
        }

        Ok(Surface {
            pixels: Arc::clone(&self.pixels),
            region: rect.offset_by(&self.region),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn checker(width: u32, height: u32) -> Surface {
        let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        Surface::from_image(DynamicImage::ImageRgba8(img))
    }

    #[test]
    fn test_sub_surface_shares_pixels() {
        let surface = checker(16, 8);
        let view = surface.sub_surface(Rect::new(4, 2, 8, 4)).unwrap();

        assert_eq!(view.width(), 8);
        assert_eq!(view.height(), 4);
        assert!(view.shares_pixels_with(&surface));
        assert_eq!(view.pixel(0, 0), Some(Rgba([4, 2, 0, 255])));
        assert_eq!(view.pixel(8, 0), None);
    }

    #[test]
    fn test_nested_sub_surface_offsets() {
        let surface = checker(16, 16);
        let outer = surface.sub_surface(Rect::new(4, 4, 8, 8)).unwrap();
        let inner = outer.sub_surface(Rect::new(2, 3, 2, 2)).unwrap();

        assert_eq!(inner.region(), Rect::new(6, 7, 2, 2));
        assert_eq!(inner.pixel(1, 1), Some(Rgba([7, 8, 0, 255])));
    }

    #[test]
    fn test_sub_surface_out_of_bounds() {
        let surface = checker(16, 8);
        let result = surface.sub_surface(Rect::new(10, 0, 8, 8));
        assert!(matches!(result, Err(AssetError::InvalidRegion { .. })));
    }

    #[test]
    fn test_conversions() {
        let surface = checker(4, 4);
        let opaque = surface.convert_opaque();
        assert!(!opaque.has_alpha());
        assert!(!opaque.shares_pixels_with(&surface));

        let alpha = opaque.convert_alpha();
        assert!(alpha.has_alpha());
        assert_eq!(alpha.width(), 4);
    }

    #[test]
    fn test_to_image_crops_view() {
        let surface = checker(8, 8);
        let view = surface.sub_surface(Rect::new(2, 2, 3, 5)).unwrap();
        let image = view.to_image();
        assert_eq!(image.dimensions(), (3, 5));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Surface::load("/nonexistent/sprite.png");
        assert!(matches!(result, Err(AssetError::Io(_))));
    }
}
