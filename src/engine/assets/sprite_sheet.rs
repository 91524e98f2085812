// Named-region slicing of a single image

use super::{AssetError, Surface};
use crate::core::Rect;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Regions {
    rects: HashMap<String, Rect>,
    views: HashMap<String, Arc<Surface>>,
}

/// An image partitioned into author-declared, named sprites
///
/// Like [`TileSheet`](super::TileSheet), views are sliced lazily and memoized
/// per name.
#[derive(Debug)]
pub struct SpriteSheet {
    surface: Surface,
    regions: RwLock<Regions>,
}

impl SpriteSheet {
    /// Create a sprite sheet with no sprites registered
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            regions: RwLock::new(Regions::default()),
        }
    }

    /// Register a named region, replacing any previous region of that name
    ///
    /// Rects must lie within the sheet image.
    pub fn add_sprite(&self, name: impl Into<String>, rect: Rect) -> Result<(), AssetError> {
        if !rect.fits_within(self.surface.width(), self.surface.height()) {
            return Err(AssetError::InvalidRegion {
                rect,
                width: self.surface.width(),
                height: self.surface.height(),
            });
        }

        let name = name.into();
        let mut regions = self.regions.write();
        regions.views.remove(&name);
        regions.rects.insert(name, rect);

        Ok(())
    }

    /// Get the view for a registered sprite
    pub fn sprite(&self, name: &str) -> Result<Arc<Surface>, AssetError> {
        if let Some(view) = self.regions.read().views.get(name) {
            return Ok(Arc::clone(view));
        }

        let mut regions = self.regions.write();
        // Another reader may have sliced it between the two locks
        if let Some(view) = regions.views.get(name) {
            return Ok(Arc::clone(view));
        }

        let rect = *regions
            .rects
            .get(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        let view = Arc::new(self.surface.sub_surface(rect)?);
        regions.views.insert(name.to_string(), Arc::clone(&view));

        Ok(view)
    }

    /// Region registered under `name`
    pub fn region(&self, name: &str) -> Option<Rect> {
        self.regions.read().rects.get(name).copied()
    }

    /// Names of all registered sprites, sorted
    pub fn sprite_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.regions.read().rects.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn sprite_count(&self) -> usize {
        self.regions.read().rects.len()
    }

    /// The whole sheet image
    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}
