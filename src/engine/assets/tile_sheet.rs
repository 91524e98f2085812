// Grid-based slicing of a single image

use super::{AssetError, Surface};
use crate::core::Rect;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// An image partitioned into an equal-size grid of tiles
///
/// Tiles are sliced on first access and memoized, so repeated lookups of the
/// same cell return the same `Arc`.
#[derive(Debug)]
pub struct TileSheet {
    surface: Surface,
    rows: u32,
    columns: u32,
    tiles: Mutex<HashMap<(u32, u32), Arc<Surface>>>,
}

impl TileSheet {
    /// Create a tile sheet with `rows` x `columns` cells; both must be at least 1
    pub fn new(surface: Surface, rows: u32, columns: u32) -> Result<Self, AssetError> {
        if rows == 0 || columns == 0 {
            return Err(AssetError::InvalidDimensions { rows, columns });
        }

        Ok(Self {
            surface,
            rows,
            columns,
            tiles: Mutex::new(HashMap::new()),
        })
    }

    pub fn max_rows(&self) -> u32 {
        self.rows
    }

    pub fn max_columns(&self) -> u32 {
        self.columns
    }

    pub fn cell_width(&self) -> u32 {
        self.surface.width() / self.columns
    }

    pub fn cell_height(&self) -> u32 {
        self.surface.height() / self.rows
    }

    /// The whole sheet image
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Get the tile at `(row, column)`
    pub fn tile(&self, row: u32, column: u32) -> Result<Arc<Surface>, AssetError> {
        if row >= self.rows || column >= self.columns {
            return Err(AssetError::IndexOutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }

        let mut tiles = self.tiles.lock();
        if let Some(tile) = tiles.get(&(row, column)) {
            return Ok(Arc::clone(tile));
        }

        let (width, height) = (self.cell_width(), self.cell_height());
        let rect = Rect::new(column * width, row * height, width, height);
        let tile = Arc::new(self.surface.sub_surface(rect)?);
        tiles.insert((row, column), Arc::clone(&tile));

        Ok(tile)
    }

    /// Number of tiles sliced so far
    pub fn cached_tiles(&self) -> usize {
        self.tiles.lock().len()
    }
}
