// Asset management system
//
// Scans an asset folder, classifies each file into a typed resource (plain
// image, tile sheet, sprite sheet or font) from its extension or a sidecar
// descriptor, and decodes everything on a background thread while the game
// polls for progress.

mod descriptor;
mod font;
mod loader;
mod manager;
mod sprite_sheet;
mod surface;
mod tile_sheet;

pub use descriptor::{
    AssetDescriptor, AssetKind, DescriptorResolver, DEFAULT_FONT_SIZE, SIDECAR_EXTENSION,
};
pub use font::Font;
pub use loader::{logical_name, AssetLoader, LoadedAsset};
pub use manager::{AssetManager, AssetStats, LoadFailure, LoadState, DEFAULT_SETTLE_DELAY};
pub use sprite_sheet::SpriteSheet;
pub use surface::Surface;
pub use tile_sheet::TileSheet;

use crate::core::Rect;
use std::path::PathBuf;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Assets are already being loaded")]
    AlreadyLoading,

    #[error("Unsupported asset type: {0}")]
    UnsupportedAssetType(String),

    #[error("Invalid tile sheet dimensions: {rows} rows x {columns} columns")]
    InvalidDimensions { rows: u32, columns: u32 },

    #[error("Tile ({row}, {column}) is outside a {rows}x{columns} grid")]
    IndexOutOfRange {
        row: u32,
        column: u32,
        rows: u32,
        columns: u32,
    },

    #[error("Region {rect:?} does not fit inside a {width}x{height} image")]
    InvalidRegion { rect: Rect, width: u32, height: u32 },

    #[error("Invalid descriptor {}: {reason}", path.display())]
    InvalidDescriptor { path: PathBuf, reason: String },

    #[error("Failed to parse descriptor {}: {source}", path.display())]
    Sidecar {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to parse font {}: {source}", path.display())]
    Font {
        path: PathBuf,
        source: ab_glyph::InvalidFont,
    },

    #[error("Loading {} panicked: {message}", path.display())]
    Panicked { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("sprites/player".to_string());
        assert_eq!(err.to_string(), "Asset not found: sprites/player");
    }

    #[test]
    fn test_index_error_display() {
        let err = AssetError::IndexOutOfRange {
            row: 3,
            column: 0,
            rows: 2,
            columns: 4,
        };
        assert_eq!(err.to_string(), "Tile (3, 0) is outside a 2x4 grid");
    }
}
