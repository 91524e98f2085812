//! A small 2D game-presentation framework.
//!
//! The asset subsystem scans an asset folder, classifies every file into a
//! typed resource and decodes the bulk of them on a background thread while
//! the game polls for progress.

pub mod core;
pub mod engine;

pub use engine::assets::{AssetError, AssetManager};
pub use engine::settings::Settings;
