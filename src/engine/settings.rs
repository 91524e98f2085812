// Game and engine settings, persisted as JSON

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Configuration for both the game and the engine
///
/// Window options take effect when the window is (re)created; the asset
/// folder and preload list are read when asset loading starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    title: String,
    fullscreen: bool,
    resizable: bool,
    /// Virtual (buffer) resolution the game renders at
    #[serde(rename = "size")]
    game_size: (u32, u32),
    fps: u32,
    #[serde(rename = "assets")]
    asset_folder: PathBuf,
    preload: Vec<PathBuf>,
    /// Free-form game-specific values
    custom: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Made with League 2".to_string(),
            fullscreen: false,
            resizable: true,
            game_size: (640, 480),
            fps: 40,
            asset_folder: PathBuf::from("../assets"),
            preload: Vec::new(),
            custom: Map::new(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings in '{}'", path.display()))
    }

    /// Save settings to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write settings to '{}'", path.display()))
    }

    /// Load settings, creating the file with defaults if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            return Self::load(path);
        }

        info!("No settings at '{}', writing defaults", path.display());
        let settings = Self::default();
        settings.save(path)?;
        Ok(settings)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    pub fn game_size(&self) -> (u32, u32) {
        self.game_size
    }

    pub fn set_game_size(&mut self, width: u32, height: u32) {
        self.game_size = (width, height);
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
    }

    pub fn asset_folder(&self) -> &Path {
        &self.asset_folder
    }

    pub fn set_asset_folder<P: AsRef<Path>>(&mut self, folder: P) {
        self.asset_folder = folder.as_ref().to_path_buf();
    }

    /// Files loaded before the background loader starts
    pub fn preload(&self) -> &[PathBuf] {
        &self.preload
    }

    pub fn set_preload(&mut self, preload: Vec<PathBuf>) {
        self.preload = preload;
    }

    pub fn custom(&self, key: &str) -> Option<&Value> {
        self.custom.get(key)
    }

    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.custom.insert(key.into(), value.into());
    }
}
