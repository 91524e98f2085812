use anyhow::{Context, Result};
use league::engine::assets::AssetManager;
use league::Settings;
use log::{info, warn};
use std::time::Duration;

/// Frame interval used while polling the loader
const FRAME_TIME: Duration = Duration::from_millis(25);

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".to_string());
    let settings = Settings::load_or_create(&settings_path)?;

    info!("Starting {}...", settings.title());

    let mut assets = AssetManager::from_settings(&settings);
    assets
        .start_with_settings(&settings)
        .with_context(|| format!("Failed to start loading from {}", settings.asset_folder().display()))?;

    // Stand-in for a loading screen: poll once per frame
    let mut last_reported = -1;
    while !assets.is_finished() {
        let percent = (assets.progress() * 100.0) as i32;
        if percent / 10 != last_reported / 10 {
            info!("Loading assets: {}%", percent);
            last_reported = percent;
        }
        std::thread::sleep(FRAME_TIME);
    }

    let stats = assets.stats();
    info!(
        "Loaded {} surfaces, {} tile sheets, {} sprite sheets, {} fonts",
        stats.surface_count, stats.tile_sheet_count, stats.sprite_sheet_count, stats.font_count
    );

    for failure in assets.errors() {
        warn!("{}: {}", failure.path.display(), failure.error);
    }

    Ok(())
}
