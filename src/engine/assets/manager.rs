// Central asset management system

use super::{
    AssetError, AssetLoader, DescriptorResolver, Font, LoadedAsset, SpriteSheet, Surface,
    TileSheet,
};
use crate::core::math::clamp;
use crate::engine::settings::Settings;
use log::{debug, info, warn};
use parking_lot::{Condvar, Mutex, RwLock};
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Pause before the background loader starts decoding.
///
/// A display-mode switch issued right after `start` can invalidate decode
/// state, so the worker gives it time to settle.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Where an [`AssetManager`] is in its loading lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load has been started
    Idle,
    /// Scanning the root and decoding the preload set on the caller's thread
    Preloading,
    /// The background worker is decoding the remaining files
    Loading,
    /// The background worker has drained its file list
    Finished,
}

impl LoadState {
    fn is_busy(&self) -> bool {
        matches!(self, LoadState::Preloading | LoadState::Loading)
    }
}

/// An asset that failed to load on the background worker
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: Arc<AssetError>,
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub surface_count: usize,
    pub tile_sheet_count: usize,
    pub sprite_sheet_count: usize,
    pub font_count: usize,
}

#[derive(Default)]
struct AssetCaches {
    surfaces: HashMap<String, Arc<Surface>>,
    tile_sheets: HashMap<String, Arc<TileSheet>>,
    sprite_sheets: HashMap<String, Arc<SpriteSheet>>,
    fonts: HashMap<String, Arc<Font>>,
}

impl AssetCaches {
    fn insert(&mut self, name: String, asset: LoadedAsset) {
        match asset {
            LoadedAsset::Surface(surface) => {
                self.surfaces.insert(name, Arc::new(surface));
            }
            LoadedAsset::TileSheet(sheet) => {
                self.tile_sheets.insert(name, Arc::new(sheet));
            }
            LoadedAsset::SpriteSheet(sheet) => {
                self.sprite_sheets.insert(name, Arc::new(sheet));
            }
            LoadedAsset::Font(font) => {
                self.fonts.insert(name, Arc::new(font));
            }
        }
    }
}

struct Progress {
    state: LoadState,
    loaded: usize,
    total: usize,
}

/// State written by the background worker and read by the owning thread
struct Shared {
    progress: Mutex<Progress>,
    finished: Condvar,
    caches: RwLock<AssetCaches>,
    loaded_files: Mutex<HashSet<PathBuf>>,
    errors: Mutex<Vec<LoadFailure>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            progress: Mutex::new(Progress {
                state: LoadState::Idle,
                loaded: 0,
                total: 0,
            }),
            finished: Condvar::new(),
            caches: RwLock::new(AssetCaches::default()),
            loaded_files: Mutex::new(HashSet::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    fn is_loaded(&self, loader: &AssetLoader, path: &Path) -> bool {
        self.loaded_files.lock().contains(&loader.identity(path))
    }

    /// Decode one file into its cache; returns `false` if it was already loaded
    ///
    /// The asset is fully decoded before the cache lock is taken, so lookups
    /// never observe a partially built asset.
    fn load_file(&self, loader: &AssetLoader, path: &Path) -> Result<bool, AssetError> {
        let identity = loader.identity(path);
        if self.loaded_files.lock().contains(&identity) {
            return Ok(false);
        }

        let name = loader.logical_name(path);
        let asset = loader.load(path)?;
        self.caches.write().insert(name, asset);
        self.loaded_files.lock().insert(identity);

        Ok(true)
    }
}

/// Central asset manager for the game
///
/// Handles discovery, preloading and background loading of all game assets.
/// Game code polls [`is_finished`](Self::is_finished) and
/// [`progress`](Self::progress) each frame and looks assets up by logical name.
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// State shared with the background worker
    shared: Arc<Shared>,

    /// Delay before the worker starts decoding
    settle_delay: Duration,

    /// Handle of the most recent background worker
    worker: Option<JoinHandle<()>>,
}

impl AssetManager {
    /// Create a new asset manager bound to `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            loader: AssetLoader::new(root),
            shared: Arc::new(Shared::new()),
            settle_delay: DEFAULT_SETTLE_DELAY,
            worker: None,
        }
    }

    /// Create an asset manager bound to the configured asset folder
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.asset_folder())
    }

    /// Replace the worker's settling delay
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Replace the extension table used to find and classify files
    pub fn with_resolver(mut self, resolver: DescriptorResolver) -> Self {
        self.loader = AssetLoader::with_resolver(self.loader.root(), resolver);
        self
    }

    pub fn root(&self) -> &Path {
        self.loader.root()
    }

    /// Change the root directory; rejected while a load is in progress
    pub fn set_root<P: AsRef<Path>>(&mut self, root: P) -> Result<(), AssetError> {
        if self.state().is_busy() {
            return Err(AssetError::AlreadyLoading);
        }
        self.loader.set_root(root);
        Ok(())
    }

    /// Scan the root, load `preload` synchronously, then load everything else
    /// on a background thread
    ///
    /// Preload paths may be absolute or relative to the root. Files that were
    /// loaded by an earlier `start` are not decoded again.
    pub fn start<P: AsRef<Path>>(
        &mut self,
        preload: &[P],
        root: Option<&Path>,
    ) -> Result<(), AssetError> {
        let previous = {
            let mut progress = self.shared.progress.lock();
            if progress.state.is_busy() {
                return Err(AssetError::AlreadyLoading);
            }
            let previous = progress.state;
            progress.state = LoadState::Preloading;
            progress.loaded = 0;
            progress.total = 0;
            previous
        };

        // The previous worker has already published `Finished`
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Previous asset loader thread panicked");
            }
        }

        if let Some(root) = root {
            self.loader.set_root(root);
        }

        match self.preload(preload).and_then(|pending| self.spawn_worker(pending)) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.shared.progress.lock().state = previous;
                Err(e)
            }
        }
    }

    /// Start using the asset folder and preload list from `settings`
    pub fn start_with_settings(&mut self, settings: &Settings) -> Result<(), AssetError> {
        self.start(settings.preload(), Some(settings.asset_folder()))
    }

    /// Scan and synchronously load the preload set; returns the files left for
    /// the background worker
    fn preload<P: AsRef<Path>>(&self, preload: &[P]) -> Result<Vec<PathBuf>, AssetError> {
        info!("Scanning assets in {}", self.loader.root().display());
        let discovered = self.loader.scan()?;

        for path in preload {
            let path = self.loader.resolve_path(path);
            if self.shared.load_file(&self.loader, &path)? {
                debug!("Preloaded {}", self.loader.logical_name(&path));
            }
        }

        let pending: Vec<PathBuf> = discovered
            .into_iter()
            .filter(|path| !self.shared.is_loaded(&self.loader, path))
            .collect();

        info!(
            "Preloaded {} assets, {} left for background loading",
            preload.len(),
            pending.len()
        );

        Ok(pending)
    }

    fn spawn_worker(&mut self, pending: Vec<PathBuf>) -> Result<(), AssetError> {
        {
            let mut progress = self.shared.progress.lock();
            progress.state = LoadState::Loading;
            progress.total = pending.len();
        }

        let loader = self.loader.clone();
        let shared = Arc::clone(&self.shared);
        let settle_delay = self.settle_delay;

        let worker = thread::Builder::new()
            .name("asset-loader".to_string())
            .spawn(move || {
                load_in_background(&shared, pending, settle_delay, |path| {
                    shared.load_file(&loader, path)
                })
            })?;
        self.worker = Some(worker);

        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoadState {
        self.shared.progress.lock().state
    }

    /// Whether no load is in progress
    pub fn is_finished(&self) -> bool {
        !self.state().is_busy()
    }

    /// Fraction of background files processed, in `[0, 1]`
    ///
    /// A background phase with nothing to load reports `1.0`.
    pub fn progress(&self) -> f32 {
        let progress = self.shared.progress.lock();
        if progress.total == 0 {
            return 1.0;
        }
        clamp(progress.loaded as f32 / progress.total as f32, 0.0, 1.0)
    }

    /// Block until the background worker has finished
    pub fn wait(&self) {
        let mut progress = self.shared.progress.lock();
        while progress.state.is_busy() {
            self.shared.finished.wait(&mut progress);
        }
    }

    /// Block until the background worker has finished or `timeout` elapses;
    /// returns whether loading finished
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut progress = self.shared.progress.lock();
        while progress.state.is_busy() {
            if self
                .shared
                .finished
                .wait_until(&mut progress, deadline)
                .timed_out()
            {
                return !progress.state.is_busy();
            }
        }
        true
    }

    /// Get a plain image by logical name
    pub fn surface(&self, name: &str) -> Result<Arc<Surface>, AssetError> {
        lookup(&self.shared.caches.read().surfaces, name)
    }

    /// Get a tile sheet by logical name
    pub fn tile_sheet(&self, name: &str) -> Result<Arc<TileSheet>, AssetError> {
        lookup(&self.shared.caches.read().tile_sheets, name)
    }

    /// Get a sprite sheet by logical name
    pub fn sprite_sheet(&self, name: &str) -> Result<Arc<SpriteSheet>, AssetError> {
        lookup(&self.shared.caches.read().sprite_sheets, name)
    }

    /// Get a font by logical name
    pub fn font(&self, name: &str) -> Result<Arc<Font>, AssetError> {
        lookup(&self.shared.caches.read().fonts, name)
    }

    /// Failures recorded by background workers so far
    pub fn errors(&self) -> Vec<LoadFailure> {
        self.shared.errors.lock().clone()
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        let caches = self.shared.caches.read();
        AssetStats {
            surface_count: caches.surfaces.len(),
            tile_sheet_count: caches.tile_sheets.len(),
            sprite_sheet_count: caches.sprite_sheets.len(),
            font_count: caches.fonts.len(),
        }
    }

    /// Get the asset loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

fn lookup<T>(cache: &HashMap<String, Arc<T>>, name: &str) -> Result<Arc<T>, AssetError> {
    cache
        .get(name)
        .cloned()
        .ok_or_else(|| AssetError::NotFound(name.to_string()))
}

/// Publishes `Finished` when the worker exits, including by unwinding
struct FinishGuard<'a>(&'a Shared);

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        let mut progress = self.0.progress.lock();
        progress.state = LoadState::Finished;
        self.0.finished.notify_all();
        info!("Background loading finished ({} files)", progress.total);
    }
}

/// Background worker body: run `load` on each pending file, one at a time
///
/// A panicking load is recorded as a failure for that file only.
fn load_in_background<F>(shared: &Shared, pending: Vec<PathBuf>, settle_delay: Duration, load: F)
where
    F: Fn(&Path) -> Result<bool, AssetError>,
{
    let _finish = FinishGuard(shared);

    if !settle_delay.is_zero() {
        thread::sleep(settle_delay);
    }

    for path in pending {
        let result = panic::catch_unwind(AssertUnwindSafe(|| load(&path)))
            .unwrap_or_else(|payload| {
                Err(AssetError::Panicked {
                    path: path.clone(),
                    message: panic_message(payload.as_ref()),
                })
            });

        if let Err(error) = result {
            warn!("Failed to load {}: {}", path.display(), error);
            shared.errors.lock().push(LoadFailure {
                path,
                error: Arc::new(error),
            });
        }
        shared.progress.lock().loaded += 1;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const NO_PRELOAD: [&str; 0] = [];
    const TIMEOUT: Duration = Duration::from_secs(10);

    fn write_png(root: &Path, relative: &str, width: u32, height: u32) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn asset_dir() -> TempDir {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "sprites/player.png", 16, 16);
        write_png(dir.path(), "sprites/ui.png", 8, 8);
        write_png(dir.path(), "tiles/grass.png", 64, 32);
        fs::write(
            dir.path().join("tiles/grass.json"),
            r#"{"type":"tilesheet","rows":2,"columns":4,"alpha":false}"#,
        )
        .unwrap();
        write_png(dir.path(), "hero.png", 32, 16);
        fs::write(
            dir.path().join("hero.json"),
            r#"{"type":"spritesheet","sprites":{"idle":[0,0,16,16],"run":[16,0,16,16]}}"#,
        )
        .unwrap();
        dir
    }

    fn manager(root: &Path) -> AssetManager {
        AssetManager::new(root).with_settle_delay(Duration::ZERO)
    }

    #[test]
    fn test_idle_manager() {
        let manager = AssetManager::new("/nonexistent");
        assert_eq!(manager.state(), LoadState::Idle);
        assert!(manager.is_finished());
        assert_relative_eq!(manager.progress(), 1.0);
        assert!(manager.wait_timeout(Duration::ZERO));
    }

    #[test]
    fn test_background_load_everything() {
        let dir = asset_dir();
        let mut manager = manager(dir.path());

        manager.start(&NO_PRELOAD, None).unwrap();
        assert!(manager.wait_timeout(TIMEOUT));

        assert_eq!(manager.state(), LoadState::Finished);
        assert_relative_eq!(manager.progress(), 1.0);
        assert!(manager.surface("sprites/player").is_ok());
        assert!(manager.surface("sprites/ui").is_ok());
        assert!(manager.tile_sheet("tiles/grass").is_ok());
        assert!(manager.sprite_sheet("hero").is_ok());
        assert!(manager.errors().is_empty());
        assert_eq!(
            manager.stats(),
            AssetStats {
                surface_count: 2,
                tile_sheet_count: 1,
                sprite_sheet_count: 1,
                font_count: 0,
            }
        );
    }

    #[test]
    fn test_sidecar_changes_classification() {
        let dir = asset_dir();
        let mut manager = manager(dir.path());

        manager.start(&NO_PRELOAD, None).unwrap();
        manager.wait();

        assert!(matches!(
            manager.surface("tiles/grass"),
            Err(AssetError::NotFound(_))
        ));
        let sheet = manager.tile_sheet("tiles/grass").unwrap();
        assert_eq!(sheet.max_rows(), 2);
        assert_eq!(sheet.max_columns(), 4);
        assert!(!sheet.surface().has_alpha());

        let hero = manager.sprite_sheet("hero").unwrap();
        assert_eq!(hero.sprite("run").unwrap().width(), 16);
    }

    #[test]
    fn test_preload_visible_before_background_finishes() {
        let dir = asset_dir();
        let mut manager =
            AssetManager::new(dir.path()).with_settle_delay(Duration::from_secs(2));

        manager.start(&["sprites/ui.png"], None).unwrap();

        assert!(!manager.is_finished());
        assert_eq!(manager.state(), LoadState::Loading);
        assert!(manager.surface("sprites/ui").is_ok());
        assert!(matches!(
            manager.surface("sprites/player"),
            Err(AssetError::NotFound(_))
        ));

        assert!(manager.wait_timeout(TIMEOUT));
        assert!(manager.surface("sprites/player").is_ok());
    }

    #[test]
    fn test_preloaded_files_are_not_reloaded() {
        let dir = asset_dir();
        let mut manager = manager(dir.path());
        let absolute = dir.path().join("sprites/ui.png");

        manager.start(&[absolute], None).unwrap();
        let preloaded = manager.surface("sprites/ui").unwrap();
        manager.wait();

        assert!(Arc::ptr_eq(&preloaded, &manager.surface("sprites/ui").unwrap()));
        assert_relative_eq!(manager.progress(), 1.0);
    }

    #[test]
    fn test_second_start_while_loading() {
        let dir = asset_dir();
        let mut manager =
            AssetManager::new(dir.path()).with_settle_delay(Duration::from_secs(2));

        manager.start(&NO_PRELOAD, None).unwrap();
        assert!(matches!(
            manager.start(&NO_PRELOAD, None),
            Err(AssetError::AlreadyLoading)
        ));
        assert!(matches!(
            manager.set_root("/somewhere/else"),
            Err(AssetError::AlreadyLoading)
        ));

        assert!(manager.wait_timeout(TIMEOUT));
        assert_eq!(manager.root(), dir.path());
    }

    #[test]
    fn test_empty_root_progress() {
        let dir = tempdir().unwrap();
        let mut manager = manager(dir.path());

        manager.start(&NO_PRELOAD, None).unwrap();
        assert_relative_eq!(manager.progress(), 1.0);
        assert!(manager.wait_timeout(TIMEOUT));
        assert_relative_eq!(manager.progress(), 1.0);
    }

    #[test]
    fn test_background_failure_is_isolated() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "good.png", 4, 4);
        fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
        fs::write(dir.path().join("font.ttf"), b"not a font").unwrap();

        let mut manager = manager(dir.path());
        manager.start(&NO_PRELOAD, None).unwrap();
        assert!(manager.wait_timeout(TIMEOUT));

        assert_relative_eq!(manager.progress(), 1.0);
        assert!(manager.surface("good").is_ok());
        assert!(matches!(manager.surface("broken"), Err(AssetError::NotFound(_))));
        assert!(matches!(manager.font("font"), Err(AssetError::NotFound(_))));

        let errors = manager.errors();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|f| matches!(*f.error, AssetError::Decode { .. })));
        assert!(errors
            .iter()
            .any(|f| matches!(*f.error, AssetError::Font { .. })));
    }

    #[test]
    fn test_preload_failure_propagates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
        write_png(dir.path(), "good.png", 4, 4);

        let mut manager = manager(dir.path());
        let result = manager.start(&["broken.png"], None);

        assert!(matches!(result, Err(AssetError::Decode { .. })));
        assert_eq!(manager.state(), LoadState::Idle);

        manager.start(&NO_PRELOAD, None).unwrap();
        manager.wait();
        assert!(manager.surface("good").is_ok());
        assert_eq!(manager.errors().len(), 1);
    }

    #[test]
    fn test_rescan_extends_caches() {
        let dir = asset_dir();
        let mut manager = manager(dir.path());

        manager.start(&NO_PRELOAD, None).unwrap();
        manager.wait();
        let player = manager.surface("sprites/player").unwrap();

        write_png(dir.path(), "sprites/enemy.png", 16, 16);
        manager.start(&NO_PRELOAD, None).unwrap();
        manager.wait();

        assert!(manager.surface("sprites/enemy").is_ok());
        assert!(Arc::ptr_eq(&player, &manager.surface("sprites/player").unwrap()));
        assert_eq!(manager.stats().surface_count, 3);
    }

    #[test]
    fn test_root_override() {
        let first = asset_dir();
        let second = tempdir().unwrap();
        write_png(second.path(), "other.png", 4, 4);

        let mut manager = manager(first.path());
        manager.start(&NO_PRELOAD, Some(second.path())).unwrap();
        manager.wait();

        assert_eq!(manager.root(), second.path());
        assert!(manager.surface("other").is_ok());
        assert!(manager.surface("sprites/player").is_err());
    }

    #[test]
    fn test_start_with_settings() {
        let dir = asset_dir();
        let mut settings = Settings::default();
        settings.set_asset_folder(dir.path());
        settings.set_preload(vec![PathBuf::from("hero.png")]);

        let mut manager = AssetManager::from_settings(&settings).with_settle_delay(Duration::ZERO);
        manager.start_with_settings(&settings).unwrap();

        assert!(manager.sprite_sheet("hero").is_ok());
        manager.wait();
        assert!(manager.tile_sheet("tiles/grass").is_ok());
    }

    fn font_fixture() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf")
    }

    #[test]
    fn test_every_supported_extension_loads() {
        let dir = tempdir().unwrap();
        let rgb = RgbImage::from_pixel(8, 4, Rgb([200, 100, 50]));
        fs::create_dir_all(dir.path().join("photos")).unwrap();
        rgb.save(dir.path().join("photos/beach.jpg")).unwrap();
        rgb.save(dir.path().join("legacy.bmp")).unwrap();
        write_png(dir.path(), "icon.png", 4, 4);
        fs::create_dir_all(dir.path().join("fonts")).unwrap();
        fs::copy(font_fixture(), dir.path().join("fonts/mono.ttf")).unwrap();
        fs::copy(font_fixture(), dir.path().join("fonts/title.ttf")).unwrap();
        fs::write(
            dir.path().join("fonts/title.json"),
            r#"{"type":"font","size":24}"#,
        )
        .unwrap();

        let mut manager = manager(dir.path());
        manager.start(&NO_PRELOAD, None).unwrap();
        assert!(manager.wait_timeout(TIMEOUT));
        assert!(manager.errors().is_empty(), "{:?}", manager.errors());

        let beach = manager.surface("photos/beach").unwrap();
        assert_eq!((beach.width(), beach.height()), (8, 4));
        assert!(manager.surface("legacy").is_ok());
        assert!(manager.surface("icon").is_ok());

        let mono = manager.font("fonts/mono").unwrap();
        assert_eq!(mono.size(), 12);
        assert!(mono.scale().y > 0.0);
        assert_eq!(manager.font("fonts/title").unwrap().size(), 24);
        assert_eq!(manager.stats().font_count, 2);
    }

    #[test]
    fn test_worker_survives_panicking_load() {
        let shared = Arc::new(Shared::new());
        {
            let mut progress = shared.progress.lock();
            progress.state = LoadState::Loading;
            progress.total = 3;
        }

        let pending = vec![
            PathBuf::from("a.png"),
            PathBuf::from("cursed.png"),
            PathBuf::from("c.png"),
        ];
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || {
            load_in_background(&worker_shared, pending, Duration::ZERO, |path| {
                if path.ends_with("cursed.png") {
                    panic!("decoder blew up");
                }
                Ok(true)
            })
        });

        let manager = AssetManager {
            loader: AssetLoader::new("unused"),
            shared: Arc::clone(&shared),
            settle_delay: Duration::ZERO,
            worker: Some(worker),
        };
        assert!(manager.wait_timeout(TIMEOUT));
        assert!(manager.is_finished());
        assert_relative_eq!(manager.progress(), 1.0);

        let errors = manager.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, PathBuf::from("cursed.png"));
        assert!(matches!(
            &*errors[0].error,
            AssetError::Panicked { message, .. } if message.contains("decoder blew up")
        ));
    }

    #[test]
    fn test_panic_message_payloads() {
        assert_eq!(panic_message(&"static message"), "static message");
        assert_eq!(panic_message(&String::from("owned message")), "owned message");
        assert_eq!(panic_message(&42_u32), "unknown panic");
    }

    #[test]
    fn test_missing_root_fails_fast() {
        let mut manager = manager(Path::new("/nonexistent/assets/root"));
        assert!(manager.start(&NO_PRELOAD, None).is_err());
        assert_eq!(manager.state(), LoadState::Idle);
    }
}
