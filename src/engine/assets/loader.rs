// Asset discovery and decoding

use super::{AssetDescriptor, AssetError, DescriptorResolver, Font, SpriteSheet, Surface, TileSheet};
use log::debug;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// A fully decoded asset, ready to be stored in its cache
#[derive(Debug)]
pub enum LoadedAsset {
    Surface(Surface),
    TileSheet(TileSheet),
    SpriteSheet(SpriteSheet),
    Font(Font),
}

/// Finds asset files under a root directory and decodes them
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
    resolver: Arc<DescriptorResolver>,
}

impl AssetLoader {
    /// Create a new asset loader rooted at `root` with the default extension table
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_resolver(root, DescriptorResolver::default())
    }

    pub fn with_resolver<P: AsRef<Path>>(root: P, resolver: DescriptorResolver) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            resolver: Arc::new(resolver),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_root<P: AsRef<Path>>(&mut self, root: P) {
        self.root = root.as_ref().to_path_buf();
    }

    pub fn resolver(&self) -> &DescriptorResolver {
        &self.resolver
    }

    /// Full path for an asset given either absolutely or relative to the root
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Key used to recognise a file that has already been loaded
    pub fn identity(&self, path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    /// Cache key for a file: root-relative, extension stripped, `/`-separated
    pub fn logical_name(&self, path: &Path) -> String {
        logical_name(&self.root, path)
    }

    /// Recursively list every supported file under the root
    pub fn scan(&self) -> Result<Vec<PathBuf>, AssetError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root) {
            // Filesystem loops surface as `ErrorKind::Other`
            let entry = entry.map_err(std::io::Error::from)?;

            if entry.file_type().is_file() && self.resolver.is_supported(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Resolve the descriptor for `path` and decode the asset it describes
    pub fn load(&self, path: &Path) -> Result<LoadedAsset, AssetError> {
        let descriptor = self.resolver.resolve(path)?;
        debug!("Loading {} as {}", path.display(), descriptor.kind());

        let asset = match descriptor {
            AssetDescriptor::Sprite { alpha } => {
                LoadedAsset::Surface(Surface::load(path)?.converted(alpha))
            }
            AssetDescriptor::TileSheet {
                alpha,
                rows,
                columns,
            } => {
                let surface = Surface::load(path)?.converted(alpha);
                LoadedAsset::TileSheet(TileSheet::new(surface, rows, columns)?)
            }
            AssetDescriptor::SpriteSheet { alpha, sprites } => {
                let sheet = SpriteSheet::new(Surface::load(path)?.converted(alpha));
                for (name, rect) in sprites {
                    sheet.add_sprite(name, rect)?;
                }
                LoadedAsset::SpriteSheet(sheet)
            }
            AssetDescriptor::Font { size } => LoadedAsset::Font(Font::load(path, size)?),
        };

        Ok(asset)
    }
}

/// Derive the logical asset name of `path` relative to `root`
///
/// Paths outside `root` keep all their components.
pub fn logical_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let stem = relative.with_extension("");

    let parts: Vec<String> = stem
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    parts.join("/").replace('\\', "/")
}
