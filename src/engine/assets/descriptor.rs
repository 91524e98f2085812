// Asset descriptors: extension defaults plus optional sidecar overrides

use super::AssetError;
use crate::core::Rect;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Extension used for sidecar descriptor files
pub const SIDECAR_EXTENSION: &str = "json";

/// Point size used for fonts without a sidecar
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// The four kinds of asset the manager can classify a file into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Sprite,
    TileSheet,
    SpriteSheet,
    Font,
}

impl AssetKind {
    /// Tag used for this kind in sidecar files
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Sprite => "sprite",
            AssetKind::TileSheet => "tilesheet",
            AssetKind::SpriteSheet => "spritesheet",
            AssetKind::Font => "font",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sprite" => Ok(AssetKind::Sprite),
            "tilesheet" => Ok(AssetKind::TileSheet),
            "spritesheet" => Ok(AssetKind::SpriteSheet),
            "font" => Ok(AssetKind::Font),
            other => Err(AssetError::UnsupportedAssetType(other.to_string())),
        }
    }
}

/// A validated description of how to load one asset file
#[derive(Debug, Clone, PartialEq)]
pub enum AssetDescriptor {
    Sprite {
        alpha: bool,
    },
    TileSheet {
        alpha: bool,
        rows: u32,
        columns: u32,
    },
    SpriteSheet {
        alpha: bool,
        sprites: BTreeMap<String, Rect>,
    },
    Font {
        size: u32,
    },
}

impl AssetDescriptor {
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetDescriptor::Sprite { .. } => AssetKind::Sprite,
            AssetDescriptor::TileSheet { .. } => AssetKind::TileSheet,
            AssetDescriptor::SpriteSheet { .. } => AssetKind::SpriteSheet,
            AssetDescriptor::Font { .. } => AssetKind::Font,
        }
    }

    /// Parse and validate the contents of a sidecar file
    pub fn from_sidecar(path: &Path, text: &str) -> Result<Self, AssetError> {
        let malformed = |source: serde_json::Error| AssetError::Sidecar {
            path: path.to_path_buf(),
            source,
        };

        let fields: Map<String, Value> = serde_json::from_str(text).map_err(malformed)?;
        if let Some(unknown) = fields
            .keys()
            .find(|key| !SIDECAR_FIELDS.contains(&key.as_str()))
        {
            return Err(AssetError::InvalidDescriptor {
                path: path.to_path_buf(),
                reason: format!("unknown field `{}`", unknown),
            });
        }

        let raw: SidecarFile = serde_json::from_value(Value::Object(fields)).map_err(malformed)?;
        raw.validate(path)
    }
}

/// Every field a sidecar may carry
const SIDECAR_FIELDS: &[&str] = &["type", "alpha", "rows", "columns", "sprites", "size"];

/// On-disk sidecar layout, before per-kind validation
#[derive(Debug, Deserialize)]
struct SidecarFile {
    #[serde(rename = "type")]
    kind: String,
    alpha: Option<bool>,
    rows: Option<u32>,
    columns: Option<u32>,
    sprites: Option<BTreeMap<String, Rect>>,
    size: Option<u32>,
}

impl SidecarFile {
    fn validate(self, path: &Path) -> Result<AssetDescriptor, AssetError> {
        let invalid = |reason: String| AssetError::InvalidDescriptor {
            path: path.to_path_buf(),
            reason,
        };
        let kind: AssetKind = self.kind.parse()?;

        // Fields that belong to a different kind are rejected outright
        let present = [
            ("alpha", self.alpha.is_some()),
            ("rows", self.rows.is_some()),
            ("columns", self.columns.is_some()),
            ("sprites", self.sprites.is_some()),
            ("size", self.size.is_some()),
        ];
        let allowed: &[&str] = match kind {
            AssetKind::Sprite => &["alpha"],
            AssetKind::TileSheet => &["alpha", "rows", "columns"],
            AssetKind::SpriteSheet => &["alpha", "sprites"],
            AssetKind::Font => &["size"],
        };
        if let Some((field, _)) = present
            .iter()
            .find(|(field, set)| *set && !allowed.contains(field))
        {
            return Err(invalid(format!("field `{}` does not apply to {}", field, kind)));
        }

        let alpha = self.alpha.unwrap_or(true);
        let required = |field: &str, value: Option<u32>| {
            value.ok_or_else(|| invalid(format!("{} requires `{}`", kind, field)))
        };

        match kind {
            AssetKind::Sprite => Ok(AssetDescriptor::Sprite { alpha }),
            AssetKind::TileSheet => {
                let rows = required("rows", self.rows)?;
                let columns = required("columns", self.columns)?;
                if rows == 0 || columns == 0 {
                    return Err(AssetError::InvalidDimensions { rows, columns });
                }
                Ok(AssetDescriptor::TileSheet {
                    alpha,
                    rows,
                    columns,
                })
            }
            AssetKind::SpriteSheet => match self.sprites {
                Some(sprites) => Ok(AssetDescriptor::SpriteSheet { alpha, sprites }),
                None => Err(invalid(format!("{} requires `sprites`", kind))),
            },
            AssetKind::Font => match required("size", self.size)? {
                0 => Err(invalid("`size` must be at least 1".to_string())),
                size => Ok(AssetDescriptor::Font { size }),
            },
        }
    }
}

/// Resolves the descriptor for an asset file
///
/// Holds the extension -> default descriptor table. The table's keys double as
/// the whitelist of files a directory scan picks up.
#[derive(Debug, Clone)]
pub struct DescriptorResolver {
    defaults: HashMap<String, AssetDescriptor>,
}

impl Default for DescriptorResolver {
    fn default() -> Self {
        let mut resolver = Self::empty();
        for ext in ["png", "jpg", "jpeg", "bmp"] {
            resolver.register(ext, AssetDescriptor::Sprite { alpha: true });
        }
        resolver.register(
            "ttf",
            AssetDescriptor::Font {
                size: DEFAULT_FONT_SIZE,
            },
        );
        resolver
    }
}

impl DescriptorResolver {
    /// A resolver that supports no extensions
    pub fn empty() -> Self {
        Self {
            defaults: HashMap::new(),
        }
    }

    /// Register (or replace) the default descriptor for a file extension
    pub fn register(&mut self, extension: &str, descriptor: AssetDescriptor) {
        self.defaults.insert(normalize_extension(extension), descriptor);
    }

    /// Whether files with this path's extension are picked up by a scan
    pub fn is_supported(&self, path: &Path) -> bool {
        extension_of(path).map_or(false, |ext| self.defaults.contains_key(&ext))
    }

    /// All registered extensions, in no particular order
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }

    /// Location of the sidecar descriptor for an asset file
    pub fn sidecar_path(&self, path: &Path) -> PathBuf {
        path.with_extension(SIDECAR_EXTENSION)
    }

    /// Default descriptor inferred from the file extension
    pub fn default_for(&self, path: &Path) -> Result<AssetDescriptor, AssetError> {
        let ext = extension_of(path).unwrap_or_default();
        self.defaults
            .get(&ext)
            .cloned()
            .ok_or(AssetError::UnsupportedAssetType(ext))
    }

    /// Resolve the descriptor for a file; a sidecar replaces the default wholesale
    pub fn resolve(&self, path: &Path) -> Result<AssetDescriptor, AssetError> {
        let sidecar = self.sidecar_path(path);
        if sidecar.is_file() {
            let text = std::fs::read_to_string(&sidecar)?;
            return AssetDescriptor::from_sidecar(&sidecar, &text);
        }
        self.default_for(path)
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
}
