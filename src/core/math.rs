// Math utilities and helper functions

use serde::{Deserialize, Serialize};

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// An axis-aligned pixel rectangle
///
/// Serialized as a `[x, y, width, height]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive), or `None` on overflow
    pub fn right(&self) -> Option<u32> {
        self.x.checked_add(self.width)
    }

    /// Bottom edge (exclusive), or `None` on overflow
    pub fn bottom(&self) -> Option<u32> {
        self.y.checked_add(self.height)
    }

    /// Check whether this rect lies entirely inside a `width` x `height` area
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        matches!(
            (self.right(), self.bottom()),
            (Some(r), Some(b)) if r <= width && b <= height
        )
    }

    /// Translate this rect by another rect's origin
    pub fn offset_by(&self, origin: &Rect) -> Rect {
        Rect::new(
            self.x + origin.x,
            self.y + origin.y,
            self.width,
            self.height,
        )
    }
}

impl From<[u32; 4]> for Rect {
    fn from([x, y, width, height]: [u32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<Rect> for [u32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}
