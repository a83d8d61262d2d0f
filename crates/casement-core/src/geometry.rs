//! Pixel geometry shared by frames, the host and the scene.

use serde::{Deserialize, Serialize};

/// Top-left corner of a frame in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A pointer coordinate as delivered by the input source.
///
/// Pointer devices report sub-pixel positions; frame geometry is whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round to the pixel grid, clamped to the `i32` coordinate range.
    ///
    /// Edge arithmetic on the result stays far inside `i64`.
    pub fn to_px(self) -> (i64, i64) {
        (px_coord(self.x), px_coord(self.y))
    }
}

/// Geometry of a rectangular region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub const fn position(self) -> Position {
        Position::new(self.x, self.y)
    }

    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub const fn left(self) -> i64 {
        self.x as i64
    }

    pub const fn top(self) -> i64 {
        self.y as i64
    }

    pub const fn right(self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub const fn bottom(self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= f64::from(self.x)
            && x < f64::from(self.x) + f64::from(self.width)
            && y >= f64::from(self.y)
            && y < f64::from(self.y) + f64::from(self.height)
    }
}

fn px_coord(value: f64) -> i64 {
    // NaN casts to 0
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i64
}

/// Clamp an extent into `[min, max]`, letting `min` win when the range is empty.
///
/// `max` is derived from the viewport and may fall below `min` (or below zero)
/// on very small viewports.
pub fn clamp_extent(value: i64, min: u32, max: i64) -> u32 {
    value.min(max).max(i64::from(min)) as u32
}
