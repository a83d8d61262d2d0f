//! Frame chrome layout and hit testing.

use serde::{Deserialize, Serialize};

use crate::config::FrameConfig;
use crate::frame::ResizeDirection;
use crate::geometry::{Geometry, Pointer};

/// Title-bar control buttons, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlButton {
    Minimize,
    Maximize,
    Close,
}

impl ControlButton {
    pub const ALL: [Self; 3] = [Self::Minimize, Self::Maximize, Self::Close];

    /// Glyph used by text renderers.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Minimize => "_",
            Self::Maximize => "□",
            Self::Close => "x",
        }
    }

    /// Slot counted from the right edge of the title bar.
    const fn slot_from_right(self) -> u32 {
        match self {
            Self::Close => 0,
            Self::Maximize => 1,
            Self::Minimize => 2,
        }
    }
}

/// Region of a frame under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameZone {
    Control(ControlButton),
    Resize(ResizeDirection),
    TitleBar,
    Body,
}

/// Chrome metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeMetrics {
    pub title_bar_height: u32,
    pub control_size: u32,
    pub control_spacing: u32,
    pub control_inset: u32,
    pub corner_handle: u32,
    pub edge_handle: u32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self::from_config(&FrameConfig::default())
    }
}

impl ChromeMetrics {
    pub const fn from_config(frame: &FrameConfig) -> Self {
        Self {
            title_bar_height: frame.title_bar_height,
            control_size: frame.control_size,
            control_spacing: frame.control_spacing,
            control_inset: frame.control_inset,
            corner_handle: frame.corner_handle,
            edge_handle: frame.edge_handle,
        }
    }

    /// Bounds of a control button inside a frame.
    pub fn control_bounds(&self, frame: Geometry, button: ControlButton) -> Geometry {
        let size = i64::from(self.control_size);
        let step = size + i64::from(self.control_spacing);
        let x = frame.right() - i64::from(self.control_inset) - size - step * i64::from(button.slot_from_right());
        let y = frame.top() + (i64::from(self.title_bar_height) - size) / 2;
        Geometry::new(x as i32, y as i32, self.control_size, self.control_size)
    }

    /// Resolve a pointer position against a frame.
    ///
    /// Maximized frames expose no resize handles. Returns `None` outside the
    /// frame.
    pub fn hit_test(&self, frame: Geometry, maximized: bool, pointer: Pointer) -> Option<FrameZone> {
        if !frame.contains(pointer.x, pointer.y) {
            return None;
        }

        if let Some(button) = ControlButton::ALL
            .into_iter()
            .find(|&b| self.control_bounds(frame, b).contains(pointer.x, pointer.y))
        {
            return Some(FrameZone::Control(button));
        }

        if !maximized {
            if let Some(direction) = self.resize_handle(frame, pointer) {
                return Some(FrameZone::Resize(direction));
            }
        }

        let title_bottom = f64::from(frame.y) + f64::from(self.title_bar_height);
        if pointer.y < title_bottom {
            Some(FrameZone::TitleBar)
        } else {
            Some(FrameZone::Body)
        }
    }

    fn resize_handle(&self, frame: Geometry, pointer: Pointer) -> Option<ResizeDirection> {
        let left = pointer.x - f64::from(frame.x);
        let top = pointer.y - f64::from(frame.y);
        let right = f64::from(frame.width) - left;
        let bottom = f64::from(frame.height) - top;

        let corner = f64::from(self.corner_handle);
        let edge = f64::from(self.edge_handle);

        let near_top = top < corner;
        let near_bottom = bottom <= corner;
        let near_left = left < corner;
        let near_right = right <= corner;

        match (near_top, near_bottom, near_left, near_right) {
            (true, _, true, _) => Some(ResizeDirection::NorthWest),
            (true, _, _, true) => Some(ResizeDirection::NorthEast),
            (_, true, true, _) => Some(ResizeDirection::SouthWest),
            (_, true, _, true) => Some(ResizeDirection::SouthEast),
            _ if top < edge => Some(ResizeDirection::North),
            _ if bottom <= edge => Some(ResizeDirection::South),
            _ if left < edge => Some(ResizeDirection::West),
            _ if right <= edge => Some(ResizeDirection::East),
            _ => None,
        }
    }
}
