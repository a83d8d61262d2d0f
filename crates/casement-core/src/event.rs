//! Host events and actions.
//!
//! [`HostEvent`] is what the shell (desktop icons, taskbar, pointer source,
//! viewport) tells the host. [`HostAction`] is what the host reports back.

use serde::{Deserialize, Serialize};

use crate::window::WindowId;

/// Events a backend sends to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Desktop icon activated.
    Open { id: WindowId },

    Close { id: WindowId },

    Minimize { id: WindowId },

    ToggleMaximize { id: WindowId },

    Restore { id: WindowId },

    /// Taskbar chip activated.
    TaskbarToggle { id: WindowId },

    PointerDown { x: f64, y: f64 },

    PointerMotion { x: f64, y: f64 },

    PointerUp { x: f64, y: f64 },

    /// Pointer left the surface; any session in progress is abandoned.
    PointerLeave,

    /// The surface lost input focus.
    FocusLost,

    ViewportResized { width: u32, height: u32 },

    /// A line of text submitted to a window's content.
    Submit { id: WindowId, line: String },
}

/// Actions the host reports to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostAction {
    PositionChanged { id: WindowId, x: i32, y: i32 },

    SizeChanged { id: WindowId, width: u32, height: u32 },

    Opened { id: WindowId },

    Closed { id: WindowId },

    Minimized { id: WindowId },

    Restored { id: WindowId },

    MaximizeToggled { id: WindowId, maximized: bool },

    /// A drag or resize on `id` finished.
    SessionEnded { id: WindowId },
}

impl HostAction {
    pub const fn window(&self) -> &WindowId {
        match self {
            Self::PositionChanged { id, .. }
            | Self::SizeChanged { id, .. }
            | Self::Opened { id }
            | Self::Closed { id }
            | Self::Minimized { id }
            | Self::Restored { id }
            | Self::MaximizeToggled { id, .. }
            | Self::SessionEnded { id } => id,
        }
    }
}
