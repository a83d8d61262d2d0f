//! Window descriptors and the chrome state machine.
//!
//! A descriptor is the persistent record of one window: identity, stored
//! geometry and lifecycle state. Descriptors are never removed from the host;
//! they only cycle between states.

use serde::{Deserialize, Serialize};

use crate::config::WindowConfig;
use crate::geometry::{Geometry, Position, Size};

/// Stable identifier of a window, unique within a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WindowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lifecycle state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    #[default]
    Closed,
    Open,
    Minimized,
    Maximized,
}

/// User intents that drive the chrome state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Desktop icon activation
    Open,
    Close,
    Minimize,
    Restore,
    ToggleMaximize,
}

impl WindowState {
    /// Next state for `intent`, or `None` when the intent does not apply.
    ///
    /// Inapplicable intents (closing a closed window, maximizing a minimized
    /// one, ...) are no-ops rather than errors.
    pub const fn apply(self, intent: Intent) -> Option<Self> {
        match (self, intent) {
            (Self::Closed | Self::Minimized, Intent::Open) => Some(Self::Open),
            (Self::Open | Self::Maximized, Intent::Close) => Some(Self::Closed),
            (Self::Open | Self::Maximized, Intent::Minimize) => Some(Self::Minimized),
            (Self::Minimized, Intent::Restore) => Some(Self::Open),
            (Self::Open, Intent::ToggleMaximize) => Some(Self::Maximized),
            (Self::Maximized, Intent::ToggleMaximize) => Some(Self::Open),
            _ => None,
        }
    }

    /// Whether a frame (with content) is mounted for this state.
    pub const fn is_rendered(self) -> bool {
        matches!(self, Self::Open | Self::Maximized)
    }

    /// Whether the taskbar shows a chip for this state.
    pub const fn has_taskbar_chip(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// The persistent record of one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowDescriptor {
    pub id: WindowId,
    pub title: String,
    pub taskbar_label: String,
    pub position: Position,
    pub size: Size,
    pub state: WindowState,
}

impl WindowDescriptor {
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>, geometry: Geometry) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            taskbar_label: title.clone(),
            title,
            position: geometry.position(),
            size: geometry.size(),
            state: WindowState::Closed,
        }
    }

    pub fn from_config(config: &WindowConfig) -> Self {
        let mut descriptor = Self::new(config.id.as_str(), config.title.clone(), config.geometry());
        descriptor.taskbar_label = config.label().to_string();
        if config.open {
            descriptor.state = WindowState::Open;
        }
        descriptor
    }

    /// Stored (non-maximized) geometry.
    pub const fn geometry(&self) -> Geometry {
        Geometry::from_parts(self.position, self.size)
    }

    /// Apply an intent. Returns the previous state when a transition happened.
    ///
    /// Never touches `position`/`size`, so leaving `Maximized` lands on the
    /// exact geometry the window had before.
    pub fn apply(&mut self, intent: Intent) -> Option<WindowState> {
        let next = self.state.apply(intent)?;
        let previous = self.state;
        self.state = next;
        Some(previous)
    }

    pub const fn is_rendered(&self) -> bool {
        self.state.is_rendered()
    }
}
