//! Rendered snapshot of the host.

use serde::Serialize;

use crate::content::FrameBody;
use crate::geometry::{Geometry, Size};
use crate::window::WindowId;

/// One mounted frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameView {
    pub id: WindowId,
    pub title: String,
    /// Where the frame is drawn; the viewport minus the taskbar when maximized
    pub bounds: Geometry,
    pub maximized: bool,
    /// A drag or resize is in progress on this frame
    pub interacting: bool,
    pub body: FrameBody,
}

/// One taskbar affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskbarChip {
    pub id: WindowId,
    pub label: String,
    pub minimized: bool,
}

/// Everything the shell needs to draw, bottom-most frame first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub viewport: Size,
    pub frames: Vec<FrameView>,
    pub taskbar: Vec<TaskbarChip>,
}

impl Scene {
    pub fn frame(&self, id: &WindowId) -> Option<&FrameView> {
        self.frames.iter().find(|f| &f.id == id)
    }

    pub fn chip(&self, id: &WindowId) -> Option<&TaskbarChip> {
        self.taskbar.iter().find(|c| &c.id == id)
    }
}

/// Incremental render result for one damaged window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameUpdate {
    /// The frame is (still) mounted; redraw it.
    Mounted(FrameView),
    /// The frame was minimized or closed; remove it.
    Unmounted { id: WindowId },
}
