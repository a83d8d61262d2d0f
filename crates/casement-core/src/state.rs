//! Host state: the window collection and the single pointer session.

use indexmap::{IndexMap, IndexSet};

use crate::apps;
use crate::capture::{PointerCapture, PointerRouter};
use crate::chrome::{ChromeMetrics, ControlButton, FrameZone};
use crate::config::Config;
use crate::content::{Content, ErrorBoundary, RenderContext};
use crate::frame::{FrameLimits, WindowFrame};
use crate::geometry::{Geometry, Pointer, Size};
use crate::render::FrameView;
use crate::window::{WindowDescriptor, WindowId, WindowState};

/// A descriptor plus the frame and content mounted for it.
#[derive(Debug)]
pub struct ManagedWindow {
    pub descriptor: WindowDescriptor,
    pub frame: WindowFrame,
    pub(crate) boundary: ErrorBoundary,
}

impl ManagedWindow {
    pub fn new(descriptor: WindowDescriptor, limits: FrameLimits, content: Box<dyn Content>) -> Self {
        Self {
            descriptor,
            frame: WindowFrame::new(limits),
            boundary: ErrorBoundary::new(content),
        }
    }

    /// Where the frame is drawn.
    pub fn bounds(&self, maximized_bounds: Geometry) -> Geometry {
        if self.descriptor.state == WindowState::Maximized {
            maximized_bounds
        } else {
            self.descriptor.geometry()
        }
    }

    pub fn content_failed(&self) -> bool {
        self.boundary.has_tripped()
    }

    pub(crate) fn view(&mut self, maximized_bounds: Geometry) -> FrameView {
        let bounds = self.bounds(maximized_bounds);
        let maximized = self.descriptor.state == WindowState::Maximized;
        let body = self
            .boundary
            .render(&self.descriptor.id, &RenderContext { bounds, maximized });
        FrameView {
            id: self.descriptor.id.clone(),
            title: self.descriptor.title.clone(),
            bounds,
            maximized,
            interacting: self.frame.is_interacting(),
            body,
        }
    }
}

/// The window currently holding the pointer.
#[derive(Debug)]
pub struct Grab {
    pub window_id: WindowId,
    pub(crate) capture: PointerCapture,
}

/// The central host state.
#[derive(Debug)]
pub struct HostState {
    pub config: Config,
    pub chrome: ChromeMetrics,
    /// Stacking order: later windows are drawn on top
    pub windows: IndexMap<WindowId, ManagedWindow>,
    pub viewport: Size,
    pub pointer_position: Pointer,
    pub grab: Option<Grab>,
    /// Control button pressed and not yet released
    pub pressed_control: Option<(WindowId, ControlButton)>,
    /// Windows changed since the last render
    pub damage: IndexSet<WindowId>,
    pub router: PointerRouter,
}

impl HostState {
    pub fn new(config: Config) -> Self {
        let limits = FrameLimits::from_config(&config);
        let mut windows = IndexMap::new();

        for window_config in &config.windows {
            let mut descriptor = WindowDescriptor::from_config(window_config);
            descriptor.size.width = descriptor.size.width.max(limits.min_width);
            descriptor.size.height = descriptor.size.height.max(limits.min_height);
            let content = apps::build(window_config.content, &config.profile);
            windows.insert(
                descriptor.id.clone(),
                ManagedWindow::new(descriptor, limits, content),
            );
        }

        let damage = windows.keys().cloned().collect();

        Self {
            chrome: ChromeMetrics::from_config(&config.frame),
            viewport: config.viewport.size(),
            config,
            windows,
            pointer_position: Pointer::default(),
            grab: None,
            pressed_control: None,
            damage,
            router: PointerRouter::new(),
        }
    }

    pub fn limits(&self) -> FrameLimits {
        FrameLimits::from_config(&self.config)
    }

    /// Area covered by a maximized frame: the viewport above the taskbar.
    pub fn maximized_bounds(&self) -> Geometry {
        Geometry::new(
            0,
            0,
            self.viewport.width,
            self.viewport
                .height
                .saturating_sub(self.config.frame.taskbar_height),
        )
    }

    /// Top-most mounted frame under the pointer, with the zone hit.
    pub fn window_at(&self, pointer: Pointer) -> Option<(WindowId, FrameZone)> {
        let maximized_bounds = self.maximized_bounds();
        self.windows.values().rev().find_map(|window| {
            if !window.descriptor.is_rendered() {
                return None;
            }
            let maximized = window.descriptor.state == WindowState::Maximized;
            self.chrome
                .hit_test(window.bounds(maximized_bounds), maximized, pointer)
                .map(|zone| (window.descriptor.id.clone(), zone))
        })
    }

    pub fn grabbed_window(&self) -> Option<&WindowId> {
        self.grab.as_ref().map(|g| &g.window_id)
    }

    pub fn mark_damaged(&mut self, id: &WindowId) {
        self.damage.insert(id.clone());
    }

    /// Validate host invariants. See `invariants` module.
    pub fn validate_invariants(&self) -> Result<(), crate::invariants::InvariantError> {
        crate::invariants::validate(self)
    }
}
