//! Casement Core - floating window manager engine
//!
//! This crate contains the drag/resize geometry engine, the per-window chrome
//! state machine and the host that owns the window collection, with zero
//! dependencies on any display or DOM layer.
//!
//! Shells (a browser canvas, a terminal UI, a test harness) translate their
//! input into [`HostEvent`]s, feed them to [`Host`], apply the returned
//! [`HostAction`]s and draw the [`Scene`](render::Scene) it renders.
//!
//! # Quick Start
//! ```
//! use casement_core::{Host, HostEvent, WindowId};
//! use casement_core::config::Config;
//!
//! let mut host = Host::new(Config::default());
//! let terminal = WindowId::from("terminal");
//!
//! // Desktop icon activated
//! host.handle_event(HostEvent::Open { id: terminal.clone() });
//!
//! // Drag the title bar 50px to the right
//! host.handle_event(HostEvent::PointerDown { x: 200.0, y: 115.0 });
//! let actions = host.handle_event(HostEvent::PointerMotion { x: 250.0, y: 115.0 });
//! host.handle_event(HostEvent::PointerUp { x: 250.0, y: 115.0 });
//!
//! assert_eq!(host.descriptor(&terminal).unwrap().position.x, 150);
//! # assert!(!actions.is_empty());
//! ```

pub mod apps;
pub mod capture;
pub mod chrome;
pub mod config;
pub mod content;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod invariants;
pub mod render;
pub mod state;
pub mod window;

// Re-export primary API types at crate root
pub use event::{HostAction, HostEvent};
pub use geometry::{Geometry, Pointer, Position, Size};
pub use window::{WindowDescriptor, WindowId, WindowState};

use tracing::{debug, info, warn};

use chrome::{ControlButton, FrameZone};
use config::Config;
use content::Content;
use frame::SessionKind;
use render::{FrameUpdate, FrameView, Scene, TaskbarChip};
use state::{Grab, HostState};
use window::Intent;

/// The window host.
///
/// Owns every [`WindowDescriptor`] and the single pointer session. Shells
/// drive it via [`handle_event`](Host::handle_event) or the intent methods,
/// then apply the returned [`HostAction`]s.
#[derive(Debug)]
pub struct Host {
    /// All host state
    pub state: HostState,
}

impl Host {
    /// Create a host with the windows listed in `config`.
    pub fn new(config: Config) -> Self {
        info!(
            "Host initialized with {} windows, viewport {}x{}",
            config.windows.len(),
            config.viewport.width,
            config.viewport.height
        );
        Self {
            state: HostState::new(config),
        }
    }

    // ── Event handling (shell → host) ────────────────────────────────

    /// Process a shell event. Returns actions the shell must apply.
    pub fn handle_event(&mut self, event: HostEvent) -> Vec<HostAction> {
        debug!("handle_event: {:?}", event);
        let actions = match event {
            HostEvent::Open { id } => self.open(&id),
            HostEvent::Close { id } => self.close(&id),
            HostEvent::Minimize { id } => self.minimize(&id),
            HostEvent::ToggleMaximize { id } => self.toggle_maximize(&id),
            HostEvent::Restore { id } => self.restore(&id),
            HostEvent::TaskbarToggle { id } => self.toggle_taskbar(&id),
            HostEvent::PointerDown { x, y } => self.pointer_down(Pointer::new(x, y)),
            HostEvent::PointerMotion { x, y } => self.pointer_motion(Pointer::new(x, y)),
            HostEvent::PointerUp { x, y } => self.pointer_up(Pointer::new(x, y)),
            HostEvent::PointerLeave | HostEvent::FocusLost => self.cancel_interaction(),
            HostEvent::ViewportResized { width, height } => {
                self.resize_viewport(Size::new(width, height));
                Vec::new()
            },
            HostEvent::Submit { id, line } => {
                self.submit(&id, &line);
                Vec::new()
            },
        };

        #[cfg(debug_assertions)]
        if let Err(e) = self.state.validate_invariants() {
            warn!("Invariant violation after handle_event: {}", e);
        }

        actions
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Desktop icon activation: Closed or Minimized → Open.
    pub fn open(&mut self, id: &WindowId) -> Vec<HostAction> {
        self.transition(id, Intent::Open)
    }

    pub fn close(&mut self, id: &WindowId) -> Vec<HostAction> {
        self.transition(id, Intent::Close)
    }

    pub fn minimize(&mut self, id: &WindowId) -> Vec<HostAction> {
        self.transition(id, Intent::Minimize)
    }

    pub fn restore(&mut self, id: &WindowId) -> Vec<HostAction> {
        self.transition(id, Intent::Restore)
    }

    pub fn toggle_maximize(&mut self, id: &WindowId) -> Vec<HostAction> {
        self.transition(id, Intent::ToggleMaximize)
    }

    /// Taskbar chip: restore a minimized window, minimize a visible one.
    pub fn toggle_taskbar(&mut self, id: &WindowId) -> Vec<HostAction> {
        match self.descriptor(id).map(|d| d.state) {
            Some(WindowState::Minimized) => self.restore(id),
            Some(WindowState::Open | WindowState::Maximized) => self.minimize(id),
            Some(WindowState::Closed) => {
                debug!("Taskbar toggle on closed window {}", id);
                Vec::new()
            },
            None => {
                warn!("Unknown window: {}", id);
                Vec::new()
            },
        }
    }

    fn transition(&mut self, id: &WindowId, intent: Intent) -> Vec<HostAction> {
        let Some(window) = self.state.windows.get_mut(id) else {
            warn!("Unknown window: {}", id);
            return Vec::new();
        };
        let Some(previous) = window.descriptor.apply(intent) else {
            debug!(
                "{:?} ignored for {} in state {:?}",
                intent, id, window.descriptor.state
            );
            return Vec::new();
        };
        let current = window.descriptor.state;
        if !current.is_rendered() {
            // Unmounted frames get a fresh error boundary when shown again.
            window.boundary.reset();
        }
        debug!("{}: {:?} -> {:?}", id, previous, current);

        let mut actions = Vec::new();
        if current != WindowState::Open && self.state.grabbed_window() == Some(id) {
            actions.extend(self.end_interaction());
        }
        if self
            .state
            .pressed_control
            .as_ref()
            .is_some_and(|(pressed, _)| pressed == id)
        {
            self.state.pressed_control = None;
        }
        self.state.mark_damaged(id);

        let id = id.clone();
        actions.push(match (previous, current) {
            (_, WindowState::Closed) => HostAction::Closed { id },
            (_, WindowState::Minimized) => HostAction::Minimized { id },
            (WindowState::Closed, _) => HostAction::Opened { id },
            (WindowState::Minimized, _) => HostAction::Restored { id },
            (_, WindowState::Maximized) => HostAction::MaximizeToggled {
                id,
                maximized: true,
            },
            (_, WindowState::Open) => HostAction::MaximizeToggled {
                id,
                maximized: false,
            },
        });
        actions
    }

    // ── Pointer handling ─────────────────────────────────────────────

    fn pointer_down(&mut self, pointer: Pointer) -> Vec<HostAction> {
        self.state.pointer_position = pointer;

        // A pointer-down while a session is active means we missed the up.
        let mut actions = self.end_interaction();
        self.state.pressed_control = None;

        let Some((id, zone)) = self.state.window_at(pointer) else {
            return actions;
        };

        match zone {
            FrameZone::Control(button) => {
                self.state.pressed_control = Some((id, button));
            },
            FrameZone::Resize(direction) => {
                actions.extend(self.begin_interaction(id, pointer, SessionKind::Resize(direction)));
            },
            FrameZone::TitleBar => {
                actions.extend(self.begin_interaction(id, pointer, SessionKind::Drag));
            },
            FrameZone::Body => {},
        }

        actions
    }

    /// Start a drag or resize on `id`, ending any session in progress.
    ///
    /// Only `Open` frames can be moved; maximized ones fill the viewport.
    pub fn begin_interaction(
        &mut self,
        id: WindowId,
        pointer: Pointer,
        kind: SessionKind,
    ) -> Vec<HostAction> {
        let actions = self.end_interaction();

        let Some(window) = self.state.windows.get_mut(&id) else {
            warn!("Unknown window: {}", id);
            return actions;
        };
        if window.descriptor.state != WindowState::Open {
            debug!("No interaction on {} in state {:?}", id, window.descriptor.state);
            return actions;
        }

        let current = window.descriptor.geometry();
        match kind {
            SessionKind::Drag => window.frame.begin_drag(pointer, current),
            SessionKind::Resize(direction) => window.frame.begin_resize(pointer, direction, current),
        }

        let capture = self.state.router.capture(id.clone());
        self.state.mark_damaged(&id);
        self.state.grab = Some(Grab {
            window_id: id,
            capture,
        });
        actions
    }

    fn pointer_motion(&mut self, pointer: Pointer) -> Vec<HostAction> {
        self.state.pointer_position = pointer;

        // Without a capture nobody is listening for moves.
        let Some(id) = self.state.grabbed_window().cloned() else {
            return Vec::new();
        };
        let viewport = self.state.viewport;
        let Some(window) = self.state.windows.get_mut(&id) else {
            return Vec::new();
        };
        let current = window.descriptor.geometry();
        let Some(update) = window.frame.update_pointer(pointer, current, viewport) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if let Some(size) = update.size {
            window.descriptor.size = size;
            actions.push(HostAction::SizeChanged {
                id: id.clone(),
                width: size.width,
                height: size.height,
            });
        }
        if let Some(position) = update.position {
            window.descriptor.position = position;
            actions.push(HostAction::PositionChanged {
                id: id.clone(),
                x: position.x,
                y: position.y,
            });
        }
        self.state.mark_damaged(&id);
        actions
    }

    fn pointer_up(&mut self, pointer: Pointer) -> Vec<HostAction> {
        self.state.pointer_position = pointer;
        let mut actions = Vec::new();

        // Click semantics: the button must be released where it was pressed.
        if let Some((id, button)) = self.state.pressed_control.take() {
            if self.state.window_at(pointer) == Some((id.clone(), FrameZone::Control(button))) {
                actions.extend(self.activate_control(&id, button));
            }
        }

        actions.extend(self.end_interaction());
        actions
    }

    /// Abandon any press or session (pointer left the surface, focus lost).
    pub fn cancel_interaction(&mut self) -> Vec<HostAction> {
        self.state.pressed_control = None;
        self.end_interaction()
    }

    /// End the active session, releasing the pointer capture. Idempotent.
    pub fn end_interaction(&mut self) -> Vec<HostAction> {
        let Some(Grab { window_id, capture }) = self.state.grab.take() else {
            return Vec::new();
        };
        if let Some(window) = self.state.windows.get_mut(&window_id) {
            window.frame.end_interaction();
        }
        drop(capture);
        self.state.mark_damaged(&window_id);
        vec![HostAction::SessionEnded { id: window_id }]
    }

    fn activate_control(&mut self, id: &WindowId, button: ControlButton) -> Vec<HostAction> {
        debug!("{} control {:?} activated", id, button);
        match button {
            ControlButton::Minimize => self.minimize(id),
            ControlButton::Maximize => self.toggle_maximize(id),
            ControlButton::Close => self.close(id),
        }
    }

    // ── Environment and content ──────────────────────────────────────

    pub fn resize_viewport(&mut self, viewport: Size) {
        info!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.state.viewport = viewport;
        let maximized: Vec<_> = self
            .state
            .windows
            .values()
            .filter(|w| w.descriptor.state == WindowState::Maximized)
            .map(|w| w.descriptor.id.clone())
            .collect();
        for id in &maximized {
            self.state.mark_damaged(id);
        }
    }

    /// Deliver a line of text to a mounted window's content.
    pub fn submit(&mut self, id: &WindowId, line: &str) {
        match self.state.windows.get_mut(id) {
            Some(window) if window.descriptor.is_rendered() => {
                window.boundary.input(id, line);
                self.state.mark_damaged(id);
            },
            Some(_) => debug!("Input for unmounted window {} dropped", id),
            None => warn!("Unknown window: {}", id),
        }
    }

    /// Mount different content in a window. Returns `false` for unknown ids.
    pub fn replace_content(&mut self, id: &WindowId, content: Box<dyn Content>) -> bool {
        let Some(window) = self.state.windows.get_mut(id) else {
            return false;
        };
        window.boundary.replace(content);
        self.state.mark_damaged(id);
        true
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render every mounted frame and the taskbar. Clears the damage set.
    pub fn render(&mut self) -> Scene {
        let maximized_bounds = self.state.maximized_bounds();
        let frames = self
            .state
            .windows
            .values_mut()
            .filter(|w| w.descriptor.is_rendered())
            .map(|w| w.view(maximized_bounds))
            .collect();
        self.state.damage.clear();

        Scene {
            viewport: self.state.viewport,
            frames,
            taskbar: self.taskbar(),
        }
    }

    /// Re-render only the windows changed since the last render.
    pub fn render_damaged(&mut self) -> Vec<FrameUpdate> {
        let maximized_bounds = self.state.maximized_bounds();
        let damaged = std::mem::take(&mut self.state.damage);
        damaged
            .into_iter()
            .filter_map(|id| {
                let window = self.state.windows.get_mut(&id)?;
                Some(if window.descriptor.is_rendered() {
                    FrameUpdate::Mounted(window.view(maximized_bounds))
                } else {
                    FrameUpdate::Unmounted { id }
                })
            })
            .collect()
    }

    /// Ids changed since the last render, leaving them marked.
    pub fn damaged(&self) -> Vec<WindowId> {
        self.state.damage.iter().cloned().collect()
    }

    pub fn taskbar(&self) -> Vec<TaskbarChip> {
        self.state
            .windows
            .values()
            .filter(|w| w.descriptor.state.has_taskbar_chip())
            .map(|w| TaskbarChip {
                id: w.descriptor.id.clone(),
                label: w.descriptor.taskbar_label.clone(),
                minimized: w.descriptor.state == WindowState::Minimized,
            })
            .collect()
    }

    /// Render a single mounted frame.
    pub fn render_frame(&mut self, id: &WindowId) -> Option<FrameView> {
        let maximized_bounds = self.state.maximized_bounds();
        let window = self.state.windows.get_mut(id)?;
        window
            .descriptor
            .is_rendered()
            .then(|| window.view(maximized_bounds))
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn descriptor(&self, id: &WindowId) -> Option<&WindowDescriptor> {
        self.state.windows.get(id).map(|w| &w.descriptor)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &WindowDescriptor> {
        self.state.windows.values().map(|w| &w.descriptor)
    }

    /// Window holding the pointer session, if any.
    pub fn active_session(&self) -> Option<&WindowId> {
        self.state.grabbed_window()
    }

    /// Move/up listeners currently subscribed.
    pub fn active_listeners(&self) -> usize {
        self.state.router.active_listeners()
    }

    pub fn viewport(&self) -> Size {
        self.state.viewport
    }
}
