//! Scoped pointer capture.
//!
//! Pointer-move and pointer-up listeners exist only for the lifetime of an
//! interaction session. A [`PointerCapture`] registers them on creation and
//! unregisters them on drop, so every exit path (pointer-up, pointer-leave,
//! focus loss, the window closing, a new session replacing this one)
//! releases them.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::window::WindowId;

/// Listeners registered per capture: pointer-move and pointer-up.
pub const LISTENERS_PER_CAPTURE: usize = 2;

/// Hands out captures and counts the listeners they hold.
#[derive(Debug, Clone, Default)]
pub struct PointerRouter {
    listeners: Rc<Cell<usize>>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe move/up listeners on behalf of `window`.
    pub fn capture(&self, window: WindowId) -> PointerCapture {
        self.listeners
            .set(self.listeners.get() + LISTENERS_PER_CAPTURE);
        debug!(window = %window, "pointer captured");
        PointerCapture {
            window,
            listeners: Rc::clone(&self.listeners),
        }
    }

    /// Number of move/up listeners currently subscribed.
    pub fn active_listeners(&self) -> usize {
        self.listeners.get()
    }
}

/// Move/up subscription held by the window being dragged or resized.
#[derive(Debug)]
pub struct PointerCapture {
    window: WindowId,
    listeners: Rc<Cell<usize>>,
}

impl PointerCapture {
    pub const fn window(&self) -> &WindowId {
        &self.window
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.listeners
            .set(self.listeners.get().saturating_sub(LISTENERS_PER_CAPTURE));
        debug!(window = %self.window, "pointer capture released");
    }
}
