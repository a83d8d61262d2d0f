//! Invariant validation for the host state.
//!
//! Called after every `handle_event` in debug builds.

use crate::capture::LISTENERS_PER_CAPTURE;
use crate::state::HostState;
use crate::window::WindowState;

/// Error indicating which invariant was violated.
#[derive(Debug, thiserror::Error)]
pub enum InvariantError {
    #[error("{0} frames have an interaction session at once")]
    MultipleSessions(usize),

    #[error("Grab points to unknown window {0}")]
    GrabOnMissingWindow(String),

    #[error("Window {0} holds the grab but its frame has no session")]
    GrabWithoutSession(String),

    #[error("Window {0} has a session but does not hold the grab")]
    SessionWithoutGrab(String),

    #[error("Window {0} has a session while not open")]
    SessionOnInactiveWindow(String),

    #[error("Pointer capture for {capture} attached to grab of {grab}")]
    CaptureMismatch { capture: String, grab: String },

    #[error("{0} pointer listeners subscribed, expected {1}")]
    LeakedListeners(usize, usize),

    #[error("Open window {id} is {width}x{height}, below the minimum size")]
    BelowMinimumSize { id: String, width: u32, height: u32 },
}

/// Validate all host invariants. Returns the first violation found.
pub fn validate(state: &HostState) -> Result<(), InvariantError> {
    // 1. At most one session host-wide
    let interacting: Vec<_> = state
        .windows
        .values()
        .filter(|w| w.frame.is_interacting())
        .collect();
    if interacting.len() > 1 {
        return Err(InvariantError::MultipleSessions(interacting.len()));
    }

    // 2. The grab and the session agree
    match (&state.grab, interacting.first()) {
        (Some(grab), session) => {
            let Some(window) = state.windows.get(&grab.window_id) else {
                return Err(InvariantError::GrabOnMissingWindow(grab.window_id.to_string()));
            };
            if session.map(|w| &w.descriptor.id) != Some(&grab.window_id) {
                return Err(InvariantError::GrabWithoutSession(grab.window_id.to_string()));
            }
            if window.descriptor.state != WindowState::Open {
                return Err(InvariantError::SessionOnInactiveWindow(
                    grab.window_id.to_string(),
                ));
            }
            if grab.capture.window() != &grab.window_id {
                return Err(InvariantError::CaptureMismatch {
                    capture: grab.capture.window().to_string(),
                    grab: grab.window_id.to_string(),
                });
            }
        },
        (None, Some(window)) => {
            return Err(InvariantError::SessionWithoutGrab(window.descriptor.id.to_string()));
        },
        (None, None) => {},
    }

    // 3. Listeners exist only while a session does
    let expected = if state.grab.is_some() {
        LISTENERS_PER_CAPTURE
    } else {
        0
    };
    let active = state.router.active_listeners();
    if active != expected {
        return Err(InvariantError::LeakedListeners(active, expected));
    }

    // 4. Open windows respect the minimum size
    let limits = state.limits();
    for window in state.windows.values() {
        let d = &window.descriptor;
        if d.state == WindowState::Open
            && (d.size.width < limits.min_width || d.size.height < limits.min_height)
        {
            return Err(InvariantError::BelowMinimumSize {
                id: d.id.to_string(),
                width: d.size.width,
                height: d.size.height,
            });
        }
    }

    Ok(())
}
