//! Window content and the per-frame error boundary.
//!
//! Content is opaque to the engine. A frame renders it through an
//! [`ErrorBoundary`], which turns both `Err` results and panics into a static
//! fallback so one misbehaving window never takes down its siblings.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::geometry::Geometry;
use crate::window::WindowId;

/// Message shown in place of content that failed to render.
pub const FALLBACK_MESSAGE: &str = "Something went wrong with the window.";

/// Content rendering errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Content panicked: {0}")]
    Panicked(String),
}

/// What a frame tells its content about the space it is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub bounds: Geometry,
    pub maximized: bool,
}

/// Arbitrary content mounted inside a frame.
pub trait Content {
    /// Produce the lines shown in the frame body.
    fn render(&mut self, ctx: &RenderContext) -> Result<Vec<String>, ContentError>;

    /// Deliver a submitted line of text (e.g. a terminal command).
    fn input(&mut self, _line: &str) {}
}

/// Rendered body of a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "lines", rename_all = "snake_case")]
pub enum FrameBody {
    Content(Vec<String>),
    Fallback(String),
}

impl FrameBody {
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Isolates content failures to a single frame.
///
/// Once tripped the boundary keeps rendering the fallback until it is
/// [`reset`](ErrorBoundary::reset), which the host does when the frame is
/// unmounted (closed or minimized).
pub struct ErrorBoundary {
    content: Box<dyn Content>,
    tripped: bool,
}

impl std::fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorBoundary")
            .field("tripped", &self.tripped)
            .finish_non_exhaustive()
    }
}

impl ErrorBoundary {
    pub fn new(content: Box<dyn Content>) -> Self {
        Self {
            content,
            tripped: false,
        }
    }

    pub fn render(&mut self, id: &WindowId, ctx: &RenderContext) -> FrameBody {
        if self.tripped {
            return FrameBody::Fallback(FALLBACK_MESSAGE.to_string());
        }

        let content = &mut self.content;
        let result = panic::catch_unwind(AssertUnwindSafe(|| content.render(ctx)))
            .unwrap_or_else(|payload| Err(ContentError::Panicked(panic_payload_to_string(&*payload))));

        match result {
            Ok(lines) => FrameBody::Content(lines),
            Err(e) => {
                error!(window = %id, "Error in window content: {}", e);
                self.tripped = true;
                FrameBody::Fallback(FALLBACK_MESSAGE.to_string())
            },
        }
    }

    /// Forward input unless the boundary has tripped. A panic while handling
    /// it trips the boundary like a failed render.
    pub fn input(&mut self, id: &WindowId, line: &str) {
        if self.tripped {
            return;
        }

        let content = &mut self.content;
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| content.input(line))) {
            let e = ContentError::Panicked(panic_payload_to_string(&*payload));
            error!(window = %id, "Error in window content input: {}", e);
            self.tripped = true;
        }
    }

    pub const fn has_tripped(&self) -> bool {
        self.tripped
    }

    pub fn reset(&mut self) {
        self.tripped = false;
    }

    /// Swap the mounted content, clearing any previous failure.
    pub fn replace(&mut self, content: Box<dyn Content>) {
        self.content = content;
        self.tripped = false;
    }
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
