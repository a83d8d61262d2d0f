//! Drag/resize geometry engine.
//!
//! A [`WindowFrame`] owns at most one [`InteractionSession`]. Given the
//! frame's current geometry and a stream of pointer positions it proposes new
//! geometry honoring the minimum size and the viewport-derived maximum. It
//! never fails: out-of-range input is absorbed by clamping.

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::config::Config;
use crate::geometry::{clamp_extent, Geometry, Pointer, Position, Size};

bitflags! {
    /// Frame edges moved by a resize.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResizeEdges: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
    }
}

/// Edge or corner grabbed for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeDirection {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Convert to `ResizeEdges` bitflags.
    pub const fn edges(self) -> ResizeEdges {
        match self {
            Self::North => ResizeEdges::TOP,
            Self::South => ResizeEdges::BOTTOM,
            Self::East => ResizeEdges::RIGHT,
            Self::West => ResizeEdges::LEFT,
            Self::NorthEast => ResizeEdges::TOP.union(ResizeEdges::RIGHT),
            Self::NorthWest => ResizeEdges::TOP.union(ResizeEdges::LEFT),
            Self::SouthEast => ResizeEdges::BOTTOM.union(ResizeEdges::RIGHT),
            Self::SouthWest => ResizeEdges::BOTTOM.union(ResizeEdges::LEFT),
        }
    }

    /// Whether resizing in this direction can move the frame origin.
    pub const fn moves_origin(self) -> bool {
        self.edges().intersects(ResizeEdges::TOP.union(ResizeEdges::LEFT))
    }
}

/// Size limits applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimits {
    pub min_width: u32,
    pub min_height: u32,
    pub margin_x: u32,
    pub margin_y: u32,
    /// Zero disables the drag clamp.
    pub min_visible: u32,
}

impl Default for FrameLimits {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl FrameLimits {
    pub const fn from_config(config: &Config) -> Self {
        Self {
            min_width: config.frame.min_width,
            min_height: config.frame.min_height,
            margin_x: config.frame.margin_x,
            margin_y: config.frame.margin_y,
            min_visible: config.drag.min_visible,
        }
    }

    fn max_width(&self, viewport: Size) -> i64 {
        i64::from(viewport.width) - i64::from(self.margin_x)
    }

    fn max_height(&self, viewport: Size) -> i64 {
        i64::from(viewport.height) - i64::from(self.margin_y)
    }
}

/// What kind of interaction is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Drag,
    Resize(ResizeDirection),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Anchor {
    /// Pointer minus frame origin at grab time
    Offset { dx: f64, dy: f64 },
    /// Frame bounds at grab time
    Bounds(Geometry),
}

/// Transient record of an in-progress drag or resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSession {
    kind: SessionKind,
    anchor: Anchor,
}

impl InteractionSession {
    pub const fn kind(&self) -> SessionKind {
        self.kind
    }
}

/// Geometry proposed by one pointer update. Absent fields did not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryUpdate {
    pub position: Option<Position>,
    pub size: Option<Size>,
}

/// Drag/resize interaction state for one frame.
#[derive(Debug, Clone, Default)]
pub struct WindowFrame {
    limits: FrameLimits,
    session: Option<InteractionSession>,
}

impl WindowFrame {
    pub const fn new(limits: FrameLimits) -> Self {
        Self {
            limits,
            session: None,
        }
    }

    pub const fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    pub const fn is_interacting(&self) -> bool {
        self.session.is_some()
    }

    /// Start dragging from the title bar. Replaces any session in progress.
    pub fn begin_drag(&mut self, pointer: Pointer, current: Geometry) {
        let dx = pointer.x - f64::from(current.x);
        let dy = pointer.y - f64::from(current.y);
        debug!("begin drag, offset ({dx}, {dy})");
        self.session = Some(InteractionSession {
            kind: SessionKind::Drag,
            anchor: Anchor::Offset { dx, dy },
        });
    }

    /// Start resizing from an edge or corner. Replaces any session in progress.
    pub fn begin_resize(&mut self, pointer: Pointer, direction: ResizeDirection, current: Geometry) {
        debug!(
            "begin resize {:?} at ({}, {}) from {:?}",
            direction, pointer.x, pointer.y, current
        );
        self.session = Some(InteractionSession {
            kind: SessionKind::Resize(direction),
            anchor: Anchor::Bounds(current),
        });
    }

    /// Propose new geometry for a pointer move. `None` without a session.
    pub fn update_pointer(
        &self,
        pointer: Pointer,
        current: Geometry,
        viewport: Size,
    ) -> Option<GeometryUpdate> {
        let session = self.session?;
        let update = match (session.kind, session.anchor) {
            (SessionKind::Drag, Anchor::Offset { dx, dy }) => {
                let position = self.drag_position(pointer, dx, dy, current.size(), viewport);
                GeometryUpdate {
                    position: Some(position),
                    size: None,
                }
            },
            (SessionKind::Resize(direction), Anchor::Bounds(initial)) => {
                let proposed = resize(direction, initial, pointer, viewport, &self.limits);
                GeometryUpdate {
                    size: Some(proposed.size()),
                    position: (proposed.position() != current.position())
                        .then_some(proposed.position()),
                }
            },
            _ => return None,
        };
        trace!("pointer update {:?}", update);
        Some(update)
    }

    /// End the session. Returns `false` when there was none.
    pub fn end_interaction(&mut self) -> bool {
        self.session.take().is_some()
    }

    fn drag_position(&self, pointer: Pointer, dx: f64, dy: f64, size: Size, viewport: Size) -> Position {
        let mut x = (pointer.x - dx).round() as i64;
        let mut y = (pointer.y - dy).round() as i64;

        let keep = i64::from(self.limits.min_visible);
        if keep > 0 {
            x = x
                .min(i64::from(viewport.width) - keep)
                .max(keep - i64::from(size.width));
            y = y
                .min(i64::from(viewport.height) - keep)
                .max(keep - i64::from(size.height));
        }

        Position::new(saturate_i32(x), saturate_i32(y))
    }
}

/// Resize `initial` toward `pointer` along `direction`.
///
/// Each axis is independent. The opposite edge stays anchored; the moving
/// origin never passes the point where the extent would drop below its
/// minimum, so the rectangle cannot invert.
pub fn resize(
    direction: ResizeDirection,
    initial: Geometry,
    pointer: Pointer,
    viewport: Size,
    limits: &FrameLimits,
) -> Geometry {
    let (px, py) = pointer.to_px();
    let edges = direction.edges();
    let max_width = limits.max_width(viewport);
    let max_height = limits.max_height(viewport);

    let mut geometry = initial;

    if edges.contains(ResizeEdges::RIGHT) {
        geometry.width = clamp_extent(px - initial.left(), limits.min_width, max_width);
    }
    if edges.contains(ResizeEdges::LEFT) {
        geometry.width = clamp_extent(initial.right() - px, limits.min_width, max_width);
        geometry.x = saturate_i32(px.min(initial.right() - i64::from(limits.min_width)));
    }
    if edges.contains(ResizeEdges::BOTTOM) {
        geometry.height = clamp_extent(py - initial.top(), limits.min_height, max_height);
    }
    if edges.contains(ResizeEdges::TOP) {
        geometry.height = clamp_extent(initial.bottom() - py, limits.min_height, max_height);
        geometry.y = saturate_i32(py.min(initial.bottom() - i64::from(limits.min_height)));
    }

    geometry
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
