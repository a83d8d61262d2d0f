//! Plain-text rendering of a [`Scene`].

use std::fmt;

use casement_core::chrome::ControlButton;
use casement_core::content::FrameBody;
use casement_core::render::{FrameView, Scene, TaskbarChip};

/// Draws a scene as text, bottom-most frame first.
pub struct SceneText<'a>(pub &'a Scene);

impl fmt::Display for SceneText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        writeln!(
            f,
            "viewport {}x{}, {} frame(s)",
            scene.viewport.width,
            scene.viewport.height,
            scene.frames.len()
        )?;

        for frame in &scene.frames {
            draw_frame(f, frame)?;
        }

        write!(f, "taskbar:")?;
        if scene.taskbar.is_empty() {
            write!(f, " (empty)")?;
        }
        for chip in &scene.taskbar {
            write!(f, " {}", ChipText(chip))?;
        }
        writeln!(f)
    }
}

fn draw_frame(f: &mut fmt::Formatter<'_>, frame: &FrameView) -> fmt::Result {
    let b = frame.bounds;
    let controls: Vec<_> = ControlButton::ALL.iter().map(|c| c.glyph()).collect();

    write!(
        f,
        "+ {} [{}] {},{} {}x{}",
        frame.title, frame.id, b.x, b.y, b.width, b.height
    )?;
    if frame.maximized {
        write!(f, " maximized")?;
    }
    if frame.interacting {
        write!(f, " *")?;
    }
    writeln!(f, "  {}", controls.join(" "))?;

    match &frame.body {
        FrameBody::Content(lines) => {
            for line in lines {
                writeln!(f, "| {line}")?;
            }
        },
        FrameBody::Fallback(message) => writeln!(f, "! {message}")?,
    }
    writeln!(f, "+")
}

struct ChipText<'a>(&'a TaskbarChip);

impl fmt::Display for ChipText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.minimized {
            write!(f, "({})", self.0.label)
        } else {
            write!(f, "[{}]", self.0.label)
        }
    }
}
