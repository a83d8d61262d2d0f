//! Built-in window content.

mod photos;
mod terminal;

pub use photos::PhotoViewer;
pub use terminal::{Line, LineKind, Terminal, PROMPT};

use serde::{Deserialize, Serialize};

use crate::config::Profile;
use crate::content::{Content, ContentError, RenderContext};

/// Which built-in content a configured window mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Terminal,
    Photos,
    #[default]
    Blank,
}

/// Instantiate the content for `kind`.
pub fn build(kind: ContentKind, profile: &Profile) -> Box<dyn Content> {
    match kind {
        ContentKind::Terminal => Box::new(Terminal::new(profile.clone())),
        ContentKind::Photos => Box::new(PhotoViewer::new(profile.clone())),
        ContentKind::Blank => Box::new(Blank),
    }
}

/// Content with nothing to show.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blank;

impl Content for Blank {
    fn render(&mut self, _ctx: &RenderContext) -> Result<Vec<String>, ContentError> {
        Ok(Vec::new())
    }
}
