//! Scripted event replay.
//!
//! A script is a JSON document:
//!
//! ```json
//! {
//!   "viewport": { "width": 1920, "height": 1080 },
//!   "events": [
//!     { "type": "open", "id": "terminal" },
//!     { "type": "pointer_down", "x": 120, "y": 110 }
//!   ]
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use casement_core::{Host, HostAction, HostEvent, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An event stream plus the viewport it was recorded against.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: Option<Size>,
    pub events: Vec<HostEvent>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse script {}", path.display()))
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

/// One replayed event and the actions it produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub index: usize,
    pub event: HostEvent,
    pub actions: Vec<HostAction>,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>3}] {:?}", self.index, self.event)?;
        for action in &self.actions {
            write!(f, "\n      -> {action:?}")?;
        }
        Ok(())
    }
}

/// Feed every scripted event to `host`, in order.
pub fn run(host: &mut Host, script: &Script) -> Vec<Step> {
    if let Some(viewport) = script.viewport {
        host.resize_viewport(viewport);
    }

    script
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let actions = host.handle_event(event.clone());
            debug!("step {}: {} actions", index, actions.len());
            Step {
                index,
                event: event.clone(),
                actions,
            }
        })
        .collect()
}
