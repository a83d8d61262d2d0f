//! Configuration system
//!
//! TOML configuration for frame chrome metrics, drag policy, the initial
//! viewport, the window set and the profile shown by the built-in content.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::apps::ContentKind;
use crate::geometry::{Geometry, Size};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CASEMENT_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Duplicate window id: {0}")]
    DuplicateWindow(String),
    #[error("Window id must not be empty")]
    EmptyWindowId,
    #[error("Minimum frame size must be non-zero (got {width}x{height})")]
    ZeroMinimum { width: u32, height: u32 },
    #[error("Window {id} default size {width}x{height} is below the minimum {min_width}x{min_height}")]
    BelowMinimum {
        id: String,
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame size limits and chrome metrics
    pub frame: FrameConfig,

    /// Drag policy
    pub drag: DragConfig,

    /// Viewport assumed until the backend reports a real one
    pub viewport: ViewportConfig,

    /// Windows known to the host, in stacking order (last on top)
    pub windows: Vec<WindowConfig>,

    /// Data shown by the built-in terminal and photo content
    pub profile: Profile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            drag: DragConfig::default(),
            viewport: ViewportConfig::default(),
            windows: default_windows(),
            profile: Profile::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).or_else(Self::find_config_file);

        match config_path {
            Some(path) if path.exists() => {
                info!("Loading configuration from {:?}", path);
                let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
            },
            Some(path) => {
                warn!("Config file not found at {:?}, using defaults", path);
                Ok(Self::default())
            },
            None => {
                info!("No config file found, using defaults");
                Ok(Self::default())
            },
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Find the configuration file
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            if !explicit.is_empty() {
                return Some(PathBuf::from(explicit));
            }
        }

        let candidates = [
            dirs::config_dir().map(|p| p.join("casement/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/casement/config.toml")),
            Some(PathBuf::from("/etc/casement/config.toml")),
        ];

        candidates.into_iter().flatten().find(|p| p.exists())
    }

    /// Generate default configuration as a string
    pub fn default_config_string() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let frame = &self.frame;
        if frame.min_width == 0 || frame.min_height == 0 {
            return Err(ConfigError::ZeroMinimum {
                width: frame.min_width,
                height: frame.min_height,
            });
        }

        let mut seen = HashSet::new();
        for window in &self.windows {
            if window.id.is_empty() {
                return Err(ConfigError::EmptyWindowId);
            }
            if !seen.insert(window.id.as_str()) {
                return Err(ConfigError::DuplicateWindow(window.id.clone()));
            }
            if window.width < frame.min_width || window.height < frame.min_height {
                return Err(ConfigError::BelowMinimum {
                    id: window.id.clone(),
                    width: window.width,
                    height: window.height,
                    min_width: frame.min_width,
                    min_height: frame.min_height,
                });
            }
        }

        Ok(())
    }
}

/// Frame size limits and chrome metrics, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub min_width: u32,
    pub min_height: u32,
    /// Horizontal viewport margin; resize never exceeds `viewport_width - margin_x`
    pub margin_x: u32,
    /// Vertical viewport margin; resize never exceeds `viewport_height - margin_y`
    pub margin_y: u32,
    /// Strip reserved at the bottom of the viewport for the taskbar
    pub taskbar_height: u32,
    pub title_bar_height: u32,
    pub control_size: u32,
    pub control_spacing: u32,
    /// Gap between the last control button and the right edge of the frame
    pub control_inset: u32,
    /// Side of the square corner resize handles
    pub corner_handle: u32,
    /// Thickness of the edge resize strips
    pub edge_handle: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            min_width: 300,
            min_height: 200,
            margin_x: 50,
            margin_y: 100,
            taskbar_height: 48,
            title_bar_height: 40,
            control_size: 24,
            control_spacing: 8,
            control_inset: 10,
            corner_handle: 8,
            edge_handle: 4,
        }
    }
}

/// Drag policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pixels of a dragged frame kept inside the viewport on each axis.
    /// Zero lets frames leave the viewport entirely.
    pub min_visible: u32,
}

/// Viewport size until the backend reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

impl ViewportConfig {
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// One window known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub id: String,
    pub title: String,
    /// Label on the taskbar chip; defaults to the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taskbar_label: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub content: ContentKind,
    /// Start open instead of closed
    #[serde(default)]
    pub open: bool,
}

impl WindowConfig {
    pub const fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }

    pub fn label(&self) -> &str {
        self.taskbar_label.as_deref().unwrap_or(&self.title)
    }
}

fn default_windows() -> Vec<WindowConfig> {
    vec![
        WindowConfig {
            id: "terminal".into(),
            title: "Windows PowerShell".into(),
            taskbar_label: Some("PowerShell".into()),
            x: 100,
            y: 100,
            width: 700,
            height: 500,
            content: ContentKind::Terminal,
            open: false,
        },
        WindowConfig {
            id: "photos".into(),
            title: "Photos - profile-pic.png".into(),
            taskbar_label: Some("Photos".into()),
            x: 150,
            y: 150,
            width: 600,
            height: 500,
            content: ContentKind::Photos,
            open: false,
        },
    ]
}

/// Portfolio owner data rendered by the built-in content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// One-line introduction shown by the terminal's `portfolio` command
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Portfolio Owner".into(),
            title: "Software Developer".into(),
            email: "hello@example.com".into(),
            phone: "+1 (555) 010-0000".into(),
            location: "Remote".into(),
            summary: "A passionate full-stack developer with expertise in modern web technologies."
                .into(),
            skills: vec!["Rust".into(), "TypeScript".into(), "PostgreSQL".into()],
            experience: Vec::new(),
            projects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub tech: String,
}
