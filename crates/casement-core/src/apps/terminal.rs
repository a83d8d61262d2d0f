//! PowerShell-style portfolio terminal.

use std::fmt::Write as _;

use tracing::debug;

use crate::config::Profile;
use crate::content::{Content, ContentError, RenderContext};

pub const PROMPT: &str = "PS C:\\Portfolio> ";

const BANNER: [&str; 2] = [
    "Windows PowerShell Portfolio Terminal",
    "Type \"help\" for available commands.",
];

const HELP: &str = "Available commands:
  portfolio - Show portfolio details
  skills - Show technical skills
  experience - Show work experience
  projects - Show projects
  contact - Show contact information
  clear - Clear terminal
  help - Show this help message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    System,
    Command,
    Response,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Scrollback plus a tiny command interpreter over [`Profile`] data.
#[derive(Debug, Clone)]
pub struct Terminal {
    profile: Profile,
    lines: Vec<Line>,
}

impl Terminal {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            lines: banner(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Run one command line.
    pub fn execute(&mut self, command: &str) {
        let cmd = command.trim().to_lowercase();
        debug!("terminal command {:?}", cmd);

        let response = match cmd.as_str() {
            "help" => HELP.to_string(),
            "portfolio" => self.portfolio(),
            "skills" => self.skills(),
            "experience" => self.experience(),
            "projects" => self.projects(),
            "contact" => self.contact(),
            "clear" => {
                self.lines = banner();
                return;
            },
            "" => {
                self.lines.push(Line::new(LineKind::Prompt, PROMPT));
                return;
            },
            _ => format!(
                "'{command}' is not recognized as a command. Type 'help' for available commands."
            ),
        };

        if self.lines.last().is_some_and(|l| l.kind == LineKind::Prompt) {
            self.lines.pop();
        }
        self.lines
            .push(Line::new(LineKind::Command, format!("{PROMPT}{command}")));
        self.lines.push(Line::new(LineKind::Response, response));
        self.lines.push(Line::new(LineKind::Prompt, PROMPT));
    }

    fn portfolio(&self) -> String {
        let p = &self.profile;
        format!(
            "=== {} - {} ===\nLocation: {}\nEmail: {}\nPhone: {}\n\n{}\nType 'skills', 'experience', or 'projects' for more details.",
            p.name, p.title, p.location, p.email, p.phone, p.summary
        )
    }

    fn skills(&self) -> String {
        bulleted("Technical Skills:", self.profile.skills.iter())
    }

    fn experience(&self) -> String {
        bulleted(
            "Work Experience:",
            self.profile
                .experience
                .iter()
                .map(|e| format!("{} at {} ({})", e.role, e.company, e.duration)),
        )
    }

    fn projects(&self) -> String {
        bulleted(
            "Recent Projects:",
            self.profile
                .projects
                .iter()
                .map(|p| format!("{} - {}", p.name, p.tech)),
        )
    }

    fn contact(&self) -> String {
        let p = &self.profile;
        format!(
            "Contact Information:\nEmail: {}\nPhone: {}\nLocation: {}",
            p.email, p.phone, p.location
        )
    }
}

impl Content for Terminal {
    fn render(&mut self, _ctx: &RenderContext) -> Result<Vec<String>, ContentError> {
        Ok(self
            .lines
            .iter()
            .flat_map(|line| line.text.lines().map(str::to_string))
            .collect())
    }

    fn input(&mut self, line: &str) {
        self.execute(line);
    }
}

fn banner() -> Vec<Line> {
    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|text| Line::new(LineKind::System, *text))
        .collect();
    lines.push(Line::new(LineKind::Prompt, PROMPT));
    lines
}

fn bulleted<I, S>(heading: &str, items: I) -> String
where
    I: Iterator<Item = S>,
    S: std::fmt::Display,
{
    let mut out = heading.to_string();
    for item in items {
        let _ = write!(out, "\n• {item}");
    }
    out
}
