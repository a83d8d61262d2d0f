//! Interactive session with a window's content.
//!
//! Each input line is submitted to the window; whatever the content added
//! since the last line is echoed back. A trailing prompt is printed without
//! a newline so the user types after it.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use casement_core::content::FrameBody;
use casement_core::{Host, HostEvent, WindowId};

const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

pub fn run<R: BufRead, W: Write>(
    host: &mut Host,
    id: &WindowId,
    input: R,
    mut output: W,
) -> Result<()> {
    if host.descriptor(id).is_none() {
        bail!("No window with id {id}");
    }
    host.handle_event(HostEvent::Open { id: id.clone() });

    let mut shown = echo_new_lines(host, id, 0, &mut output)?;
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if EXIT_COMMANDS.contains(&line.trim()) {
            break;
        }
        host.handle_event(HostEvent::Submit {
            id: id.clone(),
            line,
        });
        shown = echo_new_lines(host, id, shown, &mut output)?;
    }

    writeln!(output)?;
    Ok(())
}

/// Print lines past `shown`. Returns the new line count.
///
/// The line at `shown - 1` was the prompt the user typed after; content
/// rewrites it into the echoed command, so it is not printed again. A body
/// that did not grow was reset and is printed from the top.
fn echo_new_lines<W: Write>(
    host: &mut Host,
    id: &WindowId,
    shown: usize,
    output: &mut W,
) -> Result<usize> {
    let view = host
        .render_frame(id)
        .with_context(|| format!("Window {id} is not mounted"))?;
    let lines = match view.body {
        FrameBody::Content(lines) => lines,
        FrameBody::Fallback(message) => vec![message],
    };

    let start = if lines.len() <= shown { 0 } else { shown };
    if let Some((last, rest)) = lines[start..].split_last() {
        for line in rest {
            writeln!(output, "{line}")?;
        }
        if last.ends_with("> ") {
            write!(output, "{last}")?;
        } else {
            writeln!(output, "{last}")?;
        }
    }
    output.flush()?;

    Ok(lines.len())
}
