//! Calendar wrapping and file output.

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};
use crate::event::OutputEvent;

pub const DEFAULT_PRODID: &str = "-//vcal2ics//NONSGML v1.0//EN";

/// Default file name prefix in split mode (`event_0001.ics`, ...).
pub const DEFAULT_SPLIT_PREFIX: &str = "event_";

/// Wrap events in a VCALENDAR document. Every line ends with CRLF.
pub fn render_calendar<'a, I>(events: I, prodid: &str) -> String
where
    I: IntoIterator<Item = &'a OutputEvent>,
{
    let mut ics = String::new();
    ics.push_str("BEGIN:VCALENDAR\r\n");
    ics.push_str("VERSION:2.0\r\n");
    ics.push_str(&format!("PRODID:{}\r\n", prodid));
    ics.push_str("CALSCALE:GREGORIAN\r\n");

    for event in events {
        ics.push_str(&event.to_string());
    }

    ics.push_str("END:VCALENDAR\r\n");
    ics
}

/// File name for the `index`-th (1-based) event in split mode.
pub fn split_filename(prefix: &str, index: usize) -> String {
    format!("{}{:04}.ics", prefix, index)
}

/// Write all events to one calendar file.
pub fn write_calendar(path: &Path, events: &[OutputEvent], prodid: &str) -> ConvertResult<()> {
    if events.is_empty() {
        tracing::warn!(path = %path.display(), "no events converted, writing an empty calendar");
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ConvertError::WriteOutput {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, render_calendar(events, prodid)).map_err(|source| {
        ConvertError::WriteOutput {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(path = %path.display(), events = events.len(), "wrote calendar");
    Ok(())
}

/// Write each event as its own calendar file in `dir`, creating it if needed.
///
/// Returns the written paths in order.
pub fn write_split(
    dir: &Path,
    events: &[OutputEvent],
    prodid: &str,
    prefix: &str,
) -> ConvertResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| ConvertError::WriteOutput {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(events.len());
    for (i, event) in events.iter().enumerate() {
        let path = dir.join(split_filename(prefix, i + 1));
        std::fs::write(&path, render_calendar([event], prodid)).map_err(|source| {
            ConvertError::WriteOutput {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), "wrote event");
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), events = written.len(), "wrote event files");
    Ok(written)
}
