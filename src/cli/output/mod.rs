//! Console presentation of mood records.

pub mod chart;

use std::{fmt::Display, io::Write};

use ansi_term::{Colour, Style};
use chrono::TimeZone;

use crate::{storage::entities::MoodSleepRecord, utils::time::format_timestamp_in};

/// Which series are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesVisibility {
    pub mood: bool,
    pub sleep: bool,
}

impl Default for SeriesVisibility {
    fn default() -> Self {
        Self {
            mood: true,
            sleep: true,
        }
    }
}

/// Styling for terminal output. Plain output is used for pipes and tests.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    colored: bool,
}

impl Palette {
    pub fn colored() -> Self {
        Self { colored: true }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colored {
            style.paint(text).to_string()
        } else {
            text.to_owned()
        }
    }

    pub fn mood(&self, text: &str) -> String {
        self.paint(Colour::Cyan.normal(), text)
    }

    pub fn sleep(&self, text: &str) -> String {
        self.paint(Colour::Purple.normal(), text)
    }

    /// Mood and sleep on the same score.
    pub fn both(&self, text: &str) -> String {
        self.paint(Colour::Yellow.bold(), text)
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }
}

/// Prints one line per record with the visible scores.
pub fn print_table<Tz: TimeZone>(
    out: &mut impl Write,
    records: &[MoodSleepRecord],
    visibility: SeriesVisibility,
    tz: &Tz,
) -> std::io::Result<()>
where
    Tz::Offset: Display,
{
    let mut header = format!("{:<19}", "Time");
    if visibility.mood {
        header.push_str("  Mood");
    }
    if visibility.sleep {
        header.push_str("  Sleep");
    }
    writeln!(out, "{}", header.trim_end())?;

    for record in records {
        let mut line = format_timestamp_in(record.timestamp(), tz);
        if visibility.mood {
            line.push_str(&format!("  {:>4}", record.entry.mood));
        }
        if visibility.sleep {
            line.push_str(&format!("  {:>5}", record.entry.sleep));
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}
