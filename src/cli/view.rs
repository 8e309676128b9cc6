use std::{fmt::Display, io::Write};

use anyhow::Result;
use chrono::{Local, TimeZone};
use clap::Parser;
use tracing::debug;

use crate::{
    query::{query_window, window::WindowSelector},
    storage::{
        entities::{MoodSleepEntry, MoodSleepRecord},
        RecordStore,
    },
    utils::clock::Clock,
};

use super::output::{chart::render_chart, print_table, Palette, SeriesVisibility};

pub const NO_DATA_MESSAGE: &str = "No data available to display.";

#[derive(Debug, Parser, Default)]
pub struct ViewCommand {
    #[arg(
        long,
        short,
        value_enum,
        help = "Time range to show. Defaults to default_window from config.json, or week"
    )]
    pub range: Option<WindowSelector>,
    #[arg(long, help = "Don't show mood")]
    pub hide_mood: bool,
    #[arg(long, help = "Don't show sleep quality")]
    pub hide_sleep: bool,
    #[arg(long, help = "Print the records as JSON instead of a chart")]
    pub json: bool,
    #[arg(long, help = "Don't color the chart")]
    pub no_color: bool,
}

/// Command to process `view` command. Shows every record of the chosen range, oldest first.
pub fn process_view_command(
    command: ViewCommand,
    default_window: WindowSelector,
    store: &impl RecordStore<MoodSleepEntry>,
    clock: &impl Clock,
    out: &mut impl Write,
) -> Result<()> {
    let window = command.range.unwrap_or(default_window);
    debug!("Viewing {window}");

    // A database that was never written to is simply empty.
    store.create_schema()?;
    let records = query_window(store, window, clock.time().timestamp())?;

    print_records(&command, &records, out, &Local)
}

fn print_records<Tz: TimeZone>(
    command: &ViewCommand,
    records: &[MoodSleepRecord],
    out: &mut impl Write,
    tz: &Tz,
) -> Result<()>
where
    Tz::Offset: Display,
{
    if command.json {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "{NO_DATA_MESSAGE}")?;
        return Ok(());
    }

    let visibility = SeriesVisibility {
        mood: !command.hide_mood,
        sleep: !command.hide_sleep,
    };
    let palette = if command.no_color {
        Palette::plain()
    } else {
        Palette::colored()
    };

    print_table(out, records, visibility, tz)?;
    if !visibility.mood && !visibility.sleep {
        return Ok(());
    }
    writeln!(out)?;
    for line in render_chart(records, visibility, palette, tz) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
