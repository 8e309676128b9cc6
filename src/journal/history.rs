use std::{fmt::Display, io::Write};

use anyhow::Result;
use chrono::{Local, TimeZone};
use chrono_english::{parse_date_string, Dialect};
use clap::{CommandFactory, Parser, ValueEnum};
use tracing::debug;

use crate::{
    query::{query_since, window::WindowSelector},
    storage::{
        entities::{JournalEntry, JournalRecord},
        RecordStore,
    },
    utils::{clock::Clock, time::format_timestamp_in},
};

use super::JournalArgs;

pub const NO_ENTRIES_MESSAGE: &str = "No journal entries in this range.";

/// Order of day and month when `--since` is an absolute date like `03/04/2025`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DateOrder {
    #[default]
    #[value(name = "uk")]
    DayFirst,
    #[value(name = "us")]
    MonthFirst,
}

impl DateOrder {
    fn dialect(self) -> Dialect {
        match self {
            DateOrder::DayFirst => Dialect::Uk,
            DateOrder::MonthFirst => Dialect::Us,
        }
    }
}

#[derive(Debug, Parser, Default)]
pub struct HistoryCommand {
    #[arg(
        long,
        short,
        value_enum,
        help = "Time range to show. Defaults to default_window from config.json, or week"
    )]
    pub range: Option<WindowSelector>,
    #[arg(
        long,
        short,
        help = "Show entries since this moment instead of a range. Examples are \"yesterday\", \"2 weeks ago\", \"15/03/2025\""
    )]
    pub since: Option<String>,
    #[arg(
        long,
        value_enum,
        default_value_t = DateOrder::DayFirst,
        help = "How absolute dates in --since are read: uk is day/month/year, us is month/day/year"
    )]
    pub date_style: DateOrder,
    #[arg(long, help = "Print the entries as JSON")]
    pub json: bool,
}

/// Earliest timestamp to show. `--since` wins over `--range`.
fn resolve_cutoff(
    command: &HistoryCommand,
    default_window: WindowSelector,
    clock: &impl Clock,
) -> Result<Option<i64>> {
    let now = clock.time();
    match &command.since {
        Some(since) => {
            let local_now = now.with_timezone(&Local);
            let parsed = parse_date_string(since, local_now, command.date_style.dialect())
                .map_err(|e| {
                    JournalArgs::command().error(
                        clap::error::ErrorKind::ValueValidation,
                        format!("Failed to validate since date {e}"),
                    )
                })?;
            Ok(Some(parsed.timestamp()))
        }
        None => Ok(command
            .range
            .unwrap_or(default_window)
            .cutoff(now.timestamp())),
    }
}

/// Command to process `history`. Prints previous entries oldest first.
pub fn process_history_command(
    command: HistoryCommand,
    default_window: WindowSelector,
    store: &impl RecordStore<JournalEntry>,
    clock: &impl Clock,
    out: &mut impl Write,
) -> Result<()> {
    let cutoff = resolve_cutoff(&command, default_window, clock)?;
    debug!(?cutoff, "Showing journal history");

    store.create_schema()?;
    let records = query_since(store, cutoff)?;

    if command.json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }
    print_history(out, &records, &Local)?;
    Ok(())
}

pub fn print_history<Tz: TimeZone>(
    out: &mut impl Write,
    records: &[JournalRecord],
    tz: &Tz,
) -> std::io::Result<()>
where
    Tz::Offset: Display,
{
    if records.is_empty() {
        return writeln!(out, "{NO_ENTRIES_MESSAGE}");
    }

    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        let entry = &record.entry;
        writeln!(
            out,
            "{}  {}  mood {}",
            format_timestamp_in(entry.timestamp, tz),
            entry.time_of_day,
            entry.mood
        )?;
        if let Some(v) = entry.sleep_quality {
            writeln!(out, "  sleep quality: {v}")?;
        }
        if let Some(v) = &entry.wake_up_time {
            writeln!(out, "  woke up: {v}")?;
        }
        if let Some(v) = &entry.bedtime {
            writeln!(out, "  bedtime: {v}")?;
        }
        if let Some(v) = &entry.gratitude {
            writeln!(out, "  gratitude: {v}")?;
        }
        if !entry.thoughts.is_empty() {
            writeln!(out, "  thoughts:")?;
            for line in entry.thoughts.lines() {
                writeln!(out, "    {line}")?;
            }
        }
    }
    Ok(())
}
