use std::fmt::Display;

use chrono::TimeZone;

use crate::{
    storage::entities::MoodSleepRecord,
    utils::{
        score::{MAX_SCORE, MIN_SCORE},
        time::format_timestamp_in,
    },
};

use super::{Palette, SeriesVisibility};

pub const CHART_TITLE: &str = "Mood & Sleep Quality Over Time";
const Y_LABEL: &str = "Score (1-10)";

/// Longer inputs only chart their most recent entries so the chart fits a terminal.
pub const MAX_COLUMNS: usize = 60;

const MOOD_MARK: &str = "o";
const SLEEP_MARK: &str = "s";
const BOTH_MARK: &str = "*";

/// Draws scores as a text chart with one column per record, oldest on the left. Records are
/// evenly spaced regardless of the time between them.
pub fn render_chart<Tz: TimeZone>(
    records: &[MoodSleepRecord],
    visibility: SeriesVisibility,
    palette: Palette,
    tz: &Tz,
) -> Vec<String>
where
    Tz::Offset: Display,
{
    let shown = &records[records.len().saturating_sub(MAX_COLUMNS)..];
    let mut lines = vec![palette.title(CHART_TITLE), Y_LABEL.to_owned()];

    for level in (MIN_SCORE..=MAX_SCORE).rev() {
        let mut line = format!("{level:>2} |");
        for record in shown {
            let mood = visibility.mood && i64::from(record.entry.mood) == level;
            let sleep = visibility.sleep && i64::from(record.entry.sleep) == level;
            line.push(' ');
            line.push_str(&match (mood, sleep) {
                (true, true) => palette.both(BOTH_MARK),
                (true, false) => palette.mood(MOOD_MARK),
                (false, true) => palette.sleep(SLEEP_MARK),
                (false, false) => " ".to_owned(),
            });
        }
        lines.push(line.trim_end().to_owned());
    }
    lines.push(format!("   +{}", "--".repeat(shown.len())));

    if let (Some(first), Some(last)) = (shown.first(), shown.last()) {
        lines.push(format!(
            "    {} to {}",
            format_timestamp_in(first.timestamp(), tz),
            format_timestamp_in(last.timestamp(), tz)
        ));
    }

    let mut legend = Vec::new();
    if visibility.mood {
        legend.push(format!("{} Mood", palette.mood(MOOD_MARK)));
    }
    if visibility.sleep {
        legend.push(format!("{} Sleep Quality", palette.sleep(SLEEP_MARK)));
    }
    if visibility.mood && visibility.sleep {
        legend.push(format!("{} Both", palette.both(BOTH_MARK)));
    }
    if !legend.is_empty() {
        lines.push(legend.join("  "));
    }

    if shown.len() < records.len() {
        lines.push(format!(
            "(showing the last {} of {} entries)",
            shown.len(),
            records.len()
        ));
    }
    lines
}
