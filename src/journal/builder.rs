//! Turns collected fields into a [JournalEntry]. Which optional columns get a value depends only
//! on the time of day:
//!
//! | time of day | sleep_quality | wake_up_time | bedtime | gratitude | thoughts |
//! |-------------|---------------|--------------|---------|-----------|----------|
//! | morning     | yes           | yes          | -       | yes       | yes      |
//! | afternoon   | -             | -            | -       | -         | `""`     |
//! | evening     | -             | -            | yes     | -         | yes      |

use crate::{
    storage::entities::{JournalEntry, TimeOfDay},
    utils::{clock::Clock, score::Score, time::ClockTime},
};

pub const GRATITUDE_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFields {
    Morning {
        mood: Score,
        sleep_quality: Score,
        wake_up_time: ClockTime,
        gratitude: Vec<String>,
        thoughts: String,
    },
    Afternoon {
        mood: Score,
    },
    Evening {
        mood: Score,
        bedtime: ClockTime,
        thoughts: String,
    },
}

impl EntryFields {
    pub fn time_of_day(&self) -> TimeOfDay {
        match self {
            EntryFields::Morning { .. } => TimeOfDay::Morning,
            EntryFields::Afternoon { .. } => TimeOfDay::Afternoon,
            EntryFields::Evening { .. } => TimeOfDay::Evening,
        }
    }
}

/// `None` when there's nothing to be grateful for, so the column stays NULL.
pub fn join_gratitude(entries: &[String]) -> Option<String> {
    if entries.is_empty() {
        None
    } else {
        Some(entries.join(GRATITUDE_SEPARATOR))
    }
}

pub fn build_journal_entry(fields: EntryFields, clock: &impl Clock) -> JournalEntry {
    let timestamp = clock.time().timestamp();
    let time_of_day = fields.time_of_day();
    match fields {
        EntryFields::Morning {
            mood,
            sleep_quality,
            wake_up_time,
            gratitude,
            thoughts,
        } => JournalEntry {
            timestamp,
            time_of_day,
            mood,
            sleep_quality: Some(sleep_quality),
            wake_up_time: Some(wake_up_time),
            bedtime: None,
            thoughts,
            gratitude: join_gratitude(&gratitude),
        },
        EntryFields::Afternoon { mood } => JournalEntry {
            timestamp,
            time_of_day,
            mood,
            sleep_quality: None,
            wake_up_time: None,
            bedtime: None,
            thoughts: String::new(),
            gratitude: None,
        },
        EntryFields::Evening {
            mood,
            bedtime,
            thoughts,
        } => JournalEntry {
            timestamp,
            time_of_day,
            mood,
            sleep_quality: None,
            wake_up_time: None,
            bedtime: Some(bedtime),
            thoughts,
            gratitude: None,
        },
    }
}
