use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::{score::Score, time::ClockTime};

use super::{Entry, Stored};

/// One mood tracker submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSleepEntry {
    pub timestamp: i64,
    pub mood: Score,
    pub sleep: Score,
}

impl Entry for MoodSleepEntry {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

pub type MoodSleepRecord = Stored<MoodSleepEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid choice. Please choose Morning, Afternoon, or Evening.")]
pub struct UnknownTimeOfDay(pub String);

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }

    /// Capitalized form used in prompts, e.g. `Morning mood (1-10): `.
    pub fn title(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = UnknownTimeOfDay;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            _ => Err(UnknownTimeOfDay(s.to_owned())),
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One journal submission. Which optional fields are present is decided by `time_of_day`, see
/// [crate::journal::builder].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp: i64,
    pub time_of_day: TimeOfDay,
    pub mood: Score,
    pub sleep_quality: Option<Score>,
    pub wake_up_time: Option<ClockTime>,
    pub bedtime: Option<ClockTime>,
    pub thoughts: String,
    pub gratitude: Option<String>,
}

impl Entry for JournalEntry {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

pub type JournalRecord = Stored<JournalEntry>;
