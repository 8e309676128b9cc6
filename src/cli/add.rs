use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::{
    prompt::Prompter,
    storage::{
        entities::{MoodSleepEntry, MoodSleepRecord},
        RecordStore,
    },
    utils::{clock::Clock, score::Score},
};

#[derive(Debug, Parser, Default)]
pub struct AddCommand {
    #[arg(long, short, help = "Mood from 1 to 10. Asked for when missing")]
    pub mood: Option<Score>,
    #[arg(long, short, help = "Sleep quality from 1 to 10. Asked for when missing")]
    pub sleep: Option<Score>,
}

/// Stamps the scores with the current time.
pub fn build_mood_entry(clock: &impl Clock, mood: Score, sleep: Score) -> MoodSleepEntry {
    MoodSleepEntry {
        timestamp: clock.time().timestamp(),
        mood,
        sleep,
    }
}

/// Command to process `add`. Scores that weren't passed as arguments are asked for.
pub fn process_add_command<R: BufRead, W: Write>(
    AddCommand { mood, sleep }: AddCommand,
    store: &impl RecordStore<MoodSleepEntry>,
    clock: &impl Clock,
    prompter: &mut Prompter<R, W>,
) -> Result<MoodSleepRecord> {
    let mood = match mood {
        Some(v) => v,
        None => prompter.score("Mood (1-10): ")?,
    };
    let sleep = match sleep {
        Some(v) => v,
        None => prompter.score("Sleep Quality (1-10): ")?,
    };

    store.create_schema()?;
    let record = store.insert(&build_mood_entry(clock, mood, sleep))?;
    info!(id = record.id, "Saved mood entry");
    prompter.say("Data saved successfully!")?;
    Ok(record)
}
