use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::{
    prompt::{PromptError, Prompter},
    storage::{
        entities::{JournalEntry, JournalRecord, TimeOfDay},
        RecordStore,
    },
    utils::clock::Clock,
};

use super::{
    builder::{build_journal_entry, EntryFields},
    JournalError,
};

pub const SAVED_MESSAGE: &str = "Journal entry saved successfully!";

/// Asks which part of the day the entry is for. Anything unknown aborts the entry.
pub fn choose_time_of_day<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<TimeOfDay, JournalError> {
    prompter.say("Choose time of day: Morning, Afternoon, Evening")?;
    let answer = prompter.ask("Enter your choice: ")?;
    match answer.parse::<TimeOfDay>() {
        Ok(v) => Ok(v),
        Err(e) => {
            warn!("Unknown time of day {answer:?}");
            prompter.say(&e)?;
            Err(e.into())
        }
    }
}

/// Asks for the fields that belong to `time_of_day`, in the order they're written down.
pub fn collect_fields<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    time_of_day: TimeOfDay,
) -> Result<EntryFields, PromptError> {
    let mood = prompter.score(&format!("{} mood (1-10): ", time_of_day.title()))?;
    let fields = match time_of_day {
        TimeOfDay::Morning => {
            let sleep_quality = prompter.score("Sleep quality (1-10): ")?;
            let wake_up_time = prompter.clock_time("Wake up time (HH:MM): ")?;
            let gratitude = prompter.repeated_list(
                "Enter a gratitude:",
                "Would you like to add another gratitude? (yes/no): ",
            )?;
            let thoughts = prompter.text_block("Morning thoughts:")?;
            EntryFields::Morning {
                mood,
                sleep_quality,
                wake_up_time,
                gratitude,
                thoughts,
            }
        }
        TimeOfDay::Afternoon => EntryFields::Afternoon { mood },
        TimeOfDay::Evening => {
            let bedtime = prompter.clock_time("What time are you going to bed (HH:MM)?: ")?;
            let thoughts = prompter.text_block("Evening thoughts:")?;
            EntryFields::Evening {
                mood,
                bedtime,
                thoughts,
            }
        }
    };
    Ok(fields)
}

/// Runs a whole interactive session: choose the time of day, answer its questions, save.
/// Nothing is written unless every question was answered.
pub fn collect_entry<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &impl RecordStore<JournalEntry>,
    clock: &impl Clock,
) -> Result<JournalRecord, JournalError> {
    store.create_schema()?;

    let time_of_day = choose_time_of_day(prompter)?;
    let fields = collect_fields(prompter, time_of_day)?;
    let record = store.insert(&build_journal_entry(fields, clock))?;
    info!(id = record.id, %time_of_day, "Saved journal entry");

    prompter.say(SAVED_MESSAGE)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::{
        journal::JournalError,
        prompt::{PromptError, Prompter},
        storage::{
            entities::{JournalEntry, JournalRecord, TimeOfDay},
            memory::MemoryStore,
            sqlite::SqliteStore,
            RecordStore,
        },
        utils::{clock::FixedClock, logging::TEST_LOGGING, score::Score},
    };

    use super::{collect_entry, SAVED_MESSAGE};

    const NOW: i64 = 1_700_000_000;

    fn clock() -> FixedClock {
        FixedClock(Utc.timestamp_opt(NOW, 0).unwrap())
    }

    fn run(
        input: &str,
        store: &impl RecordStore<JournalEntry>,
    ) -> (Result<JournalRecord, JournalError>, String) {
        let mut prompter = Prompter::new(Cursor::new(input), Vec::new());
        let result = collect_entry(&mut prompter, store, &clock());
        (result, String::from_utf8(prompter.into_output()).unwrap())
    }

    #[test]
    fn test_morning_session() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let store = SqliteStore::new(dir.path().join("journal.db"));
        let input = "Morning\n\
                     8\n\
                     12\n7\n\
                     6:30\n06:30\n\
                     coffee\nEND\nyes\nthe sun\nEND\nno\n\
                     Slept well.\nPlanning the day.\nEND\n";

        let (result, output) = run(input, &store);
        let record = result?;

        assert_eq!(record.entry.time_of_day, TimeOfDay::Morning);
        assert_eq!(record.entry.mood, Score::new_opt(8).unwrap());
        assert_eq!(record.entry.sleep_quality, Score::new_opt(7));
        assert_eq!(record.entry.wake_up_time.as_deref(), Some("06:30"));
        assert_eq!(record.entry.gratitude.as_deref(), Some("coffee, the sun"));
        assert_eq!(record.entry.thoughts, "Slept well.\nPlanning the day.");
        assert_eq!(record.entry.timestamp, NOW);
        assert!(output.ends_with(&format!("{SAVED_MESSAGE}\n")));

        let stored: Vec<JournalRecord> = store.fetch_since(None)?;
        assert_eq!(stored, vec![record]);
        Ok(())
    }

    #[test]
    fn test_afternoon_session_only_asks_mood() -> Result<()> {
        let store = MemoryStore::<JournalEntry>::new();
        let (result, output) = run("afternoon\n5\n", &store);
        let record = result?;

        assert_eq!(record.entry.time_of_day, TimeOfDay::Afternoon);
        assert_eq!(record.entry.thoughts, "");
        assert_eq!(record.entry.sleep_quality, None);
        assert_eq!(record.entry.wake_up_time, None);
        assert_eq!(record.entry.bedtime, None);
        assert_eq!(record.entry.gratitude, None);
        assert!(output.contains("Afternoon mood (1-10): "));
        Ok(())
    }

    #[test]
    fn test_evening_session() -> Result<()> {
        let store = MemoryStore::<JournalEntry>::new();
        let (result, _) = run("EVENING\n4\n22:45\nTired.\nEND\n", &store);
        let record = result?;

        assert_eq!(record.entry.time_of_day, TimeOfDay::Evening);
        assert_eq!(record.entry.bedtime.as_deref(), Some("22:45"));
        assert_eq!(record.entry.thoughts, "Tired.");
        assert_eq!(record.entry.wake_up_time, None);
        Ok(())
    }

    #[test]
    fn test_unknown_time_of_day_saves_nothing() {
        let store = MemoryStore::<JournalEntry>::new();
        let (result, output) = run("noon\n5\n", &store);

        assert!(matches!(result, Err(JournalError::InvalidCategory(_))));
        assert!(output.contains("Invalid choice. Please choose Morning, Afternoon, or Evening."));
        assert!(!output.contains("mood"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_closed_input_saves_nothing() {
        let store = MemoryStore::<JournalEntry>::new();
        let (result, _) = run("evening\n4\n", &store);

        assert!(matches!(
            result,
            Err(JournalError::Prompt(PromptError::Cancelled))
        ));
        assert!(store.is_empty());
    }
}
