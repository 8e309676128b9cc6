//! Retrieval of records in a relative time window.

pub mod window;

use tracing::debug;
use window::WindowSelector;

use crate::storage::{Entry, RecordStore, StoreError, Stored};

/// Returns every record with `timestamp >= now - window`, oldest first. Ties keep id order.
///
/// The result is sorted here regardless of what order the store returns, so any
/// [RecordStore] can be plugged in. No rows is `Ok(vec![])`.
pub fn query_window<E: Entry>(
    store: &impl RecordStore<E>,
    window: WindowSelector,
    now: i64,
) -> Result<Vec<Stored<E>>, StoreError> {
    query_since(store, window.cutoff(now))
}

/// Same as [query_window] with an explicit cutoff. `None` returns everything.
pub fn query_since<E: Entry>(
    store: &impl RecordStore<E>,
    cutoff: Option<i64>,
) -> Result<Vec<Stored<E>>, StoreError> {
    let mut records = store.fetch_since(cutoff)?;
    records.retain(|v| cutoff.map_or(true, |cutoff| v.timestamp() >= cutoff));
    records.sort_by_key(|v| (v.timestamp(), v.id));
    debug!(?cutoff, count = records.len(), "Queried records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::Duration;
    use tempfile::tempdir;

    use crate::{
        storage::{
            entities::{MoodSleepEntry, MoodSleepRecord},
            memory::MemoryStore,
            sqlite::SqliteStore,
            RecordStore,
        },
        utils::score::Score,
    };

    use super::{query_window, window::WindowSelector};

    const NOW: i64 = 1_700_000_000;

    fn entry(offset: Duration, mood: i64) -> MoodSleepEntry {
        MoodSleepEntry {
            timestamp: NOW + offset.num_seconds(),
            mood: Score::new_opt(mood).unwrap(),
            sleep: Score::new_opt(5).unwrap(),
        }
    }

    fn offsets() -> Vec<MoodSleepEntry> {
        // Not in time order, to make sure sorting doesn't depend on the store.
        vec![
            entry(-Duration::hours(1), 4),
            entry(-Duration::days(400), 1),
            entry(-Duration::days(10), 3),
            entry(-Duration::days(100), 2),
        ]
    }

    fn check_month_window(store: &impl RecordStore<MoodSleepEntry>) -> Result<()> {
        store.create_schema()?;
        for v in offsets() {
            store.insert(&v)?;
        }

        let records: Vec<MoodSleepRecord> = query_window(store, WindowSelector::Month, NOW)?;
        let timestamps = records.iter().map(|v| v.timestamp()).collect::<Vec<_>>();
        assert_eq!(
            timestamps,
            vec![
                NOW - Duration::days(10).num_seconds(),
                NOW - Duration::hours(1).num_seconds()
            ]
        );
        assert_eq!(
            records.iter().map(|v| v.entry.mood.value()).collect::<Vec<_>>(),
            vec![3, 4]
        );
        Ok(())
    }

    #[test]
    fn test_month_window_memory() -> Result<()> {
        check_month_window(&MemoryStore::<MoodSleepEntry>::new())
    }

    #[test]
    fn test_month_window_sqlite() -> Result<()> {
        let dir = tempdir()?;
        check_month_window(&SqliteStore::new(dir.path().join("mood.db")))
    }

    #[test]
    fn test_every_window_on_known_offsets() -> Result<()> {
        let store = MemoryStore::<MoodSleepEntry>::new();
        for v in offsets() {
            store.insert(&v)?;
        }
        let expected = [
            (WindowSelector::Week, 1),
            (WindowSelector::Month, 2),
            (WindowSelector::ThreeMonths, 2),
            (WindowSelector::SixMonths, 3),
            (WindowSelector::Year, 3),
            (WindowSelector::AllTime, 4),
        ];
        for (window, count) in expected {
            let records: Vec<MoodSleepRecord> = query_window(&store, window, NOW)?;
            assert_eq!(records.len(), count, "{window}");
            assert!(records.windows(2).all(|v| v[0].timestamp() <= v[1].timestamp()));
        }
        Ok(())
    }

    #[test]
    fn test_all_time_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = SqliteStore::new(dir.path().join("mood.db"));
        RecordStore::<MoodSleepEntry>::create_schema(&store)?;
        let inserted = store.insert(&entry(Duration::zero(), 8))?;

        let records: Vec<MoodSleepRecord> = query_window(&store, WindowSelector::AllTime, NOW)?;
        assert_eq!(records, vec![inserted]);
        Ok(())
    }

    #[test]
    fn test_empty_store_returns_empty_for_every_window() -> Result<()> {
        let dir = tempdir()?;
        let store = SqliteStore::new(dir.path().join("mood.db"));
        RecordStore::<MoodSleepEntry>::create_schema(&store)?;
        for window in WindowSelector::ALL {
            let records: Vec<MoodSleepRecord> = query_window(&store, window, NOW)?;
            assert!(records.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_equal_timestamps_keep_id_order() -> Result<()> {
        let store = MemoryStore::<MoodSleepEntry>::new();
        let a = store.insert(&entry(Duration::zero(), 1))?;
        let b = store.insert(&entry(Duration::zero(), 2))?;
        let records: Vec<MoodSleepRecord> = query_window(&store, WindowSelector::Week, NOW)?;
        assert_eq!(records, vec![a, b]);
        Ok(())
    }
}
