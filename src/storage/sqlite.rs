use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, Row};
use tracing::{debug, instrument};

use crate::utils::{score::Score, time::ClockTime};

use super::{
    entities::{JournalEntry, MoodSleepEntry, TimeOfDay},
    Entry, RecordStore, StoreError, Stored,
};

/// Describes how an entry maps onto its single SQLite table.
pub trait Table: Entry {
    const NAME: &'static str;
    /// Must be idempotent, i.e. only use `IF NOT EXISTS` statements.
    const SCHEMA: &'static str;
    /// Column list for selects. `id` must come first.
    const COLUMNS: &'static str;

    fn insert_into(&self, conn: &Connection) -> rusqlite::Result<usize>;

    fn from_row(row: &Row<'_>) -> Result<Stored<Self>, StoreError>;
}

/// The main realization of [RecordStore]. Holds only the database path; every operation opens
/// its own connection and drops it before returning.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, StoreError> {
        if let Some(parent) = self.path.parent().filter(|v| !v.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::StorageUnavailable {
                path: self.path.clone(),
                source: e.into(),
            })?;
        }
        debug!("Opening {:?}", self.path);
        Connection::open(&self.path).map_err(|e| StoreError::StorageUnavailable {
            path: self.path.clone(),
            source: e.into(),
        })
    }
}

fn query_error(table: &'static str) -> impl Fn(rusqlite::Error) -> StoreError {
    move |source| StoreError::Query { table, source }
}

impl<E: Table> RecordStore<E> for SqliteStore {
    #[instrument(skip(self), fields(table = E::NAME))]
    fn create_schema(&self) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.execute_batch(E::SCHEMA).map_err(query_error(E::NAME))
    }

    #[instrument(skip_all, fields(table = E::NAME))]
    fn insert(&self, entry: &E) -> Result<Stored<E>, StoreError> {
        let conn = self.open()?;
        entry.insert_into(&conn).map_err(query_error(E::NAME))?;
        let id = conn.last_insert_rowid();
        debug!(id, "Inserted row");
        Ok(Stored {
            id,
            entry: entry.clone(),
        })
    }

    #[instrument(skip(self), fields(table = E::NAME))]
    fn fetch_since(&self, cutoff: Option<i64>) -> Result<Vec<Stored<E>>, StoreError> {
        let conn = self.open()?;
        let to_error = query_error(E::NAME);

        let sql = match cutoff {
            Some(_) => format!(
                "SELECT {} FROM {} WHERE timestamp >= ?1 ORDER BY timestamp, id",
                E::COLUMNS,
                E::NAME
            ),
            None => format!("SELECT {} FROM {} ORDER BY timestamp, id", E::COLUMNS, E::NAME),
        };
        let mut stmt = conn.prepare(&sql).map_err(&to_error)?;
        let mut rows = match cutoff {
            Some(cutoff) => stmt.query(params![cutoff]),
            None => stmt.query([]),
        }
        .map_err(&to_error)?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(&to_error)? {
            records.push(E::from_row(row)?);
        }
        debug!(count = records.len(), "Fetched rows");
        Ok(records)
    }
}

fn score_column(
    table: &'static str,
    id: i64,
    column: &str,
    value: i64,
) -> Result<Score, StoreError> {
    Score::try_from(value).map_err(|_| StoreError::Corrupt {
        table,
        id,
        reason: format!("{column} {value} is outside of 1-10"),
    })
}

fn clock_column(
    table: &'static str,
    id: i64,
    column: &str,
    value: Option<String>,
) -> Result<Option<ClockTime>, StoreError> {
    value
        .map(|v| {
            ClockTime::try_from(v.clone()).map_err(|_| StoreError::Corrupt {
                table,
                id,
                reason: format!("{column} '{v}' is not HH:MM"),
            })
        })
        .transpose()
}

impl Table for MoodSleepEntry {
    const NAME: &'static str = "mood_sleep";
    const SCHEMA: &'static str = "
        CREATE TABLE IF NOT EXISTS mood_sleep (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp INTEGER,
            mood INTEGER,
            sleep INTEGER);
        CREATE INDEX IF NOT EXISTS idx_mood_sleep_timestamp ON mood_sleep(timestamp);";
    const COLUMNS: &'static str = "id, timestamp, mood, sleep";

    fn insert_into(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO mood_sleep (timestamp, mood, sleep) VALUES (?1, ?2, ?3)",
            params![self.timestamp, i64::from(self.mood), i64::from(self.sleep)],
        )
    }

    fn from_row(row: &Row<'_>) -> Result<Stored<Self>, StoreError> {
        let to_error = query_error(Self::NAME);
        let id: i64 = row.get(0).map_err(&to_error)?;
        let timestamp: i64 = row.get(1).map_err(&to_error)?;
        let mood: i64 = row.get(2).map_err(&to_error)?;
        let sleep: i64 = row.get(3).map_err(&to_error)?;
        Ok(Stored {
            id,
            entry: MoodSleepEntry {
                timestamp,
                mood: score_column(Self::NAME, id, "mood", mood)?,
                sleep: score_column(Self::NAME, id, "sleep", sleep)?,
            },
        })
    }
}

impl Table for JournalEntry {
    const NAME: &'static str = "journal";
    const SCHEMA: &'static str = "
        CREATE TABLE IF NOT EXISTS journal (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp INTEGER,
            time_of_day TEXT,
            mood INTEGER,
            sleep_quality INTEGER,
            wake_up_time TEXT,
            bedtime TEXT,
            thoughts TEXT,
            gratitude TEXT);
        CREATE INDEX IF NOT EXISTS idx_journal_timestamp ON journal(timestamp);";
    const COLUMNS: &'static str =
        "id, timestamp, time_of_day, mood, sleep_quality, wake_up_time, bedtime, thoughts, gratitude";

    fn insert_into(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO journal (timestamp, time_of_day, mood, sleep_quality, wake_up_time, bedtime, thoughts, gratitude)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                self.timestamp,
                self.time_of_day.as_str(),
                i64::from(self.mood),
                self.sleep_quality.map(i64::from),
                self.wake_up_time.as_ref().map(|v| v.as_str()),
                self.bedtime.as_ref().map(|v| v.as_str()),
                self.thoughts,
                self.gratitude,
            ],
        )
    }

    fn from_row(row: &Row<'_>) -> Result<Stored<Self>, StoreError> {
        let to_error = query_error(Self::NAME);
        let id: i64 = row.get(0).map_err(&to_error)?;
        let time_of_day: String = row.get(2).map_err(&to_error)?;
        let time_of_day = time_of_day
            .parse::<TimeOfDay>()
            .map_err(|_| StoreError::Corrupt {
                table: Self::NAME,
                id,
                reason: format!("unknown time of day '{time_of_day}'"),
            })?;
        let mood: i64 = row.get(3).map_err(&to_error)?;
        let sleep_quality: Option<i64> = row.get(4).map_err(&to_error)?;
        let wake_up_time: Option<String> = row.get(5).map_err(&to_error)?;
        let bedtime: Option<String> = row.get(6).map_err(&to_error)?;

        Ok(Stored {
            id,
            entry: JournalEntry {
                timestamp: row.get(1).map_err(&to_error)?,
                time_of_day,
                mood: score_column(Self::NAME, id, "mood", mood)?,
                sleep_quality: sleep_quality
                    .map(|v| score_column(Self::NAME, id, "sleep_quality", v))
                    .transpose()?,
                wake_up_time: clock_column(Self::NAME, id, "wake_up_time", wake_up_time)?,
                bedtime: clock_column(Self::NAME, id, "bedtime", bedtime)?,
                thoughts: row
                    .get::<_, Option<String>>(7)
                    .map_err(&to_error)?
                    .unwrap_or_default(),
                gratitude: row.get(8).map_err(&to_error)?,
            },
        })
    }
}
