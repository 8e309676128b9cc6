//!  Storage is organized through [RecordStore].
//!  The basic idea is:
//!   - Every kind of entry lives in its own single table.
//!   - Rows are only ever appended. There is no update or delete.
//!   - Each operation acquires the underlying storage and releases it before returning, so no
//!     connection outlives a single call.

pub mod entities;
pub mod memory;
pub mod sqlite;

use std::{ops::Deref, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage at {path} is unavailable: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },
    #[error("query on table {table} failed: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("row {id} in table {table} is corrupt: {reason}")]
    Corrupt {
        table: &'static str,
        id: i64,
        reason: String,
    },
}

/// An entry before it has been persisted.
pub trait Entry: Clone {
    /// Creation time in epoch seconds.
    fn timestamp(&self) -> i64;
}

/// An entry together with the identity the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stored<E> {
    pub id: i64,
    #[serde(flatten)]
    pub entry: E,
}

impl<E: Entry> Stored<E> {
    pub fn timestamp(&self) -> i64 {
        self.entry.timestamp()
    }
}

/// Interface for abstracting append-only storage of entries.
pub trait RecordStore<E: Entry> {
    /// Creates the backing table. Calling it on an existing table does nothing.
    fn create_schema(&self) -> Result<(), StoreError>;

    /// Appends an entry and returns it with its assigned id.
    fn insert(&self, entry: &E) -> Result<Stored<E>, StoreError>;

    /// Retrieves entries with `timestamp >= cutoff`, or every entry when there's no cutoff.
    fn fetch_since(&self, cutoff: Option<i64>) -> Result<Vec<Stored<E>>, StoreError>;
}

impl<E: Entry, T: Deref> RecordStore<E> for T
where
    T::Target: RecordStore<E>,
{
    fn create_schema(&self) -> Result<(), StoreError> {
        self.deref().create_schema()
    }

    fn insert(&self, entry: &E) -> Result<Stored<E>, StoreError> {
        self.deref().insert(entry)
    }

    fn fetch_since(&self, cutoff: Option<i64>) -> Result<Vec<Stored<E>>, StoreError> {
        self.deref().fetch_since(cutoff)
    }
}
