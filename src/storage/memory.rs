use std::cell::RefCell;

use super::{Entry, RecordStore, StoreError, Stored};

/// Keeps entries in memory. Mostly useful for tests and for callers that don't want a file.
///
/// Rows are kept in insertion order, so fetching doesn't sort them.
#[derive(Debug)]
pub struct MemoryStore<E> {
    rows: RefCell<Vec<Stored<E>>>,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            rows: RefCell::new(Vec::new()),
        }
    }
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl<E: Entry> RecordStore<E> for MemoryStore<E> {
    fn create_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn insert(&self, entry: &E) -> Result<Stored<E>, StoreError> {
        let mut rows = self.rows.borrow_mut();
        let id = rows.last().map_or(1, |v| v.id + 1);
        let stored = Stored {
            id,
            entry: entry.clone(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    fn fetch_since(&self, cutoff: Option<i64>) -> Result<Vec<Stored<E>>, StoreError> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|v| cutoff.map_or(true, |cutoff| v.timestamp() >= cutoff))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        storage::{entities::MoodSleepEntry, RecordStore},
        utils::score::Score,
    };

    use super::MemoryStore;

    fn entry(timestamp: i64) -> MoodSleepEntry {
        MoodSleepEntry {
            timestamp,
            mood: Score::new_opt(5).unwrap(),
            sleep: Score::new_opt(5).unwrap(),
        }
    }

    #[test]
    fn test_memory_store_assigns_ids_and_filters() {
        let store = MemoryStore::<MoodSleepEntry>::new();
        assert!(store.is_empty());
        let a = store.insert(&entry(30)).unwrap();
        let b = store.insert(&entry(10)).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.len(), 2);

        let recent = store.fetch_since(Some(20)).unwrap();
        assert_eq!(recent, vec![a.clone()]);
        // Insertion order is kept; ordering by time is the caller's job.
        assert_eq!(store.fetch_since(None).unwrap(), vec![a, b]);
    }
}
