//! Owned application state: the canonical record collection.
//!
//! In connected mode the collection mirrors the remote store and is
//! only touched after a remote operation succeeds. In local fallback
//! it is the whole truth for the lifetime of the process.

use chrono::NaiveDate;

use showlog_core::{Category, CoreError, Series, SeriesId};

/// How the application is operating. Decided by the startup probe and
/// revisited only on an explicit reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// The store answered the probe; every mutation is confirmed
    /// remotely before it lands in the collection.
    Connected,
    /// The store was unreachable; records live only in memory and
    /// changes are lost when the process exits.
    LocalFallback,
}

impl StoreMode {
    pub fn label(&self) -> &'static str {
        match self {
            StoreMode::Connected => "connected",
            StoreMode::LocalFallback => "local data only",
        }
    }
}

/// The record collection the rest of the application reads from.
#[derive(Debug, Default)]
pub struct SeriesStore {
    records: Vec<Series>,
}

impl SeriesStore {
    pub fn new(records: Vec<Series>) -> Self {
        Self { records }
    }

    /// Starter collection used when the store is unreachable.
    pub fn seeded() -> Self {
        Self::new(vec![
            Series {
                id: 1,
                title: "Breaking Bad".into(),
                season_count: 5,
                release_date: date(2008, 1, 20),
                director: "Vince Gilligan".into(),
                production_company: "Sony Pictures".into(),
                category: Category::Drama,
                watched_date: date(2023, 6, 15),
            },
            Series {
                id: 2,
                title: "Stranger Things".into(),
                season_count: 4,
                release_date: date(2016, 7, 15),
                director: "The Duffer Brothers".into(),
                production_company: "Netflix".into(),
                category: Category::ScienceFiction,
                watched_date: date(2023, 8, 20),
            },
        ])
    }

    pub fn all(&self) -> &[Series] {
        &self.records
    }

    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.records.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record to the end of the collection.
    pub fn insert(&mut self, series: Series) {
        self.records.push(series);
    }

    /// Replace the record with the same id.
    pub fn replace(&mut self, series: Series) -> Result<(), CoreError> {
        let slot = self
            .records
            .iter_mut()
            .find(|s| s.id == series.id)
            .ok_or(CoreError::NotFound {
                entity: "series",
                id: series.id,
            })?;
        *slot = series;
        Ok(())
    }

    /// Replace the record with the same id, or append it when the
    /// collection holds no copy yet.
    pub fn upsert(&mut self, series: Series) {
        match self.records.iter_mut().find(|s| s.id == series.id) {
            Some(slot) => *slot = series,
            None => self.records.push(series),
        }
    }

    /// Remove and return the record with the given id.
    pub fn remove(&mut self, id: SeriesId) -> Result<Series, CoreError> {
        let index = self
            .records
            .iter()
            .position(|s| s.id == id)
            .ok_or(CoreError::NotFound {
                entity: "series",
                id,
            })?;
        Ok(self.records.remove(index))
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn seeded_store_holds_the_two_starter_records() {
        let store = SeriesStore::seeded();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().title, "Breaking Bad");
        assert_eq!(store.get(2).unwrap().title, "Stranger Things");
        assert_eq!(store.get(2).unwrap().category, Category::ScienceFiction);
    }

    #[test]
    fn replace_swaps_the_record_with_the_same_id() {
        let mut store = SeriesStore::seeded();
        let mut updated = store.get(1).unwrap().clone();
        updated.season_count = 6;

        store.replace(updated).unwrap();

        assert_eq!(store.get(1).unwrap().season_count, 6);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_unknown_id_is_not_found() {
        let mut store = SeriesStore::seeded();
        let mut ghost = store.get(1).unwrap().clone();
        ghost.id = 99;

        let err = store.replace(ghost).unwrap_err();
        assert_matches!(err, CoreError::NotFound { id: 99, .. });
    }

    #[test]
    fn upsert_replaces_known_ids_and_appends_unknown_ones() {
        let mut store = SeriesStore::seeded();
        let mut updated = store.get(1).unwrap().clone();
        updated.season_count = 6;
        store.upsert(updated);
        assert_eq!(store.get(1).unwrap().season_count, 6);
        assert_eq!(store.len(), 2);

        let mut newcomer = store.get(1).unwrap().clone();
        newcomer.id = 3;
        newcomer.title = "The Wire".into();
        store.upsert(newcomer);
        assert_eq!(store.get(3).unwrap().title, "The Wire");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_returns_the_record_and_shrinks_the_collection() {
        let mut store = SeriesStore::seeded();

        let removed = store.remove(1).unwrap();

        assert_eq!(removed.title, "Breaking Bad");
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
        assert_matches!(store.remove(1), Err(CoreError::NotFound { id: 1, .. }));
    }
}
