//! Quote Store
//!
//! Owns the in-memory quote list and keeps it equal to the persisted copy.
//! Mutations compute the next list, persist it, and only then commit it, so a
//! failed write leaves both sides untouched.

use chrono::Utc;

use minlabs_storage::SharedStorage;

use crate::error::QuoteError;
use crate::record::{QuoteFields, QuoteRecord, QuoteUpdate};
use crate::Result;

pub const DEFAULT_STORAGE_KEY: &str = "minlabs_presupuestos";

pub struct QuoteStore {
    storage: SharedStorage,
    key: String,
    /// Newest first
    quotes: Vec<QuoteRecord>,
}

impl QuoteStore {
    /// Load the persisted list. Missing or unreadable data yields an empty store.
    pub fn load(storage: SharedStorage, key: impl Into<String>) -> Self {
        let key = key.into();

        let quotes = match storage.get_item(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<QuoteRecord>>(&raw) {
                Ok(quotes) => quotes,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding unreadable quote list");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read quote list");
                Vec::new()
            }
        };

        tracing::info!(key = %key, count = quotes.len(), "Loaded quotes");

        Self {
            storage,
            key,
            quotes,
        }
    }

    pub fn quotes(&self) -> &[QuoteRecord] {
        &self.quotes
    }

    pub fn get(&self, id: i64) -> Option<&QuoteRecord> {
        self.quotes.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Create a quote at the head of the list.
    pub fn create(&mut self, fields: QuoteFields) -> Result<QuoteRecord> {
        let record = QuoteRecord::new(self.next_id()?, fields);

        let mut next = Vec::with_capacity(self.quotes.len() + 1);
        next.push(record.clone());
        next.extend(self.quotes.iter().cloned());

        self.commit(next)?;

        tracing::info!(quote_id = %record.id, service = %record.service, "Created quote");

        Ok(record)
    }

    /// Update the quote with `id`. Returns `false` when no such quote exists.
    pub fn update(&mut self, id: i64, update: QuoteUpdate) -> Result<bool> {
        let Some(index) = self.quotes.iter().position(|q| q.id == id) else {
            tracing::debug!(quote_id = %id, "Update skipped, quote not found");
            return Ok(false);
        };

        let mut next = self.quotes.clone();
        next[index].apply(update);

        self.commit(next)?;

        tracing::info!(quote_id = %id, "Updated quote");

        Ok(true)
    }

    /// Remove the quote with `id`. Returns `true` if a quote was removed.
    ///
    /// The list is persisted even when nothing matched.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let next: Vec<QuoteRecord> = self
            .quotes
            .iter()
            .filter(|q| q.id != id)
            .cloned()
            .collect();
        let removed = next.len() != self.quotes.len();

        self.commit(next)?;

        if removed {
            tracing::info!(quote_id = %id, "Deleted quote");
        }

        Ok(removed)
    }

    /// Write the full list under the storage key.
    pub fn persist(&self) -> Result<()> {
        self.write(&self.quotes)
    }

    fn commit(&mut self, next: Vec<QuoteRecord>) -> Result<()> {
        self.write(&next)?;
        self.quotes = next;
        Ok(())
    }

    fn write(&self, quotes: &[QuoteRecord]) -> Result<()> {
        let raw = serde_json::to_string(quotes)?;
        self.storage.set_item(&self.key, &raw)?;
        Ok(())
    }

    /// Milliseconds since the epoch, bumped past the newest existing id.
    fn next_id(&self) -> Result<i64> {
        let now = Utc::now().timestamp_millis();
        match self.quotes.iter().map(|q| q.id).max() {
            Some(max) if now <= max => max.checked_add(1).ok_or(QuoteError::IdExhausted),
            _ => Ok(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ServiceType;
    use minlabs_storage::{Database, KeyValueStore, MemoryStorage, StorageError};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn persisted(storage: &SharedStorage) -> Vec<QuoteRecord> {
        let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn seeded(quotes: &[QuoteRecord]) -> (SharedStorage, QuoteStore) {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        storage
            .set_item(DEFAULT_STORAGE_KEY, &serde_json::to_string(quotes).unwrap())
            .unwrap();
        let store = QuoteStore::load(storage.clone(), DEFAULT_STORAGE_KEY);
        (storage, store)
    }

    fn record(id: i64, name: &str) -> QuoteRecord {
        QuoteRecord::new(
            id,
            QuoteFields::new(name, format!("{name}@x.com"), ServiceType::Prototyping, "part"),
        )
    }

    /// Storage whose writes can be made to fail.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: AtomicBool,
    }

    impl KeyValueStore for FlakyStorage {
        fn get_item(&self, key: &str) -> minlabs_storage::Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> minlabs_storage::Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::other("quota exceeded")));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> minlabs_storage::Result<()> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let store = QuoteStore::load(storage, DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        storage.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let store = QuoteStore::load(storage.clone(), DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());

        // Storage is only rewritten by the next mutation
        assert_eq!(
            storage.get_item(DEFAULT_STORAGE_KEY).unwrap(),
            Some("{not json".to_string())
        );
    }

    #[test]
    fn test_create_into_empty_store() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let mut store = QuoteStore::load(storage.clone(), DEFAULT_STORAGE_KEY);

        let created = store
            .create(QuoteFields::new("Ana", "a@x.com", ServiceType::Cad, "panel"))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.quotes()[0], created);
        assert_eq!(created.name, "Ana");
        assert_eq!(created.email, "a@x.com");
        assert_eq!(created.service, ServiceType::Cad);
        assert_eq!(created.description, "panel");
        assert!(created.id > 0);
        assert_eq!(persisted(&storage), vec![created]);
    }

    #[test]
    fn test_create_is_newest_first_with_unique_ids() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let mut store = QuoteStore::load(storage.clone(), DEFAULT_STORAGE_KEY);

        let mut ids = Vec::new();
        for i in 0..5 {
            let created = store
                .create(QuoteFields::new(
                    format!("client {i}"),
                    "c@x.com",
                    ServiceType::Composites,
                    "",
                ))
                .unwrap();
            assert_eq!(store.quotes()[0].id, created.id);
            assert_eq!(store.len(), i + 1);
            assert_eq!(persisted(&storage), store.quotes());
            ids.push(created.id);
        }

        // Strictly increasing even within one millisecond
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let names: Vec<&str> = store.quotes().iter().map(|q| q.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["client 4", "client 3", "client 2", "client 1", "client 0"]
        );
    }

    #[test]
    fn test_id_bumped_past_future_ids() {
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        let (_, mut store) = seeded(&[record(far_future, "late")]);
        let created = store
            .create(QuoteFields::new("next", "n@x.com", ServiceType::Cad, ""))
            .unwrap();
        assert_eq!(created.id, far_future + 1);
    }

    #[test]
    fn test_create_fails_when_ids_exhausted() {
        let (storage, mut store) = seeded(&[record(i64::MAX, "last")]);
        let before_raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap();

        let result = store.create(QuoteFields::new("next", "n@x.com", ServiceType::Cad, ""));
        assert!(matches!(result, Err(QuoteError::IdExhausted)));
        assert_eq!(store.quotes(), &[record(i64::MAX, "last")]);
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap(), before_raw);
    }

    #[test]
    fn test_persist_overwrites_stale_value() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        storage.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let store = QuoteStore::load(storage.clone(), DEFAULT_STORAGE_KEY);

        store.persist().unwrap();
        assert_eq!(
            storage.get_item(DEFAULT_STORAGE_KEY).unwrap(),
            Some("[]".to_string())
        );

        let (storage, store) = seeded(&[record(2, "B"), record(1, "A")]);
        storage.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        store.persist().unwrap();
        assert_eq!(persisted(&storage), store.quotes());
    }

    #[test]
    fn test_delete_existing() {
        // B was created after A so it sits at the head
        let (storage, mut store) = seeded(&[record(2, "B"), record(1, "A")]);

        assert!(store.delete(1).unwrap());
        assert_eq!(store.quotes(), &[record(2, "B")]);
        assert_eq!(persisted(&storage), vec![record(2, "B")]);
    }

    #[test]
    fn test_delete_absent_leaves_list_unchanged() {
        let (storage, mut store) = seeded(&[record(2, "B"), record(1, "A")]);
        let before = store.quotes().to_vec();

        assert!(!store.delete(99).unwrap());
        assert!(!store.delete(99).unwrap());
        assert_eq!(store.quotes(), before.as_slice());
        assert_eq!(persisted(&storage), before);
    }

    #[test]
    fn test_update_existing_changes_only_that_record() {
        let (storage, mut store) = seeded(&[record(2, "B"), record(1, "A")]);

        assert!(store.update(2, QuoteUpdate::name("Beto")).unwrap());

        let b = store.get(2).unwrap();
        assert_eq!(b.id, 2);
        assert_eq!(b.name, "Beto");
        assert_eq!(b.email, "B@x.com");
        assert_eq!(b.service, ServiceType::Prototyping);
        assert_eq!(b.description, "part");
        assert_eq!(store.get(1), Some(&record(1, "A")));
        assert_eq!(persisted(&storage), store.quotes());
    }

    #[test]
    fn test_update_absent_is_noop() {
        let (storage, mut store) = seeded(&[record(2, "B")]);
        let before_raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap();

        assert!(!store.update(7, QuoteUpdate::name("Nobody")).unwrap());
        assert_eq!(store.quotes(), &[record(2, "B")]);
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap(), before_raw);
    }

    #[test]
    fn test_failed_write_keeps_prior_state() {
        let flaky = Arc::new(FlakyStorage::default());
        let storage: SharedStorage = flaky.clone();
        let mut store = QuoteStore::load(storage.clone(), DEFAULT_STORAGE_KEY);
        let kept = store
            .create(QuoteFields::new("Ana", "a@x.com", ServiceType::Cad, "panel"))
            .unwrap();

        flaky.fail_writes.store(true, Ordering::SeqCst);

        assert!(store
            .create(QuoteFields::new("Lost", "l@x.com", ServiceType::Cad, ""))
            .is_err());
        assert!(store.update(kept.id, QuoteUpdate::name("Changed")).is_err());
        assert!(store.delete(kept.id).is_err());

        assert_eq!(store.quotes(), &[kept.clone()]);
        assert_eq!(persisted(&storage), vec![kept]);
    }

    #[test]
    fn test_reload_from_database() {
        let db = Database::open_in_memory().unwrap();
        let storage: SharedStorage = Arc::new(db.clone());
        let mut store = QuoteStore::load(storage, DEFAULT_STORAGE_KEY);
        store
            .create(QuoteFields::new("Ana", "a@x.com", ServiceType::Cad, "panel"))
            .unwrap();
        store
            .create(QuoteFields::new(
                "Luis",
                "l@x.com",
                ServiceType::ReverseEngineering,
                "bracket",
            ))
            .unwrap();

        let reloaded = QuoteStore::load(Arc::new(db), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.quotes(), store.quotes());
    }
}
