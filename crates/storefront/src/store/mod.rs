//! Persistent key-value store and whole-collection accessors.
//!
//! The store holds one string value per key, exactly like browser
//! `localStorage`. Collections are JSON arrays stored under a fixed key and
//! are always read and written in full: every mutation is load, change in
//! memory, save.
//!
//! # Keys
//!
//! | Key | Value |
//! |---|---|
//! | `services` | `Service[]` |
//! | `orders` | `Order[]` |
//! | `payments` | `Payment[]` |
//! | `adminLogs` | `AdminLog[]` |
//! | `user` | `User` (single record) |
//! | `adminSession` | `AdminSession` (single record) |
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, used in tests and embedding
//! - [`FileStore`] - a single JSON file on disk, used by the CLI

mod file;
mod memory;

use std::future::Future;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the service catalog.
pub const SERVICES_KEY: &str = "services";
/// Key holding all orders.
pub const ORDERS_KEY: &str = "orders";
/// Key holding all deposit payments.
pub const PAYMENTS_KEY: &str = "payments";
/// Key holding the admin action log.
pub const ADMIN_LOGS_KEY: &str = "adminLogs";
/// Key holding the signed-in customer.
pub const USER_KEY: &str = "user";
/// Key holding the signed-in admin session.
pub const ADMIN_SESSION_KEY: &str = "adminSession";

/// Errors raised by a [`KeyValueStore`] or a [`Collection`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be parsed.
    ///
    /// Distinct from a missing key, which reads as "no data yet".
    #[error("corrupt data under key {key}: {source}")]
    Corrupt {
        /// Key whose value failed to parse.
        key: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A string-valued key-value store.
///
/// Implementations give last-write-wins semantics per key and no
/// cross-key atomicity.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// A record that can be found in a collection by its ID.
pub trait Record {
    /// ID type of the record.
    type Id: PartialEq;

    /// The record's ID.
    fn id(&self) -> &Self::Id;
}

/// Read a single JSON record stored under `key`.
///
/// # Errors
///
/// Returns `StoreError::Corrupt` if the stored value does not parse.
pub async fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw).map(Some).map_err(|source| {
        warn!(key, error = %source, "Failed to parse stored value");
        StoreError::Corrupt {
            key: key.to_owned(),
            source,
        }
    })
}

/// Write a single JSON record under `key`.
///
/// # Errors
///
/// Returns `StoreError` if encoding or the store write fails.
pub async fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(StoreError::Serialize)?;
    store.set(key, raw).await
}

/// A JSON array of records stored under one key.
pub struct Collection<'a, S, T> {
    store: &'a S,
    key: &'static str,
    _records: PhantomData<fn() -> T>,
}

impl<'a, S, T> Collection<'a, S, T>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned + Record + Clone,
{
    /// Bind a collection to `key` in `store`.
    #[must_use]
    pub const fn new(store: &'a S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _records: PhantomData,
        }
    }

    /// Whether the key has ever been written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store read fails.
    pub async fn exists(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(self.key).await?.is_some())
    }

    /// Load every record, in stored order.
    ///
    /// A missing key reads as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the stored array does not parse.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(read_json(self.store, self.key).await?.unwrap_or_default())
    }

    /// Replace the whole collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or the store write fails.
    pub async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        write_json(self.store, self.key, records).await
    }

    /// Find one record by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be loaded.
    pub async fn find(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.load().await?.into_iter().find(|r| r.id() == id))
    }

    /// Append a record to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the load or save fails.
    pub async fn append(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.load().await?;
        records.push(record.clone());
        self.save(&records).await?;
        Ok(record)
    }

    /// Replace the record with the same ID.
    ///
    /// Returns `false` (and writes nothing) if no record has that ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the load or save fails.
    pub async fn replace(&self, record: T) -> Result<bool, StoreError> {
        let mut records = self.load().await?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) else {
            return Ok(false);
        };
        *slot = record;
        self.save(&records).await?;
        Ok(true)
    }

    /// Replace the record with the same ID, or append it if none exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the load or save fails.
    pub async fn upsert(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.load().await?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        self.save(&records).await
    }

    /// Apply `f` to the record with the given ID and persist the result.
    ///
    /// Returns the updated record, or `None` (and writes nothing) if no
    /// record has that ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the load or save fails.
    pub async fn update<F>(&self, id: &T::Id, f: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.load().await?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        f(slot);
        let updated = slot.clone();
        self.save(&records).await?;
        Ok(Some(updated))
    }

    /// Remove the record with the given ID.
    ///
    /// Returns whether a record was removed. The collection is rewritten
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the load or save fails.
    pub async fn remove(&self, id: &T::Id) -> Result<bool, StoreError> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        self.save(&records).await?;
        Ok(records.len() != before)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u32,
        text: String,
    }

    impl Record for Note {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    fn note(id: u32, text: &str) -> Note {
        Note {
            id,
            text: text.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_missing_key_loads_empty() {
        let store = MemoryStore::new();
        let notes: Collection<'_, _, Note> = Collection::new(&store, "notes");
        assert!(notes.load().await.unwrap().is_empty());
        assert!(!notes.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let store = MemoryStore::new();
        let notes = Collection::new(&store, "notes");
        for (id, text) in [(3, "c"), (1, "a"), (2, "b")] {
            notes.append(note(id, text)).await.unwrap();
        }

        let loaded: Vec<Note> = notes.load().await.unwrap();
        assert_eq!(loaded, vec![note(3, "c"), note(1, "a"), note(2, "b")]);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_an_error() {
        let store = MemoryStore::new();
        store.set("notes", "{not json".to_owned()).await.unwrap();

        let notes: Collection<'_, _, Note> = Collection::new(&store, "notes");
        let err = notes.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "notes"));
    }

    #[tokio::test]
    async fn test_replace_missing_writes_nothing() {
        let store = MemoryStore::new();
        let notes = Collection::new(&store, "notes");
        notes.append(note(1, "a")).await.unwrap();

        assert!(!notes.replace(note(2, "b")).await.unwrap());
        assert!(notes.replace(note(1, "z")).await.unwrap());
        assert_eq!(notes.load().await.unwrap(), vec![note(1, "z")]);
    }

    #[tokio::test]
    async fn test_upsert_and_remove() {
        let store = MemoryStore::new();
        let notes = Collection::new(&store, "notes");
        notes.upsert(note(1, "a")).await.unwrap();
        notes.upsert(note(2, "b")).await.unwrap();
        notes.upsert(note(1, "a2")).await.unwrap();
        assert_eq!(
            notes.load().await.unwrap(),
            vec![note(1, "a2"), note(2, "b")]
        );

        assert!(notes.remove(&1).await.unwrap());
        assert!(!notes.remove(&1).await.unwrap());
        assert_eq!(notes.load().await.unwrap(), vec![note(2, "b")]);
    }

    #[tokio::test]
    async fn test_update_returns_new_value() {
        let store = MemoryStore::new();
        let notes = Collection::new(&store, "notes");
        notes.append(note(7, "old")).await.unwrap();

        let updated = notes
            .update(&7, |n| n.text = "new".to_owned())
            .await
            .unwrap();
        assert_eq!(updated, Some(note(7, "new")));
        assert_eq!(notes.update(&8, |_| {}).await.unwrap(), None);
    }
}
