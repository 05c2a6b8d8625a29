use crate::{
    domain::{Collection, Record},
    storage::{KeyValueStore, StoreError, store::validate_key},
};

/// Reads and writes whole record collections over a [`KeyValueStore`].
///
/// Storage failures never reach the caller. A failed or corrupt read yields
/// an empty collection and a failed write is dropped; both are logged as
/// warnings.
#[derive(Debug, Clone)]
pub struct RecordStore<S> {
    store: S,
    key_prefix: String,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Wraps a key-value store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            key_prefix: String::new(),
        }
    }

    /// Prepends `prefix` to every collection key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if the prefix contains characters
    /// that are not allowed in a key.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Result<Self, StoreError> {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            validate_key(&prefix)?;
        }
        self.key_prefix = prefix;
        Ok(self)
    }

    /// The underlying key-value store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The key a collection is stored under.
    #[must_use]
    pub fn key(&self, collection: Collection) -> String {
        format!("{}{}", self.key_prefix, collection.key())
    }

    /// Reads a collection as untyped JSON values.
    ///
    /// Returns an empty sequence if the collection is absent or unreadable.
    #[must_use]
    pub fn read_collection(&self, collection: Collection) -> Vec<serde_json::Value> {
        let key = self.key(collection);

        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored {collection}, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read {key}: {e}");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {key}: {e}");
            Vec::new()
        })
    }

    /// Replaces a collection with untyped JSON values.
    pub fn write_collection(&mut self, collection: Collection, records: &[serde_json::Value]) {
        self.write_as(collection, records);
    }

    /// Reads every record of type `R`, in insertion order.
    ///
    /// Records that do not decode as `R` are skipped with a warning. Returns
    /// an empty sequence if the collection is absent or unreadable.
    #[must_use]
    pub fn read<R: Record>(&self) -> Vec<R> {
        self.read_collection(R::COLLECTION)
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed record in {}: {e}", R::COLLECTION);
                    None
                }
            })
            .collect()
    }

    /// Replaces the collection of type `R`.
    pub fn write<R: Record>(&mut self, records: &[R]) {
        self.write_as(R::COLLECTION, records);
    }

    /// Appends a record to the end of its collection.
    ///
    /// Stored records are carried over as they are, including any that
    /// [`read`](Self::read) would skip.
    pub fn append<R: Record>(&mut self, record: R) {
        let value = match serde_json::to_value(&record) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to serialize {}: {e}", record.id());
                return;
            }
        };

        let mut records = self.read_collection(R::COLLECTION);
        tracing::info!("Adding {} to {}", record.id(), R::COLLECTION);
        records.push(value);
        self.write_collection(R::COLLECTION, &records);
    }

    fn write_as<T: serde::Serialize>(&mut self, collection: Collection, records: &[T]) {
        let key = self.key(collection);

        let raw = match serde_json::to_string(records) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize {key}: {e}");
                return;
            }
        };

        if let Err(e) = self.store.set(&key, &raw) {
            tracing::warn!("Failed to write {key}: {e}");
        }
    }
}
