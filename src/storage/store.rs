use std::io;

/// A persistent string-keyed, string-valued store.
///
/// Implementations hold whole documents per key; there are no partial
/// updates and no transactions. Concurrent writers race and the last write
/// wins.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backing storage cannot
    /// be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backing storage cannot
    /// be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Failure of the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key contains characters the store cannot use.
    #[error("invalid key '{0}': only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey(String),

    /// The backing storage failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Checks that a key is safe to use as a file stem.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
