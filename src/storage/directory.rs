//! A filesystem backed key-value store
//!
//! The [`DirectoryStore`] keeps each key as a JSON document named
//! `<key>.json` in a single directory.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::storage::{KeyValueStore, StoreError, store::validate_key};

const EXTENSION: &str = "json";

/// A filesystem backed key-value store.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    /// The directory documents are stored in.
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens a store rooted at the given directory.
    ///
    /// The directory is created on the first write, not here.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The directory documents are stored in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file a key is stored in.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{EXTENSION}"))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!("Read {} bytes from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        fs::create_dir_all(&self.root)?;

        let path = self.path_for(key);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(value.as_bytes())?;
        writer.flush()?;

        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(tmp.path().join("data"));

        assert_eq!(store.get("donors").unwrap(), None);
    }

    #[test]
    fn set_creates_the_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nested").join("data");
        let mut store = DirectoryStore::new(root.clone());

        store.set("donors", "[]").unwrap();

        assert!(root.join("donors.json").is_file());
        assert_eq!(store.get("donors").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::new(tmp.path().to_path_buf());

        assert!(matches!(
            store.set("../escape", "[]"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get("a/b"), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn unreadable_document_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(tmp.path().to_path_buf());

        // a directory where the document should be
        fs::create_dir(tmp.path().join("donors.json")).unwrap();

        assert!(matches!(store.get("donors"), Err(StoreError::Io(_))));
    }
}
