//! JSON file-based persistence medium.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling file
//! first and are then renamed over the target, so a crash mid-write never leaves
//! a half-written record behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: one file read per call, no caching (hydration reads once)
//! - **Write**: O(n) in record size, full rewrite per call

use crate::domain::error::{FlicklistError, Result};
use crate::storage::backend::Storage;
use std::path::{Path, PathBuf};

/// File-backed key-value medium rooted at a directory.
///
/// # File Layout
///
/// ```text
/// <dir>/
///   movieFavorites.json      ← current record
///   movieFavorites.json.tmp  ← transient, only during a write
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens a file medium rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flicklist::storage::FileStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = FileStorage::new(PathBuf::from("/tmp/flicklist"))?;
    /// # Ok::<(), flicklist::FlicklistError>(())
    /// ```
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(dir = ?dir, "initializing file storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the record files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the file path for `key`.
    ///
    /// Keys are restricted to a filename-safe alphabet so a key can never
    /// escape the storage directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');

        if !valid {
            return Err(FlicklistError::Storage(format!("invalid storage key: {key:?}")));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("file_read", key = %key).entered();

        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "record loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no record stored");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("file_write", key = %key, bytes = value.len()).entered();

        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path().to_path_buf()).expect("storage");

        assert!(storage.write("../outside", "[]").is_err());
        assert!(storage.write(".hidden", "[]").is_err());
        assert!(storage.read("").is_err());
    }

    #[test]
    fn missing_record_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("nested")).expect("storage");
        assert!(storage.read("movieFavorites").expect("read").is_none());
    }

    #[test]
    fn write_replaces_previous_record_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path().to_path_buf()).expect("storage");

        storage.write("movieFavorites", "[1]").expect("first write");
        storage.write("movieFavorites", "[2]").expect("second write");

        assert_eq!(storage.read("movieFavorites").expect("read").as_deref(), Some("[2]"));
        assert!(!dir.path().join("movieFavorites.json.tmp").exists());
    }
}
