//! File-backed storage: one file per key under a base directory.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{StorageBackend, StorageError};

/// File-backed [`StorageBackend`].
///
/// Each key maps to one file under the base directory. Writes go through a
/// temp file followed by a rename, so a crash mid-write leaves the previous
/// value intact rather than a truncated one. The directory is created on
/// first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The directory this storage keeps its files in.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Map a storage key to its backing file path.
    ///
    /// Key bytes outside `[A-Za-z0-9._-]` are escaped as `%XX` so arbitrary
    /// keys (e.g. `@GoMarket:cartProducts`) become valid, collision-free
    /// file names.
    fn key_path(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                    name.push(char::from(byte));
                }
                _ => {
                    // Infallible: writing to a String cannot fail.
                    let _ = write!(name, "%{byte:02X}");
                }
            }
        }
        self.base_dir.join(name)
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.base_dir).await?;

        let path = self.key_path(key);
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let value = storage.get("@GoMarket:cartProducts").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage
            .set("@GoMarket:cartProducts", "[1,2,3]".to_owned())
            .await
            .unwrap();
        let value = storage.get("@GoMarket:cartProducts").await.unwrap();
        assert_eq!(value.as_deref(), Some("[1,2,3]"));
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("k", "old".to_owned()).await.unwrap();
        storage.set("k", "new".to_owned()).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_escaped_keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("a:b", "colon".to_owned()).await.unwrap();
        storage.set("a%3Ab", "literal".to_owned()).await.unwrap();

        assert_eq!(
            storage.get("a:b").await.unwrap().as_deref(),
            Some("colon")
        );
        // '%' itself is escaped, so the literal name lands in a different file.
        assert_eq!(
            storage.get("a%3Ab").await.unwrap().as_deref(),
            Some("literal")
        );
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("key", "value".to_owned()).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["key".to_owned()]);
    }
}
