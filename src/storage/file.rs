use super::{Result, StorageError, StoragePort};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Disk-backed storage: one JSON file per key under a base directory.
///
/// Keys are sanitized for the filesystem, so the original key is kept inside
/// the record and `keys()` reads it back from there.
pub struct FileStore {
    base_dir: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct FileRecord {
    key: String,
    value: String,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_filename(key)))
    }
}

#[async_trait]
impl StoragePort for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(raw) => {
                let record: FileRecord = serde_json::from_str(&raw)
                    .map_err(|e| StorageError::Corrupt(e.to_string()))?;
                Ok(Some(record.value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.base_dir).await?;
        let record = FileRecord {
            key: key.to_string(),
            value: value.to_string(),
        };
        let raw = serde_json::to_string(&record)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        fs::write(self.path_for(key), raw).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.path().extension().map_or(false, |ext| ext == "json") {
                if let Ok(raw) = fs::read_to_string(entry.path()).await {
                    if let Ok(record) = serde_json::from_str::<FileRecord>(&raw) {
                        keys.push(record.key);
                    }
                }
            }
        }
        Ok(keys)
    }
}

fn sanitize_filename(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("hardcaml-ide:counter", "draft json").await.unwrap();
        assert_eq!(
            store.get("hardcaml-ide:counter").await.unwrap().as_deref(),
            Some("draft json")
        );

        store.remove("hardcaml-ide:counter").await.unwrap();
        assert_eq!(store.get("hardcaml-ide:counter").await.unwrap(), None);
    }

    #[tokio::test]
    async fn keys_recover_the_original_names() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("hardcaml-ide:day1_part1", "a").await.unwrap();
        store.set("hardcaml-session-id", "b").await.unwrap();

        let mut keys = store.keys().await.unwrap();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "hardcaml-ide:day1_part1".to_string(),
                "hardcaml-session-id".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn missing_directory_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert_eq!(store.get("x").await.unwrap(), None);
        assert!(store.keys().await.unwrap().is_empty());
        store.remove("x").await.unwrap();
    }
}
