use super::traits::KeyValueStore;
use super::PersistenceError;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-backed key-value store: one pretty-printed `<key>.json` per key.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub async fn ensure_dir(&self) -> Result<(), PersistenceError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    pub fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        let contents = match tokio::fs::read_to_string(self.file_path(key)).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_str(&contents)?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), PersistenceError> {
        self.ensure_dir().await?;
        let path = self.file_path(key);
        let json = serde_json::to_string_pretty(value)?;

        // Sibling temp file, then rename over the target
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        match tokio::fs::remove_file(self.file_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data"));
        let value = json!([{"id": 1, "name": "History"}]);

        store.set("remind_subjects", &value).await.unwrap();
        assert!(store.file_path("remind_subjects").exists());
        assert_eq!(store.get("remind_subjects").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());
        assert_eq!(store.get("remind_logs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());
        store.set("k", &json!([1])).await.unwrap();
        store.set("k", &json!([1, 2])).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!([1, 2])));
        assert!(!dir.path().join("k.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());
        std::fs::write(store.file_path("k"), "{oops").unwrap();
        assert!(matches!(
            store.get("k").await,
            Err(PersistenceError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());
        store.set("k", &json!({})).await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_key_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());
        std::fs::create_dir(store.file_path("k")).unwrap();
        assert!(matches!(store.get("k").await, Err(PersistenceError::Io(_))));
    }
}
