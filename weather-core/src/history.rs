//! File-backed search history.
//!
//! The whole list is read, modified and rewritten on every mutation. A
//! per-store mutex serializes those cycles so concurrent requests in one
//! process cannot overwrite each other's changes. Separate processes
//! sharing the same file are not coordinated.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{error::HistoryError, model::HistoryEntry};

#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted list, reporting why it could not be read.
    pub async fn read(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| HistoryError::Io {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&data).map_err(|source| HistoryError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// The stored entries in insertion order. A missing or unreadable file
    /// yields an empty list.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        match self.read().await {
            Ok(entries) => entries,
            Err(HistoryError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "history unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Record `city` under a freshly generated id.
    pub async fn append(&self, city: &str) -> Result<HistoryEntry, HistoryError> {
        if city.trim().is_empty() {
            return Err(HistoryError::EmptyCity);
        }

        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_for_update().await?;

        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            city: city.to_string(),
        };
        entries.push(entry.clone());
        self.write(&entries).await?;

        tracing::info!(id = %entry.id, city = %entry.city, "city added to history");
        Ok(entry)
    }

    /// Drop the entry with `id`. Unknown ids leave the list untouched.
    pub async fn remove(&self, id: &str) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_for_update().await?;

        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        self.write(&entries).await?;

        if entries.len() < before {
            tracing::info!(id, "city removed from history");
        } else {
            tracing::debug!(id, "no history entry with this id");
        }
        Ok(())
    }

    /// Current entries for a mutation. A missing or corrupt file starts a
    /// fresh list; any other I/O failure aborts so the file is not clobbered.
    async fn load_for_update(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self.read().await {
            Ok(entries) => Ok(entries),
            Err(HistoryError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Vec::new())
            }
            Err(err @ HistoryError::Parse { .. }) => {
                tracing::warn!(error = %err, "history corrupt, starting a new list");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Replace the file contents with `entries`, written to a sibling temp
    /// file first and renamed into place.
    async fn write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let io_err = |source: std::io::Error| HistoryError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(HistoryError::Serialize)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("db").join("searchHistory.json"))
    }

    #[tokio::test]
    async fn list_on_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.list().await.is_empty());
        assert!(matches!(store.read().await, Err(HistoryError::Io { .. })));
    }

    #[tokio::test]
    async fn list_on_corrupt_file_is_empty_but_read_reports_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("searchHistory.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = HistoryStore::new(&path);

        assert!(store.list().await.is_empty());
        assert!(matches!(store.read().await, Err(HistoryError::Parse { .. })));
    }

    #[tokio::test]
    async fn append_then_list_shows_entry() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let entry = store.append("Paris").await.unwrap();
        let entries = store.list().await;

        assert_eq!(entries, vec![entry.clone()]);
        assert_eq!(entry.city, "Paris");
        assert!(Uuid::parse_str(&entry.id).is_ok());
    }

    #[tokio::test]
    async fn duplicate_cities_get_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for _ in 0..5 {
            store.append("Paris").await.unwrap();
        }
        let entries = store.list().await;

        assert_eq!(entries.len(), 5);
        let ids: HashSet<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert!(entries.iter().all(|e| e.city == "Paris"));
    }

    #[tokio::test]
    async fn append_keeps_city_as_submitted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let entry = store.append(" new york").await.unwrap();
        assert_eq!(entry.city, " new york");
    }

    #[tokio::test]
    async fn append_rejects_blank_city() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.append("  ").await, Err(HistoryError::EmptyCity)));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn remove_present_id_preserves_the_rest() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let a = store.append("Paris").await.unwrap();
        let b = store.append("Lyon").await.unwrap();
        let c = store.append("Nice").await.unwrap();

        store.remove(&b.id).await.unwrap();

        assert_eq!(store.list().await, vec![a, c]);
    }

    #[tokio::test]
    async fn remove_absent_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append("Paris").await.unwrap();
        let before = store.list().await;

        store.remove("does-not-exist").await.unwrap();

        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn append_over_corrupt_file_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("searchHistory.json");
        std::fs::write(&path, "garbage").unwrap();
        let store = HistoryStore::new(&path);

        store.append("Paris").await.unwrap();

        let entries = store.read().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].city, "Paris");
    }

    #[tokio::test]
    async fn unreadable_history_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("searchHistory.json");
        std::fs::create_dir_all(path.join("keep")).unwrap();
        let store = HistoryStore::new(&path);

        assert!(store.list().await.is_empty());
        assert!(matches!(store.append("Paris").await, Err(HistoryError::Io { .. })));
        assert!(matches!(store.remove("any").await, Err(HistoryError::Io { .. })));
        assert!(path.join("keep").is_dir());
    }

    #[tokio::test]
    async fn file_is_indented_json_array_of_id_and_city() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let entry = store.append("Paris").await.unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();

        let expected = format!(
            "[\n  {{\n    \"id\": \"{}\",\n    \"city\": \"Paris\"\n  }}\n]",
            entry.id
        );
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(&format!("City {i}")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.list().await.len(), 20);
    }
}
