//! Last-city slot stored as JSON on disk

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// City shown when nothing has been searched yet
pub const DEFAULT_CITY: &str = "Stockholm";

const SLOT_FILE: &str = "last_city.json";

/// Contents of the slot file
#[derive(Debug, Serialize, Deserialize)]
struct LastCity {
    city: String,
    saved_at: DateTime<Utc>,
}

/// Reads and writes the last searched city
///
/// The slot lives in an XDG-compliant data directory (`~/.local/share/citywx/`
/// on Linux) and holds exactly one city.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    data_dir: PathBuf,
}

impl HistoryStore {
    /// Creates a store in the platform data directory
    ///
    /// Returns `None` if the directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "citywx")?;
        let data_dir = project_dirs.data_dir().to_path_buf();
        Some(Self { data_dir })
    }

    /// Creates a store in a custom directory
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn slot_path(&self) -> PathBuf {
        self.data_dir.join(SLOT_FILE)
    }

    /// The stored city, or `None` if the slot is missing, unreadable or blank
    pub fn load_last_city(&self) -> Option<String> {
        let content = fs::read_to_string(self.slot_path()).ok()?;
        let slot: LastCity = serde_json::from_str(&content).ok()?;
        let city = slot.city.trim();
        (!city.is_empty()).then(|| city.to_string())
    }

    /// The stored city, falling back to [`DEFAULT_CITY`]
    pub fn initial_city(&self) -> String {
        self.load_last_city()
            .unwrap_or_else(|| DEFAULT_CITY.to_string())
    }

    /// Replaces the stored city
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn save_last_city(&self, city: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let slot = LastCity {
            city: city.trim().to_string(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&slot)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.slot_path(), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (HistoryStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = HistoryStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_missing_slot_falls_back_to_default() {
        let (store, _temp_dir) = create_test_store();

        assert_eq!(store.load_last_city(), None);
        assert_eq!(store.initial_city(), "Stockholm");
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (store, temp_dir) = create_test_store();

        store.save_last_city("Göteborg").expect("Save should succeed");

        assert!(temp_dir.path().join("last_city.json").exists());
        assert_eq!(store.load_last_city(), Some("Göteborg".to_string()));
        assert_eq!(store.initial_city(), "Göteborg");
    }

    #[test]
    fn test_later_save_replaces_earlier() {
        let (store, _temp_dir) = create_test_store();

        store.save_last_city("Uppsala").expect("First save should succeed");
        store.save_last_city("  Malmö ").expect("Second save should succeed");

        assert_eq!(store.load_last_city(), Some("Malmö".to_string()));
    }

    #[test]
    fn test_save_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("data");
        let store = HistoryStore::with_dir(nested_path.clone());

        store.save_last_city("Lund").expect("Save should succeed");

        assert!(nested_path.join("last_city.json").exists());
    }

    #[test]
    fn test_corrupt_slot_is_ignored() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join("last_city.json"), "not json").unwrap();

        assert_eq!(store.load_last_city(), None);
        assert_eq!(store.initial_city(), DEFAULT_CITY);
    }

    #[test]
    fn test_save_fails_when_directory_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = HistoryStore::with_dir(blocker);

        assert!(store.save_last_city("Kiruna").is_err());
    }

    #[test]
    fn test_new_uses_project_data_dir() {
        if let Some(store) = HistoryStore::new() {
            let path_str = store.data_dir.to_string_lossy();
            assert!(path_str.contains("citywx"), "Data path should contain project name");
        }
    }
}
