use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::PersistenceError;
use crate::score::HighScores;

pub const APP_DIR_NAME: &str = "snake-arcade";
const RECORDS_FILE_NAME: &str = "highscores.json";

/// Everything that survives a restart: the sound flag and the records.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceState {
    pub sound: bool,
    pub records: HighScores,
}

impl Default for PersistenceState {
    fn default() -> Self {
        Self {
            sound: true,
            records: HighScores::default(),
        }
    }
}

/// Backing storage for [`PersistenceState`].
pub trait RecordStore {
    /// Loads the saved state. A store that has never been written yields the
    /// defaults.
    fn load(&self) -> Result<PersistenceState, PersistenceError>;

    fn save(&self, state: &PersistenceState) -> Result<(), PersistenceError>;
}

/// Loads from `store`, falling back to defaults when the store is unusable.
pub fn load_or_default(store: &dyn RecordStore) -> PersistenceState {
    match store.load() {
        Ok(state) => state,
        Err(error) => {
            warn!(%error, "record store unavailable, using defaults");
            PersistenceState::default()
        }
    }
}

/// Saves to `store`, logging instead of failing.
pub fn save_best_effort(store: &dyn RecordStore, state: &PersistenceState) {
    if let Err(error) = store.save(state) {
        warn!(%error, "failed to save records");
    }
}

/// Returns the platform-correct application data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Pretty-printed JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the local data directory.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(data_dir().join(RECORDS_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonRecordStore {
    fn load(&self) -> Result<PersistenceState, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no record store yet, starting fresh");
                return Ok(PersistenceState::default());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut state: PersistenceState =
            serde_json::from_str(&raw).map_err(|source| PersistenceError::Parse {
                path: self.path.clone(),
                source,
            })?;
        state.records.fill_missing();
        Ok(state)
    }

    fn save(&self, state: &PersistenceState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::config::{Difficulty, WrapMode};
    use crate::error::PersistenceError;

    use super::{JsonRecordStore, PersistenceState, RecordStore, load_or_default};

    #[test]
    fn records_survive_a_save_and_load() {
        let store = JsonRecordStore::new(unique_test_path("round_trip"));
        let mut state = PersistenceState {
            sound: false,
            ..PersistenceState::default()
        };
        state.records.set(Difficulty::Hard, WrapMode::On, 110);

        store.save(&state).expect("save should succeed");
        let loaded = store.load().expect("load should succeed");

        assert_eq!(loaded, state);
        cleanup_test_path(store.path());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = JsonRecordStore::new(unique_test_path("missing"));

        let loaded = store.load().expect("missing file should load defaults");

        assert_eq!(loaded, PersistenceState::default());
        assert!(loaded.sound);
    }

    #[test]
    fn malformed_file_is_an_error_and_falls_back() {
        let path = unique_test_path("malformed");
        write_raw(&path, "not-json");
        let store = JsonRecordStore::new(path);

        assert!(matches!(store.load(), Err(PersistenceError::Parse { .. })));
        assert_eq!(load_or_default(&store), PersistenceState::default());

        cleanup_test_path(store.path());
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let path = unique_test_path("partial");
        write_raw(&path, r#"{ "records": { "easy_on": 40 } }"#);
        let store = JsonRecordStore::new(path);

        let loaded = store.load().expect("partial file should load");

        assert!(loaded.sound);
        assert_eq!(loaded.records.get(Difficulty::Easy, WrapMode::On), 40);
        assert_eq!(loaded.records.get(Difficulty::Hard, WrapMode::Off), 0);
        cleanup_test_path(store.path());
    }

    #[test]
    fn saved_document_uses_flat_record_keys() {
        let store = JsonRecordStore::new(unique_test_path("format"));
        let mut state = PersistenceState::default();
        state.records.set(Difficulty::Normal, WrapMode::Off, 70);

        store.save(&state).expect("save should succeed");
        let raw = fs::read_to_string(store.path()).expect("file exists");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

        assert_eq!(json["sound"], serde_json::Value::Bool(true));
        assert_eq!(json["records"]["normal_off"].as_u64(), Some(70));
        assert_eq!(json["records"]["hard_on"].as_u64(), Some(0));
        cleanup_test_path(store.path());
    }

    fn write_raw(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-arcade-record-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &std::path::Path) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
