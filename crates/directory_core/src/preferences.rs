//! Persisted dark-mode preference.

use std::{
    fs, io,
    path::PathBuf,
};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Key under which the dark-mode flag is stored in the settings document.
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to create settings directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write settings file '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait PreferenceStore: Send + Sync {
    /// Read once at startup; absent or unparseable values mean `false`.
    fn load_dark_mode(&self) -> bool;
    fn save_dark_mode(&self, enabled: bool) -> Result<(), PreferenceError>;
}

/// Settings stored as a JSON object in a single file. Keys other than
/// [`DARK_MODE_KEY`] are preserved on write.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Map<String, Value> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Map::new(),
            Err(err) => {
                warn!(path = %self.path.display(), "unable to read settings file: {err}");
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "ignoring unparseable settings file");
                Map::new()
            }
        }
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn load_dark_mode(&self) -> bool {
        let enabled = self
            .read_document()
            .get(DARK_MODE_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        debug!(path = %self.path.display(), enabled, "loaded dark mode preference");
        enabled
    }

    fn save_dark_mode(&self, enabled: bool) -> Result<(), PreferenceError> {
        let mut document = self.read_document();
        document.insert(DARK_MODE_KEY.to_string(), Value::Bool(enabled));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let serialized = serde_json::to_string_pretty(&Value::Object(document))?;
        fs::write(&self.path, serialized).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), enabled, "saved dark mode preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_root(label: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        env::temp_dir().join(format!("members_directory_{label}_{suffix}"))
    }

    #[test]
    fn missing_file_defaults_to_light_mode() {
        let root = temp_root("missing");
        let prefs = JsonFilePreferences::new(root.join("settings.json"));
        assert!(!prefs.load_dark_mode());
        assert!(!root.exists());
    }

    #[test]
    fn unparseable_value_defaults_to_light_mode() {
        let root = temp_root("garbage");
        fs::create_dir_all(&root).expect("temp root");
        let path = root.join("settings.json");

        fs::write(&path, "{not json").expect("write");
        assert!(!JsonFilePreferences::new(&path).load_dark_mode());

        fs::write(&path, r#"{"darkMode":"yes"}"#).expect("write");
        assert!(!JsonFilePreferences::new(&path).load_dark_mode());

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn save_creates_parent_dirs_and_round_trips() {
        let root = temp_root("save");
        let path = root.join("nested").join("settings.json");
        let prefs = JsonFilePreferences::new(&path);

        prefs.save_dark_mode(true).expect("save");
        assert!(path.exists());
        assert!(JsonFilePreferences::new(&path).load_dark_mode());

        prefs.save_dark_mode(false).expect("save");
        assert!(!prefs.load_dark_mode());

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn save_preserves_unrelated_keys() {
        let root = temp_root("preserve");
        fs::create_dir_all(&root).expect("temp root");
        let path = root.join("settings.json");
        fs::write(&path, r#"{"lastSeen":"2024-01-01"}"#).expect("write");

        JsonFilePreferences::new(&path)
            .save_dark_mode(true)
            .expect("save");

        let raw = fs::read_to_string(&path).expect("read");
        let value: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["lastSeen"], "2024-01-01");
        assert_eq!(value[DARK_MODE_KEY], true);

        fs::remove_dir_all(root).expect("cleanup");
    }
}
