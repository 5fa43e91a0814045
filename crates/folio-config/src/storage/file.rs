use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use folio_common::ConfigError;
use tracing::{debug, warn};

use super::PreferenceStorage;
use crate::toml_writer::write_atomic;

/// Preference map persisted as a flat TOML table of strings.
///
/// Every write rewrites the whole file atomically. A missing or corrupt
/// file reads as empty; non-string entries are skipped.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the file at `path`, reading whatever is there now.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), ConfigError> {
        let contents = toml::to_string(&self.entries).map_err(|e| {
            ConfigError::StorageError(format!("failed to serialize preferences: {e}"))
        })?;
        write_atomic(&self.path, &contents)?;
        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), ConfigError> {
        self.entries = read_entries(&self.path);
        Ok(())
    }
}

fn read_entries(path: &Path) -> BTreeMap<String, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            warn!("failed to read preferences {}: {e}", path.display());
            return BTreeMap::new();
        }
    };

    let table: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => {
            warn!(
                "preferences {} are not valid TOML, ignoring them: {e}",
                path.display()
            );
            return BTreeMap::new();
        }
    };

    table
        .into_iter()
        .filter_map(|(key, value)| match value {
            toml::Value::String(s) => Some((key, s)),
            other => {
                warn!("ignoring non-string preference {key} = {other}");
                None
            }
        })
        .collect()
}
