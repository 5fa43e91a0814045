//! Write FolioConfig to TOML on disk.
//!
//! Supports atomic writes (write to `.tmp`, then rename) to prevent
//! corruption if the process crashes mid-write.

use std::path::Path;

use folio_common::ConfigError;

use crate::schema::FolioConfig;
use crate::toml_loader::default_config_path;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Write config to the platform default path (`~/.config/folio/folio.toml`).
pub fn save_config(config: &FolioConfig) -> Result<(), ConfigError> {
    let path = default_config_path()?;
    save_config_to_path(config, &path)
}

/// Write config to a specific path.
pub fn save_config_to_path(config: &FolioConfig, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize config to TOML: {e}")))?;
    write_atomic(path, &toml_str)?;
    tracing::debug!(path = %path.display(), "config saved to disk");
    Ok(())
}

/// Write `contents` to `path` via a sibling `.tmp` file and a rename.
///
/// Creates parent directories if they don't exist.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::StorageError(format!(
                "failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents).map_err(|e| {
        ConfigError::StorageError(format!("failed to write {}: {e}", tmp_path.display()))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Rename can fail across some filesystems; fall back to a direct write
        tracing::warn!("atomic rename failed ({e}), falling back to direct write");
        std::fs::write(path, contents).map_err(|e2| {
            ConfigError::StorageError(format!("failed to write {}: {e2}", path.display()))
        })?;
        let _ = std::fs::remove_file(&tmp_path);
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.toml");

        let mut config = FolioConfig::default();
        config.background.density = 1200;
        config.background.secondary_color = Some("#0f172a".into());
        config.render.fps = 30;
        save_config_to_path(&config, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: FolioConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn save_config_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("folio.toml");

        save_config_to_path(&FolioConfig::default(), &path).unwrap();

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("density"));
    }

    #[test]
    fn save_config_cleans_up_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.toml");

        save_config_to_path(&FolioConfig::default(), &path).unwrap();

        assert!(
            !dir.path().join("folio.toml.tmp").exists(),
            "tmp file should be cleaned up after rename"
        );
    }

    #[test]
    fn write_atomic_replaces_existing_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "old = 1\n").unwrap();

        write_atomic(&path, "new = 2\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new = 2\n");
    }
}
