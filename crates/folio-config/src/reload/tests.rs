//! Tests for the reload manager.

use super::*;
use std::path::PathBuf;

#[tokio::test]
async fn start_with_nonexistent_path_uses_defaults() {
    let path = PathBuf::from("/tmp/nonexistent_folio_reload_test.toml");
    let (config, rx) = ReloadManager::start(path).await;
    assert_eq!(config, crate::schema::FolioConfig::default());
    assert_eq!(*rx.borrow(), config);
}

#[tokio::test]
async fn start_with_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    std::fs::write(
        &path,
        r#"
[background]
speed = 2.5
"#,
    )
    .unwrap();

    let (config, _rx) = ReloadManager::start(path).await;
    assert!((config.background.speed - 2.5).abs() < f64::EPSILON);
    assert_eq!(config.background.density, 500); // default
}
