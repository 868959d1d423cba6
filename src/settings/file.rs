use crate::errors::{AutofillError, Result};
use crate::settings::{Settings, SettingsStore};
use async_trait::async_trait;
use std::path::PathBuf;

/// JSON-file-backed settings store.
///
/// A missing file reads as an all-default record, matching a key-value store
/// that has never been written. Anything else that goes wrong reading or
/// parsing is reported as the store being unavailable, which the
/// orchestrator treats as "skip this tick".
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Settings> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AutofillError::SettingsUnavailable(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(AutofillError::SettingsUnavailable(e.to_string())),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(settings)?).await?;
        Ok(())
    }
}
