use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The three user-supplied fields the fill engine reads on every tick.
///
/// Wire keys match the storage keys of the original extension settings, so a
/// record exported from there loads unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub internship_id: String,
    pub name: String,
    pub mobile: String,
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the full record. Absent fields load as empty strings; a store
    /// that cannot be reached at all is an error.
    async fn load(&self) -> Result<Settings>;

    /// Write the record verbatim. No validation is applied.
    async fn save(&self, settings: &Settings) -> Result<()>;
}
