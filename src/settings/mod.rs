pub mod file;
pub mod store;

pub use file::FileSettingsStore;
pub use store::{Settings, SettingsStore};
