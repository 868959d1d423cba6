pub mod browser;
pub mod core;
pub mod dom;
pub mod errors;
pub mod fill;
pub mod settings;
pub mod testing;

pub use browser::{ChromeBrowser, LivePage};
pub use core::{BrowserTrait, Config, FillConfig, PageDriver};
pub use dom::{ElementHandle, PageSnapshot};
pub use errors::{AutofillError, Result};
pub use fill::{FillOutcome, FillPlan, Orchestrator};
pub use settings::{FileSettingsStore, Settings, SettingsStore};
