use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub browser: BrowserConfig,
    pub fill: FillConfig,
    pub settings: SettingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: Option<String>,
    pub args: Vec<String>,
    pub timeout_ms: u64,
}

/// Timing knobs for the fill engine: the outer retry loop and the inner
/// poll that waits for dropdown options to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillConfig {
    pub tick_interval_ms: u64,
    pub tick_attempts: u32,
    pub option_poll_interval_ms: u64,
    pub option_poll_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            fill: FillConfig::default(),
            settings: SettingsConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport::default(),
            user_agent: None,
            args: vec![],
            timeout_ms: 30000,
        }
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            tick_attempts: 10,
            option_poll_interval_ms: 200,
            option_poll_attempts: 10,
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".attendfill/settings.json"),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}
