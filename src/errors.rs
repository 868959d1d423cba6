use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutofillError {
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Browser not launched")]
    BrowserNotLaunched,

    #[error("Tab creation failed: {0}")]
    TabCreationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript execution failed: {0}")]
    JavaScriptFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Settings store unavailable: {0}")]
    SettingsUnavailable(String),

    #[error("Invalid form URL: {0}")]
    InvalidUrl(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Anyhow error: {0}")]
    AnyhowError(String),
}

pub type Result<T> = std::result::Result<T, AutofillError>;

// Convert anyhow::Error to AutofillError
impl From<anyhow::Error> for AutofillError {
    fn from(err: anyhow::Error) -> Self {
        AutofillError::AnyhowError(err.to_string())
    }
}
