use crate::dom::ElementHandle;
use crate::errors::Result;
use async_trait::async_trait;

/// Interaction boundary between the fill engine and a rendered page.
///
/// The engine decides *what* to do against a parsed snapshot; a `PageDriver`
/// carries those decisions out against the host document. One implementation
/// drives a live Chrome tab, one backs the unit tests with an in-memory
/// document.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Serialize the current document to HTML for snapshotting.
    async fn capture(&self) -> Result<String>;

    /// Read a form control's live `value` property. `None` when the element
    /// no longer resolves in the document.
    async fn input_value(&self, target: &ElementHandle) -> Result<Option<String>>;

    /// Write a value into a form control the way a user interaction would:
    /// focus, assign, bubbling `input` and `change` events, blur.
    async fn write_value(&self, target: &ElementHandle, value: &str) -> Result<()>;

    /// Dispatch a full click gesture (`mousedown`, `mouseup`, `click`, all
    /// bubbling) on the target element.
    async fn click(&self, target: &ElementHandle) -> Result<()>;
}
