use crate::dom::ElementHandle;
use scraper::{ElementRef, Html, Selector};

/// One parsed capture of the host document.
///
/// The page mutates underneath the engine at any time; every decision is
/// made against a fresh capture and nothing here is cached across calls.
pub struct PageSnapshot {
    document: Html,
    captured_at: chrono::DateTime<chrono::Utc>,
}

impl PageSnapshot {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            captured_at: chrono::Utc::now(),
        }
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn captured_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.captured_at
    }

    /// Re-resolve a handle inside this snapshot. `None` when the tree has
    /// shifted and the path no longer points at an element.
    pub fn resolve(&self, handle: &ElementHandle) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(&handle.css_path).ok()?;
        self.document.select(&selector).next()
    }
}
