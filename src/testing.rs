//! In-memory doubles for the platform boundary, so the matching and fill
//! logic is exercised without a browser.

use crate::core::PageDriver;
use crate::dom::{ElementHandle, PageSnapshot};
use crate::errors::{AutofillError, Result};
use crate::settings::{Settings, SettingsStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// One simulated event dispatched against the fake document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEvent {
    pub css_path: String,
    pub kind: String,
}

struct FakeState {
    html: String,
    swap_on_click: Option<(String, String)>,
    swap_after_captures: Option<(usize, String)>,
    captures: usize,
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
    events: Vec<PageEvent>,
}

/// Synthetic page backing the unit tests: a swappable HTML document, a live
/// value map, and a log of every simulated event.
///
/// The document can be swapped mid-test to model the host page rendering
/// asynchronously: either when a given element is clicked (a listbox
/// expanding) or once a given number of captures has been served (options
/// attaching late or in a portal).
pub struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new(html: &str) -> Self {
        Self {
            state: Mutex::new(FakeState {
                html: html.to_string(),
                swap_on_click: None,
                swap_after_captures: None,
                captures: 0,
                values: HashMap::new(),
                writes: Vec::new(),
                events: Vec::new(),
            }),
        }
    }

    /// Replace the document with `next_html` when `css_path` is clicked.
    pub fn swap_on_click(self, css_path: &str, next_html: &str) -> Self {
        self.state.lock().unwrap().swap_on_click =
            Some((css_path.to_string(), next_html.to_string()));
        self
    }

    /// Replace the document just before serving capture number `capture`.
    pub fn swap_after_captures(self, capture: usize, next_html: &str) -> Self {
        self.state.lock().unwrap().swap_after_captures =
            Some((capture, next_html.to_string()));
        self
    }

    pub fn capture_count(&self) -> usize {
        self.state.lock().unwrap().captures
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Event kinds dispatched against one element, in dispatch order.
    pub fn event_kinds_for(&self, css_path: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|e| e.css_path == css_path)
            .map(|e| e.kind.clone())
            .collect()
    }

    /// Every `(css_path, value)` write in order, including repeats.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().writes.clone()
    }

    /// The live value of a control, if anything was ever written to it.
    pub fn value_of(&self, css_path: &str) -> Option<String> {
        self.state.lock().unwrap().values.get(css_path).cloned()
    }

    fn resolves(html: &str, target: &ElementHandle) -> bool {
        PageSnapshot::parse(html).resolve(target).is_some()
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn capture(&self) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.captures += 1;
        let due = matches!(&state.swap_after_captures, Some((at, _)) if state.captures >= *at);
        if due {
            let (_, next) = state.swap_after_captures.take().unwrap();
            state.html = next;
        }
        Ok(state.html.clone())
    }

    async fn input_value(&self, target: &ElementHandle) -> Result<Option<String>> {
        let state = self.state.lock().unwrap();
        if !Self::resolves(&state.html, target) {
            return Ok(None);
        }
        Ok(Some(
            state
                .values
                .get(&target.css_path)
                .cloned()
                .unwrap_or_default(),
        ))
    }

    async fn write_value(&self, target: &ElementHandle, value: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !Self::resolves(&state.html, target) {
            return Err(AutofillError::ElementNotFound(target.css_path.clone()));
        }

        let path = target.css_path.clone();
        state.events.push(PageEvent {
            css_path: path.clone(),
            kind: "focus".to_string(),
        });
        state.values.insert(path.clone(), value.to_string());
        state.writes.push((path.clone(), value.to_string()));
        for kind in ["input", "change", "blur"] {
            state.events.push(PageEvent {
                css_path: path.clone(),
                kind: kind.to_string(),
            });
        }
        Ok(())
    }

    async fn click(&self, target: &ElementHandle) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !Self::resolves(&state.html, target) {
            return Err(AutofillError::ElementNotFound(target.css_path.clone()));
        }

        for kind in ["mousedown", "mouseup", "click"] {
            state.events.push(PageEvent {
                css_path: target.css_path.clone(),
                kind: kind.to_string(),
            });
        }

        let due = matches!(&state.swap_on_click, Some((path, _)) if *path == target.css_path);
        if due {
            let (_, next) = state.swap_on_click.take().unwrap();
            state.html = next;
        }
        Ok(())
    }
}

/// Settings store double. `unreachable()` models the backing store being
/// gone, which the orchestrator must swallow without filling anything.
pub struct MemorySettingsStore {
    inner: Mutex<Settings>,
    reachable: bool,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(settings),
            reachable: true,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            inner: Mutex::new(Settings::default()),
            reachable: false,
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings> {
        if !self.reachable {
            return Err(AutofillError::SettingsUnavailable(
                "store dropped".to_string(),
            ));
        }
        Ok(self.inner.lock().unwrap().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        if !self.reachable {
            return Err(AutofillError::SettingsUnavailable(
                "store dropped".to_string(),
            ));
        }
        *self.inner.lock().unwrap() = settings.clone();
        Ok(())
    }
}
