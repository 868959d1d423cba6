use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Addressable reference to one element of a captured document.
///
/// The `css_path` is a structural `nth-child` chain, so the same handle
/// resolves both inside the snapshot it was built from and against the live
/// document it was captured from, as long as the surrounding tree has not
/// shifted in between.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHandle {
    pub tag_name: String,
    pub css_path: String,
    pub text: String,
    pub attributes: HashMap<String, String>,
}

impl ElementHandle {
    pub(crate) fn from_element(element: ElementRef<'_>) -> Self {
        let mut attributes = HashMap::new();
        for (name, value) in element.value().attrs() {
            attributes.insert(name.to_string(), value.to_string());
        }

        Self {
            tag_name: element.value().name().to_string(),
            css_path: css_path_for(element),
            text: visible_text(element),
            attributes,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| v.as_str())
    }

    pub fn role(&self) -> Option<&str> {
        self.attr("role")
    }

    pub fn input_type(&self) -> Option<&str> {
        self.attr("type")
    }

    /// Machine-readable option identifier on listbox options.
    pub fn option_value(&self) -> Option<&str> {
        self.attr("data-value")
    }

    pub fn is_expanded(&self) -> bool {
        self.attr("aria-expanded") == Some("true")
    }
}

/// Whitespace-normalized visible text of an element's subtree, approximating
/// what `innerText` reports for the attendance page's markup.
pub(crate) fn visible_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Structural CSS path from the document root down to `element`.
fn css_path_for(element: ElementRef<'_>) -> String {
    let mut segments = Vec::new();
    let mut current = Some(element);

    while let Some(node) = current {
        let parent = node.parent().and_then(ElementRef::wrap);
        match parent {
            None => segments.push(node.value().name().to_string()),
            Some(_) => {
                let position = 1 + node
                    .prev_siblings()
                    .filter(|sibling| sibling.value().is_element())
                    .count();
                segments.push(format!("{}:nth-child({})", node.value().name(), position));
            }
        }
        current = parent;
    }

    segments.reverse();
    segments.join(" > ")
}
