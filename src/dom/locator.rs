//! Question-locating heuristic for the attendance form.
//!
//! Google Forms renders each question as a `role="listitem"` block headed by
//! a `role="heading"` element holding the visible question text. Everything
//! here is a pure read of one [`PageSnapshot`]; the functions never touch the
//! live page and tolerate a document that is still rendering.

use crate::dom::handle::visible_text;
use crate::dom::{ElementHandle, PageSnapshot};
use scraper::{ElementRef, Selector};

const HEADING: &str = r#"[role="heading"]"#;
const INPUT_LIKE: &str = r#"input, textarea, [role="listbox"]"#;
const TEXT_CONTROL: &str = "input, textarea";
const LISTBOX: &str = r#"[role="listbox"]"#;
const OPTION: &str = r#"[role="option"]"#;
const SELECTED_OPTION: &str = r#"[role="option"][aria-selected="true"]"#;
const COLLAPSED_DISPLAY: &str = r#"[jsname="d9BH4c"]"#;

/// Levels walked up from a matched heading when no listitem ancestor exists.
const ANCESTOR_SEARCH_DEPTH: usize = 5;

/// Find the container holding the question whose heading contains `label`
/// (case-insensitive substring). First matching heading wins; duplicate
/// labels are not disambiguated.
pub fn question_container(snapshot: &PageSnapshot, label: &str) -> Option<ElementHandle> {
    let heading_selector = Selector::parse(HEADING).ok()?;
    let input_like = Selector::parse(INPUT_LIKE).ok()?;
    let term = label.to_lowercase();

    for heading in snapshot.document().select(&heading_selector) {
        if !visible_text(heading).to_lowercase().contains(&term) {
            continue;
        }

        // The question normally sits inside a listitem container.
        if let Some(item) = heading
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| ancestor.value().attr("role") == Some("listitem"))
        {
            return Some(ElementHandle::from_element(item));
        }

        // Fallback: walk up a few levels until something holds a control.
        let mut parent = heading.parent().and_then(ElementRef::wrap);
        for _ in 0..ANCESTOR_SEARCH_DEPTH {
            let Some(candidate) = parent else { break };
            if candidate.select(&input_like).next().is_some() {
                return Some(ElementHandle::from_element(candidate));
            }
            parent = candidate.parent().and_then(ElementRef::wrap);
        }

        // First matching heading decides, even when no container is found.
        return None;
    }

    None
}

/// First non-hidden text-like control inside the container.
pub fn text_control(snapshot: &PageSnapshot, container: &ElementHandle) -> Option<ElementHandle> {
    let scope = snapshot.resolve(container)?;
    let selector = Selector::parse(TEXT_CONTROL).ok()?;

    scope
        .select(&selector)
        .find(|control| {
            control.value().name() == "textarea" || control.value().attr("type") != Some("hidden")
        })
        .map(ElementHandle::from_element)
}

/// The custom dropdown element inside the container, if the question is a
/// listbox rather than a text input.
pub fn listbox(snapshot: &PageSnapshot, container: &ElementHandle) -> Option<ElementHandle> {
    let scope = snapshot.resolve(container)?;
    let selector = Selector::parse(LISTBOX).ok()?;
    scope.select(&selector).next().map(ElementHandle::from_element)
}

/// The option currently marked selected inside the listbox.
pub fn selected_option(snapshot: &PageSnapshot, listbox: &ElementHandle) -> Option<ElementHandle> {
    let scope = snapshot.resolve(listbox)?;
    let selector = Selector::parse(SELECTED_OPTION).ok()?;
    scope.select(&selector).next().map(ElementHandle::from_element)
}

/// The collapsed display element showing the current choice while the
/// listbox is closed. Vendor-specific markup.
pub fn collapsed_display(snapshot: &PageSnapshot, listbox: &ElementHandle) -> Option<ElementHandle> {
    let scope = snapshot.resolve(listbox)?;
    let selector = Selector::parse(COLLAPSED_DISPLAY).ok()?;
    scope.select(&selector).next().map(ElementHandle::from_element)
}

/// Find the option to click for `value`, by identifier or trimmed display
/// text. Options may render inside the listbox or be portaled elsewhere in
/// the document; fewer than two local options means the real list has not
/// attached locally and the whole document is searched instead. A candidate
/// whose parent holds no other option is a lone collapsed-display duplicate
/// and is rejected.
pub fn matching_option(
    snapshot: &PageSnapshot,
    listbox: &ElementHandle,
    value: &str,
) -> Option<ElementHandle> {
    let selector = Selector::parse(OPTION).ok()?;

    let mut options: Vec<ElementRef<'_>> = snapshot
        .resolve(listbox)
        .map(|scope| scope.select(&selector).collect())
        .unwrap_or_default();

    if options.len() < 2 {
        options = snapshot.document().select(&selector).collect();
    }

    options
        .into_iter()
        .find(|option| {
            let matches = option.value().attr("data-value") == Some(value)
                || visible_text(*option) == value;
            if !matches {
                return false;
            }

            option
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| parent.select(&selector).count() > 1)
                .unwrap_or(false)
        })
        .map(ElementHandle::from_element)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_fixture() -> PageSnapshot {
        PageSnapshot::parse(
            r#"
            <div role="list">
              <div role="listitem">
                <div role="heading">Internship ID <span>*</span></div>
                <input type="hidden" name="token">
                <input type="text">
              </div>
              <div role="listitem">
                <div role="heading">Your Name</div>
                <textarea></textarea>
              </div>
              <div role="listitem">
                <div role="heading">Internship start date</div>
                <input type="date">
              </div>
            </div>
            "#,
        )
    }

    #[test]
    fn finds_container_by_case_insensitive_substring() {
        let snapshot = question_fixture();
        let container = question_container(&snapshot, "internship id").unwrap();
        assert_eq!(container.role(), Some("listitem"));
        assert!(container.text.contains("Internship ID"));
    }

    #[test]
    fn first_matching_heading_wins() {
        let snapshot = question_fixture();
        // "Internship" matches both the ID and the start-date question.
        let container = question_container(&snapshot, "Internship").unwrap();
        assert!(container.text.contains("Internship ID"));
    }

    #[test]
    fn missing_question_yields_none() {
        let snapshot = question_fixture();
        assert!(question_container(&snapshot, "Favourite color").is_none());
    }

    #[test]
    fn falls_back_to_ancestor_walk_without_listitem() {
        let snapshot = PageSnapshot::parse(
            r#"
            <div class="card">
              <div class="inner">
                <div role="heading">Mobile Number</div>
              </div>
              <input type="text">
            </div>
            "#,
        );

        let container = question_container(&snapshot, "Mobile Number").unwrap();
        assert_eq!(container.attr("class"), Some("card"));
    }

    #[test]
    fn heading_without_any_container_yields_none() {
        let snapshot = PageSnapshot::parse(r#"<div role="heading">Orphan question</div>"#);
        assert!(question_container(&snapshot, "Orphan").is_none());
    }

    #[test]
    fn text_control_skips_hidden_inputs() {
        let snapshot = question_fixture();
        let container = question_container(&snapshot, "Internship ID").unwrap();
        let control = text_control(&snapshot, &container).unwrap();
        assert_eq!(control.tag_name, "input");
        assert_eq!(control.input_type(), Some("text"));
    }

    #[test]
    fn text_control_accepts_textarea() {
        let snapshot = question_fixture();
        let container = question_container(&snapshot, "Your Name").unwrap();
        let control = text_control(&snapshot, &container).unwrap();
        assert_eq!(control.tag_name, "textarea");
    }

    fn dropdown_fixture(expanded: bool) -> PageSnapshot {
        let aria = if expanded { "true" } else { "false" };
        PageSnapshot::parse(&format!(
            r#"
            <div role="listitem">
              <div role="heading">Mode of Internship</div>
              <div role="listbox" aria-expanded="{aria}">
                <div jsname="d9BH4c">Choose</div>
                <div class="options">
                  <div role="option" data-value="Virtual">Virtual</div>
                  <div role="option" data-value="In-person">In-person</div>
                </div>
              </div>
            </div>
            "#
        ))
    }

    #[test]
    fn finds_listbox_and_collapsed_display() {
        let snapshot = dropdown_fixture(false);
        let container = question_container(&snapshot, "Mode of Internship").unwrap();
        let listbox = listbox(&snapshot, &container).unwrap();
        assert!(!listbox.is_expanded());

        let display = collapsed_display(&snapshot, &listbox).unwrap();
        assert_eq!(display.text, "Choose");
    }

    #[test]
    fn matches_option_by_identifier_and_text() {
        let snapshot = dropdown_fixture(true);
        let container = question_container(&snapshot, "Mode of Internship").unwrap();
        let listbox = listbox(&snapshot, &container).unwrap();

        let by_value = matching_option(&snapshot, &listbox, "Virtual").unwrap();
        assert_eq!(by_value.option_value(), Some("Virtual"));

        let by_text = matching_option(&snapshot, &listbox, "In-person").unwrap();
        assert_eq!(by_text.text, "In-person");
    }

    #[test]
    fn rejects_lone_duplicate_outside_the_real_list() {
        // The collapsed display re-renders the current choice as a single
        // option outside the option list; it must not be clicked.
        let snapshot = PageSnapshot::parse(
            r#"
            <div role="listitem">
              <div role="heading">Duration of Internship</div>
              <div role="listbox" aria-expanded="false">
                <div class="display">
                  <div role="option" data-value="10 weeks">10 weeks</div>
                </div>
              </div>
            </div>
            "#,
        );

        let container = question_container(&snapshot, "Duration").unwrap();
        let listbox = listbox(&snapshot, &container).unwrap();
        assert!(matching_option(&snapshot, &listbox, "10 weeks").is_none());
    }

    #[test]
    fn falls_back_to_document_wide_search_for_portaled_options() {
        let snapshot = PageSnapshot::parse(
            r#"
            <div role="listitem">
              <div role="heading">Duration of Internship</div>
              <div role="listbox" aria-expanded="true"></div>
            </div>
            <div class="overlay">
              <div role="option" data-value="8 weeks">8 weeks</div>
              <div role="option" data-value="10 weeks">10 weeks</div>
            </div>
            "#,
        );

        let container = question_container(&snapshot, "Duration").unwrap();
        let listbox = listbox(&snapshot, &container).unwrap();
        let option = matching_option(&snapshot, &listbox, "10 weeks").unwrap();
        assert_eq!(option.option_value(), Some("10 weeks"));
    }

    #[test]
    fn selected_option_reads_the_aria_marker() {
        let snapshot = PageSnapshot::parse(
            r#"
            <div role="listbox">
              <div role="option" data-value="Virtual" aria-selected="true">Virtual</div>
              <div role="option" data-value="In-person">In-person</div>
            </div>
            "#,
        );

        let listbox_selector = Selector::parse(r#"[role="listbox"]"#).unwrap();
        let lb = snapshot
            .document()
            .select(&listbox_selector)
            .next()
            .map(ElementHandle::from_element)
            .unwrap();

        let selected = selected_option(&snapshot, &lb).unwrap();
        assert_eq!(selected.option_value(), Some("Virtual"));
    }
}
