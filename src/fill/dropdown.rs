use crate::core::{FillConfig, PageDriver};
use crate::dom::{locator, PageSnapshot};
use crate::errors::{AutofillError, Result};
use crate::fill::FillOutcome;
use std::time::Duration;
use tracing::debug;

/// Select `value` in the custom listbox under the matching question.
///
/// The gesture matches what the page expects from a user: a click to expand
/// the listbox, then a click on the option once it has rendered. Options
/// appear asynchronously and sometimes outside the listbox subtree, so the
/// option lookup polls against fresh captures until it hits or the attempt
/// budget runs out. Exhaustion is silent; the outer retry loop starts a
/// fresh attempt on its own cadence.
pub async fn fill_dropdown<D: PageDriver>(
    driver: &D,
    question: &str,
    value: &str,
    config: &FillConfig,
) -> Result<FillOutcome> {
    if value.is_empty() {
        return Ok(FillOutcome::Skipped);
    }

    let (listbox, collapsed) = {
        let html = driver.capture().await?;
        let snapshot = PageSnapshot::parse(&html);
        let Some(container) = locator::question_container(&snapshot, question) else {
            return Ok(FillOutcome::NotFound);
        };
        let Some(listbox) = locator::listbox(&snapshot, &container) else {
            return Ok(FillOutcome::NotFound);
        };

        if let Some(selected) = locator::selected_option(&snapshot, &listbox) {
            if selected.option_value() == Some(value) || selected.text == value {
                return Ok(FillOutcome::AlreadySet);
            }
        } else if let Some(display) = locator::collapsed_display(&snapshot, &listbox) {
            // No explicit selection marker; fall back to the collapsed
            // display text.
            if display.text.contains(value) {
                return Ok(FillOutcome::AlreadySet);
            }
        }

        let collapsed = !listbox.is_expanded();
        (listbox, collapsed)
    };

    if collapsed {
        match driver.click(&listbox).await {
            Ok(()) => debug!(question, "expanded listbox"),
            Err(AutofillError::ElementNotFound(_)) => return Ok(FillOutcome::NotFound),
            Err(e) => return Err(e),
        }
    }

    let interval = Duration::from_millis(config.option_poll_interval_ms);
    for attempt in 1..=config.option_poll_attempts {
        tokio::time::sleep(interval).await;

        let option = {
            let html = driver.capture().await?;
            let snapshot = PageSnapshot::parse(&html);
            locator::matching_option(&snapshot, &listbox, value)
        };

        if let Some(option) = option {
            match driver.click(&option).await {
                Ok(()) => {
                    debug!(question, value, attempt, "clicked dropdown option");
                    return Ok(FillOutcome::Filled);
                }
                // Re-rendered out from under us; poll again.
                Err(AutofillError::ElementNotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    debug!(question, value, "dropdown option never appeared; leaving unfilled");
    Ok(FillOutcome::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    fn quick_config() -> FillConfig {
        FillConfig {
            option_poll_interval_ms: 5,
            option_poll_attempts: 10,
            ..FillConfig::default()
        }
    }

    const COLLAPSED: &str = r#"
        <div role="list">
          <div role="listitem">
            <div role="heading">Mode of Internship</div>
            <div role="listbox" aria-expanded="false">
              <div jsname="d9BH4c">Choose</div>
            </div>
          </div>
        </div>
    "#;

    const EXPANDED: &str = r#"
        <div role="list">
          <div role="listitem">
            <div role="heading">Mode of Internship</div>
            <div role="listbox" aria-expanded="true">
              <div jsname="d9BH4c">Choose</div>
              <div class="options">
                <div role="option" data-value="Virtual">Virtual</div>
                <div role="option" data-value="In-person">In-person</div>
              </div>
            </div>
          </div>
        </div>
    "#;

    fn listbox_path(html: &str) -> String {
        let snapshot = PageSnapshot::parse(html);
        let container = locator::question_container(&snapshot, "Mode of Internship").unwrap();
        locator::listbox(&snapshot, &container).unwrap().css_path
    }

    fn option_path(html: &str, value: &str) -> String {
        let snapshot = PageSnapshot::parse(html);
        let container = locator::question_container(&snapshot, "Mode of Internship").unwrap();
        let listbox = locator::listbox(&snapshot, &container).unwrap();
        locator::matching_option(&snapshot, &listbox, value)
            .unwrap()
            .css_path
    }

    #[tokio::test]
    async fn expands_then_clicks_the_matching_option() {
        let page = FakePage::new(COLLAPSED).swap_on_click(&listbox_path(COLLAPSED), EXPANDED);

        let outcome = fill_dropdown(&page, "Mode of Internship", "Virtual", &quick_config())
            .await
            .unwrap();
        assert_eq!(outcome, FillOutcome::Filled);

        // One gesture on the listbox, one on the target option, none on the
        // other option.
        let virtual_path = option_path(EXPANDED, "Virtual");
        let in_person_path = option_path(EXPANDED, "In-person");
        assert_eq!(
            page.event_kinds_for(&listbox_path(COLLAPSED)),
            vec!["mousedown", "mouseup", "click"]
        );
        assert_eq!(
            page.event_kinds_for(&virtual_path),
            vec!["mousedown", "mouseup", "click"]
        );
        assert!(page.event_kinds_for(&in_person_path).is_empty());
    }

    #[tokio::test]
    async fn already_selected_value_dispatches_nothing() {
        let selected = EXPANDED.replace(
            r#"<div role="option" data-value="Virtual">Virtual</div>"#,
            r#"<div role="option" data-value="Virtual" aria-selected="true">Virtual</div>"#,
        );
        let page = FakePage::new(&selected);

        let outcome = fill_dropdown(&page, "Mode of Internship", "Virtual", &quick_config())
            .await
            .unwrap();

        assert_eq!(outcome, FillOutcome::AlreadySet);
        assert!(page.events().is_empty());
    }

    #[tokio::test]
    async fn collapsed_display_text_counts_as_selected() {
        let display = COLLAPSED.replace(">Choose<", ">Virtual<");
        let page = FakePage::new(&display);

        let outcome = fill_dropdown(&page, "Mode of Internship", "Virtual", &quick_config())
            .await
            .unwrap();

        assert_eq!(outcome, FillOutcome::AlreadySet);
        assert!(page.events().is_empty());
    }

    #[tokio::test]
    async fn empty_value_touches_nothing() {
        let page = FakePage::new(COLLAPSED);

        let outcome = fill_dropdown(&page, "Mode of Internship", "", &quick_config())
            .await
            .unwrap();

        assert_eq!(outcome, FillOutcome::Skipped);
        assert_eq!(page.capture_count(), 0);
        assert!(page.events().is_empty());
    }

    #[tokio::test]
    async fn polling_stops_after_the_attempt_budget() {
        // The listbox expands but options never render.
        let page = FakePage::new(COLLAPSED);

        let outcome = fill_dropdown(&page, "Mode of Internship", "Virtual", &quick_config())
            .await
            .unwrap();

        assert_eq!(outcome, FillOutcome::NotFound);
        // One capture for the pre-check, then one per poll attempt.
        assert_eq!(page.capture_count(), 11);
    }

    #[tokio::test]
    async fn options_rendering_late_are_picked_up() {
        // Options attach only by the third capture after the expand click.
        let page = FakePage::new(COLLAPSED).swap_after_captures(4, EXPANDED);

        let outcome = fill_dropdown(&page, "Mode of Internship", "In-person", &quick_config())
            .await
            .unwrap();

        assert_eq!(outcome, FillOutcome::Filled);
        assert_eq!(
            page.event_kinds_for(&option_path(EXPANDED, "In-person")),
            vec!["mousedown", "mouseup", "click"]
        );
    }

    #[tokio::test]
    async fn portaled_options_are_found_document_wide() {
        let portal = r#"
            <div role="list">
              <div role="listitem">
                <div role="heading">Duration of Internship</div>
                <div role="listbox" aria-expanded="true"></div>
              </div>
            </div>
            <div class="overlay">
              <div role="option" data-value="8 weeks">8 weeks</div>
              <div role="option" data-value="10 weeks">10 weeks</div>
            </div>
        "#;
        let page = FakePage::new(portal);

        let outcome = fill_dropdown(&page, "Duration of Internship", "10 weeks", &quick_config())
            .await
            .unwrap();

        assert_eq!(outcome, FillOutcome::Filled);
        let clicked: Vec<_> = page
            .events()
            .iter()
            .filter(|e| e.kind == "click")
            .map(|e| e.css_path.clone())
            .collect();
        assert_eq!(clicked.len(), 1);

        let snapshot = PageSnapshot::parse(portal);
        let container = locator::question_container(&snapshot, "Duration of Internship").unwrap();
        let listbox = locator::listbox(&snapshot, &container).unwrap();
        let target = locator::matching_option(&snapshot, &listbox, "10 weeks").unwrap();
        assert_eq!(clicked[0], target.css_path);
    }
}
