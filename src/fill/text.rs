use crate::core::PageDriver;
use crate::dom::{locator, PageSnapshot};
use crate::errors::{AutofillError, Result};
use crate::fill::{date, FillOutcome};
use tracing::debug;

/// Fill the text or date control under the question whose heading contains
/// `question`. An empty value suppresses the fill; a control that already
/// carries the target value is left untouched so no events are re-dispatched.
pub async fn fill_question<D: PageDriver>(
    driver: &D,
    question: &str,
    value: &str,
    is_date: bool,
) -> Result<FillOutcome> {
    if value.is_empty() {
        return Ok(FillOutcome::Skipped);
    }

    let control = {
        let html = driver.capture().await?;
        let snapshot = PageSnapshot::parse(&html);
        let Some(container) = locator::question_container(&snapshot, question) else {
            return Ok(FillOutcome::NotFound);
        };
        locator::text_control(&snapshot, &container)
    };
    let Some(control) = control else {
        return Ok(FillOutcome::NotFound);
    };

    let target = if is_date && control.input_type() == Some("date") {
        date::to_input_format(value)
    } else {
        value.to_string()
    };

    match driver.input_value(&control).await? {
        // Gone between capture and read; the next tick retries.
        None => return Ok(FillOutcome::NotFound),
        Some(current) if current == target => return Ok(FillOutcome::AlreadySet),
        Some(_) => {}
    }

    match driver.write_value(&control, &target).await {
        Ok(()) => {
            debug!(question, "wrote value into control");
            Ok(FillOutcome::Filled)
        }
        Err(AutofillError::ElementNotFound(_)) => Ok(FillOutcome::NotFound),
        Err(e) => Err(e),
    }
}
