use crate::core::{FillConfig, PageDriver};
use crate::errors::Result;
use crate::fill::plan::FillPlan;
use crate::fill::{dropdown, text, FillOutcome};
use crate::settings::SettingsStore;
use std::time::Duration;
use tracing::{debug, info};

/// Drives the full fill routine against one page on a bounded schedule.
///
/// The host page renders asynchronously, so a single pass may find nothing;
/// the orchestrator re-runs the whole routine on a fixed interval until the
/// attempt budget is spent. Each fill is idempotent, so repeat passes never
/// re-dispatch events on controls that are already set.
pub struct Orchestrator<'a, D: PageDriver> {
    driver: &'a D,
    config: FillConfig,
}

impl<'a, D: PageDriver> Orchestrator<'a, D> {
    pub fn new(driver: &'a D, config: FillConfig) -> Self {
        Self { driver, config }
    }

    /// Run ticks until the budget is exhausted. Ticks are applied one after
    /// another; a tick finishes all its fills before the next interval sleep
    /// starts.
    pub async fn run(&self, store: &dyn SettingsStore) -> Result<()> {
        for attempt in 1..=self.config.tick_attempts {
            debug!(attempt, total = self.config.tick_attempts, "autofill tick");
            self.tick(store).await?;

            if attempt < self.config.tick_attempts {
                tokio::time::sleep(Duration::from_millis(self.config.tick_interval_ms)).await;
            }
        }
        Ok(())
    }

    /// One pass over the fill plan. An unreachable settings store aborts the
    /// pass without filling anything; the next scheduled tick retries.
    pub async fn tick(&self, store: &dyn SettingsStore) -> Result<()> {
        let settings = match store.load().await {
            Ok(settings) => settings,
            Err(err) => {
                debug!(error = %err, "settings store unreachable; skipping tick");
                return Ok(());
            }
        };

        let plan = FillPlan::build(&settings);

        for field in &plan.fields {
            let outcome =
                text::fill_question(self.driver, field.question, &field.value, field.date).await?;
            log_outcome(field.question, outcome);
        }

        for dd in &plan.dropdowns {
            let outcome =
                dropdown::fill_dropdown(self.driver, dd.question, &dd.value, &self.config).await?;
            log_outcome(dd.question, outcome);
        }

        Ok(())
    }
}

fn log_outcome(question: &str, outcome: FillOutcome) {
    match outcome {
        FillOutcome::Filled => info!(question, "filled"),
        FillOutcome::AlreadySet => debug!(question, "already set"),
        FillOutcome::Skipped => debug!(question, "no value configured"),
        FillOutcome::NotFound => debug!(question, "not located on page"),
    }
}
