use crate::application::extractor::extract_day_blocks;
use crate::application::prompt::{build_prompt, RETRY_REMINDER};
use crate::application::reconciler::SleepReconciler;
use crate::application::validator::{ScheduleValidator, ValidationReport};
use crate::domain::models::{WeeklyEvents, WeeklySchedule};
use crate::infrastructure::error::InfraError;
use crate::infrastructure::text_generator::TextGenerator;
use std::sync::Arc;

/// Result of one generation cycle: the reconciled schedule, the validation
/// report gating downstream sync, and whether the retry fired.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub schedule: WeeklySchedule,
    pub report: ValidationReport,
    pub retried: bool,
}

/// Drives one generation cycle: builds the prompt, calls the generative
/// source, extracts day blocks, reconciles sleep and validates. The
/// generative source is an explicit injected dependency; nothing here
/// holds global model state.
///
/// If the first response yields no blocks at all, the prompt is reissued
/// once with an emphasis reminder and the second result is used regardless.
/// Transport faults from the source are fatal and propagate.
pub struct GenerationController<G: TextGenerator> {
    generator: Arc<G>,
    reconciler: SleepReconciler,
    validator: ScheduleValidator,
}

impl<G: TextGenerator> GenerationController<G> {
    pub fn new(generator: Arc<G>, min_sleep_hours: f64) -> Self {
        Self {
            generator,
            reconciler: SleepReconciler::new(min_sleep_hours),
            validator: ScheduleValidator::new(min_sleep_hours),
        }
    }

    pub async fn plan_week(&self, events: &WeeklyEvents) -> Result<PlanOutcome, InfraError> {
        let prompt = build_prompt(events, self.reconciler.min_sleep_hours());

        let raw = self.generator.generate(&prompt).await?;
        log::debug!("raw generated output ({} bytes)", raw.len());
        let mut schedule = extract_day_blocks(&raw);

        let mut retried = false;
        if schedule.is_empty_of_blocks() {
            log::warn!("empty schedule on first attempt, retrying once");
            let retry_prompt = format!("{prompt}{RETRY_REMINDER}");
            let raw = self.generator.generate(&retry_prompt).await?;
            schedule = extract_day_blocks(&raw);
            retried = true;
        }

        self.reconciler.reconcile(&mut schedule);
        let report = self.validator.validate(&schedule, events);
        if !report.is_valid() {
            log::info!("schedule generated with validation violations");
        }

        Ok(PlanOutcome {
            schedule,
            report,
            retried,
        })
    }
}
