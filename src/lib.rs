pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::extractor::extract_day_blocks;
pub use application::generation::{GenerationController, PlanOutcome};
pub use application::merger::merge_events;
pub use application::reconciler::SleepReconciler;
pub use application::sync::CalendarSyncService;
pub use application::validator::{ScheduleValidator, ValidationReport};
pub use domain::models::{Day, PlannedEvent, TimeBlock, WeeklyEvents, WeeklySchedule};
pub use infrastructure::calendar_client::{CalendarClient, ReqwestGoogleCalendarClient};
pub use infrastructure::error::InfraError;
pub use infrastructure::text_generator::{HttpTextGenerator, TextGenerator};
