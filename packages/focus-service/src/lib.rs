pub mod daily_plans;
pub mod dashboard;
pub mod goals;
pub mod notes;
pub mod reminders;
pub mod statistics;
pub mod study_sessions;

mod error;

pub use dashboard::DashboardSnapshot;
pub use error::{Error, Result};
pub use statistics::{CompletionStats, DailyStudyStats, ProductivitySummary, StudyStatistics};

use std::sync::Arc;

use time::OffsetDateTime;

use focus_domain::{Calendar, Reference};
use focus_storage::EntityStore;

/// Owner-scoped operations over an [`EntityStore`].
///
/// Holds no per-request state. Every call takes the owner explicitly, and the aggregates take a
/// [`Reference`] so results are reproducible for a fixed instant.
#[derive(Clone)]
pub struct FocusService {
	store: Arc<dyn EntityStore>,
	calendar: Calendar,
}
impl FocusService {
	pub fn new(store: Arc<dyn EntityStore>, calendar: Calendar) -> Self {
		Self { store, calendar }
	}

	pub fn calendar(&self) -> Calendar {
		self.calendar
	}

	pub fn reference(&self, now: OffsetDateTime) -> Reference {
		self.calendar.reference(now)
	}

	fn store(&self) -> &dyn EntityStore {
		self.store.as_ref()
	}
}

pub(crate) fn invalid(message: impl Into<String>) -> Error {
	Error::InvalidRequest { message: message.into() }
}
