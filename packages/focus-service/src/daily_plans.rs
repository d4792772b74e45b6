//! Daily plans, including the completion timestamp transition.
//!
//! `completed_at` is derived here and never taken from the caller. Moving a plan to complete
//! stamps the current instant, moving it back to incomplete clears the stamp, and any other
//! change leaves it alone.

use time::{Date, OffsetDateTime};
use uuid::Uuid;

use focus_domain::{
	DailyPlan, DailyPlanDraft, DailyPlanFilter, DailyPlanPatch, DateWindow, MAX_MINUTES, OwnerId,
};

use crate::{FocusService, Result};

impl FocusService {
	/// Lists plans in default order, optionally restricted to one planned date.
	pub async fn list_daily_plans(
		&self,
		owner: OwnerId,
		planned_date: Option<Date>,
	) -> Result<Vec<DailyPlan>> {
		let filter =
			DailyPlanFilter { planned: planned_date.map(DateWindow::single), ..Default::default() };

		Ok(self.store().daily_plans().list(owner, &filter).await?)
	}

	pub async fn create_daily_plan(
		&self,
		owner: OwnerId,
		mut draft: DailyPlanDraft,
		now: OffsetDateTime,
	) -> Result<DailyPlan> {
		let reference = self.reference(now);

		validate_estimate(draft.estimated_duration)?;

		draft.planned_date.get_or_insert(reference.today());
		draft.completed_at = draft.is_completed.then_some(reference.now);

		Ok(self.store().daily_plans().create(owner, draft, reference.now).await?)
	}

	pub async fn get_daily_plan(&self, owner: OwnerId, id: Uuid) -> Result<DailyPlan> {
		Ok(self.store().daily_plans().get(owner, id).await?)
	}

	pub async fn update_daily_plan(
		&self,
		owner: OwnerId,
		id: Uuid,
		mut patch: DailyPlanPatch,
		now: OffsetDateTime,
	) -> Result<DailyPlan> {
		let reference = self.reference(now);
		let plans = self.store().daily_plans();

		validate_estimate(patch.estimated_duration.flatten())?;

		patch.completed_at = match patch.is_completed {
			Some(is_completed) => {
				let current = plans.get(owner, id).await?;

				completion_change(current.is_completed, is_completed, reference.now)
			},
			None => None,
		};

		Ok(plans.update(owner, id, patch, reference.now).await?)
	}

	pub async fn delete_daily_plan(&self, owner: OwnerId, id: Uuid) -> Result<()> {
		Ok(self.store().daily_plans().delete(owner, id).await?)
	}
}

fn validate_estimate(minutes: Option<u32>) -> Result<()> {
	if let Some(minutes) = minutes
		&& minutes > MAX_MINUTES
	{
		return Err(crate::invalid(format!("estimated_duration must be at most {MAX_MINUTES}.")));
	}

	Ok(())
}

fn completion_change(
	was_completed: bool,
	is_completed: bool,
	now: OffsetDateTime,
) -> Option<Option<OffsetDateTime>> {
	match (was_completed, is_completed) {
		(false, true) => Some(Some(now)),
		(true, false) => Some(None),
		_ => None,
	}
}
