use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{Goal, GoalDraft, GoalFilter, GoalPatch, OwnerId};

use crate::{FocusService, Result};

const MAX_PROGRESS: u8 = 100;

impl FocusService {
	pub async fn list_goals(&self, owner: OwnerId) -> Result<Vec<Goal>> {
		Ok(self.store().goals().list(owner, &GoalFilter::default()).await?)
	}

	pub async fn create_goal(
		&self,
		owner: OwnerId,
		draft: GoalDraft,
		now: OffsetDateTime,
	) -> Result<Goal> {
		let now = self.reference(now).now;

		validate_progress(Some(draft.progress_percentage))?;

		Ok(self.store().goals().create(owner, draft, now).await?)
	}

	pub async fn get_goal(&self, owner: OwnerId, id: Uuid) -> Result<Goal> {
		Ok(self.store().goals().get(owner, id).await?)
	}

	/// Status and progress are independent. Neither is derived from the other.
	pub async fn update_goal(
		&self,
		owner: OwnerId,
		id: Uuid,
		patch: GoalPatch,
		now: OffsetDateTime,
	) -> Result<Goal> {
		let now = self.reference(now).now;

		validate_progress(patch.progress_percentage)?;

		Ok(self.store().goals().update(owner, id, patch, now).await?)
	}

	pub async fn delete_goal(&self, owner: OwnerId, id: Uuid) -> Result<()> {
		Ok(self.store().goals().delete(owner, id).await?)
	}
}

fn validate_progress(progress: Option<u8>) -> Result<()> {
	if progress.is_some_and(|progress| progress > MAX_PROGRESS) {
		return Err(crate::invalid("progress_percentage must be between 0 and 100."));
	}

	Ok(())
}
