use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{
	MAX_MINUTES, OwnerId, StudySession, StudySessionDraft, StudySessionFilter, StudySessionPatch,
};

use crate::{FocusService, Result};

const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

impl FocusService {
	pub async fn list_study_sessions(&self, owner: OwnerId) -> Result<Vec<StudySession>> {
		Ok(self.store().study_sessions().list(owner, &StudySessionFilter::default()).await?)
	}

	pub async fn create_study_session(
		&self,
		owner: OwnerId,
		mut draft: StudySessionDraft,
		now: OffsetDateTime,
	) -> Result<StudySession> {
		let now = self.reference(now).now;

		validate_duration(Some(draft.duration_minutes))?;
		validate_rating(draft.rating)?;

		draft.session_date.get_or_insert(now);

		Ok(self.store().study_sessions().create(owner, draft, now).await?)
	}

	pub async fn get_study_session(&self, owner: OwnerId, id: Uuid) -> Result<StudySession> {
		Ok(self.store().study_sessions().get(owner, id).await?)
	}

	pub async fn update_study_session(
		&self,
		owner: OwnerId,
		id: Uuid,
		patch: StudySessionPatch,
		now: OffsetDateTime,
	) -> Result<StudySession> {
		let now = self.reference(now).now;

		validate_duration(patch.duration_minutes)?;
		validate_rating(patch.rating.flatten())?;

		Ok(self.store().study_sessions().update(owner, id, patch, now).await?)
	}

	pub async fn delete_study_session(&self, owner: OwnerId, id: Uuid) -> Result<()> {
		Ok(self.store().study_sessions().delete(owner, id).await?)
	}
}

fn validate_duration(minutes: Option<u32>) -> Result<()> {
	match minutes {
		Some(0) => Err(crate::invalid("duration_minutes must be greater than zero.")),
		Some(minutes) if minutes > MAX_MINUTES =>
			Err(crate::invalid(format!("duration_minutes must be at most {MAX_MINUTES}."))),
		_ => Ok(()),
	}
}

fn validate_rating(rating: Option<u8>) -> Result<()> {
	if let Some(rating) = rating
		&& !RATING_RANGE.contains(&rating)
	{
		return Err(crate::invalid("rating must be between 1 and 5."));
	}

	Ok(())
}
