use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{OwnerId, Reminder, ReminderDraft, ReminderFilter, ReminderPatch};

use crate::{FocusService, Result};

impl FocusService {
	pub async fn list_reminders(&self, owner: OwnerId) -> Result<Vec<Reminder>> {
		Ok(self.store().reminders().list(owner, &ReminderFilter::default()).await?)
	}

	pub async fn create_reminder(
		&self,
		owner: OwnerId,
		draft: ReminderDraft,
		now: OffsetDateTime,
	) -> Result<Reminder> {
		let now = self.reference(now).now;

		Ok(self.store().reminders().create(owner, draft, now).await?)
	}

	pub async fn get_reminder(&self, owner: OwnerId, id: Uuid) -> Result<Reminder> {
		Ok(self.store().reminders().get(owner, id).await?)
	}

	pub async fn update_reminder(
		&self,
		owner: OwnerId,
		id: Uuid,
		mut patch: ReminderPatch,
		now: OffsetDateTime,
	) -> Result<Reminder> {
		let now = self.reference(now).now;

		// The sent flag belongs to delivery, which this service does not perform.
		patch.is_sent = None;

		Ok(self.store().reminders().update(owner, id, patch, now).await?)
	}

	pub async fn delete_reminder(&self, owner: OwnerId, id: Uuid) -> Result<()> {
		Ok(self.store().reminders().delete(owner, id).await?)
	}
}
