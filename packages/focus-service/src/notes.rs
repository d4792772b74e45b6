use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{Note, NoteDraft, NoteFilter, NotePatch, OwnerId};

use crate::{FocusService, Result};

impl FocusService {
	pub async fn list_notes(&self, owner: OwnerId) -> Result<Vec<Note>> {
		Ok(self.store().notes().list(owner, &NoteFilter::default()).await?)
	}

	pub async fn create_note(
		&self,
		owner: OwnerId,
		draft: NoteDraft,
		now: OffsetDateTime,
	) -> Result<Note> {
		let now = self.reference(now).now;

		Ok(self.store().notes().create(owner, draft, now).await?)
	}

	pub async fn get_note(&self, owner: OwnerId, id: Uuid) -> Result<Note> {
		Ok(self.store().notes().get(owner, id).await?)
	}

	pub async fn update_note(
		&self,
		owner: OwnerId,
		id: Uuid,
		patch: NotePatch,
		now: OffsetDateTime,
	) -> Result<Note> {
		let now = self.reference(now).now;

		Ok(self.store().notes().update(owner, id, patch, now).await?)
	}

	pub async fn delete_note(&self, owner: OwnerId, id: Uuid) -> Result<()> {
		Ok(self.store().notes().delete(owner, id).await?)
	}
}
