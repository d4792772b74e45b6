//! Owner-scoped persistence contract.
//!
//! Every operation takes the owner explicitly. Looking up another owner's record by id fails with
//! [`Error::NotFound`], exactly as if the id did not exist.

use std::{fmt, future::Future, pin::Pin};

use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{
	DailyPlan, DailyPlanDraft, DailyPlanFilter, DailyPlanPatch, Goal, GoalDraft, GoalFilter,
	GoalPatch, Note, NoteDraft, NoteFilter, NotePatch, OwnerId, Reminder, ReminderDraft,
	ReminderFilter, ReminderPatch, StudySession, StudySessionDraft, StudySessionFilter,
	StudySessionPatch,
};

use crate::{Error, Result};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntityKind {
	Note,
	DailyPlan,
	StudySession,
	Goal,
	Reminder,
}
impl EntityKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Note => "note",
			Self::DailyPlan => "daily plan",
			Self::StudySession => "study session",
			Self::Goal => "goal",
			Self::Reminder => "reminder",
		}
	}

	pub fn not_found(self, id: Uuid) -> Error {
		Error::NotFound(format!("{self} {id} does not exist."))
	}
}
impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

pub trait Entity
where
	Self: Clone + Send + Sync + 'static,
{
	type Draft: Send + 'static;
	type Patch: Send + 'static;
	type Filter: Send + Sync;

	const KIND: EntityKind;

	fn id(&self) -> Uuid;

	fn owner(&self) -> OwnerId;
}

pub trait Repository<E>
where
	Self: Send + Sync,
	E: Entity,
{
	fn list<'a>(&'a self, owner: OwnerId, filter: &'a E::Filter)
	-> BoxFuture<'a, Result<Vec<E>>>;

	/// Number of records matching `filter`, ignoring any limit.
	fn count<'a>(&'a self, owner: OwnerId, filter: &'a E::Filter) -> BoxFuture<'a, Result<u64>>;

	fn create<'a>(
		&'a self,
		owner: OwnerId,
		draft: E::Draft,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<E>>;

	fn get<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<E>>;

	fn update<'a>(
		&'a self,
		owner: OwnerId,
		id: Uuid,
		patch: E::Patch,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<E>>;

	fn delete<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<()>>;
}

pub trait EntityStore
where
	Self: Send + Sync,
{
	fn notes(&self) -> &dyn Repository<Note>;

	fn daily_plans(&self) -> &dyn Repository<DailyPlan>;

	fn study_sessions(&self) -> &dyn Repository<StudySession>;

	fn goals(&self) -> &dyn Repository<Goal>;

	fn reminders(&self) -> &dyn Repository<Reminder>;

	/// Sum of `duration_minutes` over matching sessions, `0` when none match.
	fn study_minutes<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a StudySessionFilter,
	) -> BoxFuture<'a, Result<u64>>;
}

macro_rules! entity {
	($entity:ty, $draft:ty, $patch:ty, $filter:ty, $kind:expr) => {
		impl Entity for $entity {
			type Draft = $draft;
			type Filter = $filter;
			type Patch = $patch;

			const KIND: EntityKind = $kind;

			fn id(&self) -> Uuid {
				self.id
			}

			fn owner(&self) -> OwnerId {
				self.owner_id
			}
		}
	};
}

entity!(Note, NoteDraft, NotePatch, NoteFilter, EntityKind::Note);
entity!(DailyPlan, DailyPlanDraft, DailyPlanPatch, DailyPlanFilter, EntityKind::DailyPlan);
entity!(
	StudySession,
	StudySessionDraft,
	StudySessionPatch,
	StudySessionFilter,
	EntityKind::StudySession
);
entity!(Goal, GoalDraft, GoalPatch, GoalFilter, EntityKind::Goal);
entity!(Reminder, ReminderDraft, ReminderPatch, ReminderFilter, EntityKind::Reminder);
