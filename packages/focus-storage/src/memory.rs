//! Process-local [`EntityStore`] used by tests and the `memory` storage backend.

use std::{
	cmp::Ordering,
	future,
	sync::{Arc, Mutex, MutexGuard},
};

use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{
	DailyPlan, DailyPlanDraft, DailyPlanFilter, DailyPlanPatch, Goal, GoalDraft, GoalFilter,
	GoalPatch, Note, NoteDraft, NoteFilter, NotePatch, OwnerId, Reminder, ReminderDraft,
	ReminderFilter, ReminderPatch, StudySession, StudySessionDraft, StudySessionFilter,
	StudySessionPatch,
};

use crate::{BoxFuture, Entity, EntityStore, Repository, Result};

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	tables: Arc<Mutex<Tables>>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	fn lock(&self) -> MutexGuard<'_, Tables> {
		self.tables.lock().unwrap_or_else(|err| err.into_inner())
	}
}

#[derive(Debug, Default)]
struct Tables {
	notes: Vec<Note>,
	daily_plans: Vec<DailyPlan>,
	study_sessions: Vec<StudySession>,
	goals: Vec<Goal>,
	reminders: Vec<Reminder>,
}

trait Record
where
	Self: Entity,
{
	fn table(tables: &mut Tables) -> &mut Vec<Self>;

	fn matches(&self, filter: &Self::Filter) -> bool;

	fn limit(filter: &Self::Filter) -> Option<usize>;

	fn default_order(a: &Self, b: &Self) -> Ordering;

	fn build(id: Uuid, owner: OwnerId, draft: Self::Draft, now: OffsetDateTime) -> Self;

	fn apply(&mut self, patch: Self::Patch, now: OffsetDateTime);
}

impl Record for Note {
	fn table(tables: &mut Tables) -> &mut Vec<Self> {
		&mut tables.notes
	}

	fn matches(&self, _filter: &NoteFilter) -> bool {
		true
	}

	fn limit(filter: &NoteFilter) -> Option<usize> {
		filter.limit
	}

	fn default_order(a: &Self, b: &Self) -> Ordering {
		b.is_pinned.cmp(&a.is_pinned).then_with(|| b.updated_at.cmp(&a.updated_at))
	}

	fn build(id: Uuid, owner: OwnerId, draft: NoteDraft, now: OffsetDateTime) -> Self {
		Self {
			id,
			owner_id: owner,
			title: draft.title,
			content: draft.content,
			category: draft.category,
			is_pinned: draft.is_pinned,
			created_at: now,
			updated_at: now,
		}
	}

	fn apply(&mut self, patch: NotePatch, now: OffsetDateTime) {
		if let Some(title) = patch.title {
			self.title = title;
		}
		if let Some(content) = patch.content {
			self.content = content;
		}
		if let Some(category) = patch.category {
			self.category = category;
		}
		if let Some(is_pinned) = patch.is_pinned {
			self.is_pinned = is_pinned;
		}

		self.updated_at = now;
	}
}

impl Record for DailyPlan {
	fn table(tables: &mut Tables) -> &mut Vec<Self> {
		&mut tables.daily_plans
	}

	fn matches(&self, filter: &DailyPlanFilter) -> bool {
		filter.planned.is_none_or(|window| window.contains(self.planned_date))
			&& filter.completed.is_none_or(|completed| completed == self.is_completed)
	}

	fn limit(filter: &DailyPlanFilter) -> Option<usize> {
		filter.limit
	}

	// Stable sort keeps insertion order, which is creation order, for ties.
	fn default_order(a: &Self, b: &Self) -> Ordering {
		b.priority.cmp(&a.priority).then_with(|| a.is_completed.cmp(&b.is_completed))
	}

	fn build(id: Uuid, owner: OwnerId, draft: DailyPlanDraft, now: OffsetDateTime) -> Self {
		Self {
			id,
			owner_id: owner,
			title: draft.title,
			description: draft.description,
			priority: draft.priority,
			is_completed: draft.is_completed,
			planned_date: draft.planned_date.unwrap_or_else(|| now.date()),
			estimated_duration: draft.estimated_duration,
			completed_at: draft.completed_at,
			created_at: now,
			updated_at: now,
		}
	}

	fn apply(&mut self, patch: DailyPlanPatch, now: OffsetDateTime) {
		if let Some(title) = patch.title {
			self.title = title;
		}
		if let Some(description) = patch.description {
			self.description = description;
		}
		if let Some(priority) = patch.priority {
			self.priority = priority;
		}
		if let Some(is_completed) = patch.is_completed {
			self.is_completed = is_completed;
		}
		if let Some(planned_date) = patch.planned_date {
			self.planned_date = planned_date;
		}
		if let Some(estimated_duration) = patch.estimated_duration {
			self.estimated_duration = estimated_duration;
		}
		if let Some(completed_at) = patch.completed_at {
			self.completed_at = completed_at;
		}

		self.updated_at = now;
	}
}

impl Record for StudySession {
	fn table(tables: &mut Tables) -> &mut Vec<Self> {
		&mut tables.study_sessions
	}

	fn matches(&self, filter: &StudySessionFilter) -> bool {
		filter.since.is_none_or(|since| self.session_date >= since)
			&& filter.until.is_none_or(|until| self.session_date < until)
	}

	fn limit(filter: &StudySessionFilter) -> Option<usize> {
		filter.limit
	}

	fn default_order(a: &Self, b: &Self) -> Ordering {
		b.session_date.cmp(&a.session_date)
	}

	fn build(id: Uuid, owner: OwnerId, draft: StudySessionDraft, now: OffsetDateTime) -> Self {
		Self {
			id,
			owner_id: owner,
			subject: draft.subject,
			duration_minutes: draft.duration_minutes,
			notes: draft.notes,
			rating: draft.rating,
			session_date: draft.session_date.unwrap_or(now),
			created_at: now,
		}
	}

	fn apply(&mut self, patch: StudySessionPatch, _now: OffsetDateTime) {
		if let Some(subject) = patch.subject {
			self.subject = subject;
		}
		if let Some(duration_minutes) = patch.duration_minutes {
			self.duration_minutes = duration_minutes;
		}
		if let Some(notes) = patch.notes {
			self.notes = notes;
		}
		if let Some(rating) = patch.rating {
			self.rating = rating;
		}
		if let Some(session_date) = patch.session_date {
			self.session_date = session_date;
		}
	}
}

impl Record for Goal {
	fn table(tables: &mut Tables) -> &mut Vec<Self> {
		&mut tables.goals
	}

	fn matches(&self, filter: &GoalFilter) -> bool {
		filter.statuses.as_ref().is_none_or(|statuses| statuses.contains(&self.status))
	}

	fn limit(filter: &GoalFilter) -> Option<usize> {
		filter.limit
	}

	fn default_order(a: &Self, b: &Self) -> Ordering {
		a.target_date.cmp(&b.target_date).then_with(|| b.created_at.cmp(&a.created_at))
	}

	fn build(id: Uuid, owner: OwnerId, draft: GoalDraft, now: OffsetDateTime) -> Self {
		Self {
			id,
			owner_id: owner,
			title: draft.title,
			description: draft.description,
			target_date: draft.target_date,
			status: draft.status,
			progress_percentage: draft.progress_percentage,
			created_at: now,
			updated_at: now,
		}
	}

	fn apply(&mut self, patch: GoalPatch, now: OffsetDateTime) {
		if let Some(title) = patch.title {
			self.title = title;
		}
		if let Some(description) = patch.description {
			self.description = description;
		}
		if let Some(target_date) = patch.target_date {
			self.target_date = target_date;
		}
		if let Some(status) = patch.status {
			self.status = status;
		}
		if let Some(progress_percentage) = patch.progress_percentage {
			self.progress_percentage = progress_percentage;
		}

		self.updated_at = now;
	}
}

impl Record for Reminder {
	fn table(tables: &mut Tables) -> &mut Vec<Self> {
		&mut tables.reminders
	}

	fn matches(&self, filter: &ReminderFilter) -> bool {
		filter.is_sent.is_none_or(|is_sent| is_sent == self.is_sent)
			&& filter.due_from.is_none_or(|due_from| self.reminder_time >= due_from)
	}

	fn limit(filter: &ReminderFilter) -> Option<usize> {
		filter.limit
	}

	fn default_order(a: &Self, b: &Self) -> Ordering {
		a.reminder_time.cmp(&b.reminder_time)
	}

	fn build(id: Uuid, owner: OwnerId, draft: ReminderDraft, now: OffsetDateTime) -> Self {
		Self {
			id,
			owner_id: owner,
			title: draft.title,
			message: draft.message,
			reminder_time: draft.reminder_time,
			is_sent: false,
			created_at: now,
		}
	}

	fn apply(&mut self, patch: ReminderPatch, _now: OffsetDateTime) {
		if let Some(title) = patch.title {
			self.title = title;
		}
		if let Some(message) = patch.message {
			self.message = message;
		}
		if let Some(reminder_time) = patch.reminder_time {
			self.reminder_time = reminder_time;
		}
		if let Some(is_sent) = patch.is_sent {
			self.is_sent = is_sent;
		}
	}
}

fn select<E: Record>(store: &MemoryStore, owner: OwnerId, filter: &E::Filter) -> Vec<E> {
	let mut tables = store.lock();
	let mut rows: Vec<E> = E::table(&mut tables)
		.iter()
		.filter(|row| row.owner() == owner && row.matches(filter))
		.cloned()
		.collect();

	rows.sort_by(E::default_order);

	if let Some(limit) = E::limit(filter) {
		rows.truncate(limit);
	}

	rows
}

fn count<E: Record>(store: &MemoryStore, owner: OwnerId, filter: &E::Filter) -> u64 {
	let mut tables = store.lock();

	E::table(&mut tables).iter().filter(|row| row.owner() == owner && row.matches(filter)).count()
		as u64
}

fn insert<E: Record>(
	store: &MemoryStore,
	owner: OwnerId,
	draft: E::Draft,
	now: OffsetDateTime,
) -> E {
	let row = E::build(Uuid::new_v4(), owner, draft, now);
	let mut tables = store.lock();

	E::table(&mut tables).push(row.clone());

	row
}

fn fetch<E: Record>(store: &MemoryStore, owner: OwnerId, id: Uuid) -> Result<E> {
	let mut tables = store.lock();

	E::table(&mut tables)
		.iter()
		.find(|row| row.owner() == owner && row.id() == id)
		.cloned()
		.ok_or_else(|| E::KIND.not_found(id))
}

fn modify<E: Record>(
	store: &MemoryStore,
	owner: OwnerId,
	id: Uuid,
	patch: E::Patch,
	now: OffsetDateTime,
) -> Result<E> {
	let mut tables = store.lock();
	let row = E::table(&mut tables)
		.iter_mut()
		.find(|row| row.owner() == owner && row.id() == id)
		.ok_or_else(|| E::KIND.not_found(id))?;

	row.apply(patch, now);

	Ok(row.clone())
}

fn remove<E: Record>(store: &MemoryStore, owner: OwnerId, id: Uuid) -> Result<()> {
	let mut tables = store.lock();
	let table = E::table(&mut tables);
	let before = table.len();

	table.retain(|row| !(row.owner() == owner && row.id() == id));

	if table.len() == before {
		return Err(E::KIND.not_found(id));
	}

	Ok(())
}

macro_rules! memory_repository {
	($entity:ty) => {
		impl Repository<$entity> for MemoryStore {
			fn list<'a>(
				&'a self,
				owner: OwnerId,
				filter: &'a <$entity as Entity>::Filter,
			) -> BoxFuture<'a, Result<Vec<$entity>>> {
				Box::pin(future::ready(Ok(select::<$entity>(self, owner, filter))))
			}

			fn count<'a>(
				&'a self,
				owner: OwnerId,
				filter: &'a <$entity as Entity>::Filter,
			) -> BoxFuture<'a, Result<u64>> {
				Box::pin(future::ready(Ok(count::<$entity>(self, owner, filter))))
			}

			fn create<'a>(
				&'a self,
				owner: OwnerId,
				draft: <$entity as Entity>::Draft,
				now: OffsetDateTime,
			) -> BoxFuture<'a, Result<$entity>> {
				Box::pin(future::ready(Ok(insert::<$entity>(self, owner, draft, now))))
			}

			fn get<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<$entity>> {
				Box::pin(future::ready(fetch::<$entity>(self, owner, id)))
			}

			fn update<'a>(
				&'a self,
				owner: OwnerId,
				id: Uuid,
				patch: <$entity as Entity>::Patch,
				now: OffsetDateTime,
			) -> BoxFuture<'a, Result<$entity>> {
				Box::pin(future::ready(modify::<$entity>(self, owner, id, patch, now)))
			}

			fn delete<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<()>> {
				Box::pin(future::ready(remove::<$entity>(self, owner, id)))
			}
		}
	};
}

memory_repository!(Note);
memory_repository!(DailyPlan);
memory_repository!(StudySession);
memory_repository!(Goal);
memory_repository!(Reminder);

impl EntityStore for MemoryStore {
	fn notes(&self) -> &dyn Repository<Note> {
		self
	}

	fn daily_plans(&self) -> &dyn Repository<DailyPlan> {
		self
	}

	fn study_sessions(&self) -> &dyn Repository<StudySession> {
		self
	}

	fn goals(&self) -> &dyn Repository<Goal> {
		self
	}

	fn reminders(&self) -> &dyn Repository<Reminder> {
		self
	}

	fn study_minutes<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a StudySessionFilter,
	) -> BoxFuture<'a, Result<u64>> {
		let unbounded = StudySessionFilter { limit: None, ..filter.clone() };
		let total = select::<StudySession>(self, owner, &unbounded)
			.iter()
			.map(|session| u64::from(session.duration_minutes))
			.sum();

		Box::pin(future::ready(Ok(total)))
	}
}
