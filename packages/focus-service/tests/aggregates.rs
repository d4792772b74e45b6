use std::sync::Arc;

use time::{
	Duration, OffsetDateTime,
	macros::{date, datetime, offset},
};
use uuid::Uuid;

use focus_domain::{
	Calendar, DailyPlan, DailyPlanDraft, DailyPlanPatch, GoalDraft, GoalStatus, Note, NoteDraft,
	OwnerId, Priority, Reminder, ReminderDraft, ReminderPatch, StudySession, StudySessionDraft,
	StudySessionFilter,
};
use focus_service::{Error, FocusService};
use focus_storage::{BoxFuture, EntityStore, MemoryStore, Repository};

const NOW: OffsetDateTime = datetime!(2026-10-16 09:00 UTC);

fn service() -> FocusService {
	FocusService::new(Arc::new(MemoryStore::new()), Calendar::utc())
}

fn owner() -> OwnerId {
	OwnerId::new(Uuid::new_v4())
}

fn note(title: &str) -> NoteDraft {
	NoteDraft {
		title: title.to_string(),
		content: String::new(),
		category: Default::default(),
		is_pinned: false,
	}
}

fn plan(planned_date: time::Date, is_completed: bool) -> DailyPlanDraft {
	DailyPlanDraft {
		title: "plan".to_string(),
		description: String::new(),
		priority: Priority::Medium,
		is_completed,
		planned_date: Some(planned_date),
		estimated_duration: None,
		completed_at: None,
	}
}

fn session(minutes: u32, at: OffsetDateTime) -> StudySessionDraft {
	StudySessionDraft {
		subject: "math".to_string(),
		duration_minutes: minutes,
		notes: String::new(),
		rating: None,
		session_date: Some(at),
	}
}

fn goal(status: GoalStatus) -> GoalDraft {
	GoalDraft {
		title: status.to_string(),
		description: String::new(),
		target_date: date!(2026 - 12 - 31),
		status,
		progress_percentage: 0,
	}
}

fn reminder(at: OffsetDateTime) -> ReminderDraft {
	ReminderDraft { title: "ping".to_string(), message: String::new(), reminder_time: at }
}

#[tokio::test]
async fn dashboard_for_empty_owner_is_all_zero() {
	let service = service();
	let snapshot = service.dashboard(owner(), service.reference(NOW)).await.unwrap();

	assert_eq!(snapshot.total_notes, 0);
	assert_eq!(snapshot.total_daily_plans, 0);
	assert_eq!(snapshot.completed_plans_today, 0);
	assert_eq!(snapshot.total_study_sessions, 0);
	assert_eq!(snapshot.total_study_time, 0);
	assert_eq!(snapshot.active_goals, 0);
	assert_eq!(snapshot.upcoming_reminders, 0);
	assert!(snapshot.recent_notes.is_empty());
	assert!(snapshot.today_plans.is_empty());
	assert!(snapshot.recent_study_sessions.is_empty());
}

#[tokio::test]
async fn dashboard_counts_only_owner_records_in_scope() {
	let service = service();
	let alice = owner();
	let bob = owner();
	let today = date!(2026 - 10 - 16);

	let pinned = NoteDraft { is_pinned: true, ..note("pinned") };

	service.create_note(alice, pinned, NOW - Duration::days(3)).await.unwrap();

	for index in 0..6 {
		let at = NOW + Duration::minutes(index);

		service.create_note(alice, note(&format!("note {index}")), at).await.unwrap();
	}

	service.create_note(bob, note("foreign"), NOW).await.unwrap();
	service.create_daily_plan(alice, plan(today, true), NOW).await.unwrap();
	service.create_daily_plan(alice, plan(today, false), NOW).await.unwrap();
	service.create_daily_plan(alice, plan(date!(2026 - 10 - 15), true), NOW).await.unwrap();
	service.create_study_session(alice, session(30, NOW), NOW).await.unwrap();
	service
		.create_study_session(alice, session(45, datetime!(2026-09-01 09:00 UTC)), NOW)
		.await
		.unwrap();

	for status in [GoalStatus::NotStarted, GoalStatus::InProgress, GoalStatus::Completed] {
		service.create_goal(alice, goal(status), NOW).await.unwrap();
	}

	service.create_reminder(alice, reminder(datetime!(2026-10-16 10:00 UTC)), NOW).await.unwrap();
	service.create_reminder(alice, reminder(datetime!(2026-10-16 08:00 UTC)), NOW).await.unwrap();

	let snapshot = service.dashboard(alice, service.reference(NOW)).await.unwrap();

	let recent: Vec<&str> = snapshot.recent_notes.iter().map(|note| note.title.as_str()).collect();

	assert_eq!(snapshot.total_notes, 7);
	assert_eq!(recent, ["pinned", "note 5", "note 4", "note 3", "note 2"]);
	assert_eq!(snapshot.total_daily_plans, 2);
	assert_eq!(snapshot.completed_plans_today, 1);
	assert_eq!(snapshot.today_plans.len(), 2);
	assert_eq!(snapshot.total_study_sessions, 2);
	assert_eq!(snapshot.total_study_time, 75);
	assert_eq!(snapshot.recent_study_sessions.len(), 2);
	assert_eq!(snapshot.active_goals, 2);
	assert_eq!(snapshot.upcoming_reminders, 1);
}

#[tokio::test]
async fn upcoming_reminders_include_due_now_and_skip_sent() {
	let store = MemoryStore::new();
	let service = FocusService::new(Arc::new(store.clone()), Calendar::utc());
	let alice = owner();

	service.create_reminder(alice, reminder(NOW), NOW).await.unwrap();

	let later = reminder(NOW + Duration::hours(1));
	let sent = service.create_reminder(alice, later, NOW).await.unwrap();
	let mark_sent = ReminderPatch { is_sent: Some(true), ..Default::default() };

	store.reminders().update(alice, sent.id, mark_sent, NOW).await.unwrap();

	let snapshot = service.dashboard(alice, service.reference(NOW)).await.unwrap();

	assert_eq!(snapshot.upcoming_reminders, 1);
}

#[tokio::test]
async fn weekly_stats_bucket_sessions_by_day() {
	let service = service();
	let alice = owner();

	service
		.create_study_session(alice, session(30, datetime!(2026-10-14 10:00 UTC)), NOW)
		.await
		.unwrap();
	service
		.create_study_session(alice, session(45, datetime!(2026-10-14 15:00 UTC)), NOW)
		.await
		.unwrap();
	service
		.create_study_session(alice, session(90, datetime!(2026-10-09 23:59 UTC)), NOW)
		.await
		.unwrap();
	service
		.create_study_session(owner(), session(60, datetime!(2026-10-14 10:00 UTC)), NOW)
		.await
		.unwrap();

	let stats = service.weekly_study_stats(alice, service.reference(NOW)).await.unwrap();

	assert_eq!(stats.daily_stats.len(), 7);
	assert_eq!(stats.daily_stats[0].date, date!(2026 - 10 - 10));
	assert_eq!(stats.daily_stats[6].date, date!(2026 - 10 - 16));

	for day in &stats.daily_stats {
		if day.date == date!(2026 - 10 - 14) {
			assert_eq!((day.sessions, day.total_minutes), (2, 75));
		} else {
			assert_eq!((day.sessions, day.total_minutes), (0, 0));
		}
	}

	assert_eq!(stats.total_sessions, 2);
	assert_eq!(stats.total_minutes, 75);
	assert_eq!(stats.average_session_length, 37.5);
}

#[tokio::test]
async fn weekly_stats_serialize_days_as_ordered_object() {
	let service = service();
	let alice = owner();

	service.create_study_session(alice, session(20, NOW), NOW).await.unwrap();

	let stats = service.weekly_study_stats(alice, service.reference(NOW)).await.unwrap();
	let raw = serde_json::to_string(&stats).unwrap();
	let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

	assert_eq!(
		json["daily_stats"]["2026-10-16"],
		serde_json::json!({ "sessions": 1, "total_minutes": 20 })
	);
	assert_eq!(json["daily_stats"].as_object().map(|days| days.len()), Some(7));
	assert_eq!(json["average_session_length"], serde_json::json!(20.0));

	let positions: Vec<usize> = ["2026-10-10", "2026-10-12", "2026-10-14", "2026-10-16"]
		.iter()
		.filter_map(|key| raw.find(key))
		.collect();

	assert_eq!(positions.len(), 4);
	assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn weekly_stats_use_canonical_offset_for_day_boundaries() {
	let service = FocusService::new(Arc::new(MemoryStore::new()), Calendar::new(offset!(+09:00)));
	let alice = owner();
	let now = datetime!(2026-10-16 03:00 UTC);

	// 2026-10-16 05:00 at +09:00.
	service
		.create_study_session(alice, session(25, datetime!(2026-10-15 20:00 UTC)), now)
		.await
		.unwrap();
	// 2026-10-09 23:00 at +09:00, one day before the window opens.
	service
		.create_study_session(alice, session(40, datetime!(2026-10-09 14:00 UTC)), now)
		.await
		.unwrap();

	let stats = service.weekly_study_stats(alice, service.reference(now)).await.unwrap();

	assert_eq!(stats.daily_stats[6].date, date!(2026 - 10 - 16));
	assert_eq!(stats.daily_stats[6].total_minutes, 25);
	assert_eq!(stats.total_minutes, 25);
	assert_eq!(stats.total_sessions, 1);
}

#[tokio::test]
async fn weekly_average_rounds_half_up() {
	let service = service();
	let alice = owner();

	for minutes in [1, 1, 1, 1, 1, 1, 1, 2] {
		service.create_study_session(alice, session(minutes, NOW), NOW).await.unwrap();
	}

	let stats = service.weekly_study_stats(alice, service.reference(NOW)).await.unwrap();

	assert_eq!(stats.total_minutes, 9);
	assert_eq!(stats.total_sessions, 8);
	assert_eq!(stats.average_session_length, 1.13);
}

#[tokio::test]
async fn weekly_stats_are_zero_without_sessions() {
	let service = service();
	let stats = service.weekly_study_stats(owner(), service.reference(NOW)).await.unwrap();

	assert_eq!(stats.total_sessions, 0);
	assert_eq!(stats.total_minutes, 0);
	assert_eq!(stats.average_session_length, 0.0);
	assert!(stats.daily_stats.iter().all(|day| day.sessions == 0 && day.total_minutes == 0));
}

#[tokio::test]
async fn productivity_summary_covers_today_and_week_to_date() {
	let service = service();
	let alice = owner();
	let today = date!(2026 - 10 - 16);

	for is_completed in [true, true, true, false] {
		service.create_daily_plan(alice, plan(today, is_completed), NOW).await.unwrap();
	}
	for _ in 0..2 {
		service.create_daily_plan(alice, plan(date!(2026 - 10 - 12), false), NOW).await.unwrap();
	}

	// Sunday of the previous week.
	service.create_daily_plan(alice, plan(date!(2026 - 10 - 11), true), NOW).await.unwrap();

	let summary = service.productivity_summary(alice, service.reference(NOW)).await.unwrap();

	assert_eq!(summary.today.completed, 3);
	assert_eq!(summary.today.total, 4);
	assert_eq!(summary.today.completion_rate, 75.0);
	assert_eq!(summary.this_week.completed, 3);
	assert_eq!(summary.this_week.total, 6);
	assert_eq!(summary.this_week.completion_rate, 50.0);
}

#[tokio::test]
async fn productivity_summary_without_plans_is_zero() {
	let service = service();
	let summary = service.productivity_summary(owner(), service.reference(NOW)).await.unwrap();

	assert_eq!(summary.today.completed, 0);
	assert_eq!(summary.today.total, 0);
	assert_eq!(summary.today.completion_rate, 0.0);
	assert_eq!(summary.this_week.completion_rate, 0.0);
}

#[tokio::test]
async fn productivity_rate_rounds_to_two_decimals() {
	let service = service();
	let alice = owner();
	let today = date!(2026 - 10 - 16);

	for is_completed in [true, false, false] {
		service.create_daily_plan(alice, plan(today, is_completed), NOW).await.unwrap();
	}

	let summary = service.productivity_summary(alice, service.reference(NOW)).await.unwrap();

	assert_eq!(summary.today.completion_rate, 33.33);
}

struct BrokenPlans;
impl BrokenPlans {
	fn failure<'a, T>() -> BoxFuture<'a, focus_storage::Result<T>>
	where
		T: Send + 'a,
	{
		Box::pin(async { Err(focus_storage::Error::InvalidData("plans are unavailable.".into())) })
	}
}
impl Repository<DailyPlan> for BrokenPlans {
	fn list<'a>(
		&'a self,
		_owner: OwnerId,
		_filter: &'a focus_domain::DailyPlanFilter,
	) -> BoxFuture<'a, focus_storage::Result<Vec<DailyPlan>>> {
		Self::failure()
	}

	fn count<'a>(
		&'a self,
		_owner: OwnerId,
		_filter: &'a focus_domain::DailyPlanFilter,
	) -> BoxFuture<'a, focus_storage::Result<u64>> {
		Self::failure()
	}

	fn create<'a>(
		&'a self,
		_owner: OwnerId,
		_draft: DailyPlanDraft,
		_now: OffsetDateTime,
	) -> BoxFuture<'a, focus_storage::Result<DailyPlan>> {
		Self::failure()
	}

	fn get<'a>(
		&'a self,
		_owner: OwnerId,
		_id: Uuid,
	) -> BoxFuture<'a, focus_storage::Result<DailyPlan>> {
		Self::failure()
	}

	fn update<'a>(
		&'a self,
		_owner: OwnerId,
		_id: Uuid,
		_patch: DailyPlanPatch,
		_now: OffsetDateTime,
	) -> BoxFuture<'a, focus_storage::Result<DailyPlan>> {
		Self::failure()
	}

	fn delete<'a>(
		&'a self,
		_owner: OwnerId,
		_id: Uuid,
	) -> BoxFuture<'a, focus_storage::Result<()>> {
		Self::failure()
	}
}

struct BrokenPlanStore {
	inner: MemoryStore,
	plans: BrokenPlans,
}
impl EntityStore for BrokenPlanStore {
	fn notes(&self) -> &dyn Repository<Note> {
		self.inner.notes()
	}

	fn daily_plans(&self) -> &dyn Repository<DailyPlan> {
		&self.plans
	}

	fn study_sessions(&self) -> &dyn Repository<StudySession> {
		self.inner.study_sessions()
	}

	fn goals(&self) -> &dyn Repository<focus_domain::Goal> {
		self.inner.goals()
	}

	fn reminders(&self) -> &dyn Repository<Reminder> {
		self.inner.reminders()
	}

	fn study_minutes<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a StudySessionFilter,
	) -> BoxFuture<'a, focus_storage::Result<u64>> {
		self.inner.study_minutes(owner, filter)
	}
}

#[tokio::test]
async fn aggregates_fail_fast_when_a_read_fails() {
	let store = BrokenPlanStore { inner: MemoryStore::new(), plans: BrokenPlans };
	let service = FocusService::new(Arc::new(store), Calendar::utc());
	let alice = owner();
	let reference = service.reference(NOW);

	service.create_note(alice, note("kept"), NOW).await.unwrap();

	assert!(matches!(service.dashboard(alice, reference).await, Err(Error::Storage { .. })));
	assert!(matches!(
		service.productivity_summary(alice, reference).await,
		Err(Error::Storage { .. })
	));
	assert!(service.weekly_study_stats(alice, reference).await.is_ok());
}
