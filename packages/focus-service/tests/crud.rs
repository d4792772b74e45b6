use std::sync::Arc;

use time::{
	Duration, OffsetDateTime,
	macros::{date, datetime, offset},
};
use uuid::Uuid;

use focus_domain::{
	Calendar, DailyPlanDraft, DailyPlanPatch, GoalDraft, GoalPatch, GoalStatus, NotePatch, OwnerId,
	Priority, ReminderDraft, ReminderPatch, StudySessionDraft, StudySessionPatch,
};
use focus_service::{Error, FocusService};
use focus_storage::MemoryStore;

const NOW: OffsetDateTime = datetime!(2026-10-16 09:00 UTC);

fn service() -> FocusService {
	FocusService::new(Arc::new(MemoryStore::new()), Calendar::utc())
}

fn owner() -> OwnerId {
	OwnerId::new(Uuid::new_v4())
}

fn plan(is_completed: bool) -> DailyPlanDraft {
	DailyPlanDraft {
		title: "write report".to_string(),
		description: String::new(),
		priority: Priority::High,
		is_completed,
		planned_date: None,
		estimated_duration: Some(45),
		completed_at: None,
	}
}

fn session(minutes: u32, rating: Option<u8>) -> StudySessionDraft {
	StudySessionDraft {
		subject: "physics".to_string(),
		duration_minutes: minutes,
		notes: String::new(),
		rating,
		session_date: None,
	}
}

#[tokio::test]
async fn plan_defaults_to_canonical_today() {
	let service = FocusService::new(Arc::new(MemoryStore::new()), Calendar::new(offset!(+09:00)));
	let now = datetime!(2026-10-16 20:00 UTC);
	let created = service.create_daily_plan(owner(), plan(false), now).await.unwrap();

	assert_eq!(created.planned_date, date!(2026 - 10 - 17));
	assert_eq!(created.completed_at, None);
}

#[tokio::test]
async fn plan_created_complete_is_stamped() {
	let service = service();
	let created = service.create_daily_plan(owner(), plan(true), NOW).await.unwrap();

	assert_eq!(created.completed_at, Some(NOW));
}

#[tokio::test]
async fn plan_completion_stamps_and_clears_timestamp() {
	let service = service();
	let alice = owner();
	let created = service.create_daily_plan(alice, plan(false), NOW).await.unwrap();
	let later = NOW + Duration::hours(2);
	let complete = DailyPlanPatch { is_completed: Some(true), ..Default::default() };
	let completed = service.update_daily_plan(alice, created.id, complete, later).await.unwrap();

	assert!(completed.is_completed);
	assert_eq!(completed.completed_at, Some(later));

	let rename = DailyPlanPatch {
		title: Some("write final report".to_string()),
		is_completed: Some(true),
		..Default::default()
	};
	let renamed = service
		.update_daily_plan(alice, created.id, rename, later + Duration::hours(1))
		.await
		.unwrap();

	assert_eq!(renamed.title, "write final report");
	assert_eq!(renamed.completed_at, Some(later));

	let reopen = DailyPlanPatch { is_completed: Some(false), ..Default::default() };
	let reopened = service.update_daily_plan(alice, created.id, reopen, later).await.unwrap();

	assert!(!reopened.is_completed);
	assert_eq!(reopened.completed_at, None);
}

#[tokio::test]
async fn plan_patch_ignores_supplied_completion_time() {
	let service = service();
	let alice = owner();
	let created = service.create_daily_plan(alice, plan(false), NOW).await.unwrap();
	let patch = DailyPlanPatch {
		description: Some("notes".to_string()),
		completed_at: Some(Some(datetime!(2020-01-01 00:00 UTC))),
		..Default::default()
	};
	let updated = service.update_daily_plan(alice, created.id, patch, NOW).await.unwrap();

	assert_eq!(updated.completed_at, None);
}

#[tokio::test]
async fn plans_list_by_date() {
	let service = service();
	let alice = owner();
	let mut yesterday = plan(false);

	yesterday.planned_date = Some(date!(2026 - 10 - 15));

	service.create_daily_plan(alice, plan(false), NOW).await.unwrap();
	service.create_daily_plan(alice, yesterday, NOW).await.unwrap();

	let today = service.list_daily_plans(alice, Some(date!(2026 - 10 - 16))).await.unwrap();
	let all = service.list_daily_plans(alice, None).await.unwrap();

	assert_eq!(today.len(), 1);
	assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn foreign_records_are_not_found() {
	let service = service();
	let alice = owner();
	let bob = owner();
	let created = service.create_daily_plan(alice, plan(false), NOW).await.unwrap();
	let complete = DailyPlanPatch { is_completed: Some(true), ..Default::default() };

	assert!(matches!(service.get_daily_plan(bob, created.id).await, Err(Error::NotFound { .. })));
	assert!(matches!(
		service.update_daily_plan(bob, created.id, complete, NOW).await,
		Err(Error::NotFound { .. })
	));
	assert!(matches!(
		service.delete_daily_plan(bob, created.id).await,
		Err(Error::NotFound { .. })
	));
	assert!(matches!(
		service.update_note(bob, Uuid::new_v4(), NotePatch::default(), NOW).await,
		Err(Error::NotFound { .. })
	));

	service.delete_daily_plan(alice, created.id).await.unwrap();

	assert!(matches!(service.get_daily_plan(alice, created.id).await, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn study_session_fields_are_checked() {
	let service = service();
	let alice = owner();

	assert!(matches!(
		service.create_study_session(alice, session(0, None), NOW).await,
		Err(Error::InvalidRequest { .. })
	));
	assert!(matches!(
		service.create_study_session(alice, session(30, Some(6)), NOW).await,
		Err(Error::InvalidRequest { .. })
	));
	assert!(matches!(
		service.create_study_session(alice, session(30, Some(0)), NOW).await,
		Err(Error::InvalidRequest { .. })
	));

	let created = service.create_study_session(alice, session(30, Some(5)), NOW).await.unwrap();

	assert_eq!(created.session_date, NOW);

	let patch = StudySessionPatch { duration_minutes: Some(0), ..Default::default() };

	assert!(matches!(
		service.update_study_session(alice, created.id, patch, NOW).await,
		Err(Error::InvalidRequest { .. })
	));
	assert_eq!(service.list_study_sessions(alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn durations_past_stored_range_are_rejected() {
	let service = service();
	let alice = owner();

	assert!(matches!(
		service.create_study_session(alice, session(3_000_000_000, None), NOW).await,
		Err(Error::InvalidRequest { .. })
	));

	let created = service.create_study_session(alice, session(30, None), NOW).await.unwrap();
	let patch = StudySessionPatch { duration_minutes: Some(u32::MAX), ..Default::default() };

	assert!(matches!(
		service.update_study_session(alice, created.id, patch, NOW).await,
		Err(Error::InvalidRequest { .. })
	));

	let mut draft = plan(false);

	draft.estimated_duration = Some(3_000_000_000);

	assert!(matches!(
		service.create_daily_plan(alice, draft, NOW).await,
		Err(Error::InvalidRequest { .. })
	));

	let created = service.create_daily_plan(alice, plan(false), NOW).await.unwrap();
	let patch = DailyPlanPatch { estimated_duration: Some(Some(u32::MAX)), ..Default::default() };

	assert!(matches!(
		service.update_daily_plan(alice, created.id, patch, NOW).await,
		Err(Error::InvalidRequest { .. })
	));
	assert_eq!(service.list_study_sessions(alice).await.unwrap()[0].duration_minutes, 30);
}

#[tokio::test]
async fn null_patch_clears_optional_fields() {
	let service = service();
	let alice = owner();
	let created = service.create_study_session(alice, session(30, Some(4)), NOW).await.unwrap();
	let rename = StudySessionPatch { subject: Some("chemistry".to_string()), ..Default::default() };
	let renamed = service.update_study_session(alice, created.id, rename, NOW).await.unwrap();

	assert_eq!(renamed.rating, Some(4));

	let clear = StudySessionPatch { rating: Some(None), ..Default::default() };
	let cleared = service.update_study_session(alice, created.id, clear, NOW).await.unwrap();

	assert_eq!(cleared.rating, None);
	assert_eq!(cleared.subject, "chemistry");

	let plan = service.create_daily_plan(alice, plan(false), NOW).await.unwrap();
	let clear = DailyPlanPatch { estimated_duration: Some(None), ..Default::default() };
	let cleared = service.update_daily_plan(alice, plan.id, clear, NOW).await.unwrap();

	assert_eq!(plan.estimated_duration, Some(45));
	assert_eq!(cleared.estimated_duration, None);
}

#[tokio::test]
async fn goal_progress_and_status_are_independent() {
	let service = service();
	let alice = owner();
	let draft = GoalDraft {
		title: "learn rust".to_string(),
		description: String::new(),
		target_date: date!(2026 - 12 - 31),
		status: GoalStatus::default(),
		progress_percentage: 10,
	};
	let created = service.create_goal(alice, draft, NOW).await.unwrap();
	let patch = GoalPatch { status: Some(GoalStatus::Completed), ..Default::default() };
	let updated = service.update_goal(alice, created.id, patch, NOW).await.unwrap();

	assert_eq!(updated.status, GoalStatus::Completed);
	assert_eq!(updated.progress_percentage, 10);

	let patch = GoalPatch { progress_percentage: Some(101), ..Default::default() };

	assert!(matches!(
		service.update_goal(alice, created.id, patch, NOW).await,
		Err(Error::InvalidRequest { .. })
	));
}

#[tokio::test]
async fn reminder_sent_flag_is_not_caller_settable() {
	let service = service();
	let alice = owner();
	let draft = ReminderDraft {
		title: "exam".to_string(),
		message: "bring a calculator".to_string(),
		reminder_time: NOW + Duration::days(1),
	};
	let created = service.create_reminder(alice, draft, NOW).await.unwrap();
	let patch = ReminderPatch {
		title: Some("final exam".to_string()),
		is_sent: Some(true),
		..Default::default()
	};
	let updated = service.update_reminder(alice, created.id, patch, NOW).await.unwrap();

	assert_eq!(updated.title, "final exam");
	assert!(!updated.is_sent);
}
