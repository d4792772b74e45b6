//! Dashboard snapshot.
//!
//! The snapshot is assembled from ten independent owner-scoped reads issued concurrently. They do
//! not share a transaction, so the result is best-effort consistent: a write by the same owner
//! that lands between two reads can leave a count that disagrees with an embedded list. Any
//! failed read fails the whole snapshot.

use serde::Serialize;

use focus_domain::{
	DailyPlan, DailyPlanFilter, DateWindow, GoalFilter, GoalStatus, Note, NoteFilter, OwnerId,
	Reference, ReminderFilter, StudySession, StudySessionFilter,
};

use crate::{FocusService, Result};

/// Number of notes and study sessions embedded in the snapshot.
pub const RECENT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSnapshot {
	pub total_notes: u64,
	/// Plans planned for the reference date.
	pub total_daily_plans: u64,
	pub completed_plans_today: u64,
	pub total_study_sessions: u64,
	/// Minutes across every study session.
	pub total_study_time: u64,
	pub active_goals: u64,
	pub upcoming_reminders: u64,
	pub recent_notes: Vec<Note>,
	pub today_plans: Vec<DailyPlan>,
	pub recent_study_sessions: Vec<StudySession>,
}

impl FocusService {
	pub async fn dashboard(
		&self,
		owner: OwnerId,
		reference: Reference,
	) -> Result<DashboardSnapshot> {
		let store = self.store();
		let all_notes = NoteFilter::default();
		let recent_notes = NoteFilter { limit: Some(RECENT_LIMIT) };
		let today = DailyPlanFilter {
			planned: Some(DateWindow::single(reference.today())),
			..Default::default()
		};
		let completed_today = DailyPlanFilter { completed: Some(true), ..today.clone() };
		let all_sessions = StudySessionFilter::default();
		let recent_sessions =
			StudySessionFilter { limit: Some(RECENT_LIMIT), ..Default::default() };
		let active_goals = GoalFilter { statuses: Some(GoalStatus::ACTIVE.to_vec()), limit: None };
		let upcoming = ReminderFilter {
			is_sent: Some(false),
			due_from: Some(reference.now),
			limit: None,
		};
		let (
			total_notes,
			total_daily_plans,
			completed_plans_today,
			total_study_sessions,
			total_study_time,
			active_goals,
			upcoming_reminders,
			recent_notes,
			today_plans,
			recent_study_sessions,
		) = tokio::try_join!(
			store.notes().count(owner, &all_notes),
			store.daily_plans().count(owner, &today),
			store.daily_plans().count(owner, &completed_today),
			store.study_sessions().count(owner, &all_sessions),
			store.study_minutes(owner, &all_sessions),
			store.goals().count(owner, &active_goals),
			store.reminders().count(owner, &upcoming),
			store.notes().list(owner, &recent_notes),
			store.daily_plans().list(owner, &today),
			store.study_sessions().list(owner, &recent_sessions),
		)?;

		tracing::debug!(
			%owner,
			date = %reference.today(),
			total_notes,
			total_daily_plans,
			completed_plans_today,
			total_study_sessions,
			total_study_time,
			active_goals,
			upcoming_reminders,
			"Dashboard snapshot computed."
		);

		Ok(DashboardSnapshot {
			total_notes,
			total_daily_plans,
			completed_plans_today,
			total_study_sessions,
			total_study_time,
			active_goals,
			upcoming_reminders,
			recent_notes,
			today_plans,
			recent_study_sessions,
		})
	}
}
