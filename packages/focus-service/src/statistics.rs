//! Rolling study report and plan completion rates.

use serde::{Serialize, Serializer, ser::SerializeMap};
use time::Date;

use focus_domain::{
	DailyPlanFilter, DateWindow, OwnerId, Reference, StudySessionFilter, rate, time_serde,
	window,
};

use crate::{FocusService, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct DailyStudyStats {
	/// Rendered as the map key.
	#[serde(skip)]
	pub date: Date,
	pub sessions: u64,
	pub total_minutes: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StudyStatistics {
	/// One entry per day of the window, oldest first. Serialized as an object keyed by
	/// `YYYY-MM-DD`.
	#[serde(serialize_with = "serialize_daily_stats")]
	pub daily_stats: Vec<DailyStudyStats>,
	pub total_sessions: u64,
	pub total_minutes: u64,
	pub average_session_length: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompletionStats {
	pub completed: u64,
	pub total: u64,
	pub completion_rate: f64,
}
impl CompletionStats {
	pub fn new(completed: u64, total: u64) -> Self {
		Self { completed, total, completion_rate: rate::completion_rate(completed, total) }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProductivitySummary {
	pub today: CompletionStats,
	pub this_week: CompletionStats,
}

impl FocusService {
	/// Sessions and minutes per day over the seven days ending at the reference date.
	pub async fn weekly_study_stats(
		&self,
		owner: OwnerId,
		reference: Reference,
	) -> Result<StudyStatistics> {
		let days = window::last_7_days(reference.today());
		let (since, until) = self.calendar.span(window::last_7_days_window(reference.today()));
		let filter = StudySessionFilter { since: Some(since), until: Some(until), limit: None };
		let sessions = self.store().study_sessions().list(owner, &filter).await?;
		let mut daily_stats: Vec<DailyStudyStats> = days
			.iter()
			.map(|&date| DailyStudyStats { date, sessions: 0, total_minutes: 0 })
			.collect();

		for session in &sessions {
			let date = self.calendar.date_of(session.session_date);

			if let Some(day) = daily_stats.iter_mut().find(|day| day.date == date) {
				day.sessions += 1;
				day.total_minutes += u64::from(session.duration_minutes);
			}
		}

		let total_sessions = daily_stats.iter().map(|day| day.sessions).sum();
		let total_minutes = daily_stats.iter().map(|day| day.total_minutes).sum();
		let average_session_length = rate::average_minutes(total_minutes, total_sessions);

		tracing::debug!(
			%owner,
			date = %reference.today(),
			total_sessions,
			total_minutes,
			average_session_length,
			"Weekly study statistics computed."
		);

		Ok(StudyStatistics { daily_stats, total_sessions, total_minutes, average_session_length })
	}

	/// Plan completion for the reference date and for the week to date.
	pub async fn productivity_summary(
		&self,
		owner: OwnerId,
		reference: Reference,
	) -> Result<ProductivitySummary> {
		let plans = self.store().daily_plans();
		let today = DailyPlanFilter {
			planned: Some(DateWindow::single(reference.today())),
			..Default::default()
		};
		let today_done = DailyPlanFilter { completed: Some(true), ..today.clone() };
		let week = DailyPlanFilter {
			planned: Some(window::week_to_date(reference.today())),
			..Default::default()
		};
		let week_done = DailyPlanFilter { completed: Some(true), ..week.clone() };
		let (today_total, today_completed, week_total, week_completed) = tokio::try_join!(
			plans.count(owner, &today),
			plans.count(owner, &today_done),
			plans.count(owner, &week),
			plans.count(owner, &week_done),
		)?;
		let summary = ProductivitySummary {
			today: CompletionStats::new(today_completed, today_total),
			this_week: CompletionStats::new(week_completed, week_total),
		};

		tracing::debug!(
			%owner,
			date = %reference.today(),
			today_rate = summary.today.completion_rate,
			week_rate = summary.this_week.completion_rate,
			"Productivity summary computed."
		);

		Ok(summary)
	}
}

fn serialize_daily_stats<S>(days: &[DailyStudyStats], serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let mut map = serializer.serialize_map(Some(days.len()))?;

	for day in days {
		let key = time_serde::format_date(day.date).map_err(serde::ser::Error::custom)?;

		map.serialize_entry(&key, day)?;
	}

	map.end()
}
