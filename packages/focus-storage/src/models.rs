//! Row shapes as stored in Postgres and their conversion into domain records.

use time::{Date, OffsetDateTime};
use uuid::Uuid;

use focus_domain::{DailyPlan, Goal, Note, OwnerId, Reminder, StudySession};

use crate::Error;

#[derive(Debug, sqlx::FromRow)]
pub struct NoteRow {
	pub note_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub content: String,
	pub category: String,
	pub is_pinned: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl TryFrom<NoteRow> for Note {
	type Error = Error;

	fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
		Ok(Self {
			id: row.note_id,
			owner_id: OwnerId(row.owner_id),
			title: row.title,
			content: row.content,
			category: row.category.parse()?,
			is_pinned: row.is_pinned,
			created_at: row.created_at,
			updated_at: row.updated_at,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct DailyPlanRow {
	pub plan_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub description: String,
	pub priority: String,
	pub is_completed: bool,
	pub planned_date: Date,
	pub estimated_duration: Option<i32>,
	pub completed_at: Option<OffsetDateTime>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl TryFrom<DailyPlanRow> for DailyPlan {
	type Error = Error;

	fn try_from(row: DailyPlanRow) -> Result<Self, Self::Error> {
		let estimated_duration = row
			.estimated_duration
			.map(|minutes| {
				u32::try_from(minutes).map_err(|_| {
					Error::InvalidData(format!("daily plan {} has negative duration.", row.plan_id))
				})
			})
			.transpose()?;

		Ok(Self {
			id: row.plan_id,
			owner_id: OwnerId(row.owner_id),
			title: row.title,
			description: row.description,
			priority: row.priority.parse()?,
			is_completed: row.is_completed,
			planned_date: row.planned_date,
			estimated_duration,
			completed_at: row.completed_at,
			created_at: row.created_at,
			updated_at: row.updated_at,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct StudySessionRow {
	pub session_id: Uuid,
	pub owner_id: Uuid,
	pub subject: String,
	pub duration_minutes: i32,
	pub notes: String,
	pub rating: Option<i16>,
	pub session_date: OffsetDateTime,
	pub created_at: OffsetDateTime,
}
impl TryFrom<StudySessionRow> for StudySession {
	type Error = Error;

	fn try_from(row: StudySessionRow) -> Result<Self, Self::Error> {
		let duration_minutes = u32::try_from(row.duration_minutes).map_err(|_| {
			Error::InvalidData(format!("study session {} has negative duration.", row.session_id))
		})?;
		let rating = row
			.rating
			.map(|rating| {
				u8::try_from(rating).map_err(|_| {
					Error::InvalidData(format!(
						"study session {} has rating out of range.",
						row.session_id
					))
				})
			})
			.transpose()?;

		Ok(Self {
			id: row.session_id,
			owner_id: OwnerId(row.owner_id),
			subject: row.subject,
			duration_minutes,
			notes: row.notes,
			rating,
			session_date: row.session_date,
			created_at: row.created_at,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct GoalRow {
	pub goal_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub description: String,
	pub target_date: Date,
	pub status: String,
	pub progress_percentage: i16,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl TryFrom<GoalRow> for Goal {
	type Error = Error;

	fn try_from(row: GoalRow) -> Result<Self, Self::Error> {
		let progress_percentage = u8::try_from(row.progress_percentage).map_err(|_| {
			Error::InvalidData(format!("goal {} has progress out of range.", row.goal_id))
		})?;

		Ok(Self {
			id: row.goal_id,
			owner_id: OwnerId(row.owner_id),
			title: row.title,
			description: row.description,
			target_date: row.target_date,
			status: row.status.parse()?,
			progress_percentage,
			created_at: row.created_at,
			updated_at: row.updated_at,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct ReminderRow {
	pub reminder_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub message: String,
	pub reminder_time: OffsetDateTime,
	pub is_sent: bool,
	pub created_at: OffsetDateTime,
}
impl From<ReminderRow> for Reminder {
	fn from(row: ReminderRow) -> Self {
		Self {
			id: row.reminder_id,
			owner_id: OwnerId(row.owner_id),
			title: row.title,
			message: row.message,
			reminder_time: row.reminder_time,
			is_sent: row.is_sent,
			created_at: row.created_at,
		}
	}
}
