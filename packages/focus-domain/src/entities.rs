//! Owner-scoped records plus the drafts, patches and filters used to create, change and query
//! them.
//!
//! Drafts and patches never carry an owner. The owner is always supplied by the caller's
//! authenticated context.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{DateWindow, GoalStatus, NoteCategory, Priority};

/// Largest minute count a duration field can hold.
pub const MAX_MINUTES: u32 = i32::MAX as u32;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct OwnerId(pub Uuid);
impl OwnerId {
	pub const fn new(id: Uuid) -> Self {
		Self(id)
	}

	pub const fn as_uuid(&self) -> Uuid {
		self.0
	}
}
impl fmt::Display for OwnerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}
impl From<Uuid> for OwnerId {
	fn from(id: Uuid) -> Self {
		Self(id)
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Note {
	pub id: Uuid,
	pub owner_id: OwnerId,
	pub title: String,
	pub content: String,
	pub category: NoteCategory,
	pub is_pinned: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoteDraft {
	pub title: String,
	pub content: String,
	#[serde(default)]
	pub category: NoteCategory,
	#[serde(default)]
	pub is_pinned: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NotePatch {
	pub title: Option<String>,
	pub content: Option<String>,
	pub category: Option<NoteCategory>,
	pub is_pinned: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct NoteFilter {
	pub limit: Option<usize>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DailyPlan {
	pub id: Uuid,
	pub owner_id: OwnerId,
	pub title: String,
	pub description: String,
	pub priority: Priority,
	pub is_completed: bool,
	#[serde(with = "crate::time_serde::date")]
	pub planned_date: Date,
	pub estimated_duration: Option<u32>,
	#[serde(with = "crate::time_serde::option")]
	pub completed_at: Option<OffsetDateTime>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DailyPlanDraft {
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub priority: Priority,
	#[serde(default)]
	pub is_completed: bool,
	/// Defaults to the reference date when omitted.
	#[serde(default, with = "crate::time_serde::date::option")]
	pub planned_date: Option<Date>,
	#[serde(default)]
	pub estimated_duration: Option<u32>,
	/// Derived from the completion transition, never read from input.
	#[serde(skip)]
	pub completed_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DailyPlanPatch {
	pub title: Option<String>,
	pub description: Option<String>,
	pub priority: Option<Priority>,
	pub is_completed: Option<bool>,
	#[serde(default, with = "crate::time_serde::date::option")]
	pub planned_date: Option<Date>,
	/// `Some(None)` clears the estimate.
	#[serde(
		default,
		deserialize_with = "crate::nullable::deserialize",
		skip_serializing_if = "Option::is_none"
	)]
	pub estimated_duration: Option<Option<u32>>,
	/// `Some(value)` overwrites the stored timestamp. Derived from the completion transition,
	/// never read from input.
	#[serde(skip)]
	pub completed_at: Option<Option<OffsetDateTime>>,
}

#[derive(Clone, Debug, Default)]
pub struct DailyPlanFilter {
	pub planned: Option<DateWindow>,
	pub completed: Option<bool>,
	pub limit: Option<usize>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StudySession {
	pub id: Uuid,
	pub owner_id: OwnerId,
	pub subject: String,
	pub duration_minutes: u32,
	pub notes: String,
	pub rating: Option<u8>,
	#[serde(with = "crate::time_serde")]
	pub session_date: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StudySessionDraft {
	pub subject: String,
	pub duration_minutes: u32,
	#[serde(default)]
	pub notes: String,
	#[serde(default)]
	pub rating: Option<u8>,
	/// Defaults to the request instant when omitted.
	#[serde(default, with = "crate::time_serde::option")]
	pub session_date: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StudySessionPatch {
	pub subject: Option<String>,
	pub duration_minutes: Option<u32>,
	pub notes: Option<String>,
	/// `Some(None)` clears the rating.
	#[serde(
		default,
		deserialize_with = "crate::nullable::deserialize",
		skip_serializing_if = "Option::is_none"
	)]
	pub rating: Option<Option<u8>>,
	#[serde(default, with = "crate::time_serde::option")]
	pub session_date: Option<OffsetDateTime>,
}

/// `since` is inclusive and `until` exclusive.
#[derive(Clone, Debug, Default)]
pub struct StudySessionFilter {
	pub since: Option<OffsetDateTime>,
	pub until: Option<OffsetDateTime>,
	pub limit: Option<usize>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Goal {
	pub id: Uuid,
	pub owner_id: OwnerId,
	pub title: String,
	pub description: String,
	#[serde(with = "crate::time_serde::date")]
	pub target_date: Date,
	pub status: GoalStatus,
	pub progress_percentage: u8,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GoalDraft {
	pub title: String,
	pub description: String,
	#[serde(with = "crate::time_serde::date")]
	pub target_date: Date,
	#[serde(default)]
	pub status: GoalStatus,
	#[serde(default)]
	pub progress_percentage: u8,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GoalPatch {
	pub title: Option<String>,
	pub description: Option<String>,
	#[serde(default, with = "crate::time_serde::date::option")]
	pub target_date: Option<Date>,
	pub status: Option<GoalStatus>,
	pub progress_percentage: Option<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct GoalFilter {
	pub statuses: Option<Vec<GoalStatus>>,
	pub limit: Option<usize>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Reminder {
	pub id: Uuid,
	pub owner_id: OwnerId,
	pub title: String,
	pub message: String,
	#[serde(with = "crate::time_serde")]
	pub reminder_time: OffsetDateTime,
	pub is_sent: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

/// Reminders are always created unsent. Delivery is handled elsewhere.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ReminderDraft {
	pub title: String,
	pub message: String,
	#[serde(with = "crate::time_serde")]
	pub reminder_time: OffsetDateTime,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ReminderPatch {
	pub title: Option<String>,
	pub message: Option<String>,
	#[serde(default, with = "crate::time_serde::option")]
	pub reminder_time: Option<OffsetDateTime>,
	/// Set by the delivery side only, never read from input.
	#[serde(skip)]
	pub is_sent: Option<bool>,
}

/// `due_from` is inclusive.
#[derive(Clone, Debug, Default)]
pub struct ReminderFilter {
	pub is_sent: Option<bool>,
	pub due_from: Option<OffsetDateTime>,
	pub limit: Option<usize>,
}
