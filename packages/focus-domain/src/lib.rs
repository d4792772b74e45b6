pub mod entities;
pub mod kinds;
pub mod nullable;
pub mod rate;
pub mod time_serde;
pub mod window;

mod error;

pub use entities::{
	DailyPlan, DailyPlanDraft, DailyPlanFilter, DailyPlanPatch, Goal, GoalDraft, GoalFilter,
	GoalPatch, MAX_MINUTES, Note, NoteDraft, NoteFilter, NotePatch, OwnerId, Reminder,
	ReminderDraft, ReminderFilter, ReminderPatch, StudySession, StudySessionDraft,
	StudySessionFilter, StudySessionPatch,
};
pub use error::{Error, Result};
pub use kinds::{GoalStatus, NoteCategory, Priority};
pub use window::{Calendar, DateWindow, Reference};
