use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
	#[default]
	Study,
	Personal,
	Work,
	Project,
	Other,
}
impl NoteCategory {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Study => "study",
			Self::Personal => "personal",
			Self::Work => "work",
			Self::Project => "project",
			Self::Other => "other",
		}
	}
}
impl FromStr for NoteCategory {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"study" => Ok(Self::Study),
			"personal" => Ok(Self::Personal),
			"work" => Ok(Self::Work),
			"project" => Ok(Self::Project),
			"other" => Ok(Self::Other),
			_ => Err(Error::UnknownVariant { kind: "note category", value: raw.to_string() }),
		}
	}
}
impl fmt::Display for NoteCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Plan priority. Ordering follows urgency, so `High` is the greatest value.
#[derive(
	Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
	Low,
	#[default]
	Medium,
	High,
}
impl Priority {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}
}
impl FromStr for Priority {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"low" => Ok(Self::Low),
			"medium" => Ok(Self::Medium),
			"high" => Ok(Self::High),
			_ => Err(Error::UnknownVariant { kind: "priority", value: raw.to_string() }),
		}
	}
}
impl fmt::Display for Priority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
	#[default]
	NotStarted,
	InProgress,
	Completed,
	Paused,
}
impl GoalStatus {
	/// Statuses counted as active on the dashboard.
	pub const ACTIVE: [Self; 2] = [Self::NotStarted, Self::InProgress];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::NotStarted => "not_started",
			Self::InProgress => "in_progress",
			Self::Completed => "completed",
			Self::Paused => "paused",
		}
	}

	pub const fn is_active(self) -> bool {
		matches!(self, Self::NotStarted | Self::InProgress)
	}
}
impl FromStr for GoalStatus {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"not_started" => Ok(Self::NotStarted),
			"in_progress" => Ok(Self::InProgress),
			"completed" => Ok(Self::Completed),
			"paused" => Ok(Self::Paused),
			_ => Err(Error::UnknownVariant { kind: "goal status", value: raw.to_string() }),
		}
	}
}
impl fmt::Display for GoalStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
