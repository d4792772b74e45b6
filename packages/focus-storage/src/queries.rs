//! Postgres implementations of [`crate::Repository`] for [`crate::db::Db`].

pub mod daily_plans;
pub mod goals;
pub mod notes;
pub mod reminders;
pub mod study_sessions;

use sqlx::{Postgres, QueryBuilder};

use crate::{Error, Result};

fn push_owner(builder: &mut QueryBuilder<'_, Postgres>, owner: focus_domain::OwnerId) {
	builder.push(" WHERE owner_id = ");
	builder.push_bind(owner.as_uuid());
}

fn push_limit(builder: &mut QueryBuilder<'_, Postgres>, limit: Option<usize>) {
	if let Some(limit) = limit {
		builder.push(" LIMIT ");
		builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
	}
}

fn count_from(value: i64) -> u64 {
	u64::try_from(value).unwrap_or_default()
}

fn minutes_column(minutes: u32) -> Result<i32> {
	i32::try_from(minutes)
		.map_err(|_| Error::InvalidData(format!("{minutes} minutes exceeds the stored range.")))
}
