use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{OwnerId, Reminder, ReminderDraft, ReminderFilter, ReminderPatch};

use crate::{BoxFuture, Entity, Repository, Result, db::Db, models::ReminderRow, queries};

const COLUMNS: &str = "reminder_id, owner_id, title, message, reminder_time, is_sent, created_at";

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, owner: OwnerId, filter: &ReminderFilter) {
	queries::push_owner(builder, owner);

	if let Some(is_sent) = filter.is_sent {
		builder.push(" AND is_sent = ");
		builder.push_bind(is_sent);
	}
	if let Some(due_from) = filter.due_from {
		builder.push(" AND reminder_time >= ");
		builder.push_bind(due_from);
	}
}

impl Repository<Reminder> for Db {
	fn list<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a ReminderFilter,
	) -> BoxFuture<'a, Result<Vec<Reminder>>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM reminders"));

			push_filter(&mut builder, owner, filter);
			builder.push(" ORDER BY reminder_time ASC, reminder_id");
			queries::push_limit(&mut builder, filter.limit);

			let rows: Vec<ReminderRow> = builder.build_query_as().fetch_all(&self.pool).await?;

			Ok(rows.into_iter().map(Reminder::from).collect())
		})
	}

	fn count<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a ReminderFilter,
	) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new("SELECT count(*) FROM reminders");

			push_filter(&mut builder, owner, filter);

			let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;

			Ok(queries::count_from(count))
		})
	}

	fn create<'a>(
		&'a self,
		owner: OwnerId,
		draft: ReminderDraft,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<Reminder>> {
		Box::pin(async move {
			let mut builder =
				QueryBuilder::new(format!("INSERT INTO reminders ({COLUMNS}) VALUES ("));
			let mut values = builder.separated(", ");

			values.push_bind(Uuid::new_v4());
			values.push_bind(owner.as_uuid());
			values.push_bind(draft.title);
			values.push_bind(draft.message);
			values.push_bind(draft.reminder_time);
			values.push_bind(false);
			values.push_bind(now);
			builder.push(format!(") RETURNING {COLUMNS}"));

			let row: ReminderRow = builder.build_query_as().fetch_one(&self.pool).await?;

			Ok(Reminder::from(row))
		})
	}

	fn get<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<Reminder>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM reminders"));

			queries::push_owner(&mut builder, owner);
			builder.push(" AND reminder_id = ");
			builder.push_bind(id);

			let row: Option<ReminderRow> =
				builder.build_query_as().fetch_optional(&self.pool).await?;

			row.map(Reminder::from).ok_or_else(|| Reminder::KIND.not_found(id))
		})
	}

	fn update<'a>(
		&'a self,
		owner: OwnerId,
		id: Uuid,
		patch: ReminderPatch,
		_now: OffsetDateTime,
	) -> BoxFuture<'a, Result<Reminder>> {
		Box::pin(async move {
			let sql = format!(
				"\
UPDATE reminders
SET
	title = COALESCE($3, title),
	message = COALESCE($4, message),
	reminder_time = COALESCE($5, reminder_time),
	is_sent = COALESCE($6, is_sent)
WHERE owner_id = $1 AND reminder_id = $2
RETURNING {COLUMNS}"
			);
			let row: Option<ReminderRow> = sqlx::query_as(&sql)
				.bind(owner.as_uuid())
				.bind(id)
				.bind(patch.title)
				.bind(patch.message)
				.bind(patch.reminder_time)
				.bind(patch.is_sent)
				.fetch_optional(&self.pool)
				.await?;

			row.map(Reminder::from).ok_or_else(|| Reminder::KIND.not_found(id))
		})
	}

	fn delete<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let result =
				sqlx::query("DELETE FROM reminders WHERE owner_id = $1 AND reminder_id = $2")
					.bind(owner.as_uuid())
					.bind(id)
					.execute(&self.pool)
					.await?;

			if result.rows_affected() == 0 {
				return Err(Reminder::KIND.not_found(id));
			}

			Ok(())
		})
	}
}
