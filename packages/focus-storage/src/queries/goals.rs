use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{Goal, GoalDraft, GoalFilter, GoalPatch, OwnerId};

use crate::{BoxFuture, Entity, Repository, Result, db::Db, models::GoalRow, queries};

const COLUMNS: &str = "goal_id, owner_id, title, description, target_date, status, progress_percentage, created_at, updated_at";

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, owner: OwnerId, filter: &GoalFilter) {
	queries::push_owner(builder, owner);

	if let Some(statuses) = filter.statuses.as_ref() {
		let statuses: Vec<String> =
			statuses.iter().map(|status| status.as_str().to_string()).collect();

		builder.push(" AND status = ANY(");
		builder.push_bind(statuses);
		builder.push(")");
	}
}

impl Repository<Goal> for Db {
	fn list<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a GoalFilter,
	) -> BoxFuture<'a, Result<Vec<Goal>>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM goals"));

			push_filter(&mut builder, owner, filter);
			builder.push(" ORDER BY target_date ASC, created_at DESC, goal_id");
			queries::push_limit(&mut builder, filter.limit);

			let rows: Vec<GoalRow> = builder.build_query_as().fetch_all(&self.pool).await?;

			rows.into_iter().map(Goal::try_from).collect()
		})
	}

	fn count<'a>(&'a self, owner: OwnerId, filter: &'a GoalFilter) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new("SELECT count(*) FROM goals");

			push_filter(&mut builder, owner, filter);

			let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;

			Ok(queries::count_from(count))
		})
	}

	fn create<'a>(
		&'a self,
		owner: OwnerId,
		draft: GoalDraft,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<Goal>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("INSERT INTO goals ({COLUMNS}) VALUES ("));
			let mut values = builder.separated(", ");

			values.push_bind(Uuid::new_v4());
			values.push_bind(owner.as_uuid());
			values.push_bind(draft.title);
			values.push_bind(draft.description);
			values.push_bind(draft.target_date);
			values.push_bind(draft.status.as_str());
			values.push_bind(i16::from(draft.progress_percentage));
			values.push_bind(now);
			values.push_bind(now);
			builder.push(format!(") RETURNING {COLUMNS}"));

			let row: GoalRow = builder.build_query_as().fetch_one(&self.pool).await?;

			Goal::try_from(row)
		})
	}

	fn get<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<Goal>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM goals"));

			queries::push_owner(&mut builder, owner);
			builder.push(" AND goal_id = ");
			builder.push_bind(id);

			let row: Option<GoalRow> = builder.build_query_as().fetch_optional(&self.pool).await?;

			row.ok_or_else(|| Goal::KIND.not_found(id)).and_then(Goal::try_from)
		})
	}

	fn update<'a>(
		&'a self,
		owner: OwnerId,
		id: Uuid,
		patch: GoalPatch,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<Goal>> {
		Box::pin(async move {
			let sql = format!(
				"\
UPDATE goals
SET
	title = COALESCE($3, title),
	description = COALESCE($4, description),
	target_date = COALESCE($5, target_date),
	status = COALESCE($6, status),
	progress_percentage = COALESCE($7, progress_percentage),
	updated_at = $8
WHERE owner_id = $1 AND goal_id = $2
RETURNING {COLUMNS}"
			);
			let row: Option<GoalRow> = sqlx::query_as(&sql)
				.bind(owner.as_uuid())
				.bind(id)
				.bind(patch.title)
				.bind(patch.description)
				.bind(patch.target_date)
				.bind(patch.status.map(|status| status.as_str()))
				.bind(patch.progress_percentage.map(i16::from))
				.bind(now)
				.fetch_optional(&self.pool)
				.await?;

			row.ok_or_else(|| Goal::KIND.not_found(id)).and_then(Goal::try_from)
		})
	}

	fn delete<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let result = sqlx::query("DELETE FROM goals WHERE owner_id = $1 AND goal_id = $2")
				.bind(owner.as_uuid())
				.bind(id)
				.execute(&self.pool)
				.await?;

			if result.rows_affected() == 0 {
				return Err(Goal::KIND.not_found(id));
			}

			Ok(())
		})
	}
}
