use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{DailyPlan, DailyPlanDraft, DailyPlanFilter, DailyPlanPatch, OwnerId};

use crate::{BoxFuture, Entity, Repository, Result, db::Db, models::DailyPlanRow, queries};

const COLUMNS: &str = "plan_id, owner_id, title, description, priority, is_completed, planned_date, estimated_duration, completed_at, created_at, updated_at";
// High priority first, open plans before completed ones, then creation order.
const ORDER: &str = " ORDER BY CASE priority WHEN 'high' THEN 2 WHEN 'medium' THEN 1 ELSE 0 END DESC, is_completed ASC, created_at ASC, plan_id";

fn push_filter(
	builder: &mut QueryBuilder<'_, Postgres>,
	owner: OwnerId,
	filter: &DailyPlanFilter,
) {
	queries::push_owner(builder, owner);

	if let Some(window) = filter.planned {
		builder.push(" AND planned_date BETWEEN ");
		builder.push_bind(window.start);
		builder.push(" AND ");
		builder.push_bind(window.end);
	}
	if let Some(completed) = filter.completed {
		builder.push(" AND is_completed = ");
		builder.push_bind(completed);
	}
}

impl Repository<DailyPlan> for Db {
	fn list<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a DailyPlanFilter,
	) -> BoxFuture<'a, Result<Vec<DailyPlan>>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM daily_plans"));

			push_filter(&mut builder, owner, filter);
			builder.push(ORDER);
			queries::push_limit(&mut builder, filter.limit);

			let rows: Vec<DailyPlanRow> = builder.build_query_as().fetch_all(&self.pool).await?;

			rows.into_iter().map(DailyPlan::try_from).collect()
		})
	}

	fn count<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a DailyPlanFilter,
	) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new("SELECT count(*) FROM daily_plans");

			push_filter(&mut builder, owner, filter);

			let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;

			Ok(queries::count_from(count))
		})
	}

	fn create<'a>(
		&'a self,
		owner: OwnerId,
		draft: DailyPlanDraft,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<DailyPlan>> {
		Box::pin(async move {
			let estimated_duration =
				draft.estimated_duration.map(queries::minutes_column).transpose()?;
			let mut builder =
				QueryBuilder::new(format!("INSERT INTO daily_plans ({COLUMNS}) VALUES ("));
			let mut values = builder.separated(", ");

			values.push_bind(Uuid::new_v4());
			values.push_bind(owner.as_uuid());
			values.push_bind(draft.title);
			values.push_bind(draft.description);
			values.push_bind(draft.priority.as_str());
			values.push_bind(draft.is_completed);
			values.push_bind(draft.planned_date.unwrap_or_else(|| now.date()));
			values.push_bind(estimated_duration);
			values.push_bind(draft.completed_at);
			values.push_bind(now);
			values.push_bind(now);
			builder.push(format!(") RETURNING {COLUMNS}"));

			let row: DailyPlanRow = builder.build_query_as().fetch_one(&self.pool).await?;

			DailyPlan::try_from(row)
		})
	}

	fn get<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<DailyPlan>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM daily_plans"));

			queries::push_owner(&mut builder, owner);
			builder.push(" AND plan_id = ");
			builder.push_bind(id);

			let row: Option<DailyPlanRow> =
				builder.build_query_as().fetch_optional(&self.pool).await?;

			row.ok_or_else(|| DailyPlan::KIND.not_found(id)).and_then(DailyPlan::try_from)
		})
	}

	fn update<'a>(
		&'a self,
		owner: OwnerId,
		id: Uuid,
		patch: DailyPlanPatch,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<DailyPlan>> {
		Box::pin(async move {
			let sql = format!(
				"\
UPDATE daily_plans
SET
	title = COALESCE($3, title),
	description = COALESCE($4, description),
	priority = COALESCE($5, priority),
	is_completed = COALESCE($6, is_completed),
	planned_date = COALESCE($7, planned_date),
	estimated_duration = CASE WHEN $8::boolean THEN $9::integer ELSE estimated_duration END,
	completed_at = CASE WHEN $10::boolean THEN $11::timestamptz ELSE completed_at END,
	updated_at = $12
WHERE owner_id = $1 AND plan_id = $2
RETURNING {COLUMNS}"
			);
			let (overwrite_duration, estimated_duration) = match patch.estimated_duration {
				Some(value) => (true, value.map(queries::minutes_column).transpose()?),
				None => (false, None),
			};
			let (overwrite_completed_at, completed_at) = match patch.completed_at {
				Some(value) => (true, value),
				None => (false, None),
			};
			let row: Option<DailyPlanRow> = sqlx::query_as(&sql)
				.bind(owner.as_uuid())
				.bind(id)
				.bind(patch.title)
				.bind(patch.description)
				.bind(patch.priority.map(|priority| priority.as_str()))
				.bind(patch.is_completed)
				.bind(patch.planned_date)
				.bind(overwrite_duration)
				.bind(estimated_duration)
				.bind(overwrite_completed_at)
				.bind(completed_at)
				.bind(now)
				.fetch_optional(&self.pool)
				.await?;

			row.ok_or_else(|| DailyPlan::KIND.not_found(id)).and_then(DailyPlan::try_from)
		})
	}

	fn delete<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let result =
				sqlx::query("DELETE FROM daily_plans WHERE owner_id = $1 AND plan_id = $2")
					.bind(owner.as_uuid())
					.bind(id)
					.execute(&self.pool)
					.await?;

			if result.rows_affected() == 0 {
				return Err(DailyPlan::KIND.not_found(id));
			}

			Ok(())
		})
	}
}
