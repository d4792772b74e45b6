use sqlx::{PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{
	OwnerId, StudySession, StudySessionDraft, StudySessionFilter, StudySessionPatch,
};

use crate::{BoxFuture, Entity, Repository, Result, db::Db, models::StudySessionRow, queries};

const COLUMNS: &str =
	"session_id, owner_id, subject, duration_minutes, notes, rating, session_date, created_at";

fn push_filter(
	builder: &mut QueryBuilder<'_, Postgres>,
	owner: OwnerId,
	filter: &StudySessionFilter,
) {
	queries::push_owner(builder, owner);

	if let Some(since) = filter.since {
		builder.push(" AND session_date >= ");
		builder.push_bind(since);
	}
	if let Some(until) = filter.until {
		builder.push(" AND session_date < ");
		builder.push_bind(until);
	}
}

pub async fn total_minutes(
	pool: &PgPool,
	owner: OwnerId,
	filter: &StudySessionFilter,
) -> Result<u64> {
	let mut builder =
		QueryBuilder::new("SELECT COALESCE(SUM(duration_minutes), 0)::BIGINT FROM study_sessions");

	push_filter(&mut builder, owner, filter);

	let total: i64 = builder.build_query_scalar().fetch_one(pool).await?;

	Ok(queries::count_from(total))
}

impl Repository<StudySession> for Db {
	fn list<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a StudySessionFilter,
	) -> BoxFuture<'a, Result<Vec<StudySession>>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM study_sessions"));

			push_filter(&mut builder, owner, filter);
			builder.push(" ORDER BY session_date DESC, session_id");
			queries::push_limit(&mut builder, filter.limit);

			let rows: Vec<StudySessionRow> =
				builder.build_query_as().fetch_all(&self.pool).await?;

			rows.into_iter().map(StudySession::try_from).collect()
		})
	}

	fn count<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a StudySessionFilter,
	) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new("SELECT count(*) FROM study_sessions");

			push_filter(&mut builder, owner, filter);

			let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;

			Ok(queries::count_from(count))
		})
	}

	fn create<'a>(
		&'a self,
		owner: OwnerId,
		draft: StudySessionDraft,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<StudySession>> {
		Box::pin(async move {
			let duration_minutes = queries::minutes_column(draft.duration_minutes)?;
			let mut builder =
				QueryBuilder::new(format!("INSERT INTO study_sessions ({COLUMNS}) VALUES ("));
			let mut values = builder.separated(", ");

			values.push_bind(Uuid::new_v4());
			values.push_bind(owner.as_uuid());
			values.push_bind(draft.subject);
			values.push_bind(duration_minutes);
			values.push_bind(draft.notes);
			values.push_bind(draft.rating.map(i16::from));
			values.push_bind(draft.session_date.unwrap_or(now));
			values.push_bind(now);
			builder.push(format!(") RETURNING {COLUMNS}"));

			let row: StudySessionRow = builder.build_query_as().fetch_one(&self.pool).await?;

			StudySession::try_from(row)
		})
	}

	fn get<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<StudySession>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM study_sessions"));

			queries::push_owner(&mut builder, owner);
			builder.push(" AND session_id = ");
			builder.push_bind(id);

			let row: Option<StudySessionRow> =
				builder.build_query_as().fetch_optional(&self.pool).await?;

			row.ok_or_else(|| StudySession::KIND.not_found(id)).and_then(StudySession::try_from)
		})
	}

	fn update<'a>(
		&'a self,
		owner: OwnerId,
		id: Uuid,
		patch: StudySessionPatch,
		_now: OffsetDateTime,
	) -> BoxFuture<'a, Result<StudySession>> {
		Box::pin(async move {
			let sql = format!(
				"\
UPDATE study_sessions
SET
	subject = COALESCE($3, subject),
	duration_minutes = COALESCE($4, duration_minutes),
	notes = COALESCE($5, notes),
	rating = CASE WHEN $6::boolean THEN $7::smallint ELSE rating END,
	session_date = COALESCE($8, session_date)
WHERE owner_id = $1 AND session_id = $2
RETURNING {COLUMNS}"
			);
			let duration_minutes =
				patch.duration_minutes.map(queries::minutes_column).transpose()?;
			let (overwrite_rating, rating) = match patch.rating {
				Some(value) => (true, value.map(i16::from)),
				None => (false, None),
			};
			let row: Option<StudySessionRow> = sqlx::query_as(&sql)
				.bind(owner.as_uuid())
				.bind(id)
				.bind(patch.subject)
				.bind(duration_minutes)
				.bind(patch.notes)
				.bind(overwrite_rating)
				.bind(rating)
				.bind(patch.session_date)
				.fetch_optional(&self.pool)
				.await?;

			row.ok_or_else(|| StudySession::KIND.not_found(id)).and_then(StudySession::try_from)
		})
	}

	fn delete<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let result =
				sqlx::query("DELETE FROM study_sessions WHERE owner_id = $1 AND session_id = $2")
					.bind(owner.as_uuid())
					.bind(id)
					.execute(&self.pool)
					.await?;

			if result.rows_affected() == 0 {
				return Err(StudySession::KIND.not_found(id));
			}

			Ok(())
		})
	}
}
