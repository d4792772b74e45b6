use sqlx::QueryBuilder;
use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{Note, NoteDraft, NoteFilter, NotePatch, OwnerId};

use crate::{BoxFuture, Entity, Repository, Result, db::Db, models::NoteRow, queries};

const SELECT: &str = "\
SELECT note_id, owner_id, title, content, category, is_pinned, created_at, updated_at
FROM notes";
const RETURNING: &str =
	" RETURNING note_id, owner_id, title, content, category, is_pinned, created_at, updated_at";

impl Repository<Note> for Db {
	fn list<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a NoteFilter,
	) -> BoxFuture<'a, Result<Vec<Note>>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(SELECT);

			queries::push_owner(&mut builder, owner);
			builder.push(" ORDER BY is_pinned DESC, updated_at DESC, note_id");
			queries::push_limit(&mut builder, filter.limit);

			let rows: Vec<NoteRow> = builder.build_query_as().fetch_all(&self.pool).await?;

			rows.into_iter().map(Note::try_from).collect()
		})
	}

	fn count<'a>(&'a self, owner: OwnerId, _filter: &'a NoteFilter) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new("SELECT count(*) FROM notes");

			queries::push_owner(&mut builder, owner);

			let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;

			Ok(queries::count_from(count))
		})
	}

	fn create<'a>(
		&'a self,
		owner: OwnerId,
		draft: NoteDraft,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(
				"INSERT INTO notes (note_id, owner_id, title, content, category, is_pinned, created_at, updated_at) VALUES (",
			);
			let mut values = builder.separated(", ");

			values.push_bind(Uuid::new_v4());
			values.push_bind(owner.as_uuid());
			values.push_bind(draft.title);
			values.push_bind(draft.content);
			values.push_bind(draft.category.as_str());
			values.push_bind(draft.is_pinned);
			values.push_bind(now);
			values.push_bind(now);
			builder.push(")");
			builder.push(RETURNING);

			let row: NoteRow = builder.build_query_as().fetch_one(&self.pool).await?;

			Note::try_from(row)
		})
	}

	fn get<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			let mut builder = QueryBuilder::new(SELECT);

			queries::push_owner(&mut builder, owner);
			builder.push(" AND note_id = ");
			builder.push_bind(id);

			let row: Option<NoteRow> = builder.build_query_as().fetch_optional(&self.pool).await?;

			row.ok_or_else(|| Note::KIND.not_found(id)).and_then(Note::try_from)
		})
	}

	fn update<'a>(
		&'a self,
		owner: OwnerId,
		id: Uuid,
		patch: NotePatch,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			let row: Option<NoteRow> = sqlx::query_as(
				"\
UPDATE notes
SET
	title = COALESCE($3, title),
	content = COALESCE($4, content),
	category = COALESCE($5, category),
	is_pinned = COALESCE($6, is_pinned),
	updated_at = $7
WHERE owner_id = $1 AND note_id = $2
RETURNING note_id, owner_id, title, content, category, is_pinned, created_at, updated_at",
			)
			.bind(owner.as_uuid())
			.bind(id)
			.bind(patch.title)
			.bind(patch.content)
			.bind(patch.category.map(|category| category.as_str()))
			.bind(patch.is_pinned)
			.bind(now)
			.fetch_optional(&self.pool)
			.await?;

			row.ok_or_else(|| Note::KIND.not_found(id)).and_then(Note::try_from)
		})
	}

	fn delete<'a>(&'a self, owner: OwnerId, id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let result = sqlx::query("DELETE FROM notes WHERE owner_id = $1 AND note_id = $2")
				.bind(owner.as_uuid())
				.bind(id)
				.execute(&self.pool)
				.await?;

			if result.rows_affected() == 0 {
				return Err(Note::KIND.not_found(id));
			}

			Ok(())
		})
	}
}
