use sqlx::{PgPool, postgres::PgPoolOptions};

use focus_domain::{DailyPlan, Goal, Note, OwnerId, Reminder, StudySession, StudySessionFilter};

use crate::{BoxFuture, EntityStore, Repository, Result, queries, schema};

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &focus_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		let lock_id: i64 = 4_202_611;
		// Advisory locks are held per connection. Use a single transaction so the lock is scoped to
		// one connection and automatically released when the transaction ends.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		tracing::info!("Database schema is up to date.");

		Ok(())
	}
}

impl EntityStore for Db {
	fn notes(&self) -> &dyn Repository<Note> {
		self
	}

	fn daily_plans(&self) -> &dyn Repository<DailyPlan> {
		self
	}

	fn study_sessions(&self) -> &dyn Repository<StudySession> {
		self
	}

	fn goals(&self) -> &dyn Repository<Goal> {
		self
	}

	fn reminders(&self) -> &dyn Repository<Reminder> {
		self
	}

	fn study_minutes<'a>(
		&'a self,
		owner: OwnerId,
		filter: &'a StudySessionFilter,
	) -> BoxFuture<'a, Result<u64>> {
		Box::pin(queries::study_sessions::total_minutes(&self.pool, owner, filter))
	}
}
