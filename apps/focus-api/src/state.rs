use std::{collections::HashMap, sync::Arc};

use color_eyre::eyre;

use focus_config::{Config, Security, StorageBackend};
use focus_domain::{Calendar, OwnerId};
use focus_service::FocusService;
use focus_storage::{EntityStore, MemoryStore, db::Db};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<FocusService>,
	tokens: Arc<HashMap<String, OwnerId>>,
}
impl AppState {
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let calendar = Calendar::new(focus_config::utc_offset(&config.calendar)?);
		let store: Arc<dyn EntityStore> = match config.storage.backend {
			StorageBackend::Postgres => {
				let postgres = config.storage.postgres.as_ref().ok_or_else(|| {
					eyre::eyre!("storage.postgres is required when storage.backend is postgres.")
				})?;
				let db = Db::connect(postgres).await?;

				db.ensure_schema().await?;

				Arc::new(db)
			},
			StorageBackend::Memory => {
				tracing::warn!("Using the in-memory storage backend. Data is lost on restart.");

				Arc::new(MemoryStore::new())
			},
		};

		Ok(Self::with_store(&config.security, store, calendar))
	}

	pub fn with_store(
		security: &Security,
		store: Arc<dyn EntityStore>,
		calendar: Calendar,
	) -> Self {
		let tokens = security
			.api_tokens
			.iter()
			.map(|api_token| (api_token.token.clone(), OwnerId::new(api_token.owner_id)))
			.collect();

		Self { service: Arc::new(FocusService::new(store, calendar)), tokens: Arc::new(tokens) }
	}

	pub fn owner_for_token(&self, token: &str) -> Option<OwnerId> {
		self.tokens.get(token).copied()
	}
}
