use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub calendar: Calendar,
	pub storage: Storage,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Calendar {
	/// Canonical offset for every date comparison, formatted as `+HH:MM` or `-HH:MM`.
	pub utc_offset: String,
}
impl Default for Calendar {
	fn default() -> Self {
		Self { utc_offset: "+00:00".to_string() }
	}
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub backend: StorageBackend,
	pub postgres: Option<Postgres>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
	Postgres,
	/// Process-local and lost on restart.
	Memory,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	#[serde(default)]
	pub api_tokens: Vec<ApiToken>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiToken {
	pub token: String,
	pub owner_id: Uuid,
}
