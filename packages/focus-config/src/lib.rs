mod error;
mod types;

pub use error::{Error, Result};
pub use types::{ApiToken, Calendar, Config, Postgres, Security, Service, Storage, StorageBackend};

use std::{collections::HashSet, fs, path::Path};

use time::{UtcOffset, macros::format_description};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	utc_offset(&cfg.calendar)?;

	if cfg.storage.backend == StorageBackend::Postgres {
		let Some(postgres) = cfg.storage.postgres.as_ref() else {
			return Err(Error::Validation {
				message: "storage.postgres is required when storage.backend is postgres."
					.to_string(),
			});
		};

		if postgres.dsn.trim().is_empty() {
			return Err(Error::Validation {
				message: "storage.postgres.dsn must be non-empty.".to_string(),
			});
		}
		if postgres.pool_max_conns == 0 {
			return Err(Error::Validation {
				message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
			});
		}
	}
	if cfg.security.api_tokens.is_empty() {
		return Err(Error::Validation {
			message: "security.api_tokens must contain at least one token.".to_string(),
		});
	}

	let mut seen = HashSet::new();

	for api_token in &cfg.security.api_tokens {
		if api_token.token.trim().is_empty() {
			return Err(Error::Validation {
				message: "security.api_tokens.token must be non-empty.".to_string(),
			});
		}
		if !seen.insert(api_token.token.as_str()) {
			return Err(Error::Validation {
				message: "security.api_tokens.token values must be unique.".to_string(),
			});
		}
	}

	Ok(())
}

/// Parses `calendar.utc_offset`.
pub fn utc_offset(calendar: &Calendar) -> Result<UtcOffset> {
	UtcOffset::parse(
		calendar.utc_offset.trim(),
		format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
	)
	.map_err(|_| Error::Validation {
		message: "calendar.utc_offset must look like +HH:MM or -HH:MM.".to_string(),
	})
}

fn normalize(cfg: &mut Config) {
	for api_token in &mut cfg.security.api_tokens {
		let trimmed = api_token.token.trim();

		if trimmed.len() != api_token.token.len() {
			api_token.token = trimmed.to_string();
		}
	}

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
