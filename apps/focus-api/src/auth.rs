//! Resolves the calling owner from `Authorization: Bearer <token>`.

use axum::{
	extract::FromRequestParts,
	http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use focus_domain::OwnerId;

use crate::{routes::ApiError, state::AppState};

/// The authenticated owner of a request. Handlers never read the owner from the payload.
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
	pub owner: OwnerId,
}
impl FromRequestParts<AppState> for AuthContext {
	type Rejection = ApiError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let owner = read_bearer_token(&parts.headers)
			.and_then(|token| state.owner_for_token(token))
			.ok_or_else(ApiError::unauthorized)?;

		Ok(Self { owner })
	}
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let raw = headers.get(AUTHORIZATION)?;
	let value = raw.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}
