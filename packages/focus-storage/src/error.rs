#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Invalid stored data: {0}")]
	InvalidData(String),
}
impl From<focus_domain::Error> for Error {
	fn from(err: focus_domain::Error) -> Self {
		Self::InvalidData(err.to_string())
	}
}
