pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<focus_storage::Error> for Error {
	fn from(err: focus_storage::Error) -> Self {
		match err {
			focus_storage::Error::NotFound(message) => Self::NotFound { message },
			focus_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			focus_storage::Error::InvalidData(message) => Self::Storage { message },
		}
	}
}
