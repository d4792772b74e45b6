pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unknown {kind} value {value:?}.")]
	UnknownVariant { kind: &'static str, value: String },
}
