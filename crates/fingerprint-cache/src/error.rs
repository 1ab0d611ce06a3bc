//! Cache backend errors.

use fingerprint_core::FingerprintError;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CacheError {
	#[error("serialization failed: {0}")]
	Serialization(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("cache backend unavailable: {0}")]
	Unavailable(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

impl From<CacheError> for FingerprintError {
	fn from(error: CacheError) -> Self {
		FingerprintError::Cache(error.to_string())
	}
}
