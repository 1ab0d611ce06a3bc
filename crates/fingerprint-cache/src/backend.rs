//! The cache backend trait.

use crate::error::{CacheError, CacheResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A synchronous key-value store holding serialized values.
///
/// Backends store opaque bytes; [`CacheBackendExt`] layers JSON
/// (de)serialization on top so the trait stays object safe.
pub trait CacheBackend: Send + Sync {
	/// Returns the raw value stored under `key`, if any and not expired.
	fn get_bytes(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

	/// Stores `value` under `key`, replacing any previous value.
	fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> CacheResult<()>;

	fn delete(&self, key: &str) -> CacheResult<()>;

	fn has_key(&self, key: &str) -> CacheResult<bool> {
		Ok(self.get_bytes(key)?.is_some())
	}

	/// Removes every entry.
	fn flush(&self) -> CacheResult<()>;
}

/// Typed access to any [`CacheBackend`].
pub trait CacheBackendExt {
	fn get<T>(&self, key: &str) -> CacheResult<Option<T>>
	where
		T: for<'de> Deserialize<'de>;

	fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()>
	where
		T: Serialize + ?Sized;
}

impl<B: CacheBackend + ?Sized> CacheBackendExt for B {
	fn get<T>(&self, key: &str) -> CacheResult<Option<T>>
	where
		T: for<'de> Deserialize<'de>,
	{
		match self.get_bytes(key)? {
			Some(bytes) => serde_json::from_slice(&bytes)
				.map(Some)
				.map_err(|e| CacheError::Serialization(e.to_string())),
			None => Ok(None),
		}
	}

	fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()>
	where
		T: Serialize + ?Sized,
	{
		let serialized =
			serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
		self.set_bytes(key, serialized, ttl)
	}
}

/// A backend that never stores anything.
///
/// Every read is a miss; writes and flushes succeed without effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

impl CacheBackend for NullCache {
	fn get_bytes(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
		Ok(None)
	}

	fn set_bytes(&self, _key: &str, _value: Vec<u8>, _ttl: Option<Duration>) -> CacheResult<()> {
		Ok(())
	}

	fn delete(&self, _key: &str) -> CacheResult<()> {
		Ok(())
	}

	fn flush(&self) -> CacheResult<()> {
		Ok(())
	}
}
