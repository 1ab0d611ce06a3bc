//! In-memory cache implementation

use crate::backend::CacheBackend;
use crate::entry::CacheEntry;
use crate::error::CacheResult;
use crate::statistics::CacheStatistics;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Process-local cache backend.
///
/// Clones share the same store, so one instance can be handed to several
/// engines within a process.
#[derive(Clone, Default)]
pub struct InMemoryCache {
	store: Arc<RwLock<HashMap<String, CacheEntry>>>,
	default_ttl: Option<Duration>,
	hits: Arc<AtomicU64>,
	misses: Arc<AtomicU64>,
	writes: Arc<AtomicU64>,
	flushes: Arc<AtomicU64>,
}

impl InMemoryCache {
	/// Create a new in-memory cache
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_cache::{CacheBackendExt, InMemoryCache};
	///
	/// let cache = InMemoryCache::new();
	/// cache.set("key", &"value", None).unwrap();
	/// let value: Option<String> = cache.get("key").unwrap();
	/// assert_eq!(value.as_deref(), Some("value"));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a default TTL applied to writes that do not carry their own.
	pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
		self.default_ttl = Some(ttl);
		self
	}

	/// Remove expired entries
	pub fn cleanup_expired(&self) {
		let mut store = self.store.write();
		let before = store.len();
		store.retain(|_, entry| !entry.is_expired());
		tracing::trace!(removed = before - store.len(), "expired cache entries removed");
	}

	/// List all keys, including expired entries not yet cleaned up
	pub fn list_keys(&self) -> Vec<String> {
		self.store.read().keys().cloned().collect()
	}

	pub fn statistics(&self) -> CacheStatistics {
		CacheStatistics {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
			writes: self.writes.load(Ordering::Relaxed),
			flushes: self.flushes.load(Ordering::Relaxed),
			entry_count: self.store.read().len() as u64,
		}
	}
}

impl CacheBackend for InMemoryCache {
	fn get_bytes(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
		let store = self.store.read();
		match store.get(key) {
			Some(entry) if !entry.is_expired() => {
				self.hits.fetch_add(1, Ordering::Relaxed);
				Ok(Some(entry.value.clone()))
			}
			_ => {
				self.misses.fetch_add(1, Ordering::Relaxed);
				Ok(None)
			}
		}
	}

	fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> CacheResult<()> {
		let entry = CacheEntry::new(value, ttl.or(self.default_ttl));
		self.store.write().insert(key.to_string(), entry);
		self.writes.fetch_add(1, Ordering::Relaxed);
		Ok(())
	}

	fn delete(&self, key: &str) -> CacheResult<()> {
		self.store.write().remove(key);
		Ok(())
	}

	fn has_key(&self, key: &str) -> CacheResult<bool> {
		Ok(self
			.store
			.read()
			.get(key)
			.is_some_and(|entry| !entry.is_expired()))
	}

	fn flush(&self) -> CacheResult<()> {
		self.store.write().clear();
		self.flushes.fetch_add(1, Ordering::Relaxed);
		Ok(())
	}
}
