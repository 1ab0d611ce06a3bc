//! Directory-backed cache implementation
//!
//! Each key is stored as one JSON document `<directory>/<key>.json`, so a
//! lookup table survives process restarts the same way the CMS file cache
//! keeps it.

use crate::backend::CacheBackend;
use crate::error::{CacheError, CacheResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize)]
struct StoredValue {
	expires_at: Option<u64>,
	value: String,
}

/// Cache backend writing one file per key below a directory.
#[derive(Debug, Clone)]
pub struct FileCache {
	directory: PathBuf,
	default_ttl: Option<Duration>,
}

impl FileCache {
	/// Create a cache storing its files in `directory`.
	///
	/// The directory is created on first write.
	pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
		Self {
			directory: directory.into(),
			default_ttl: None,
		}
	}

	pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
		self.default_ttl = Some(ttl);
		self
	}

	pub fn directory(&self) -> &Path {
		&self.directory
	}

	fn path_for(&self, key: &str) -> PathBuf {
		let name: String = key
			.chars()
			.map(|c| {
				if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
					c
				} else {
					'_'
				}
			})
			.collect();
		self.directory.join(format!("{}.json", name))
	}

	fn now_secs() -> u64 {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_secs())
			.unwrap_or_default()
	}
}

impl CacheBackend for FileCache {
	fn get_bytes(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
		let path = self.path_for(key);
		let content = match fs::read(&path) {
			Ok(content) => content,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(e.into()),
		};

		let stored: StoredValue = serde_json::from_slice(&content)
			.map_err(|e| CacheError::Serialization(e.to_string()))?;

		if stored.expires_at.is_some_and(|at| Self::now_secs() > at) {
			tracing::debug!(key, path = %path.display(), "cache record expired");
			return Ok(None);
		}

		STANDARD
			.decode(stored.value.as_bytes())
			.map(Some)
			.map_err(|e| CacheError::Serialization(e.to_string()))
	}

	fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> CacheResult<()> {
		fs::create_dir_all(&self.directory)?;

		let stored = StoredValue {
			expires_at: ttl
				.or(self.default_ttl)
				.map(|ttl| Self::now_secs() + ttl.as_secs()),
			value: STANDARD.encode(value),
		};
		let json =
			serde_json::to_vec(&stored).map_err(|e| CacheError::Serialization(e.to_string()))?;

		// Whole-record replacement: write next to the target, then rename.
		let path = self.path_for(key);
		let staging = path.with_extension("json.tmp");
		fs::write(&staging, json)?;
		fs::rename(&staging, &path)?;
		Ok(())
	}

	fn delete(&self, key: &str) -> CacheResult<()> {
		match fs::remove_file(self.path_for(key)) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e.into()),
		}
	}

	fn flush(&self) -> CacheResult<()> {
		let entries = match fs::read_dir(&self.directory) {
			Ok(entries) => entries,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
			Err(e) => return Err(e.into()),
		};

		let mut removed = 0usize;
		for entry in entries {
			let path = entry?.path();
			if path.extension().is_some_and(|ext| ext == "json") {
				fs::remove_file(&path)?;
				removed += 1;
			}
		}
		tracing::debug!(directory = %self.directory.display(), removed, "file cache flushed");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::CacheBackendExt;
	use rstest::rstest;
	use tempfile::TempDir;

	#[rstest]
	fn test_file_cache_roundtrip_across_instances() {
		let dir = TempDir::new().unwrap();
		let cache = FileCache::new(dir.path().join("cache"));
		cache.set("lookup-1-0-0-query", &vec![1, 2, 3], None).unwrap();

		let reopened = FileCache::new(dir.path().join("cache"));
		let value: Option<Vec<i32>> = reopened.get("lookup-1-0-0-query").unwrap();
		assert_eq!(value, Some(vec![1, 2, 3]));
		assert!(dir.path().join("cache/lookup-1-0-0-query.json").is_file());
	}

	#[rstest]
	fn test_file_cache_sanitises_keys() {
		let dir = TempDir::new().unwrap();
		let cache = FileCache::new(dir.path());
		cache.set("../escape/key", &"x", None).unwrap();
		assert!(dir.path().join(".._escape_key.json").is_file());
	}

	#[rstest]
	fn test_file_cache_missing_and_flush() {
		let dir = TempDir::new().unwrap();
		let cache = FileCache::new(dir.path().join("never-created"));
		let value: Option<String> = cache.get("nothing").unwrap();
		assert_eq!(value, None);
		cache.flush().unwrap();
		cache.delete("nothing").unwrap();

		cache.set("a", &"1", None).unwrap();
		cache.set("b", &"2", None).unwrap();
		cache.flush().unwrap();
		assert!(!cache.has_key("a").unwrap());
		assert!(!cache.has_key("b").unwrap());
	}

	#[rstest]
	fn test_file_cache_corrupt_record_is_an_error() {
		let dir = TempDir::new().unwrap();
		let cache = FileCache::new(dir.path());
		fs::write(dir.path().join("broken.json"), "not json").unwrap();

		let result: CacheResult<Option<String>> = cache.get("broken");
		assert!(matches!(result, Err(CacheError::Serialization(_))));
	}
}
