//! Engine configuration.
//!
//! [`FingerprintConfig`] collects option values, any of which may be
//! deferred until the engine is built. [`FingerprintConfig::resolve`]
//! evaluates them exactly once. The hash and integrity strategies are not
//! evaluated there: they stay callables invoked per asset.

use crate::digest::DigestAlgorithm;
use crate::strategy::{DefaultHashStrategy, DefaultIntegrityStrategy, HashStrategy, IntegrityStrategy};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Addressing strategy for fingerprinted URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryMode {
	/// `main.css?v=<mtime>`
	#[default]
	Query,
	/// `main.<md5>.css`, served through rewrite rules
	ContentHash,
	/// Built filenames looked up in a JSON manifest
	Manifest(PathBuf),
}

impl QueryMode {
	/// Cache key segment distinguishing the addressing modes.
	pub fn cache_segment(&self) -> &'static str {
		match self {
			Self::Query | Self::Manifest(_) => "query",
			Self::ContentHash => "redirect",
		}
	}

	pub fn manifest_path(&self) -> Option<&Path> {
		match self {
			Self::Manifest(path) => Some(path),
			_ => None,
		}
	}
}

impl From<bool> for QueryMode {
	fn from(query: bool) -> Self {
		if query { Self::Query } else { Self::ContentHash }
	}
}

/// An option value that is either known or computed at engine construction.
pub enum Setting<T> {
	Value(T),
	Deferred(Box<dyn FnOnce() -> T + Send>),
}

impl<T> Setting<T> {
	/// Defers computing the value until the configuration is resolved.
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_engine::Setting;
	///
	/// let debug = Setting::deferred(|| std::env::var("APP_DEBUG").is_ok());
	/// let _value: bool = debug.resolve();
	/// ```
	pub fn deferred<F>(compute: F) -> Self
	where
		F: FnOnce() -> T + Send + 'static,
	{
		Self::Deferred(Box::new(compute))
	}

	pub fn resolve(self) -> T {
		match self {
			Self::Value(value) => value,
			Self::Deferred(compute) => compute(),
		}
	}
}

impl<T> From<T> for Setting<T> {
	fn from(value: T) -> Self {
		Self::Value(value)
	}
}

impl<T: fmt::Debug> fmt::Debug for Setting<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Self::Deferred(_) => f.write_str("Deferred(..)"),
		}
	}
}

/// Builder for the engine options.
///
/// # Examples
///
/// ```
/// use fingerprint_engine::{DigestAlgorithm, FingerprintConfig, QueryMode, Setting};
///
/// let options = FingerprintConfig::new()
///     .query(QueryMode::ContentHash)
///     .digest(DigestAlgorithm::Sha512)
///     .debug(Setting::deferred(|| false))
///     .resolve();
///
/// assert_eq!(options.query, QueryMode::ContentHash);
/// assert_eq!(options.digest, DigestAlgorithm::Sha512);
/// assert!(!options.debug);
/// ```
pub struct FingerprintConfig {
	debug: Setting<bool>,
	query: Setting<QueryMode>,
	digest: Setting<DigestAlgorithm>,
	https: Setting<bool>,
	absolute_urls: Setting<bool>,
	ignore_missing_auto_asset: Setting<bool>,
	hash: Arc<dyn HashStrategy>,
	integrity: Arc<dyn IntegrityStrategy>,
}

impl Default for FingerprintConfig {
	fn default() -> Self {
		Self {
			debug: false.into(),
			query: QueryMode::Query.into(),
			digest: DigestAlgorithm::Sha384.into(),
			https: true.into(),
			absolute_urls: true.into(),
			ignore_missing_auto_asset: false.into(),
			hash: Arc::new(DefaultHashStrategy),
			integrity: Arc::new(DefaultIntegrityStrategy),
		}
	}
}

impl FingerprintConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bypass the lookup cache and flush it on construction.
	pub fn debug(mut self, debug: impl Into<Setting<bool>>) -> Self {
		self.debug = debug.into();
		self
	}

	pub fn query(mut self, query: impl Into<Setting<QueryMode>>) -> Self {
		self.query = query.into();
		self
	}

	pub fn digest(mut self, digest: impl Into<Setting<DigestAlgorithm>>) -> Self {
		self.digest = digest.into();
		self
	}

	/// Like [`digest`](Self::digest), from an algorithm name.
	pub fn digest_name(self, name: &str) -> Self {
		self.digest(DigestAlgorithm::from_name(name))
	}

	/// Rewrite `http://` to `https://` on non-local deployments.
	pub fn https(mut self, https: impl Into<Setting<bool>>) -> Self {
		self.https = https.into();
		self
	}

	pub fn absolute_urls(mut self, absolute: impl Into<Setting<bool>>) -> Self {
		self.absolute_urls = absolute.into();
		self
	}

	/// Render nothing instead of failing when `@auto` finds no asset.
	pub fn ignore_missing_auto_asset(mut self, ignore: impl Into<Setting<bool>>) -> Self {
		self.ignore_missing_auto_asset = ignore.into();
		self
	}

	pub fn hash_strategy<S: HashStrategy + 'static>(mut self, strategy: S) -> Self {
		self.hash = Arc::new(strategy);
		self
	}

	pub fn integrity_strategy<S: IntegrityStrategy + 'static>(mut self, strategy: S) -> Self {
		self.integrity = Arc::new(strategy);
		self
	}

	/// Evaluates every deferred option.
	pub fn resolve(self) -> ResolvedOptions {
		ResolvedOptions {
			debug: self.debug.resolve(),
			query: self.query.resolve(),
			digest: self.digest.resolve(),
			https: self.https.resolve(),
			absolute_urls: self.absolute_urls.resolve(),
			ignore_missing_auto_asset: self.ignore_missing_auto_asset.resolve(),
			hash: self.hash,
			integrity: self.integrity,
		}
	}
}

/// Options after every deferred value has been evaluated.
#[derive(Clone)]
pub struct ResolvedOptions {
	pub debug: bool,
	pub query: QueryMode,
	pub digest: DigestAlgorithm,
	pub https: bool,
	pub absolute_urls: bool,
	pub ignore_missing_auto_asset: bool,
	hash: Arc<dyn HashStrategy>,
	integrity: Arc<dyn IntegrityStrategy>,
}

impl ResolvedOptions {
	pub fn hash_strategy(&self) -> &dyn HashStrategy {
		self.hash.as_ref()
	}

	pub fn integrity_strategy(&self) -> &dyn IntegrityStrategy {
		self.integrity.as_ref()
	}
}

impl fmt::Debug for ResolvedOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResolvedOptions")
			.field("debug", &self.debug)
			.field("query", &self.query)
			.field("digest", &self.digest)
			.field("https", &self.https)
			.field("absolute_urls", &self.absolute_urls)
			.field("ignore_missing_auto_asset", &self.ignore_missing_auto_asset)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[rstest]
	fn test_defaults() {
		let options = FingerprintConfig::new().resolve();
		assert!(!options.debug);
		assert_eq!(options.query, QueryMode::Query);
		assert_eq!(options.digest, DigestAlgorithm::Sha384);
		assert!(options.https);
		assert!(options.absolute_urls);
		assert!(!options.ignore_missing_auto_asset);
	}

	#[rstest]
	fn test_deferred_settings_run_once_at_resolve() {
		static CALLS: AtomicUsize = AtomicUsize::new(0);

		let config = FingerprintConfig::new().debug(Setting::deferred(|| {
			CALLS.fetch_add(1, Ordering::SeqCst);
			true
		}));
		assert_eq!(CALLS.load(Ordering::SeqCst), 0);

		let options = config.resolve();
		assert!(options.debug);
		assert_eq!(CALLS.load(Ordering::SeqCst), 1);
	}

	#[rstest]
	fn test_deferred_manifest_path() {
		let options = FingerprintConfig::new()
			.query(Setting::deferred(|| {
				QueryMode::Manifest(PathBuf::from("/srv/site/manifest.json"))
			}))
			.resolve();
		assert_eq!(
			options.query.manifest_path(),
			Some(Path::new("/srv/site/manifest.json"))
		);
		assert_eq!(options.query.cache_segment(), "query");
	}

	#[rstest]
	fn test_cache_segments() {
		assert_eq!(QueryMode::from(true).cache_segment(), "query");
		assert_eq!(QueryMode::from(false).cache_segment(), "redirect");
	}

	#[rstest]
	fn test_digest_name_normalises() {
		let options = FingerprintConfig::new().digest_name("whirlpool").resolve();
		assert_eq!(options.digest, DigestAlgorithm::Sha384);
	}
}
