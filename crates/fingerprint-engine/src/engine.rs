//! The fingerprint engine.

use crate::attrs::Attributes;
use crate::config::{FingerprintConfig, QueryMode, ResolvedOptions};
use crate::lookup::{LookupEntry, LookupTable};
use crate::manifest::Manifest;
use crate::strategy::StrategySlot;
use crate::tags::{Renderer, Script, Stylesheet, renderer_for};
use fingerprint_cache::{CacheBackend, CacheBackendExt};
use fingerprint_core::url::origin;
use fingerprint_core::{AssetReference, FingerprintError, FingerprintResult, HostEnvironment, ManagedFile};
use fingerprint_locator::AssetLocator;
use std::fmt;
use std::sync::Arc;

const CACHE_PREFIX: &str = "lookup";

/// Computes, caches and renders asset fingerprints.
///
/// Each [`process`](Self::process) call reads the lookup table for the
/// current cache generation once, recomputes the entry when it is missing
/// or stale, and writes the whole table back. In debug mode the table is
/// never read or written.
///
/// # Examples
///
/// ```
/// use fingerprint_cache::InMemoryCache;
/// use fingerprint_core::StaticHost;
/// use fingerprint_engine::{FingerprintConfig, FingerprintEngine};
/// use std::sync::Arc;
///
/// let engine = FingerprintEngine::new(
///     Arc::new(StaticHost::new("/srv/site").with_version("1.2.0")),
///     Arc::new(InMemoryCache::new()),
///     FingerprintConfig::new(),
/// )
/// .unwrap();
///
/// assert_eq!(engine.cache_key(), "lookup-1-2-0-query");
///
/// // Missing files come back unmodified.
/// assert_eq!(engine.url("assets/missing.css"), "/assets/missing.css");
/// ```
pub struct FingerprintEngine {
	options: ResolvedOptions,
	locator: AssetLocator,
	cache: Arc<dyn CacheBackend>,
}

impl FingerprintEngine {
	/// Resolves `config` and builds the engine.
	///
	/// A relative manifest path is taken relative to the document root.
	/// Fails when an existing manifest mixes key styles. In debug mode the
	/// cache is flushed.
	pub fn new(
		host: Arc<dyn HostEnvironment>,
		cache: Arc<dyn CacheBackend>,
		config: FingerprintConfig,
	) -> FingerprintResult<Self> {
		let mut options = config.resolve();

		if let QueryMode::Manifest(path) = &options.query
			&& path.is_relative()
		{
			options.query = QueryMode::Manifest(host.index_root().join(path));
		}

		if let Some(path) = options.query.manifest_path()
			&& path.is_file()
		{
			match Manifest::read(path) {
				Ok(manifest) => {
					tracing::debug!(manifest = %path.display(), entries = manifest.len(), "manifest loaded");
				}
				Err(error @ FingerprintError::MixedManifestKeys { .. }) => return Err(error),
				Err(error) => {
					tracing::warn!(manifest = %path.display(), %error, "manifest unreadable");
				}
			}
		}

		if options.debug {
			tracing::debug!("debug mode, flushing fingerprint cache");
			if let Err(error) = cache.flush() {
				tracing::warn!(%error, "failed to flush fingerprint cache");
			}
		}

		Ok(Self {
			options,
			locator: AssetLocator::new(host),
			cache,
		})
	}

	pub fn options(&self) -> &ResolvedOptions {
		&self.options
	}

	pub fn locator(&self) -> &AssetLocator {
		&self.locator
	}

	pub fn host(&self) -> &dyn HostEnvironment {
		self.locator.host()
	}

	/// Runs one strategy directly, bypassing the lookup cache.
	///
	/// The hash strategy always produces a value.
	pub fn apply(&self, slot: StrategySlot, reference: &AssetReference) -> Option<String> {
		match slot {
			StrategySlot::Hash => Some(self.compute_hash(reference)),
			StrategySlot::Integrity => self.compute_integrity(reference),
		}
	}

	fn compute_hash(&self, reference: &AssetReference) -> String {
		self.options
			.hash_strategy()
			.hash(&self.locator, reference, &self.options.query)
	}

	fn compute_integrity(&self, reference: &AssetReference) -> Option<String> {
		self.options.integrity_strategy().integrity(
			&self.locator,
			reference,
			self.options.digest,
			self.options.query.manifest_path(),
		)
	}

	/// Forces `https://` on non-local deployments and strips the site
	/// origin when absolute URLs are disabled.
	///
	/// Works on bare URLs as well as rendered tags.
	pub fn https(&self, url: &str) -> String {
		let host = self.host();
		let mut url = url.to_string();

		if self.options.https && !host.is_local() {
			url = url.replace("http://", "https://");
		}

		if !self.options.absolute_urls
			&& let Some(origin) = origin(&host.base_url())
		{
			let secure = origin.replacen("http://", "https://", 1);
			let plain = origin.replacen("https://", "http://", 1);
			for candidate in [secure, plain] {
				if url == candidate {
					url = "/".to_string();
				} else {
					url = url.replace(&format!("{}/", candidate), "/");
				}
			}
		}
		url
	}

	/// Returns the lookup entry for `reference`, recomputing it when it
	/// is missing or stale.
	pub fn process(&self, reference: &AssetReference) -> LookupEntry {
		let resolved = self.locator.resolve(reference);
		let mut table = self.read().unwrap_or_default();

		match table.get(&resolved.id) {
			Some(entry) if !entry.is_stale(resolved.modified_at) => {
				tracing::debug!(id = %resolved.id, key = %self.cache_key(), "fingerprint cache hit");
				return entry.clone();
			}
			Some(_) => {
				tracing::debug!(id = %resolved.id, modified = ?resolved.modified_at, "fingerprint stale")
			}
			None => tracing::debug!(id = %resolved.id, key = %self.cache_key(), "fingerprint cache miss"),
		}

		let entry = LookupEntry {
			modified: resolved.modified_at,
			root: resolved.root_string(),
			integrity: self.compute_integrity(reference),
			hash: self.compute_hash(reference),
		};
		table.insert(resolved.id, entry.clone());
		self.write(&table);
		entry
	}

	/// Resolves the `integrity`/`crossorigin` pair in `attrs` against `entry`.
	pub fn attrs(&self, attrs: Attributes, entry: &LookupEntry) -> Attributes {
		attrs.apply_integrity(entry)
	}

	/// Processes `reference` and renders it with `renderer`.
	///
	/// `@auto` selects the current template's default asset for the
	/// renderer's extension. When there is none, the result is `Ok(None)` if
	/// missing auto assets are ignored and an error otherwise.
	pub fn helper(
		&self,
		renderer: &dyn Renderer,
		reference: impl Into<AssetReference>,
		attrs: Attributes,
	) -> FingerprintResult<Option<String>> {
		let mut reference = reference.into();

		if reference.is_auto() {
			let extension = renderer.extension();
			let directory = format!("{}/templates", extension);
			match self.host().template_asset(&directory, extension) {
				Some(url) => reference = AssetReference::parse(url),
				None if self.options.ignore_missing_auto_asset => {
					tracing::debug!(extension, "no template asset, skipping");
					return Ok(None);
				}
				None => {
					return Err(FingerprintError::MissingAutoAsset {
						extension: extension.to_string(),
					});
				}
			}
		}

		let entry = self.process(&reference);
		let attrs = self.attrs(attrs, &entry);
		Ok(renderer
			.render(&entry.hash, &attrs)
			.map(|html| self.https(&html)))
	}

	/// Like [`helper`](Self::helper) with the renderer looked up by name.
	/// Unknown names render nothing.
	pub fn helper_named(
		&self,
		name: &str,
		reference: impl Into<AssetReference>,
		attrs: Attributes,
	) -> FingerprintResult<Option<String>> {
		match renderer_for(name) {
			Some(renderer) => self.helper(renderer, reference, attrs),
			None => {
				tracing::debug!(renderer = name, "unknown renderer");
				Ok(None)
			}
		}
	}

	/// `<link>` tag for a stylesheet.
	pub fn css(
		&self,
		reference: impl Into<AssetReference>,
		attrs: Attributes,
	) -> FingerprintResult<Option<String>> {
		self.helper(&Stylesheet, reference, attrs)
	}

	/// `<script>` tag for a script.
	pub fn js(
		&self,
		reference: impl Into<AssetReference>,
		attrs: Attributes,
	) -> FingerprintResult<Option<String>> {
		self.helper(&Script, reference, attrs)
	}

	/// The fingerprinted URL of `reference`.
	pub fn url(&self, reference: impl Into<AssetReference>) -> String {
		let entry = self.process(&reference.into());
		self.https(&entry.hash)
	}

	/// Fingerprinted URL of a managed file.
	pub fn fingerprint(&self, file: &Arc<dyn ManagedFile>) -> String {
		self.process(&AssetReference::Managed(Arc::clone(file))).hash
	}

	/// Integrity string of a managed file.
	pub fn file_integrity(&self, file: &Arc<dyn ManagedFile>) -> Option<String> {
		self.process(&AssetReference::Managed(Arc::clone(file)))
			.integrity
	}

	/// `lookup-<version with dashes>-<query|redirect>`
	pub fn cache_key(&self) -> String {
		format!(
			"{}-{}-{}",
			CACHE_PREFIX,
			self.host().version().replace('.', "-"),
			self.options.query.cache_segment()
		)
	}

	/// The stored lookup table. Always `None` in debug mode.
	pub fn read(&self) -> Option<LookupTable> {
		if self.options.debug {
			return None;
		}
		let key = self.cache_key();
		match self.cache.get::<LookupTable>(&key) {
			Ok(table) => table,
			Err(error) => {
				tracing::warn!(key = %key, %error, "failed to read fingerprint cache");
				None
			}
		}
	}

	fn write(&self, table: &LookupTable) -> bool {
		if self.options.debug {
			return false;
		}
		let key = self.cache_key();
		match self.cache.set(&key, table, None) {
			Ok(()) => true,
			Err(error) => {
				tracing::warn!(key = %key, %error, "failed to write fingerprint cache");
				false
			}
		}
	}
}

impl fmt::Debug for FingerprintEngine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FingerprintEngine")
			.field("options", &self.options)
			.field("cache_key", &self.cache_key())
			.finish_non_exhaustive()
	}
}
