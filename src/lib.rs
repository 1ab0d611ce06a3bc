//! # Fingerprint
//!
//! Cache-busting URLs and subresource integrity hashes for static assets
//! referenced by a content-management layer.
//!
//! An asset reference (a CMS-managed file, a site path or a URL) is resolved
//! to a canonical identity and modification time. The engine computes a
//! fingerprinted URL and an `integrity` digest for it, and memoizes both in
//! a lookup table stored in a cache backend. The table is keyed by installed
//! version and addressing mode.
//!
//! ## Feature Flags
//!
//! Shared types and asset resolution are always available.
//!
//! - `standard` (default) - Engine with every cache backend
//! - `engine` - [`FingerprintEngine`], strategies, settings and tag rendering
//! - `cache` - [`CacheBackend`] and the in-memory, file and null backends
//!
//! ## Quick Example
//!
//! ```
//! use fingerprint::prelude::*;
//! use std::sync::Arc;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir_all(dir.path().join("assets/css")).unwrap();
//! std::fs::write(dir.path().join("assets/css/main.css"), "body {}").unwrap();
//!
//! let host = StaticHost::new(dir.path()).with_site_url("https://example.com");
//! let engine = FingerprintEngine::new(
//!     Arc::new(host),
//!     Arc::new(InMemoryCache::new()),
//!     FingerprintConfig::new(),
//! )
//! .unwrap();
//!
//! let html = engine
//!     .css("assets/css/main.css", Attributes::new().with("integrity", true))
//!     .unwrap()
//!     .unwrap();
//! assert!(html.starts_with(r#"<link href="https://example.com/assets/css/main.css?v="#));
//! assert!(html.contains(r#"integrity="sha384-"#));
//! assert!(html.ends_with(r#"crossorigin="anonymous">"#));
//! ```

pub use fingerprint_core as core;
pub use fingerprint_locator as locator;

#[cfg(feature = "cache")]
pub use fingerprint_cache as cache;
#[cfg(feature = "engine")]
pub use fingerprint_engine as engine;

// Re-export core types
pub use fingerprint_core::{
	AUTO_ASSET, AssetFile, AssetReference, FingerprintError, FingerprintResult, HostEnvironment,
	INSTALLED_VERSION, ManagedFile, StaticHost,
};

// Re-export resolution
pub use fingerprint_locator::{AssetLocator, ResolvedAsset};

// Re-export cache backends
#[cfg(feature = "cache")]
pub use fingerprint_cache::{
	CacheBackend, CacheBackendExt, CacheError, CacheStatistics, FileCache, InMemoryCache,
	NullCache,
};

// Re-export engine
#[cfg(feature = "engine")]
pub use fingerprint_engine::{
	AttrValue, Attributes, DigestAlgorithm, FingerprintConfig, FingerprintEngine,
	FingerprintSettings, HashStrategy, IntegrityStrategy, LookupEntry, LookupTable, Manifest,
	QueryMode, Renderer, Script, Setting, StrategySlot, Stylesheet,
};

/// Commonly used types.
pub mod prelude {
	// Core types - always available
	pub use crate::{
		AssetFile, AssetLocator, AssetReference, FingerprintError, FingerprintResult,
		HostEnvironment, ManagedFile, StaticHost,
	};

	// Cache feature
	#[cfg(feature = "cache")]
	pub use crate::{CacheBackend, FileCache, InMemoryCache, NullCache};

	// Engine feature
	#[cfg(feature = "engine")]
	pub use crate::{
		Attributes, DigestAlgorithm, FingerprintConfig, FingerprintEngine, FingerprintSettings,
		LookupEntry, QueryMode, Setting, StrategySlot,
	};
}
