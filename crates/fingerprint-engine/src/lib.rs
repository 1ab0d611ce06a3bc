//! Cache-busting URLs and subresource integrity for static assets.
//!
//! [`FingerprintEngine`] resolves an [`AssetReference`] through the
//! locator, keeps a [`LookupTable`] in a [`CacheBackend`] and recomputes
//! entries whenever the file has changed since they were stored.
//!
//! ## Addressing modes
//!
//! | [`QueryMode`] | `assets/css/main.css` becomes |
//! |---------------|-------------------------------|
//! | `Query` | `/assets/css/main.css?v=1700000000` |
//! | `ContentHash` | `/assets/css/main.<md5>.css` |
//! | `Manifest(path)` | `/assets/css/<built name from manifest>` |
//!
//! [`AssetReference`]: fingerprint_core::AssetReference
//! [`CacheBackend`]: fingerprint_cache::CacheBackend

pub mod attrs;
pub mod config;
pub mod digest;
pub mod engine;
pub mod lookup;
pub mod manifest;
pub mod settings;
pub mod strategy;
pub mod tags;

pub use attrs::{AttrValue, Attributes};
pub use config::{FingerprintConfig, QueryMode, ResolvedOptions, Setting};
pub use digest::{DigestAlgorithm, md5_hex};
pub use engine::FingerprintEngine;
pub use lookup::{LookupEntry, LookupTable};
pub use manifest::Manifest;
pub use settings::{ENV_PREFIX, FingerprintSettings, QuerySetting};
pub use strategy::{
	DefaultHashStrategy, DefaultIntegrityStrategy, HashStrategy, IntegrityStrategy, StrategySlot,
};
pub use tags::{Renderer, Script, Stylesheet, renderer_for};
