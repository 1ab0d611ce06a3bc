//! End-to-end use of the facade crate.

use fingerprint::prelude::*;
use fingerprint::{CacheStatistics, INSTALLED_VERSION};
use rstest::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[fixture]
fn document_root() -> TempDir {
	let dir = TempDir::new().unwrap();
	fs::create_dir_all(dir.path().join("assets/js")).unwrap();
	fs::write(dir.path().join("assets/js/app.js"), "export default 1;\n").unwrap();
	dir
}

#[rstest]
fn test_script_tag_through_prelude(document_root: TempDir) {
	let cache = InMemoryCache::new();
	let engine = FingerprintEngine::new(
		Arc::new(StaticHost::new(document_root.path()).with_site_url("http://example.com")),
		Arc::new(cache.clone()),
		FingerprintSettings::default()
			.with_vars("APP_", [("APP_QUERY".to_string(), "false".to_string())])
			.unwrap()
			.into_config(),
	)
	.unwrap();

	let html = engine
		.js("/assets/js/app.js", Attributes::new().with("defer", true))
		.unwrap()
		.unwrap();
	assert!(html.starts_with(r#"<script src="https://example.com/assets/js/app."#));
	assert!(html.ends_with(r#".js" defer></script>"#));

	let key = format!("lookup-{}-redirect", INSTALLED_VERSION.replace('.', "-"));
	assert_eq!(engine.cache_key(), key);
	assert_eq!(cache.list_keys(), vec![key]);

	let stats: CacheStatistics = cache.statistics();
	assert_eq!(stats.writes, 1);
}

#[rstest]
fn test_null_cache_recomputes_without_error(document_root: TempDir) {
	let engine = FingerprintEngine::new(
		Arc::new(StaticHost::new(document_root.path())),
		Arc::new(NullCache),
		FingerprintConfig::new(),
	)
	.unwrap();

	let reference = AssetReference::from("assets/js/app.js");
	assert_eq!(engine.process(&reference), engine.process(&reference));
	assert!(engine.read().is_none());
}
