//! Settings files and process environment overrides.

mod common;

use common::{Site, site};
use fingerprint_core::AssetReference;
use fingerprint_engine::{DigestAlgorithm, ENV_PREFIX, FingerprintSettings, QueryMode, QuerySetting};
use rstest::*;
use serial_test::serial;
use std::path::PathBuf;

fn set_env(key: &str, value: &str) {
	// SAFETY: the tests touching the environment run under #[serial]
	unsafe { std::env::set_var(key, value) };
}

fn remove_env(key: &str) {
	// SAFETY: the tests touching the environment run under #[serial]
	unsafe { std::env::remove_var(key) };
}

#[rstest]
#[serial]
fn test_env_overrides_file_settings(site: Site) {
	site.write("fingerprint.toml", b"query = false\ndigest = \"sha256\"\n");
	let settings = FingerprintSettings::from_file(site.path("fingerprint.toml")).unwrap();

	set_env("FINGERPRINT_QUERY", "manifest.json");
	set_env("FINGERPRINT_DEBUG", "yes");
	let settings = settings.with_env_overrides(ENV_PREFIX);
	remove_env("FINGERPRINT_QUERY");
	remove_env("FINGERPRINT_DEBUG");

	let settings = settings.unwrap();
	assert_eq!(
		settings.query,
		Some(QuerySetting::Manifest(PathBuf::from("manifest.json")))
	);
	assert_eq!(settings.debug, Some(true));
	assert_eq!(settings.digest.as_deref(), Some("sha256"));

	let engine = site.engine(settings.into_config());
	assert!(engine.options().debug);
	assert_eq!(engine.options().digest, DigestAlgorithm::Sha256);
	assert_eq!(
		engine.options().query,
		QueryMode::Manifest(site.path("manifest.json"))
	);

	let entry = engine.process(&AssetReference::from("assets/css/main.css"));
	assert!(entry.hash.ends_with("main.1234567890.css"));
	assert!(engine.read().is_none());
}

#[rstest]
#[serial]
fn test_invalid_env_flag_is_error() {
	set_env("FINGERPRINT_HTTPS", "sometimes");
	let result = FingerprintSettings::default().with_env_overrides(ENV_PREFIX);
	remove_env("FINGERPRINT_HTTPS");

	assert!(result.is_err());
}

#[rstest]
fn test_json_settings_file(site: Site) {
	site.write(
		"fingerprint.json",
		br#"{"https": false, "absolute_urls": false, "ignore_missing_auto_asset": true}"#,
	);
	let settings = FingerprintSettings::from_file(site.path("fingerprint.json")).unwrap();
	let options = settings.into_config().resolve();
	assert!(!options.https);
	assert!(!options.absolute_urls);
	assert!(options.ignore_missing_auto_asset);
	assert_eq!(options.query, QueryMode::Query);
}

#[rstest]
fn test_unsupported_settings_extension(site: Site) {
	site.write("fingerprint.yaml", b"debug: true\n");
	let result = FingerprintSettings::from_file(site.path("fingerprint.yaml"));
	assert!(result.is_err());
}
