//! Error module tests
//!
//! Covers message formatting, conversions and the Send + Sync bound of
//! `FingerprintError`.

use fingerprint_core::{FingerprintError, FingerprintResult};
use rstest::*;
use std::path::PathBuf;

#[rstest]
fn test_error_send_sync() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<FingerprintError>();
}

#[rstest]
fn test_error_display_mixed_manifest_keys() {
	let error = FingerprintError::MixedManifestKeys {
		path: PathBuf::from("/srv/site/manifest.json"),
	};
	let message = error.to_string();
	assert!(message.contains("/srv/site/manifest.json"));
	assert!(message.contains("leading slash"));
}

#[rstest]
fn test_error_display_missing_auto_asset() {
	let error = FingerprintError::MissingAutoAsset {
		extension: "css".to_string(),
	};
	assert_eq!(
		error.to_string(),
		"no template default asset found for extension 'css'"
	);
}

#[rstest]
fn test_error_from_io() {
	let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
	let error: FingerprintError = io.into();
	assert!(matches!(error, FingerprintError::Io(_)));
	assert!(error.to_string().contains("gone"));
}

#[rstest]
fn test_error_from_json() {
	fn parse() -> FingerprintResult<serde_json::Value> {
		Ok(serde_json::from_str("{ not json")?)
	}

	assert!(matches!(parse(), Err(FingerprintError::Json(_))));
}

#[rstest]
fn test_error_from_toml() {
	fn parse() -> FingerprintResult<toml::Table> {
		Ok(toml::from_str("debug = ")?)
	}

	assert!(matches!(parse(), Err(FingerprintError::Toml(_))));
}
