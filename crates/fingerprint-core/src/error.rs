//! Error types shared by the fingerprinting crates.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or running the fingerprint engine.
///
/// Expected asset edge cases (missing files, unreadable manifests, unknown
/// digest names) are not represented here: they degrade to the unmodified
/// reference instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FingerprintError {
	/// A configuration value has the wrong type or an unusable value.
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// The manifest mixes keys with and without a leading slash.
	///
	/// The lookup convention is derived from the key style, so a manifest
	/// must use one style for all of its keys.
	#[error(
		"manifest {} mixes keys with and without a leading slash",
		.path.display()
	)]
	MixedManifestKeys { path: PathBuf },

	/// `@auto` was requested but the current template has no default asset.
	#[error("no template default asset found for extension '{extension}'")]
	MissingAutoAsset { extension: String },

	/// The lookup cache backend failed.
	#[error("cache backend error: {0}")]
	Cache(String),

	/// Filesystem access failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON parsing or serialization failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// TOML settings could not be parsed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Result type for fingerprint operations.
pub type FingerprintResult<T> = Result<T, FingerprintError>;
