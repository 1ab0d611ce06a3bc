//! Loading engine options from TOML, JSON and the environment.
//!
//! ```toml
//! debug = false
//! query = "assets/manifest.json"
//! digest = "sha512"
//! https = true
//! ```

use crate::config::{FingerprintConfig, QueryMode};
use crate::digest::DigestAlgorithm;
use fingerprint_core::{FingerprintError, FingerprintResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default prefix for environment overrides.
pub const ENV_PREFIX: &str = "FINGERPRINT_";

/// The `query` option: a flag or the path of a manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuerySetting {
	Flag(bool),
	Manifest(PathBuf),
}

impl From<QuerySetting> for QueryMode {
	fn from(setting: QuerySetting) -> Self {
		match setting {
			QuerySetting::Flag(query) => QueryMode::from(query),
			QuerySetting::Manifest(path) => QueryMode::Manifest(path),
		}
	}
}

/// Serializable engine options. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FingerprintSettings {
	pub debug: Option<bool>,
	pub query: Option<QuerySetting>,
	pub digest: Option<String>,
	pub https: Option<bool>,
	pub absolute_urls: Option<bool>,
	pub ignore_missing_auto_asset: Option<bool>,
}

impl FingerprintSettings {
	pub fn from_toml_str(source: &str) -> FingerprintResult<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_json_str(source: &str) -> FingerprintResult<Self> {
		Ok(serde_json::from_str(source)?)
	}

	/// Reads a `.toml` or `.json` settings file, chosen by extension.
	pub fn from_file<P: AsRef<Path>>(path: P) -> FingerprintResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => Self::from_toml_str(&source),
			Some("json") => Self::from_json_str(&source),
			other => Err(FingerprintError::InvalidConfiguration(format!(
				"unsupported settings format '{}' for {}",
				other.unwrap_or(""),
				path.display()
			))),
		}
	}

	/// Applies `<prefix><OPTION>` environment variables on top of `self`.
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_engine::FingerprintSettings;
	///
	/// let settings = FingerprintSettings::default()
	///     .with_env_overrides("DOCTEST_UNSET_PREFIX_")
	///     .unwrap();
	/// assert_eq!(settings, FingerprintSettings::default());
	/// ```
	pub fn with_env_overrides(self, prefix: &str) -> FingerprintResult<Self> {
		self.with_vars(prefix, std::env::vars())
	}

	/// Like [`with_env_overrides`](Self::with_env_overrides), reading from
	/// the given variables instead of the process environment.
	pub fn with_vars<I>(mut self, prefix: &str, vars: I) -> FingerprintResult<Self>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		for (key, value) in vars {
			let Some(option) = key.strip_prefix(prefix) else {
				continue;
			};

			match option.to_lowercase().as_str() {
				"debug" => self.debug = Some(parse_flag(&key, &value)?),
				"query" => {
					self.query = Some(match flag(&value) {
						Some(query) => QuerySetting::Flag(query),
						None => QuerySetting::Manifest(PathBuf::from(value.trim())),
					})
				}
				"digest" => self.digest = Some(value.trim().to_string()),
				"https" => self.https = Some(parse_flag(&key, &value)?),
				"absolute_urls" => self.absolute_urls = Some(parse_flag(&key, &value)?),
				"ignore_missing_auto_asset" => {
					self.ignore_missing_auto_asset = Some(parse_flag(&key, &value)?)
				}
				_ => tracing::trace!(variable = %key, "ignoring unknown fingerprint variable"),
			}
		}
		Ok(self)
	}

	/// Fields set in `other` replace the ones in `self`.
	pub fn merge(self, other: Self) -> Self {
		Self {
			debug: other.debug.or(self.debug),
			query: other.query.or(self.query),
			digest: other.digest.or(self.digest),
			https: other.https.or(self.https),
			absolute_urls: other.absolute_urls.or(self.absolute_urls),
			ignore_missing_auto_asset: other
				.ignore_missing_auto_asset
				.or(self.ignore_missing_auto_asset),
		}
	}

	/// Builds a [`FingerprintConfig`] with the default strategies.
	pub fn into_config(self) -> FingerprintConfig {
		let mut config = FingerprintConfig::new();
		if let Some(debug) = self.debug {
			config = config.debug(debug);
		}
		if let Some(query) = self.query {
			config = config.query(QueryMode::from(query));
		}
		if let Some(digest) = self.digest.as_deref() {
			config = config.digest(DigestAlgorithm::from_name(digest));
		}
		if let Some(https) = self.https {
			config = config.https(https);
		}
		if let Some(absolute) = self.absolute_urls {
			config = config.absolute_urls(absolute);
		}
		if let Some(ignore) = self.ignore_missing_auto_asset {
			config = config.ignore_missing_auto_asset(ignore);
		}
		config
	}
}

fn flag(value: &str) -> Option<bool> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

fn parse_flag(key: &str, value: &str) -> FingerprintResult<bool> {
	flag(value).ok_or_else(|| {
		FingerprintError::InvalidConfiguration(format!("{} expects a boolean, got '{}'", key, value))
	})
}
