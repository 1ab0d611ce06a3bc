//! Build manifests mapping source asset paths to built filenames.
//!
//! ```json
//! { "assets/css/main.css": "assets/css/main.1234567890.css" }
//! ```
//!
//! Only the basename of the built value is used. All keys must share one
//! leading-slash style; lookups are normalised to that style.

use fingerprint_core::url::url_path;
use fingerprint_core::{FingerprintError, FingerprintResult};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
	path: PathBuf,
	entries: IndexMap<String, String>,
	leading_slash: bool,
}

impl Manifest {
	pub fn read<P: AsRef<Path>>(path: P) -> FingerprintResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		Self::parse(path, &source)
	}

	/// Parses manifest JSON; `path` is only used in error values.
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_engine::Manifest;
	///
	/// let manifest = Manifest::parse(
	///     "manifest.json",
	///     r#"{"/assets/app.js": "/assets/app.3f2a.js"}"#,
	/// )
	/// .unwrap();
	///
	/// assert!(manifest.leading_slash());
	/// assert_eq!(manifest.built_basename("assets/app.js").as_deref(), Some("app.3f2a.js"));
	/// ```
	pub fn parse<P: Into<PathBuf>>(path: P, source: &str) -> FingerprintResult<Self> {
		let path = path.into();
		let entries: IndexMap<String, String> = serde_json::from_str(source)?;

		let mut styles = entries.keys().map(|key| key.starts_with('/'));
		let leading_slash = styles.next().unwrap_or(false);
		if styles.any(|style| style != leading_slash) {
			return Err(FingerprintError::MixedManifestKeys { path });
		}

		Ok(Self {
			path,
			entries,
			leading_slash,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Whether the manifest keys start with `/`.
	pub fn leading_slash(&self) -> bool {
		self.leading_slash
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// `key` rewritten to the manifest's key style.
	pub fn key_for(&self, key: &str) -> String {
		url_path(key, self.leading_slash)
	}

	/// Built value for `key`, in either slash style.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(&self.key_for(key)).map(String::as_str)
	}

	/// Basename of the built file for `key`.
	pub fn built_basename(&self, key: &str) -> Option<String> {
		let built = self.get(key)?;
		let basename = built.rsplit('/').next().unwrap_or(built);
		if basename.is_empty() {
			None
		} else {
			Some(basename.to_string())
		}
	}
}
