//! Asset references accepted by the fingerprint engine.

use crate::file::ManagedFile;
use crate::url::has_scheme;
use std::fmt;
use std::sync::Arc;

/// Sentinel path asking for the current template's default asset.
pub const AUTO_ASSET: &str = "@auto";

/// Something a template wants fingerprinted.
#[derive(Debug, Clone)]
pub enum AssetReference {
	/// A file object owned by the CMS.
	Managed(Arc<dyn ManagedFile>),
	/// A path below the document root, with or without leading slash.
	Path(String),
	/// A fully-qualified URL. External URLs are passed through untouched.
	Url(String),
}

impl AssetReference {
	/// Classifies a textual reference as [`AssetReference::Url`] when it
	/// carries a scheme and as [`AssetReference::Path`] otherwise.
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_core::AssetReference;
	///
	/// assert!(matches!(AssetReference::parse("assets/app.css"), AssetReference::Path(_)));
	/// assert!(matches!(AssetReference::parse("https://cdn.example.com/app.css"), AssetReference::Url(_)));
	/// ```
	pub fn parse(reference: impl Into<String>) -> Self {
		let reference = reference.into();
		if has_scheme(&reference) {
			Self::Url(reference)
		} else {
			Self::Path(reference)
		}
	}

	pub fn managed<F: ManagedFile + 'static>(file: F) -> Self {
		Self::Managed(Arc::new(file))
	}

	/// Whether this is the `@auto` sentinel.
	pub fn is_auto(&self) -> bool {
		matches!(self, Self::Path(path) if path == AUTO_ASSET)
	}

	/// The textual form for path and URL references.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Managed(_) => None,
			Self::Path(path) | Self::Url(path) => Some(path),
		}
	}
}

impl From<&str> for AssetReference {
	fn from(reference: &str) -> Self {
		Self::parse(reference)
	}
}

impl From<String> for AssetReference {
	fn from(reference: String) -> Self {
		Self::parse(reference)
	}
}

impl From<Arc<dyn ManagedFile>> for AssetReference {
	fn from(file: Arc<dyn ManagedFile>) -> Self {
		Self::Managed(file)
	}
}

impl fmt::Display for AssetReference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Managed(file) => write!(f, "{}", file.root().display()),
			Self::Path(path) | Self::Url(path) => f.write_str(path),
		}
	}
}
