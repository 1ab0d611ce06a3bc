//! Asset reference resolution.
//!
//! [`AssetLocator`] turns a managed file, a site path or a URL into a
//! [`ResolvedAsset`]: a canonical cache identity, the file's location on
//! disk and its last modification time. Resolution never fails; references
//! that cannot be found on disk simply come back without a modification
//! time.

use fingerprint_core::fs::{file_exists, file_modified};
use fingerprint_core::url::has_scheme;
use fingerprint_core::{AssetReference, HostEnvironment};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of resolving an [`AssetReference`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
	/// Canonical lookup key.
	pub id: String,
	/// Absolute location on disk; `None` for external URLs.
	pub file_root: Option<PathBuf>,
	/// Modification time in seconds; `None` if the file does not exist or
	/// the reference is external.
	pub modified_at: Option<i64>,
}

impl ResolvedAsset {
	/// Whether the asset exists on disk and can be hashed.
	pub fn is_hashable(&self) -> bool {
		self.modified_at.is_some()
	}

	/// The file root as a string, empty for external URLs.
	pub fn root_string(&self) -> String {
		self.file_root
			.as_deref()
			.map(|root| root.to_string_lossy().into_owned())
			.unwrap_or_default()
	}
}

/// Resolves asset references against a [`HostEnvironment`].
#[derive(Clone)]
pub struct AssetLocator {
	host: Arc<dyn HostEnvironment>,
}

impl AssetLocator {
	pub fn new(host: Arc<dyn HostEnvironment>) -> Self {
		Self { host }
	}

	pub fn host(&self) -> &dyn HostEnvironment {
		self.host.as_ref()
	}

	/// Resolves `reference` to its identity, root and modification time.
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_core::{AssetReference, StaticHost};
	/// use fingerprint_locator::AssetLocator;
	/// use std::path::PathBuf;
	/// use std::sync::Arc;
	///
	/// let locator = AssetLocator::new(Arc::new(StaticHost::new("/srv/site")));
	///
	/// let resolved = locator.resolve(&AssetReference::from("/assets/app.css"));
	/// assert_eq!(resolved.id, "assets/app.css");
	/// assert_eq!(resolved.file_root, Some(PathBuf::from("/srv/site/assets/app.css")));
	///
	/// let external = locator.resolve(&AssetReference::from("https://cdn.example.com/app.css"));
	/// assert_eq!(external.id, "https://cdn.example.com/app.css");
	/// assert_eq!(external.file_root, None);
	/// ```
	pub fn resolve(&self, reference: &AssetReference) -> ResolvedAsset {
		let resolved = match reference {
			AssetReference::Managed(file) => {
				let root = file.root();
				let modified_at = if file_exists(&root) {
					file.modified_signal()
						.filter(|signal| *signal != 0)
						.or_else(|| file_modified(&root))
				} else {
					None
				};
				ResolvedAsset {
					id: root.to_string_lossy().into_owned(),
					file_root: Some(root),
					modified_at,
				}
			}
			AssetReference::Url(url) => match self.site_relative(url) {
				Some(path) => self.resolve_path(path),
				None => ResolvedAsset {
					id: url.clone(),
					file_root: None,
					modified_at: None,
				},
			},
			AssetReference::Path(path) => self.resolve_path(path),
		};

		tracing::trace!(
			id = %resolved.id,
			root = ?resolved.file_root,
			modified = ?resolved.modified_at,
			"resolved asset reference"
		);
		resolved
	}

	/// Site-relative key for a path reference: the site base URL and leading
	/// slashes are removed.
	pub fn site_key(&self, path: &str) -> String {
		let base = self.host.base_url();
		let base = base.trim_end_matches('/');
		let path = if base.is_empty() {
			path
		} else {
			path.strip_prefix(base).unwrap_or(path)
		};
		path.trim_start_matches('/').to_string()
	}

	/// Path of `root` relative to the document root, with `/` separators.
	///
	/// Returns `None` when `root` lies outside the document root.
	pub fn relative_to_index(&self, root: &Path) -> Option<String> {
		let index = self.host.index_root();
		let relative = root.strip_prefix(&index).ok()?;
		let segments: Vec<String> = relative
			.components()
			.map(|component| component.as_os_str().to_string_lossy().into_owned())
			.collect();
		Some(segments.join("/"))
	}

	fn resolve_path(&self, path: &str) -> ResolvedAsset {
		let key = self.site_key(path);
		let root = self.host.index_root().join(&key);
		let modified_at = file_modified(&root);
		ResolvedAsset {
			id: key,
			file_root: Some(root),
			modified_at,
		}
	}

	// Absolute URLs pointing into this site are resolved like paths.
	fn site_relative<'a>(&self, url: &'a str) -> Option<&'a str> {
		let base = self.host.base_url();
		let base = base.trim_end_matches('/');
		if base.is_empty() || !has_scheme(base) {
			return None;
		}
		let rest = url.strip_prefix(base)?;
		if rest.is_empty() || rest.starts_with('/') {
			Some(rest)
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use fingerprint_core::StaticHost;
	use rstest::rstest;

	fn locator(host: StaticHost) -> AssetLocator {
		AssetLocator::new(Arc::new(host))
	}

	#[rstest]
	#[case("assets/asset.png", "assets/asset.png")]
	#[case("/assets/asset.png", "assets/asset.png")]
	#[case("//assets/asset.png", "assets/asset.png")]
	fn test_site_key_strips_leading_slashes(#[case] path: &str, #[case] expected: &str) {
		let locator = locator(StaticHost::new("/srv/site"));
		assert_eq!(locator.site_key(path), expected);
	}

	#[rstest]
	fn test_site_key_strips_language_less_base() {
		let locator = locator(
			StaticHost::new("/srv/site")
				.with_site_url("http://example.com/de")
				.with_language("de"),
		);
		assert_eq!(
			locator.site_key("http://example.com/assets/app.css"),
			"assets/app.css"
		);
	}

	#[rstest]
	fn test_same_site_url_resolves_as_path() {
		let locator = locator(StaticHost::new("/srv/site").with_site_url("http://example.com"));
		let resolved = locator.resolve(&AssetReference::from("http://example.com/assets/app.css"));
		assert_eq!(resolved.id, "assets/app.css");
		assert_eq!(
			resolved.file_root,
			Some(PathBuf::from("/srv/site/assets/app.css"))
		);
	}

	#[rstest]
	fn test_lookalike_host_stays_external() {
		let locator = locator(StaticHost::new("/srv/site").with_site_url("http://example.com"));
		let resolved = locator.resolve(&AssetReference::from("http://example.com.evil/app.css"));
		assert_eq!(resolved.file_root, None);
	}

	#[rstest]
	fn test_relative_to_index() {
		let locator = locator(StaticHost::new("/srv/site"));
		assert_eq!(
			locator.relative_to_index(Path::new("/srv/site/assets/css/main.css")),
			Some("assets/css/main.css".to_string())
		);
		assert_eq!(locator.relative_to_index(Path::new("/tmp/main.css")), None);
	}
}
