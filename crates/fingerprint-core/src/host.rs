//! Host environment queries.
//!
//! The fingerprint engine never talks to the CMS directly. Everything it
//! needs to know about the deployment (document root, site URL, active
//! language, installed version, locality) is asked through
//! [`HostEnvironment`].

use crate::url::{has_scheme, join_url, strip_language_segment};
use std::path::{Path, PathBuf};

/// Version of the installed fingerprint crates, used in cache keys.
pub const INSTALLED_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read-only view of the hosting site.
pub trait HostEnvironment: Send + Sync {
	/// Whether the site runs on a local development deployment.
	fn is_local(&self) -> bool;

	/// The site URL, possibly ending in the active language segment.
	fn site_url(&self) -> String;

	/// The active language code on multi-language sites.
	fn language_code(&self) -> Option<String> {
		None
	}

	/// Absolute path of the document root that bare asset paths are
	/// resolved against.
	fn index_root(&self) -> PathBuf;

	/// Installed semantic version of the fingerprinting system.
	fn version(&self) -> String {
		INSTALLED_VERSION.to_string()
	}

	/// Name of the template rendering the current page, used by `@auto`.
	fn template_name(&self) -> Option<String> {
		None
	}

	/// Site URL with any trailing language segment removed.
	fn base_url(&self) -> String {
		let site_url = self.site_url();
		let language = self.language_code();
		strip_language_segment(&site_url, language.as_deref()).to_string()
	}

	/// Turns a site-relative path into a full site URL.
	///
	/// Absolute URLs are returned unchanged.
	fn url(&self, path: &str) -> String {
		if has_scheme(path) {
			return path.to_string();
		}
		join_url(&self.base_url(), path)
	}

	/// Looks up the per-template default asset for `extension`.
	///
	/// With template `blog` the stylesheet default is
	/// `assets/css/templates/blog.css`. Returns the asset URL when that file
	/// exists below the document root.
	fn template_asset(&self, directory: &str, extension: &str) -> Option<String> {
		let template = self.template_name()?;
		let relative = format!("assets/{}/{}.{}", directory, template, extension);
		let root = self.index_root().join(&relative);
		if root.is_file() {
			Some(self.url(&relative))
		} else {
			None
		}
	}
}

/// A [`HostEnvironment`] built from fixed values.
///
/// # Examples
///
/// ```
/// use fingerprint_core::{HostEnvironment, StaticHost};
///
/// let host = StaticHost::new("/var/www/site")
///     .with_site_url("https://example.com/de")
///     .with_language("de");
///
/// assert_eq!(host.base_url(), "https://example.com");
/// assert_eq!(host.url("assets/app.css"), "https://example.com/assets/app.css");
/// ```
#[derive(Debug, Clone)]
pub struct StaticHost {
	index_root: PathBuf,
	site_url: String,
	language: Option<String>,
	version: String,
	local: bool,
	template: Option<String>,
}

impl StaticHost {
	/// Creates a host rooted at `index_root` and served from `/`.
	pub fn new<P: Into<PathBuf>>(index_root: P) -> Self {
		Self {
			index_root: index_root.into(),
			site_url: String::new(),
			language: None,
			version: INSTALLED_VERSION.to_string(),
			local: false,
			template: None,
		}
	}

	pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
		self.site_url = site_url.into();
		self
	}

	pub fn with_language(mut self, code: impl Into<String>) -> Self {
		self.language = Some(code.into());
		self
	}

	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = version.into();
		self
	}

	/// Marks the deployment as local, which disables HTTPS rewriting.
	pub fn with_local(mut self, local: bool) -> Self {
		self.local = local;
		self
	}

	pub fn with_template(mut self, template: impl Into<String>) -> Self {
		self.template = Some(template.into());
		self
	}

	pub fn root(&self) -> &Path {
		&self.index_root
	}
}

impl HostEnvironment for StaticHost {
	fn is_local(&self) -> bool {
		self.local
	}

	fn site_url(&self) -> String {
		self.site_url.clone()
	}

	fn language_code(&self) -> Option<String> {
		self.language.clone()
	}

	fn index_root(&self) -> PathBuf {
		self.index_root.clone()
	}

	fn version(&self) -> String {
		self.version.clone()
	}

	fn template_name(&self) -> Option<String> {
		self.template.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::fs;
	use tempfile::TempDir;

	#[rstest]
	fn test_url_on_root_mounted_site() {
		let host = StaticHost::new("/srv/site");
		assert_eq!(host.url("assets/app.css"), "/assets/app.css");
		assert_eq!(host.url("/assets/app.css"), "/assets/app.css");
		assert_eq!(host.url("https://cdn.example.com/x.js"), "https://cdn.example.com/x.js");
	}

	#[rstest]
	fn test_base_url_strips_language() {
		let host = StaticHost::new("/srv/site")
			.with_site_url("http://example.com/en")
			.with_language("en");
		assert_eq!(host.base_url(), "http://example.com");
		assert_eq!(host.url("assets/a.js"), "http://example.com/assets/a.js");
	}

	#[rstest]
	fn test_default_version_is_installed_version() {
		let host = StaticHost::new("/srv/site");
		assert_eq!(host.version(), INSTALLED_VERSION);
	}

	#[rstest]
	fn test_template_asset_lookup() {
		let dir = TempDir::new().unwrap();
		fs::create_dir_all(dir.path().join("assets/css/templates")).unwrap();
		fs::write(dir.path().join("assets/css/templates/default.css"), "a {}").unwrap();

		let host = StaticHost::new(dir.path()).with_template("default");
		assert_eq!(
			host.template_asset("css/templates", "css"),
			Some("/assets/css/templates/default.css".to_string())
		);
		assert_eq!(host.template_asset("js/templates", "js"), None);

		let host = StaticHost::new(dir.path());
		assert_eq!(host.template_asset("css/templates", "css"), None);
	}
}
