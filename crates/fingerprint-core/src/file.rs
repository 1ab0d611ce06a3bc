//! CMS-managed file handles.

use std::fmt;
use std::path::{Path, PathBuf};

/// A file object owned by the host CMS.
///
/// The fingerprint engine only reads from it: the absolute root on disk,
/// the public URL, and an optional CMS-side modification signal that takes
/// precedence over the filesystem mtime.
pub trait ManagedFile: Send + Sync + fmt::Debug {
	/// Absolute filesystem path of the file.
	fn root(&self) -> PathBuf;

	/// Public URL of the file.
	fn url(&self) -> String;

	/// File name including extension.
	fn filename(&self) -> String {
		self.root()
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default()
	}

	/// Modification timestamp tracked by the CMS, in seconds.
	///
	/// `None` or `Some(0)` means "no signal"; the filesystem mtime is used.
	fn modified_signal(&self) -> Option<i64> {
		None
	}
}

/// Plain [`ManagedFile`] implementation holding its values directly.
///
/// # Examples
///
/// ```
/// use fingerprint_core::{AssetFile, ManagedFile};
///
/// let file = AssetFile::new("/srv/site/content/home/test.png", "/media/pages/home/test.png");
/// assert_eq!(file.filename(), "test.png");
/// assert_eq!(file.modified_signal(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
	root: PathBuf,
	url: String,
	modified: Option<i64>,
}

impl AssetFile {
	pub fn new<P: Into<PathBuf>>(root: P, url: impl Into<String>) -> Self {
		Self {
			root: root.into(),
			url: url.into(),
			modified: None,
		}
	}

	/// Attaches a CMS modification signal.
	pub fn with_modified_signal(mut self, modified: i64) -> Self {
		self.modified = Some(modified);
		self
	}

	pub fn path(&self) -> &Path {
		&self.root
	}
}

impl ManagedFile for AssetFile {
	fn root(&self) -> PathBuf {
		self.root.clone()
	}

	fn url(&self) -> String {
		self.url.clone()
	}

	fn modified_signal(&self) -> Option<i64> {
		self.modified
	}
}
