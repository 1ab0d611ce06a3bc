//! Filesystem queries used for staleness detection.

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Last modification time of `path` in whole seconds since the Unix epoch.
///
/// Returns `None` when the path does not exist, is not a regular file, or
/// the platform cannot report a modification time.
pub fn file_modified(path: &Path) -> Option<i64> {
	let metadata = fs::metadata(path).ok()?;
	if !metadata.is_file() {
		return None;
	}

	let modified = metadata.modified().ok()?;
	let seconds = modified.duration_since(UNIX_EPOCH).ok()?.as_secs();
	i64::try_from(seconds).ok()
}

/// Returns `true` when `path` points to an existing regular file.
pub fn file_exists(path: &Path) -> bool {
	path.is_file()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::time::{Duration, SystemTime};
	use tempfile::TempDir;

	#[rstest]
	fn test_file_modified_reports_seconds() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("app.css");
		fs::write(&path, "body {}").unwrap();

		let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
		fs::File::options()
			.write(true)
			.open(&path)
			.unwrap()
			.set_modified(stamp)
			.unwrap();

		assert_eq!(file_modified(&path), Some(1_700_000_000));
	}

	#[rstest]
	fn test_file_modified_missing_and_directory() {
		let dir = TempDir::new().unwrap();
		assert_eq!(file_modified(&dir.path().join("missing.css")), None);
		assert_eq!(file_modified(dir.path()), None);
		assert!(!file_exists(dir.path()));
	}
}
