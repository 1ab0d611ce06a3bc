//! Persisted lookup records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cached fingerprint of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
	/// Modification time the entry was computed from, in seconds.
	pub modified: Option<i64>,
	/// Absolute file root; empty for external URLs.
	pub root: String,
	/// `<algorithm>-<base64>` digest, if the file could be read.
	pub integrity: Option<String>,
	/// The fingerprinted URL.
	pub hash: String,
}

impl LookupEntry {
	/// Whether an asset observed with `modified_at` needs recomputing.
	///
	/// An unknown observed mtime never invalidates. A known one invalidates
	/// entries recorded without an mtime or with an older one.
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_engine::LookupEntry;
	///
	/// let entry = LookupEntry {
	///     modified: Some(100),
	///     root: "/srv/site/assets/app.css".to_string(),
	///     integrity: None,
	///     hash: "/assets/app.css?v=100".to_string(),
	/// };
	/// assert!(!entry.is_stale(Some(100)));
	/// assert!(entry.is_stale(Some(101)));
	/// assert!(!entry.is_stale(None));
	/// ```
	pub fn is_stale(&self, modified_at: Option<i64>) -> bool {
		match (modified_at, self.modified) {
			(None, _) => false,
			(Some(_), None) => true,
			(Some(observed), Some(stored)) => observed > stored,
		}
	}
}

/// Every entry of one cache generation, keyed by asset id.
pub type LookupTable = BTreeMap<String, LookupEntry>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn entry(modified: Option<i64>) -> LookupEntry {
		LookupEntry {
			modified,
			root: String::new(),
			integrity: None,
			hash: "https://cdn.example.com/lib.js".to_string(),
		}
	}

	#[rstest]
	#[case(None, None, false)]
	#[case(Some(10), None, false)]
	#[case(None, Some(10), true)]
	#[case(Some(10), Some(10), false)]
	#[case(Some(10), Some(9), false)]
	#[case(Some(10), Some(11), true)]
	fn test_is_stale(
		#[case] stored: Option<i64>,
		#[case] observed: Option<i64>,
		#[case] expected: bool,
	) {
		assert_eq!(entry(stored).is_stale(observed), expected);
	}

	#[rstest]
	fn test_serialized_field_names() {
		let json = serde_json::to_value(entry(None)).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"modified": null,
				"root": "",
				"integrity": null,
				"hash": "https://cdn.example.com/lib.js",
			})
		);
	}
}
