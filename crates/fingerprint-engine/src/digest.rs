//! Digest algorithms for subresource integrity strings.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;

/// Hash function used for `integrity` attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
	Sha256,
	#[default]
	Sha384,
	Sha512,
}

impl DigestAlgorithm {
	/// Parses an algorithm name; anything unsupported falls back to sha384.
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_engine::DigestAlgorithm;
	///
	/// assert_eq!(DigestAlgorithm::from_name("sha512"), DigestAlgorithm::Sha512);
	/// assert_eq!(DigestAlgorithm::from_name("md5"), DigestAlgorithm::Sha384);
	/// ```
	pub fn from_name(name: &str) -> Self {
		match name.trim().to_ascii_lowercase().as_str() {
			"sha256" => Self::Sha256,
			"sha512" => Self::Sha512,
			_ => Self::Sha384,
		}
	}

	pub fn from_name_or_default(name: Option<&str>) -> Self {
		name.map(Self::from_name).unwrap_or_default()
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Sha256 => "sha256",
			Self::Sha384 => "sha384",
			Self::Sha512 => "sha512",
		}
	}

	/// Raw digest of `content`.
	pub fn digest(self, content: &[u8]) -> Vec<u8> {
		match self {
			Self::Sha256 => Sha256::digest(content).to_vec(),
			Self::Sha384 => Sha384::digest(content).to_vec(),
			Self::Sha512 => Sha512::digest(content).to_vec(),
		}
	}

	/// `<algorithm>-<base64 digest>` string for `content`.
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_engine::DigestAlgorithm;
	///
	/// let sri = DigestAlgorithm::Sha256.integrity(b"");
	/// assert_eq!(sri, "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
	/// ```
	pub fn integrity(self, content: &[u8]) -> String {
		format!("{}-{}", self.name(), STANDARD.encode(self.digest(content)))
	}
}

impl fmt::Display for DigestAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Lowercase hex MD5 of `content`, used for content-addressed filenames.
pub fn md5_hex(content: &[u8]) -> String {
	hex::encode(Md5::digest(content))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(DigestAlgorithm::Sha256, 44)]
	#[case(DigestAlgorithm::Sha384, 64)]
	#[case(DigestAlgorithm::Sha512, 88)]
	fn test_integrity_lengths(#[case] algorithm: DigestAlgorithm, #[case] encoded_len: usize) {
		let sri = algorithm.integrity(b"body { color: red; }");
		let (name, encoded) = sri.split_once('-').unwrap();
		assert_eq!(name, algorithm.name());
		assert_eq!(encoded.len(), encoded_len);
	}

	#[rstest]
	#[case("SHA256", DigestAlgorithm::Sha256)]
	#[case(" sha384 ", DigestAlgorithm::Sha384)]
	#[case("sha1", DigestAlgorithm::Sha384)]
	#[case("", DigestAlgorithm::Sha384)]
	fn test_from_name(#[case] name: &str, #[case] expected: DigestAlgorithm) {
		assert_eq!(DigestAlgorithm::from_name(name), expected);
	}

	#[rstest]
	fn test_md5_hex_known_value() {
		assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
		assert_eq!(md5_hex(b"hello").len(), 32);
	}
}
