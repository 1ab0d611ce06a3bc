//! Hash and integrity strategies.
//!
//! Both strategies are late-bound: the engine calls them for every stale
//! asset. The defaults implement query-string, content-hash and manifest
//! addressing, and `<algorithm>-<base64>` integrity digests. Any closure
//! with the matching signature can be used instead.

use crate::config::QueryMode;
use crate::digest::{DigestAlgorithm, md5_hex};
use crate::manifest::Manifest;
use fingerprint_core::AssetReference;
use fingerprint_core::fs::file_modified;
use fingerprint_locator::{AssetLocator, ResolvedAsset};
use std::path::Path;

/// Which strategy [`FingerprintEngine::apply`](crate::FingerprintEngine::apply) runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategySlot {
	Hash,
	Integrity,
}

/// Computes the fingerprinted URL of an asset.
pub trait HashStrategy: Send + Sync {
	fn hash(&self, locator: &AssetLocator, reference: &AssetReference, query: &QueryMode) -> String;
}

/// Computes the subresource integrity string of an asset.
///
/// `manifest` is the manifest path when the engine runs in manifest mode.
/// Returning `None` means no integrity is available.
pub trait IntegrityStrategy: Send + Sync {
	fn integrity(
		&self,
		locator: &AssetLocator,
		reference: &AssetReference,
		digest: DigestAlgorithm,
		manifest: Option<&Path>,
	) -> Option<String>;
}

impl<F> HashStrategy for F
where
	F: Fn(&AssetLocator, &AssetReference, &QueryMode) -> String + Send + Sync,
{
	fn hash(&self, locator: &AssetLocator, reference: &AssetReference, query: &QueryMode) -> String {
		self(locator, reference, query)
	}
}

impl<F> IntegrityStrategy for F
where
	F: Fn(&AssetLocator, &AssetReference, DigestAlgorithm, Option<&Path>) -> Option<String>
		+ Send
		+ Sync,
{
	fn integrity(
		&self,
		locator: &AssetLocator,
		reference: &AssetReference,
		digest: DigestAlgorithm,
		manifest: Option<&Path>,
	) -> Option<String> {
		self(locator, reference, digest, manifest)
	}
}

/// Rewrites the file segment of the asset URL.
///
/// - [`QueryMode::Query`]: `main.css` becomes `main.css?v=<mtime>`, using
///   the file's own modification time
/// - [`QueryMode::ContentHash`]: `main.css` becomes `main.<md5>.css`
/// - [`QueryMode::Manifest`]: `main.css` becomes the built basename from
///   the manifest, or stays unchanged when the manifest has no entry
///
/// Missing files keep their original URL, except in manifest mode where a
/// renamed source can still be mapped to its built file.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHashStrategy;

impl HashStrategy for DefaultHashStrategy {
	fn hash(&self, locator: &AssetLocator, reference: &AssetReference, query: &QueryMode) -> String {
		let resolved = locator.resolve(reference);
		let Some(root) = resolved.file_root.as_deref() else {
			return original_url(locator, reference);
		};

		let Some(filename) = file_name(root) else {
			return original_url(locator, reference);
		};

		let fingerprinted = match (query, resolved.modified_at) {
			// Renamed sources still map through the manifest.
			(QueryMode::Manifest(path), _) => {
				built_basename(locator, &resolved, root, path).unwrap_or(filename)
			}
			(_, None) => return original_url(locator, reference),
			(QueryMode::Query, Some(modified)) => {
				format!("{}?v={}", filename, file_modified(root).unwrap_or(modified))
			}
			(QueryMode::ContentHash, Some(_)) => match std::fs::read(root) {
				Ok(content) => content_addressed(&filename, &md5_hex(&content)),
				Err(error) => {
					tracing::warn!(root = %root.display(), %error, "cannot read asset for content hash");
					return original_url(locator, reference);
				}
			},
		};

		rebuild_url(locator, reference, &resolved, &fingerprinted)
	}
}

/// Digests the file contents with the configured algorithm.
///
/// In manifest mode the built file is hashed when it exists next to the
/// source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIntegrityStrategy;

impl IntegrityStrategy for DefaultIntegrityStrategy {
	fn integrity(
		&self,
		locator: &AssetLocator,
		reference: &AssetReference,
		digest: DigestAlgorithm,
		manifest: Option<&Path>,
	) -> Option<String> {
		let resolved = locator.resolve(reference);
		let root = resolved.file_root.clone()?;

		let root = match manifest {
			Some(path) => built_basename(locator, &resolved, &root, path)
				.map(|basename| root.with_file_name(basename))
				.filter(|built| built.is_file())
				.unwrap_or(root),
			None => root,
		};

		match std::fs::read(&root) {
			Ok(content) => Some(digest.integrity(&content)),
			Err(error) => {
				tracing::trace!(root = %root.display(), %error, "no integrity for unreadable asset");
				None
			}
		}
	}
}

/// The reference as a URL, without any fingerprint.
pub(crate) fn original_url(locator: &AssetLocator, reference: &AssetReference) -> String {
	match reference {
		AssetReference::Managed(file) => file.url(),
		AssetReference::Path(path) => locator.host().url(path),
		AssetReference::Url(url) => url.clone(),
	}
}

fn file_name(root: &Path) -> Option<String> {
	root.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.filter(|name| !name.is_empty())
}

fn content_addressed(filename: &str, digest: &str) -> String {
	match filename.rsplit_once('.') {
		Some((stem, extension)) if !stem.is_empty() => {
			format!("{}.{}.{}", stem, digest, extension)
		}
		_ => format!("{}.{}", filename, digest),
	}
}

// Manifest keys are document-root relative paths.
fn built_basename(
	locator: &AssetLocator,
	resolved: &ResolvedAsset,
	root: &Path,
	manifest_path: &Path,
) -> Option<String> {
	let manifest = match Manifest::read(manifest_path) {
		Ok(manifest) => manifest,
		Err(error) => {
			tracing::warn!(
				manifest = %manifest_path.display(),
				%error,
				"manifest unusable, keeping original filename"
			);
			return None;
		}
	};

	let key = locator
		.relative_to_index(root)
		.unwrap_or_else(|| locator.site_key(&resolved.id));
	manifest.built_basename(&key)
}

fn rebuild_url(
	locator: &AssetLocator,
	reference: &AssetReference,
	resolved: &ResolvedAsset,
	filename: &str,
) -> String {
	match reference {
		AssetReference::Managed(file) => {
			let url = file.url();
			match url.rsplit_once('/') {
				Some((directory, _)) => format!("{}/{}", directory, filename),
				None => filename.to_string(),
			}
		}
		AssetReference::Path(_) | AssetReference::Url(_) => {
			let path = match resolved.id.rsplit_once('/') {
				Some((directory, _)) => format!("{}/{}", directory, filename),
				None => filename.to_string(),
			};
			locator.host().url(&path)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("main.css", "0123", "main.0123.css")]
	#[case("jquery.min.js", "0123", "jquery.min.0123.js")]
	#[case("LICENSE", "0123", "LICENSE.0123")]
	#[case(".htaccess", "0123", ".htaccess.0123")]
	fn test_content_addressed(#[case] filename: &str, #[case] digest: &str, #[case] expected: &str) {
		assert_eq!(content_addressed(filename, digest), expected);
	}
}
