//! Shared test site: a temporary document root with a few assets.

#![allow(dead_code)]

use fingerprint_cache::InMemoryCache;
use fingerprint_core::StaticHost;
use fingerprint_engine::{FingerprintConfig, FingerprintEngine};
use rstest::fixture;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

pub const SITE_URL: &str = "http://example.com";
pub const MTIME: u64 = 1_700_000_000;

pub struct Site {
	pub dir: TempDir,
}

impl Site {
	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	pub fn path(&self, relative: &str) -> PathBuf {
		self.dir.path().join(relative)
	}

	pub fn host(&self) -> StaticHost {
		StaticHost::new(self.root())
			.with_site_url(SITE_URL)
			.with_version("3.1.0")
			.with_template("default")
	}

	pub fn engine(&self, config: FingerprintConfig) -> FingerprintEngine {
		self.engine_with(self.host(), InMemoryCache::new(), config)
	}

	pub fn engine_with(
		&self,
		host: StaticHost,
		cache: InMemoryCache,
		config: FingerprintConfig,
	) -> FingerprintEngine {
		FingerprintEngine::new(Arc::new(host), Arc::new(cache), config).unwrap()
	}

	pub fn write(&self, relative: &str, content: &[u8]) {
		let path = self.path(relative);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).unwrap();
		}
		fs::write(&path, content).unwrap();
		set_mtime(&path, MTIME);
	}
}

pub fn set_mtime(path: &Path, seconds: u64) {
	fs::File::options()
		.write(true)
		.open(path)
		.unwrap()
		.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(seconds))
		.unwrap();
}

#[fixture]
pub fn site() -> Site {
	let site = Site {
		dir: TempDir::new().unwrap(),
	};

	site.write("assets/asset.png", b"\x89PNG\r\n\x1a\n fake image");
	site.write("assets/css/main.css", b"body { color: #333; }\n");
	site.write("assets/css/main.1234567890.css", b"body{color:#333}");
	site.write("assets/js/main.js", b"console.log('main');\n");
	site.write("assets/css/templates/default.css", b".default { margin: 0; }\n");
	site.write("assets/js/templates/default.js", b"window.template = 'default';\n");
	site.write("content/home/test.png", b"\x89PNG\r\n\x1a\n home");
	site.write(
		"manifest.json",
		br#"{"assets/css/main.css": "assets/css/main.1234567890.css"}"#,
	);

	site
}
