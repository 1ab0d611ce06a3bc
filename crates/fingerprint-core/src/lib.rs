//! Core types for the fingerprint workspace.
//!
//! - [`HostEnvironment`]: what the engine needs to know about the site
//! - [`ManagedFile`] / [`AssetFile`]: CMS-owned file handles
//! - [`AssetReference`]: the closed set of inputs the engine accepts
//! - [`FingerprintError`]: the shared error type

pub mod error;
pub mod file;
pub mod fs;
pub mod host;
pub mod reference;
pub mod url;

pub use error::{FingerprintError, FingerprintResult};
pub use file::{AssetFile, ManagedFile};
pub use host::{HostEnvironment, INSTALLED_VERSION, StaticHost};
pub use reference::{AUTO_ASSET, AssetReference};
