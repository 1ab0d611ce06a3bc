//! Cache backends for fingerprint lookup tables.
//!
//! The engine treats its cache as a plain key-value store with
//! get/set/flush semantics. Three backends are provided:
//!
//! - [`InMemoryCache`]: process-local, with TTLs and hit/miss statistics
//! - [`FileCache`]: one JSON record per key in a directory
//! - [`NullCache`]: never stores anything

pub mod backend;
mod entry;
pub mod error;
pub mod file;
pub mod in_memory;
pub mod statistics;

pub use backend::{CacheBackend, CacheBackendExt, NullCache};
pub use error::{CacheError, CacheResult};
pub use file::FileCache;
pub use in_memory::InMemoryCache;
pub use statistics::CacheStatistics;
