//! Cache statistics

/// Hit/miss counters of a cache backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStatistics {
	/// Number of reads that found a live entry
	pub hits: u64,
	/// Number of reads that found nothing or an expired entry
	pub misses: u64,
	/// Number of writes
	pub writes: u64,
	/// Number of flushes
	pub flushes: u64,
	/// Current number of stored entries, expired ones included
	pub entry_count: u64,
}

impl CacheStatistics {
	pub fn total_reads(&self) -> u64 {
		self.hits + self.misses
	}

	/// Calculate hit rate (0.0 to 1.0)
	///
	/// # Examples
	///
	/// ```
	/// use fingerprint_cache::CacheStatistics;
	///
	/// let stats = CacheStatistics { hits: 3, misses: 1, ..Default::default() };
	/// assert_eq!(stats.hit_rate(), 0.75);
	/// ```
	pub fn hit_rate(&self) -> f64 {
		let total = self.total_reads();
		if total == 0 {
			0.0
		} else {
			self.hits as f64 / total as f64
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_hit_rate_zero_reads() {
		let stats = CacheStatistics::default();
		assert_eq!(stats.hit_rate(), 0.0);
		assert_eq!(stats.total_reads(), 0);
	}
}
