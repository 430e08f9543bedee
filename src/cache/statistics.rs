//! Request/hit counters shared by both caches.

/// Cache usage counters.
///
/// Invariant: `hit_count <= request_count`. Counters only advance while
/// the owning cache is enabled and are reset only when the cache is
/// re-initialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStatistics {
    /// Number of lookups made while caching was enabled.
    pub request_count: u64,
    /// Number of lookups answered from stored entries.
    pub hit_count: u64,
}

impl CacheStatistics {
    /// Number of lookups that had to compute their value.
    pub fn miss_count(&self) -> u64 {
        self.request_count - self.hit_count
    }

    /// Fraction of requests served from the cache, 0.0 when nothing was requested.
    pub fn hit_ratio(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.hit_count as f64 / self.request_count as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.request_count += 1;
        self.hit_count += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.request_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_zero_after_construction() {
        let stats = CacheStatistics::default();
        assert_eq!(stats.request_count, 0);
        assert_eq!(stats.hit_count, 0);
        assert_eq!(stats.miss_count(), 0);
        assert!((stats.hit_ratio() - 0.0).abs() < 1e-15);
    }

    #[test]
    fn test_statistics_ratio() {
        let mut stats = CacheStatistics::default();
        stats.record_miss();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.request_count, 4);
        assert_eq!(stats.hit_count, 3);
        assert_eq!(stats.miss_count(), 1);
        assert!((stats.hit_ratio() - 0.75).abs() < 1e-12);
    }
}
