//! Time-limited cache for fetched records.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

/// A single cached value that expires after `ttl`.
///
/// The lock is only held to read or swap the slot, never across a fetch.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// The cached value if it was fetched less than `ttl` before `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<T> {
        let slot = self.slot.lock();
        slot.as_ref()
            .filter(|entry| now - entry.fetched_at < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub fn put(&self, value: T, now: DateTime<Utc>) {
        *self.slot.lock() = Some(Entry {
            value,
            fetched_at: now,
        });
    }

    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let cache = TtlCache::new(Duration::seconds(60));
        let t0 = Utc::now();
        cache.put(vec![1, 2, 3], t0);

        assert_eq!(cache.get(t0 + Duration::seconds(59)), Some(vec![1, 2, 3]));
        assert_eq!(cache.get(t0 + Duration::seconds(60)), None);
    }

    #[test]
    fn invalidate_clears() {
        let cache = TtlCache::new(Duration::seconds(60));
        let now = Utc::now();
        cache.put("bootstrap".to_string(), now);
        cache.invalidate();
        assert!(cache.get(now).is_none());
    }

    #[test]
    fn zero_ttl_never_hits() {
        let cache = TtlCache::new(Duration::zero());
        let now = Utc::now();
        cache.put(1u32, now);
        assert!(cache.get(now).is_none());
    }
}
