//! Query cache keyed by endpoint and session epoch.
//!
//! Entries fetched under one session can never be served under another:
//! the epoch changes on every Credential Store mutation.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub endpoint: &'static str,
    pub epoch: u64,
}

impl QueryKey {
    pub fn new(endpoint: &'static str, epoch: u64) -> Self {
        Self { endpoint, epoch }
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    entries: HashMap<QueryKey, Entry<V>>,
    stale_after: TimeDelta,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(stale_after: TimeDelta) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
        }
    }

    /// Cached value regardless of age
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.entries.get(key).map(|e| e.value.clone())
    }

    /// Cached value if younger than the staleness window
    pub fn get_fresh(&self, key: &QueryKey, now: DateTime<Utc>) -> Option<V> {
        self.entries
            .get(key)
            .filter(|e| now - e.fetched_at < self.stale_after)
            .map(|e| e.value.clone())
    }

    /// Store a value, dropping entries from other epochs.
    pub fn insert(&mut self, key: QueryKey, value: V, now: DateTime<Utc>) {
        self.entries.retain(|k, _| k.epoch == key.epoch);
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at: now,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> QueryCache<String> {
        QueryCache::new(TimeDelta::minutes(5))
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let mut cache = cache();
        let now = Utc::now();
        let key = QueryKey::new("/users/me", 1);

        cache.insert(key, "alice".to_string(), now);

        assert_eq!(cache.get_fresh(&key, now + TimeDelta::seconds(10)), Some("alice".to_string()));
    }

    #[test]
    fn test_stale_entry_is_not_fresh() {
        let mut cache = cache();
        let now = Utc::now();
        let key = QueryKey::new("/users/me", 1);

        cache.insert(key, "alice".to_string(), now);
        let later = now + TimeDelta::minutes(6);

        assert!(cache.get_fresh(&key, later).is_none());
        assert_eq!(cache.get(&key), Some("alice".to_string()));
    }

    #[test]
    fn test_other_epoch_misses() {
        let mut cache = cache();
        let now = Utc::now();

        cache.insert(QueryKey::new("/users/me", 1), "alice".to_string(), now);

        assert!(cache.get(&QueryKey::new("/users/me", 2)).is_none());
    }

    #[test]
    fn test_insert_drops_previous_epochs() {
        let mut cache = cache();
        let now = Utc::now();
        let old = QueryKey::new("/users/me", 1);

        cache.insert(old, "alice".to_string(), now);
        cache.insert(QueryKey::new("/users/me", 3), "bob".to_string(), now);

        assert_eq!(cache.len(), 1);
        assert!(cache.get(&old).is_none());
    }

    #[test]
    fn test_endpoints_share_an_epoch() {
        let mut cache = cache();
        let now = Utc::now();
        cache.insert(QueryKey::new("/users/me", 1), "alice".to_string(), now);
        cache.insert(QueryKey::new("/collections/me", 1), "bins".to_string(), now);

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&QueryKey::new("/collections/me", 1)).is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
