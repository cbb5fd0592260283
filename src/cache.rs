//! Bounded in-memory cache for search results.
//!
//! Maps a [`Query`] signature to the results it last produced. Entries
//! expire after a TTL (checked lazily on lookup) and the cache never grows
//! past its capacity: inserting into a full cache evicts the single oldest
//! entry by insertion age, not by recency of access.
//!
//! The cache is owned by the orchestrator task and accessed through
//! `&mut self` — it is never shared, so it needs no locking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::types::{Query, SearchResults};

/// One cached result set.
#[derive(Debug, Clone)]
struct CacheRecord {
    value: SearchResults,
    created_at: Instant,
    /// Insertion order determines age; the wall clock only drives the TTL.
    sequence: u64,
}

/// Bounded, time-limited store of search results keyed by [`Query`].
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<Query, CacheRecord>,
    capacity: usize,
    ttl: Duration,
    next_sequence: u64,
}

impl ResultCache {
    /// Create a cache holding at most `capacity` entries, each valid for `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(128)),
            capacity: capacity.max(1),
            ttl,
            next_sequence: 0,
        }
    }

    /// Look up cached results for `query`.
    ///
    /// Returns a hit only if a record exists and is younger than the TTL.
    /// An expired record is removed here and reported as a miss; lookup
    /// never returns expired data. A hit does not refresh the record's age.
    pub fn lookup(&mut self, query: &Query) -> Option<&SearchResults> {
        let expired = match self.entries.get(query) {
            Some(record) => record.created_at.elapsed() >= self.ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(query);
            return None;
        }
        self.entries.get(query).map(|record| &record.value)
    }

    /// Insert results for `query`, evicting the oldest entry first when the
    /// cache is full and `query` is not already present.
    pub fn insert(&mut self, query: Query, results: SearchResults) {
        if !self.entries.contains_key(&query) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.next_sequence += 1;
        self.entries.insert(
            query,
            CacheRecord {
                value: results,
                created_at: Instant::now(),
                sequence: self.next_sequence,
            },
        );
    }

    /// Number of cached entries, including any not yet lazily expired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove the entry that has been resident longest. Linear scan —
    /// capacity is at most a few hundred entries.
    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, record)| record.sequence)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;

    fn query(text: &str) -> Query {
        Query::from_config(text, &SearchConfig::default())
    }

    fn results(total: usize) -> SearchResults {
        SearchResults {
            total_count: total,
            ..Default::default()
        }
    }

    #[test]
    fn miss_on_empty_cache() {
        let mut cache = ResultCache::new(10, Duration::from_secs(60));
        assert!(cache.lookup(&query("schmidt")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_then_hit() {
        let mut cache = ResultCache::new(10, Duration::from_secs(60));
        cache.insert(query("schmidt"), results(3));
        let hit = cache.lookup(&query("schmidt")).expect("should hit");
        assert_eq!(hit.total_count, 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_query_fields_are_distinct_keys() {
        let mut cache = ResultCache::new(10, Duration::from_secs(60));
        let config = SearchConfig::default();
        let a = Query::from_config("schmidt", &config);
        let mut b = a.clone();
        b.include_inactive = true;

        cache.insert(a.clone(), results(1));
        assert!(cache.lookup(&b).is_none());
        assert!(cache.lookup(&a).is_some());
    }

    #[test]
    fn expired_entry_is_a_miss_and_removed() {
        let mut cache = ResultCache::new(10, Duration::from_millis(30));
        cache.insert(query("schmidt"), results(1));
        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.lookup(&query("schmidt")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn overwrite_same_key_does_not_grow() {
        let mut cache = ResultCache::new(10, Duration::from_secs(60));
        cache.insert(query("schmidt"), results(1));
        cache.insert(query("schmidt"), results(2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup(&query("schmidt")).expect("hit").total_count, 2);
    }

    #[test]
    fn full_cache_evicts_oldest_insertion() {
        let mut cache = ResultCache::new(2, Duration::from_secs(60));
        cache.insert(query("first"), results(1));
        cache.insert(query("second"), results(2));
        cache.insert(query("third"), results(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.lookup(&query("first")).is_none());
        assert!(cache.lookup(&query("second")).is_some());
        assert!(cache.lookup(&query("third")).is_some());
    }

    #[test]
    fn lookup_does_not_refresh_age() {
        let mut cache = ResultCache::new(2, Duration::from_secs(60));
        cache.insert(query("first"), results(1));
        cache.insert(query("second"), results(2));

        // A hit on the oldest entry must not save it from eviction.
        assert!(cache.lookup(&query("first")).is_some());
        cache.insert(query("third"), results(3));

        assert!(cache.lookup(&query("first")).is_none());
        assert!(cache.lookup(&query("second")).is_some());
    }

    #[test]
    fn overwrite_of_full_cache_does_not_evict_neighbours() {
        let mut cache = ResultCache::new(2, Duration::from_secs(60));
        cache.insert(query("first"), results(1));
        cache.insert(query("second"), results(2));
        cache.insert(query("second"), results(20));

        assert_eq!(cache.len(), 2);
        assert!(cache.lookup(&query("first")).is_some());
    }

    #[test]
    fn hundred_and_one_distinct_queries_keep_exactly_hundred() {
        let mut cache = ResultCache::new(100, Duration::from_secs(60));
        for i in 0..=100 {
            cache.insert(query(&format!("query-{i}")), results(i));
        }
        assert_eq!(cache.len(), 100);
        // The very first inserted record is the one that was evicted.
        assert!(cache.lookup(&query("query-0")).is_none());
        assert!(cache.lookup(&query("query-1")).is_some());
        assert!(cache.lookup(&query("query-100")).is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = ResultCache::new(10, Duration::from_secs(60));
        cache.insert(query("schmidt"), results(1));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.lookup(&query("schmidt")).is_none());
    }
}
