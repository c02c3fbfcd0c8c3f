//! Process-wide query cache.
//!
//! Mutations never patch cached pages; they invalidate every key under
//! the resource and force a fresh read. Correctness over latency.

use leptos::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

use super::query::QueryKey;

/// Raw response bodies keyed by serialized query key.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<String, Value>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        self.entries.get(key.as_str()).cloned()
    }

    pub fn insert(&mut self, key: QueryKey, value: Value) {
        self.entries.insert(key.as_str().to_string(), value);
    }

    pub fn invalidate_key(&mut self, key: &QueryKey) {
        self.entries.remove(key.as_str());
    }

    /// Drop every key under the resource: all list pages, all filter
    /// combinations, and the stats key. Returns how many were dropped.
    pub fn invalidate_resource(&mut self, resource: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| !QueryKey::raw(key).belongs_to(resource));
        before - self.entries.len()
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

/// Context service handing the cache to every page. Reads and writes
/// are untracked: the cache feeds controllers, it is not rendered.
#[derive(Clone, Copy)]
pub struct QueryCacheService {
    inner: RwSignal<QueryCache>,
}

impl QueryCacheService {
    pub fn new() -> Self {
        Self {
            inner: RwSignal::new(QueryCache::new()),
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        self.inner.with_untracked(|cache| cache.get(key))
    }

    pub fn insert(&self, key: QueryKey, value: Value) {
        self.inner.update_untracked(|cache| cache.insert(key, value));
    }

    pub fn invalidate_resource(&self, resource: &str) {
        self.inner.update_untracked(|cache| {
            cache.invalidate_resource(resource);
        });
    }

    pub fn clear(&self) {
        self.inner.update_untracked(QueryCache::clear);
    }
}

impl Default for QueryCacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::listing::query::ListQuery;
    use serde_json::json;

    #[test]
    fn invalidating_a_resource_drops_list_and_stats_keys() {
        let mut cache = QueryCache::new();
        let mut query = ListQuery::default();
        cache.insert(QueryKey::list("lodgements", &query), json!([1]));
        query.set_page(2);
        cache.insert(QueryKey::list("lodgements", &query), json!([2]));
        cache.insert(QueryKey::stats("lodgements"), json!({ "pending": 4 }));
        cache.insert(QueryKey::list("locations", &ListQuery::default()), json!([3]));

        let dropped = cache.invalidate_resource("lodgements");
        assert_eq!(dropped, 3);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&QueryKey::list("locations", &ListQuery::default())).is_some());
    }

    #[test]
    fn invalidation_respects_resource_boundaries() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::list("lodgements", &ListQuery::default()), json!([1]));
        let dropped = cache.invalidate_resource("lodgement");
        assert_eq!(dropped, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_overwrites_the_previous_body_for_a_key() {
        let mut cache = QueryCache::new();
        let key = QueryKey::stats("lodgements");
        cache.insert(key.clone(), json!({ "pending": 1 }));
        cache.insert(key.clone(), json!({ "pending": 2 }));
        assert_eq!(cache.get(&key), Some(json!({ "pending": 2 })));
        assert_eq!(cache.len(), 1);
    }
}
