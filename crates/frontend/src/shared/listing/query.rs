//! Query state and cache keys for list screens.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Search/filter/pagination state of one list screen. Created on page
/// mount, dropped on navigation away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub search: String,
    /// BTreeMap so serialization order is stable and equal filter sets
    /// always produce equal cache keys.
    pub filters: BTreeMap<String, String>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Changing the search term invalidates the positional context, so
    /// the page always snaps back to 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Empty values clear the filter. Resets to page 1, same as search.
    pub fn set_filter(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) if !value.trim().is_empty() => {
                self.filters.insert(name.to_string(), value.to_string());
            }
            _ => {
                self.filters.remove(name);
            }
        }
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// A new page size re-slices the whole result set; treated like a
    /// filter change.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self.page = 1;
    }

    /// Query string sent to the backend
    /// (`?page=..&page_size=..&search=..&<filters>`).
    pub fn request_query(&self) -> String {
        let mut parts = vec![
            format!("page={}", self.page),
            format!("page_size={}", self.page_size),
        ];
        if !self.search.trim().is_empty() {
            parts.push(format!("search={}", urlencoding::encode(self.search.trim())));
        }
        for (name, value) in &self.filters {
            parts.push(format!("{}={}", name, urlencoding::encode(value)));
        }
        format!("?{}", parts.join("&"))
    }
}

/// Stable serialization of `(resource, query)`; the cache is keyed by
/// this and invalidated by resource prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn list(resource: &str, query: &ListQuery) -> Self {
        let qs = serde_qs::to_string(query).unwrap_or_default();
        QueryKey(format!("{}?{}", resource, qs))
    }

    /// Key of the aggregate "stats" strip some screens render above the
    /// table. Lives under the same resource prefix so one invalidation
    /// covers both.
    pub fn stats(resource: &str) -> Self {
        QueryKey(format!("{}/stats", resource))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Re-wrap a stored string key (cache internals).
    pub(crate) fn raw(key: &str) -> Self {
        QueryKey(key.to_string())
    }

    /// Whether this key belongs to `resource`, on an exact path-segment
    /// boundary ("lodgement" must not match "lodgements?...").
    pub fn belongs_to(&self, resource: &str) -> bool {
        self.0 == resource
            || self
                .0
                .strip_prefix(resource)
                .map(|rest| rest.starts_with('?') || rest.starts_with('/'))
                .unwrap_or(false)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_and_filter_changes_reset_the_page() {
        let mut query = ListQuery::default();
        query.set_page(7);
        query.set_search("INV-00");
        assert_eq!(query.page, 1);

        query.set_page(4);
        query.set_filter("status", Some("pending"));
        assert_eq!(query.page, 1);

        query.set_page(3);
        query.set_filter("status", None);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn page_change_touches_nothing_else() {
        let mut query = ListQuery::default();
        query.set_search("abc");
        query.set_page(5);
        assert_eq!(query.page, 5);
        assert_eq!(query.search, "abc");
    }

    #[test]
    fn equal_queries_produce_equal_keys() {
        let mut a = ListQuery::default();
        a.set_filter("status", Some("pending"));
        a.set_filter("bank", Some("Zenith"));

        let mut b = ListQuery::default();
        // insertion order differs; the key must not
        b.set_filter("bank", Some("Zenith"));
        b.set_filter("status", Some("pending"));

        assert_eq!(QueryKey::list("lodgements", &a), QueryKey::list("lodgements", &b));
    }

    #[test]
    fn page_is_part_of_the_key() {
        let mut a = ListQuery::default();
        let mut b = ListQuery::default();
        a.set_page(1);
        b.set_page(2);
        assert_ne!(QueryKey::list("lodgements", &a), QueryKey::list("lodgements", &b));
    }

    #[test]
    fn keys_match_their_resource_on_segment_boundaries() {
        let list = QueryKey::list("lodgements", &ListQuery::default());
        let stats = QueryKey::stats("lodgements");
        assert!(list.belongs_to("lodgements"));
        assert!(stats.belongs_to("lodgements"));
        assert!(!list.belongs_to("lodgement"));
        assert!(!stats.belongs_to("locations"));
    }

    #[test]
    fn request_query_encodes_search_and_filters() {
        let mut query = ListQuery::default();
        query.set_search("INV 7");
        query.set_filter("bank", Some("First Bank"));
        query.set_page(2);
        let qs = query.request_query();
        assert!(qs.starts_with("?page=2&page_size=20"));
        assert!(qs.contains("search=INV%207"));
        assert!(qs.contains("bank=First%20Bank"));
    }
}
