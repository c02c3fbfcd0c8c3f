//! Normalization of the backend's list envelopes.
//!
//! The API is not consistent about how it wraps collections: some
//! endpoints return a bare array, some `{results: [...]}`, some nest
//! that under `data`, and count information may live under `count` or
//! `paginator.count`. Every known shape is a variant here and maps to
//! one uniform `PageData`; anything else degrades to an empty page
//! instead of breaking the list view.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Uniform shape every list screen renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<T> PageData<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
        }
    }
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct Paginator {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ResultsEnvelope<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub paginator: Option<Paginator>,
}

impl<T> ResultsEnvelope<T> {
    fn into_page(self, page_size: usize) -> PageData<T> {
        let total_count = self
            .paginator
            .as_ref()
            .and_then(|p| p.count)
            .or(self.count)
            .unwrap_or(self.results.len() as u64) as usize;
        let total_pages = self
            .paginator
            .as_ref()
            .and_then(|p| p.total_pages)
            .map(|n| n as usize)
            .unwrap_or_else(|| {
                if page_size == 0 {
                    0
                } else {
                    total_count.div_ceil(page_size)
                }
            });
        PageData {
            items: self.results,
            total_count,
            total_pages,
        }
    }
}

/// The envelope shapes the backend is known to produce. Variants are
/// tried in order; adding a new server shape means adding a variant and
/// its mapping arm, nothing else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    /// Bare array: the endpoint does not paginate, the client slices.
    Bare(Vec<T>),
    Results(ResultsEnvelope<T>),
    Nested { data: ResultsEnvelope<T> },
}

impl<T> ListEnvelope<T> {
    fn into_page(self, page_size: usize) -> PageData<T> {
        match self {
            ListEnvelope::Bare(items) => PageData {
                total_count: items.len(),
                total_pages: 1,
                items,
            },
            ListEnvelope::Results(envelope) => envelope.into_page(page_size),
            ListEnvelope::Nested { data } => data.into_page(page_size),
        }
    }
}

/// Map a raw response body to `PageData`. Absent, null and unrecognized
/// bodies all yield the empty page; a malformed response must never
/// take the list view down.
pub fn normalize<T: DeserializeOwned>(raw: Option<Value>, page_size: usize) -> PageData<T> {
    let value = match raw {
        Some(value) if !value.is_null() => value,
        _ => return PageData::empty(),
    };
    match serde_json::from_value::<ListEnvelope<T>>(value) {
        Ok(envelope) => envelope.into_page(page_size),
        Err(_) => PageData::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_arrays_normalize_verbatim_with_one_page() {
        let page: PageData<i64> = normalize(Some(json!([1, 2, 3])), 20);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 1);

        // holds for the empty array too
        let page: PageData<i64> = normalize(Some(json!([])), 20);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn null_and_missing_bodies_yield_the_empty_page() {
        let page: PageData<Value> = normalize(Some(Value::Null), 20);
        assert_eq!(page, PageData::empty());

        let page: PageData<Value> = normalize(None, 20);
        assert_eq!(page, PageData::empty());
    }

    #[test]
    fn results_envelope_derives_pages_from_count() {
        // 12 items on this page, 57 matches overall, 20 per page => 3 pages
        let items: Vec<Value> = (0..12).map(|n| json!({ "id": n })).collect();
        let page: PageData<Value> = normalize(Some(json!({ "results": items, "count": 57 })), 20);
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.total_count, 57);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn paginator_count_wins_over_top_level_count() {
        let raw = json!({
            "results": [{ "id": 1 }],
            "count": 10,
            "paginator": { "count": 41, "total_pages": 5 }
        });
        let page: PageData<Value> = normalize(Some(raw), 20);
        assert_eq!(page.total_count, 41);
        assert_eq!(page.total_pages, 5);
    }

    #[test]
    fn nested_data_envelope_is_unwrapped() {
        let raw = json!({ "data": { "results": [{ "id": 1 }, { "id": 2 }] } });
        let page: PageData<Value> = normalize(Some(raw), 20);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn count_falls_back_to_items_len_when_absent() {
        let raw = json!({ "results": [{ "id": 1 }, { "id": 2 }, { "id": 3 }] });
        let page: PageData<Value> = normalize(Some(raw), 2);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn unrecognized_shapes_degrade_to_empty_instead_of_failing() {
        let page: PageData<Value> = normalize(Some(json!({ "unexpected": true })), 20);
        assert_eq!(page, PageData::empty());

        let page: PageData<Value> = normalize(Some(json!("nonsense")), 20);
        assert_eq!(page, PageData::empty());
    }
}
